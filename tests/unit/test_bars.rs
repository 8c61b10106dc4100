use serde_json::json;
use txtrader_client::error::AppError;
use txtrader_client::model::bars::{BarBound, BarPeriod, BarRangeSyntax, BarsRequest, PeriodArg};

#[test]
fn test_period_accepts_minutes_and_calendar_units() {
    assert_eq!(BarPeriod::parse(&PeriodArg::from(5)).unwrap(), BarPeriod::Minutes(5));
    assert_eq!(BarPeriod::parse(&PeriodArg::from("15")).unwrap(), BarPeriod::Minutes(15));
    assert_eq!(BarPeriod::parse(&PeriodArg::from("day")).unwrap(), BarPeriod::Day);
    assert_eq!(BarPeriod::parse(&PeriodArg::from("W")).unwrap(), BarPeriod::Week);
    assert_eq!(BarPeriod::parse(&PeriodArg::from("Monthly")).unwrap(), BarPeriod::Month);
}

#[test]
fn test_period_rejects_other_text() {
    let err = BarPeriod::parse(&PeriodArg::from("hour")).unwrap_err();
    assert!(matches!(err, AppError::Value(_)));
    assert!(err.to_string().contains("DAY,WEEK,MONTH"));
}

#[test]
fn test_period_rejects_non_positive_minutes() {
    assert!(matches!(BarPeriod::parse(&PeriodArg::from(0)), Err(AppError::Value(_))));
    assert!(matches!(BarPeriod::parse(&PeriodArg::from(-5)), Err(AppError::Value(_))));
}

#[test]
fn test_period_from_json_type_errors() {
    assert!(matches!(BarPeriod::from_json(&json!(1.5)), Err(AppError::Type(_))));
    assert!(matches!(BarPeriod::from_json(&json!([1])), Err(AppError::Type(_))));
    assert_eq!(BarPeriod::from_json(&json!("d")).unwrap(), BarPeriod::Day);
}

#[test]
fn test_period_serializes_as_sent_to_gateway() {
    assert_eq!(serde_json::to_value(BarPeriod::Minutes(5)).unwrap(), json!(5));
    assert_eq!(serde_json::to_value(BarPeriod::Week).unwrap(), json!("W"));
}

#[test]
fn test_bound_accepts_timestamps_in_both_syntaxes() {
    for syntax in [BarRangeSyntax::Absolute, BarRangeSyntax::Extended] {
        assert!(BarBound::from("2024-01-02 09:30").validate("start", syntax).is_ok());
        assert!(BarBound::from("2024-01-02 09:30:15").validate("start", syntax).is_ok());
    }
}

#[test]
fn test_bound_relative_forms_depend_on_syntax() {
    let extended = BarRangeSyntax::Extended;
    assert!(BarBound::from(".").validate("end", extended).is_ok());
    assert!(BarBound::from("-10").validate("start", extended).is_ok());
    assert!(BarBound::from("-").validate("start", extended).is_ok());

    let absolute = BarRangeSyntax::Absolute;
    assert!(BarBound::from(".").validate("end", absolute).is_err());
    assert!(BarBound::from("-10").validate("start", absolute).is_err());
}

#[test]
fn test_bound_error_names_the_field() {
    let err = BarBound::from("bad-format")
        .validate("end", BarRangeSyntax::Extended)
        .unwrap_err();
    assert!(matches!(err, AppError::Value(_)));
    assert!(err.to_string().contains("end"));
    assert!(BarBound::from("2024-01-02").validate("start", BarRangeSyntax::Extended).is_err());
}

#[test]
fn test_integer_bound_passes_through() {
    assert!(BarBound::from(-3_i64).validate("start", BarRangeSyntax::Absolute).is_ok());
    assert!(matches!(BarBound::from_json("start", &json!(true)), Err(AppError::Type(_))));
}

#[test]
fn test_bars_request_body() {
    let request = BarsRequest::new(
        "AAPL",
        5,
        "2024-01-02 09:30",
        ".",
        BarRangeSyntax::Extended,
    )
    .unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"symbol": "AAPL", "period": 5, "start": "2024-01-02 09:30", "end": "."})
    );
}

#[test]
fn test_bars_request_rejects_bad_bounds() {
    let result = BarsRequest::new("AAPL", "D", "yesterday", ".", BarRangeSyntax::Extended);
    assert!(matches!(result, Err(AppError::Value(_))));
}
