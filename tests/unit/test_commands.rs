use serde_json::{Value, json};
use txtrader_client::application::commands::Command;
use txtrader_client::error::AppError;
use txtrader_client::model::bars::{BarBound, BarPeriod};
use txtrader_client::model::requests::OrderRequest;

#[test]
fn test_every_name_round_trips() {
    let args = json!({
        "message": "bye",
        "username": "u",
        "password": "p",
        "symbol": "ibm",
        "period": 5,
        "start": "2024-01-02 09:30",
        "end": ".",
        "exchange": "NYSE",
        "account": "ACCT",
        "id": "ORD1",
        "route": "DEMOEUR",
        "tag": "T1",
        "quantity": 10,
        "limit_price": 1.5,
        "stop_price": 1.25
    });
    for name in Command::NAMES {
        let command = Command::from_json(name, &args).unwrap();
        assert_eq!(command.name(), name);
    }
}

#[test]
fn test_no_argument_commands_accept_null() {
    assert_eq!(Command::from_json("status", &Value::Null).unwrap(), Command::Status);
    assert_eq!(
        Command::from_json("global_cancel", &json!({})).unwrap(),
        Command::GlobalCancel
    );
}

#[test]
fn test_unknown_command() {
    assert!(matches!(
        Command::from_json("launch_rockets", &Value::Null),
        Err(AppError::UnknownCommand(name)) if name == "launch_rockets"
    ));
}

#[test]
fn test_symbols_are_upper_cased() {
    assert_eq!(
        Command::from_json("add_symbol", &json!({"symbol": "msft"})).unwrap(),
        Command::AddSymbol {
            symbol: "MSFT".to_string()
        }
    );
}

#[test]
fn test_type_errors_for_untyped_input() {
    let cases = [
        ("query_account", json!({"account": "ACCT", "fields": ["a", "b"]})),
        ("add_symbol", json!({"symbol": 42})),
        ("add_symbol", json!({})),
        ("market_order", json!({"account": "A", "route": "R", "symbol": "S", "quantity": "ten"})),
        ("query_bars", json!({"symbol": "S", "period": 5, "start": true, "end": "."})),
        ("status", json!([1, 2])),
    ];
    for (name, args) in cases {
        let err = Command::from_json(name, &args).unwrap_err();
        assert_eq!(err.kind(), "TypeError", "{name} {args}");
    }
}

#[test]
fn test_query_bars_from_json() {
    let command = Command::from_json(
        "query_bars",
        &json!({"symbol": "aapl", "period": "week", "start": -5, "end": "."}),
    )
    .unwrap();
    match command {
        Command::QueryBars(request) => {
            assert_eq!(request.symbol, "AAPL");
            assert_eq!(request.period, BarPeriod::Week);
            assert_eq!(request.start, BarBound::Integer(-5));
            assert_eq!(request.end, BarBound::Text(".".to_string()));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_order_from_json_accepts_numeric_strings() {
    let command = Command::from_json(
        "stage_limit_order",
        &json!({
            "tag": "T1",
            "account": "ACCT",
            "route": "R",
            "symbol": "ibm",
            "limit_price": "101.5",
            "quantity": "-20"
        }),
    )
    .unwrap();
    assert_eq!(
        command,
        Command::from(OrderRequest::limit("ACCT", "R", "IBM", 101.5, -20).staged("T1"))
    );
}

#[test]
fn test_set_order_route_parses_json_text() {
    let command = Command::from_json(
        "set_order_route",
        &json!({"route": "{\"DEMO\": {\"algo\": \"VWAP\"}}"}),
    )
    .unwrap();
    assert_eq!(
        command,
        Command::SetOrderRoute {
            route: json!({"DEMO": {"algo": "VWAP"}})
        }
    );
    assert_eq!(
        Command::from_json("set_order_route", &json!({"route": "DEMOEUR"})).unwrap(),
        Command::SetOrderRoute {
            route: json!("DEMOEUR")
        }
    );
}

#[test]
fn test_empty_fields_mean_all_fields() {
    assert_eq!(
        Command::from_json("query_account", &json!({"account": "ACCT", "fields": ""})).unwrap(),
        Command::QueryAccount {
            account: "ACCT".to_string(),
            fields: None
        }
    );
}
