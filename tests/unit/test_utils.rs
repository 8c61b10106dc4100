use serde_json::json;
use std::fs;
use txtrader_client::model::utils::{is_truthy, normalize_symbol, parse_route};
use txtrader_client::utils::config::{get_env_or_default, non_empty, read_first_line};

#[test]
fn test_read_first_line_strips_trailing_whitespace() {
    let path = std::env::temp_dir().join(format!("txtrader-line-{}", nanoid::nanoid!(10)));
    fs::write(&path, "value  \r\nnext\n").unwrap();
    assert_eq!(read_first_line(&path), Some("value".to_string()));
    fs::remove_file(&path).unwrap();
    assert_eq!(read_first_line(&path), None);
}

#[test]
fn test_non_empty() {
    assert_eq!(non_empty(Some(" ".to_string())), None);
    assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
    assert_eq!(non_empty(None), None);
}

#[test]
fn test_get_env_or_default_with_missing_var() {
    let result: String = get_env_or_default("TXTRADER_TEST_MISSING_VAR", "default".to_string());
    assert_eq!(result, "default");
}

#[test]
fn test_is_truthy() {
    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!("ok")));
    assert!(is_truthy(&json!({"a": 1})));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!("")));
    assert!(!is_truthy(&json!([])));
    assert!(!is_truthy(&json!(null)));
}

#[test]
fn test_normalize_symbol() {
    assert_eq!(normalize_symbol(" ibm "), "IBM");
}

#[test]
fn test_parse_route() {
    assert_eq!(parse_route("DEMOEUR"), json!("DEMOEUR"));
    assert_eq!(parse_route(r#"{"R": {"x": 1}}"#), json!({"R": {"x": 1}}));
    assert_eq!(parse_route("{broken"), json!("{broken"));
}
