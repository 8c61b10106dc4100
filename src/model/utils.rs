/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use serde_json::Value;

/// Truthiness of a gateway response
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are false; everything else is true.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Symbols are upper-cased at the command line boundary
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Parses a route argument given as text
///
/// Text holding a JSON object or array is sent as structured JSON, anything
/// else as a plain route name.
#[must_use]
pub fn parse_route(route: &str) -> Value {
    let trimmed = route.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(parsed) = serde_json::from_str::<Value>(trimmed) {
            return parsed;
        }
    }
    Value::String(route.to_string())
}
