use crate::common::{create_test_client, mock_get, mock_post};
use mockito::Server;
use serde_json::json;
use txtrader_client::prelude::*;

#[test]
fn test_command_executes_against_gateway() {
    let mut server = Server::new();
    let mock = mock_post(&mut server, "query_symbol", json!({"symbol": "IBM"}), r#"{"last": 120.5}"#);

    let mut client = create_test_client(&server);
    let command = Command::from_json("query_symbol", &json!({"symbol": "ibm"})).unwrap();
    assert_eq!(command.execute(&mut client).unwrap(), json!({"last": 120.5}));
    mock.assert();
}

#[test]
fn test_set_account_command_updates_client() {
    let mut server = Server::new();
    let mock = mock_post(&mut server, "set_account", json!({"account": "LIVE"}), "true");

    let mut client = create_test_client(&server);
    Command::SetAccount {
        account: "LIVE".to_string(),
    }
    .execute(&mut client)
    .unwrap();
    assert_eq!(client.current_account(), "LIVE");
    mock.assert();
}

#[test]
fn test_query_bars_command_checks_client_syntax() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/query_bars").expect(0).create();

    let mut client = create_test_client(&server).with_bar_syntax(BarRangeSyntax::Absolute);
    let command = Command::from_json(
        "query_bars",
        &json!({"symbol": "ibm", "period": 5, "start": "-5", "end": "."}),
    )
    .unwrap();
    assert!(matches!(command.execute(&mut client), Err(AppError::Value(_))));
    mock.assert();
}

#[test]
fn test_help_command() {
    let mut server = Server::new();
    let mock = mock_get(&mut server, "help", r#"{"status": "status: connection status"}"#);

    let mut client = create_test_client(&server);
    let help = Command::Help.execute(&mut client).unwrap();
    assert_eq!(help["status"], json!("status: connection status"));
    mock.assert();
}
