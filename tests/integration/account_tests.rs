use crate::common::{create_test_client, mock_get, mock_post, test_resolver};
use mockito::Server;
use serde_json::json;
use txtrader_client::prelude::*;

#[test]
fn test_current_account_starts_from_config() {
    let server = Server::new();
    let client = create_test_client(&server);
    assert_eq!(client.current_account(), "DEMO.ACCOUNT");
}

#[test]
fn test_set_account_caches_on_success() {
    let mut server = Server::new();
    let mock = mock_post(&mut server, "set_account", json!({"account": "LIVE.ACCOUNT"}), "true");

    let mut client = create_test_client(&server);
    assert_eq!(client.set_account("LIVE.ACCOUNT").unwrap(), json!(true));
    assert_eq!(client.current_account(), "LIVE.ACCOUNT");
    mock.assert();
}

#[test]
fn test_set_account_keeps_previous_on_refusal() {
    let mut server = Server::new();
    let mock = mock_post(&mut server, "set_account", json!({"account": "OTHER"}), "false");

    let mut client = create_test_client(&server);
    assert_eq!(client.set_account("OTHER").unwrap(), json!(false));
    assert_eq!(client.current_account(), "DEMO.ACCOUNT");
    mock.assert();
}

#[test]
fn test_query_account_fields() {
    let mut server = Server::new();
    let with_fields = mock_post(
        &mut server,
        "query_account",
        json!({"account": "DEMO.ACCOUNT", "fields": "CASH_BALANCE,EQUITY"}),
        r#"{"CASH_BALANCE": 1000.0, "EQUITY": 1500.0}"#,
    );

    let client = create_test_client(&server);
    let reply = client
        .query_account("DEMO.ACCOUNT", Some("CASH_BALANCE,EQUITY"))
        .unwrap();
    assert_eq!(reply["EQUITY"], json!(1500.0));
    with_fields.assert();

    let all_fields = mock_post(
        &mut server,
        "query_account",
        json!({"account": "DEMO.ACCOUNT"}),
        "{}",
    );
    client.query_account("DEMO.ACCOUNT", None).unwrap();
    all_fields.assert();
}

#[test]
fn test_account_value_field_follows_mode() {
    let mut server = Server::new();
    let mock = mock_post(
        &mut server,
        "query_account",
        json!({"account": "DEMO.ACCOUNT", "fields": "LiquidationValue"}),
        r#"{"LiquidationValue": 25000.0}"#,
    );

    let resolver = test_resolver(&server).with_override(ConfigKey::Mode, "tws");
    let client = Client::from_resolver(&resolver).unwrap();
    client.query_account_value("DEMO.ACCOUNT").unwrap();
    mock.assert();
}

#[test]
fn test_query_positions() {
    let mut server = Server::new();
    let reply = json!({"DEMO.ACCOUNT": {"IBM": 100}});
    let mock = mock_get(&mut server, "query_positions", &reply.to_string());

    let client = create_test_client(&server);
    assert_eq!(client.query_positions().unwrap(), reply);
    mock.assert();
}
