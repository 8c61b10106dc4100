use crate::common::{AUTHORIZATION, create_test_client, mock_get, mock_post};
use mockito::Server;
use serde_json::json;
use txtrader_client::prelude::*;

#[test]
fn test_status_uses_bodyless_get() {
    let mut server = Server::new();
    let mock = mock_get(&mut server, "status", r#""Up""#);

    let client = create_test_client(&server);
    assert_eq!(client.status().unwrap(), json!("Up"));
    mock.assert();
}

#[test]
fn test_requests_ask_for_connection_close() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/uptime")
        .match_header("authorization", AUTHORIZATION)
        .match_header("connection", "close")
        .with_status(200)
        .with_body(r#""started 2026-10-18 09:00:00""#)
        .create();

    let client = create_test_client(&server);
    assert_eq!(client.uptime().unwrap(), json!("started 2026-10-18 09:00:00"));
    mock.assert();
}

#[test]
fn test_reply_is_returned_unmodified() {
    let mut server = Server::new();
    let reply = json!({"txtrader": "1.2.0", "flags": {"debug": false}, "list": [1, "two", null]});
    let mock = mock_get(&mut server, "version", &reply.to_string());

    let client = create_test_client(&server);
    assert_eq!(client.version().unwrap(), reply);
    mock.assert();
}

#[test]
fn test_shutdown_sends_message() {
    let mut server = Server::new();
    let mock = mock_post(&mut server, "shutdown", json!({"message": "maintenance"}), "true");

    let client = create_test_client(&server);
    assert_eq!(client.shutdown("maintenance").unwrap(), json!(true));
    mock.assert();
}

#[test]
fn test_gateway_logon_sends_credentials() {
    let mut server = Server::new();
    let mock = mock_post(
        &mut server,
        "gateway_logon",
        json!({"username": "broker", "password": "pw"}),
        r#""logged on""#,
    );

    let client = create_test_client(&server);
    client.gateway_logon("broker", "pw").unwrap();
    mock.assert();
}

#[test]
fn test_non_success_status_is_http_error() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/time")
        .with_status(500)
        .with_body("internal failure")
        .create();

    let client = create_test_client(&server);
    match client.time() {
        Err(AppError::Http { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "internal failure");
        }
        other => panic!("expected http error, got {other:?}"),
    }
    mock.assert();
}

#[test]
fn test_invalid_json_reply_is_json_error() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/status")
        .with_status(200)
        .with_body("<html>")
        .create();

    let client = create_test_client(&server);
    let err = client.status().unwrap_err();
    assert_eq!(err.kind(), "JSONError");
    mock.assert();
}

#[test]
fn test_unreachable_gateway_is_network_error() {
    let server = Server::new();
    let resolver = crate::common::test_resolver(&server).with_override(ConfigKey::HttpPort, "1");
    let client = Client::from_resolver(&resolver).unwrap();

    let err = client.status().unwrap_err();
    assert_eq!(err.kind(), "NetworkError");
}
