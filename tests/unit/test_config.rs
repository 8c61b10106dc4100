use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use txtrader_client::config::{Config, ConfigKey, ConfigResolver, ConfigSource, GatewayMode};
use txtrader_client::error::AppError;

// Secret directory unique to one test
fn secret_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("txtrader-test-{}", nanoid::nanoid!(10)));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn missing_dir() -> PathBuf {
    std::env::temp_dir().join(format!("txtrader-missing-{}", nanoid::nanoid!(10)))
}

fn full_environment() -> Vec<(&'static str, &'static str)> {
    vec![
        ("TXTRADER_USERNAME", "txuser"),
        ("TXTRADER_PASSWORD", "txpass"),
        ("TXTRADER_API_ACCOUNT", "DEMO.ACCOUNT"),
        ("TXTRADER_ROUTE", "DEMOEUR"),
    ]
}

#[test]
fn test_override_wins_over_every_other_source() {
    let dir = secret_dir();
    fs::write(dir.join("TXTRADER_HOST"), "secret-host\n").unwrap();
    let resolver = ConfigResolver::new()
        .with_secret_dir(&dir)
        .with_environment([("TXTRADER_HOST", "env-host")])
        .with_override(ConfigKey::Host, "override-host");

    assert_eq!(
        resolver.lookup(ConfigKey::Host),
        Some(("override-host".to_string(), ConfigSource::Override))
    );
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_environment_wins_over_secret_file() {
    let dir = secret_dir();
    fs::write(dir.join("TXTRADER_HOST"), "secret-host\n").unwrap();
    let resolver = ConfigResolver::new()
        .with_secret_dir(&dir)
        .with_environment([("TXTRADER_HOST", "env-host")]);

    assert_eq!(resolver.resolve(ConfigKey::Host).unwrap(), "env-host");
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_secret_file_first_line_is_used() {
    let dir = secret_dir();
    fs::write(dir.join("TXTRADER_PASSWORD"), "s3cret\nsecond line\n").unwrap();
    let resolver = ConfigResolver::new().with_secret_dir(&dir);

    assert_eq!(
        resolver.lookup(ConfigKey::Password),
        Some(("s3cret".to_string(), ConfigSource::SecretFile))
    );
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_defaults_apply_when_nothing_is_set() {
    let resolver = ConfigResolver::new().with_secret_dir(missing_dir());

    assert_eq!(resolver.resolve(ConfigKey::Protocol).unwrap(), "http");
    assert_eq!(resolver.resolve(ConfigKey::Host).unwrap(), "localhost");
    assert_eq!(resolver.resolve(ConfigKey::HttpPort).unwrap(), "50080");
    assert_eq!(resolver.resolve(ConfigKey::Mode).unwrap(), "rtx");
    assert_eq!(
        resolver.lookup(ConfigKey::Host).map(|(_, source)| source),
        Some(ConfigSource::Default)
    );
    assert_eq!(resolver.resolve_optional(ConfigKey::Timeout), None);
}

#[test]
fn test_empty_values_fall_through() {
    let resolver = ConfigResolver::new()
        .with_secret_dir(missing_dir())
        .with_environment([("TXTRADER_HOST", "  ")])
        .with_override(ConfigKey::Host, "");

    assert_eq!(resolver.resolve(ConfigKey::Host).unwrap(), "localhost");
}

#[test]
fn test_missing_required_key_names_the_variable() {
    let resolver = ConfigResolver::new().with_secret_dir(missing_dir());

    match resolver.resolve(ConfigKey::ApiAccount) {
        Err(AppError::MissingConfig { key }) => assert_eq!(key, "TXTRADER_API_ACCOUNT"),
        other => panic!("expected missing config, got {other:?}"),
    }
}

#[test]
fn test_config_resolves_from_environment() {
    let mut env = full_environment();
    env.push(("TXTRADER_MODE", "TWS"));
    env.push(("TXTRADER_TIMEOUT", "2.5"));
    let resolver = ConfigResolver::new()
        .with_secret_dir(missing_dir())
        .with_environment(env);

    let config = Config::resolve(&resolver).unwrap();
    assert_eq!(config.username, "txuser");
    assert_eq!(config.account, "DEMO.ACCOUNT");
    assert_eq!(config.route, "DEMOEUR");
    assert_eq!(config.mode, GatewayMode::Tws);
    assert_eq!(config.port, 50080);
    assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    assert_eq!(config.base_url(), "http://localhost:50080");
}

#[test]
fn test_config_fails_without_route() {
    let env: Vec<_> = full_environment()
        .into_iter()
        .filter(|(k, _)| *k != "TXTRADER_ROUTE")
        .collect();
    let resolver = ConfigResolver::new()
        .with_secret_dir(missing_dir())
        .with_environment(env);

    let err = Config::resolve(&resolver).unwrap_err();
    assert_eq!(err.kind(), "ConfigError");
    assert_eq!(err.to_string(), "missing config value TXTRADER_ROUTE");
}

#[test]
fn test_config_rejects_bad_port() {
    let resolver = ConfigResolver::new()
        .with_secret_dir(missing_dir())
        .with_environment(full_environment())
        .with_override(ConfigKey::HttpPort, "not-a-port");

    assert!(matches!(
        Config::resolve(&resolver),
        Err(AppError::InvalidConfig { ref key, .. }) if key == "TXTRADER_HTTP_PORT"
    ));
}

#[test]
fn test_config_rejects_unknown_mode_and_protocol() {
    let base = ConfigResolver::new()
        .with_secret_dir(missing_dir())
        .with_environment(full_environment());

    assert!(Config::resolve(&base.clone().with_override(ConfigKey::Mode, "fix")).is_err());
    assert!(Config::resolve(&base.clone().with_override(ConfigKey::Protocol, "ftp")).is_err());
    assert!(Config::resolve(&base.with_override(ConfigKey::Timeout, "0")).is_err());
}

#[test]
fn test_with_overrides_skips_none() {
    let resolver = ConfigResolver::new()
        .with_secret_dir(missing_dir())
        .with_overrides([
            (ConfigKey::Host, Some("gateway")),
            (ConfigKey::HttpPort, None),
        ]);

    assert_eq!(resolver.resolve(ConfigKey::Host).unwrap(), "gateway");
    assert_eq!(resolver.resolve(ConfigKey::HttpPort).unwrap(), "50080");
}

#[test]
fn test_config_key_names() {
    assert_eq!(ConfigKey::HttpPort.env_name(), "TXTRADER_HTTP_PORT");
    assert_eq!("HOST".parse::<ConfigKey>().unwrap(), ConfigKey::Host);
    assert_eq!("TXTRADER_API_ACCOUNT".parse::<ConfigKey>().unwrap(), ConfigKey::ApiAccount);
    assert!("NOPE".parse::<ConfigKey>().is_err());
}

#[test]
fn test_gateway_mode_account_value_field() {
    assert_eq!(GatewayMode::Rtx.account_value_field(), "CASH_BALANCE");
    assert_eq!(GatewayMode::Tws.account_value_field(), "LiquidationValue");
    assert_eq!(GatewayMode::default(), GatewayMode::Rtx);
}

#[test]
fn test_config_serialization_hides_password() {
    let resolver = ConfigResolver::new()
        .with_secret_dir(missing_dir())
        .with_environment(full_environment());
    let config = Config::resolve(&resolver).unwrap();

    let json = serde_json::to_value(&config).unwrap();
    assert!(json.get("password").is_none());
    assert_eq!(json["username"], "txuser");
    assert!(!config.to_string().contains("txpass"));
}
