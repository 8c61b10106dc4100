/// Prefix prepended to every configuration key to form its environment / secret-file name
pub const ENV_PREFIX: &str = "TXTRADER_";
/// Well-known directory holding one secret file per namespaced configuration key
pub const SECRET_DIR: &str = "/etc/txtrader";
/// Default transport protocol for the gateway connection
pub const DEFAULT_PROTOCOL: &str = "http";
/// Default gateway host name
pub const DEFAULT_HOST: &str = "localhost";
/// Default gateway JSON API port
pub const DEFAULT_HTTP_PORT: &str = "50080";
/// Default gateway mode
pub const DEFAULT_MODE: &str = "rtx";
/// User agent string sent with every request to identify this client to the gateway
pub const USER_AGENT: &str = concat!("txtrader-client/", env!("CARGO_PKG_VERSION"));
/// Environment variable selecting the log level of the command line tool
pub const LOG_LEVEL_ENV: &str = "LOGLEVEL";
/// Account field carrying the account value on an RTX gateway
pub const RTX_ACCOUNT_VALUE_FIELD: &str = "CASH_BALANCE";
/// Account field carrying the account value on a TWS gateway
pub const TWS_ACCOUNT_VALUE_FIELD: &str = "LiquidationValue";
