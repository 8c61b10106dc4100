use crate::error::AppError;
use serde_json::Value;

/// Gateway housekeeping endpoints
pub trait ServerService {
    /// Returns a dict with brief documentation for each gateway call
    fn help(&self) -> Result<Value, AppError>;

    /// Returns a string describing the current gateway connection status
    fn status(&self) -> Result<Value, AppError>;

    /// Returns the release version of the running gateway
    fn version(&self) -> Result<Value, AppError>;

    /// Returns the start time and elapsed time of the running gateway
    fn uptime(&self) -> Result<Value, AppError>;

    /// Returns the latest datafeed time as `YYYY-MM-DD HH:MM:SS`
    fn time(&self) -> Result<Value, AppError>;

    /// Requests gateway shutdown, writing `message` to its log
    fn shutdown(&self, message: &str) -> Result<Value, AppError>;

    /// Logs the gateway on to the broker
    fn gateway_logon(&self, username: &str, password: &str) -> Result<Value, AppError>;

    /// Logs the gateway off from the broker
    fn gateway_logoff(&self) -> Result<Value, AppError>;
}
