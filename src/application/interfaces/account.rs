use crate::error::AppError;
use serde_json::Value;

/// Interface for the account endpoints
pub trait AccountService {
    /// Lists the trading accounts known to the gateway
    fn query_accounts(&self) -> Result<Value, AppError>;

    /// Gets account data
    ///
    /// # Arguments
    /// * `account` - Account name
    /// * `fields` - Comma separated field list; `None` or empty for all fields
    fn query_account(&self, account: &str, fields: Option<&str>) -> Result<Value, AppError>;

    /// Gets the account-value field appropriate to the gateway mode
    fn query_account_value(&self, account: &str) -> Result<Value, AppError>;

    /// Selects the active trading account
    ///
    /// The cached current account changes only when the gateway answers with
    /// a truthy value.
    fn set_account(&mut self, account: &str) -> Result<Value, AppError>;

    /// Currently selected account
    fn current_account(&self) -> &str;

    /// Returns positions keyed by account
    fn query_positions(&self) -> Result<Value, AppError>;
}
