use crate::error::AppError;
use crate::model::bars::{BarBound, PeriodArg};
use serde_json::Value;

/// Symbol subscription and market data queries
///
/// Symbols are passed through unchanged; callers normalise case.
pub trait MarketService {
    /// Subscribes to a symbol for price updates, bar data and order entry
    fn add_symbol(&self, symbol: &str) -> Result<Value, AppError>;

    /// Drops a symbol subscription
    fn del_symbol(&self, symbol: &str) -> Result<Value, AppError>;

    /// Lists the subscribed symbols
    fn query_symbols(&self) -> Result<Value, AppError>;

    /// Returns current data for every subscribed symbol
    fn query_all_symbols(&self) -> Result<Value, AppError>;

    /// Returns current data for one symbol
    fn query_symbol(&self, symbol: &str) -> Result<Value, AppError>;

    /// Returns raw feed data for one symbol
    fn query_symbol_data(&self, symbol: &str) -> Result<Value, AppError>;

    /// Returns the live bars for one symbol
    fn query_symbol_bars(&self, symbol: &str) -> Result<Value, AppError>;

    /// Returns historical bars
    ///
    /// The period and both range bounds are validated before anything is sent.
    ///
    /// # Arguments
    /// * `symbol` - Ticker symbol
    /// * `period` - Minutes, or text starting with d / w / m
    /// * `start` - `YYYY-MM-DD HH:MM[:SS]`, an integer, `.` or `-N`
    /// * `end` - Same forms as `start`
    fn query_bars<P, S, E>(&self, symbol: &str, period: P, start: S, end: E) -> Result<Value, AppError>
    where
        P: Into<PeriodArg>,
        S: Into<BarBound>,
        E: Into<BarBound>;

    /// Sets the primary exchange used for a symbol
    fn set_primary_exchange(&self, symbol: &str, exchange: &str) -> Result<Value, AppError>;
}
