/// Account service interface
pub mod account;
/// Market data service interface
pub mod market;
/// Order service interface
pub mod order;
/// Gateway housekeeping interface
pub mod server;
