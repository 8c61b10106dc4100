/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # TxTrader Client
//!
//! Client library and command line tool for the TxTrader trading gateway JSON API.
//!
//! ## Configuration
//!
//! Every setting is looked up, in order, from an explicit override, the
//! `TXTRADER_<KEY>` environment variable, the first line of the secret file
//! `/etc/txtrader/TXTRADER_<KEY>`, and a built-in default:
//!
//! | Key | Default |
//! |-----|---------|
//! | `TXTRADER_PROTOCOL` | `http` |
//! | `TXTRADER_HOST` | `localhost` |
//! | `TXTRADER_HTTP_PORT` | `50080` |
//! | `TXTRADER_USERNAME` | required |
//! | `TXTRADER_PASSWORD` | required |
//! | `TXTRADER_API_ACCOUNT` | required |
//! | `TXTRADER_ROUTE` | required |
//! | `TXTRADER_MODE` | `rtx` |
//! | `TXTRADER_TIMEOUT` | none |
//!
//! A `.env` file in the working directory is loaded into the environment first.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use txtrader_client::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     setup_logger(false);
//!     let client = Client::from_env()?;
//!     println!("{}", client.status()?);
//!     println!("{}", client.query_bars("AAPL", 5, "2024-01-02 09:30", ".")?);
//!     Ok(())
//! }
//! ```
//!
//! Every operation is also reachable by name through
//! [`application::commands::Command::from_json`], which applies the same
//! argument checks to untyped JSON input.

/// Client, configuration, command registry and service interfaces
pub mod application;

/// Command line interface of the `txtrader` binary
pub mod cli;

/// Library-wide constants
pub mod constants;

/// Error type shared by every operation
pub mod error;

/// Wire-level types and the HTTP transport
pub mod model;

/// Convenience re-exports
pub mod prelude;

/// Order vocabulary
pub mod presentation;

/// Logging and environment helpers
pub mod utils;

pub use application::config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
