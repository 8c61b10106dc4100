/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # TxTrader Client Prelude
//!
//! Brings the client, its configuration, the service traits and the request
//! types into scope with a single import.
//!
//! ```rust,no_run
//! use txtrader_client::prelude::*;
//!
//! let client = Client::from_env()?;
//! let order = OrderRequest::limit("DEMO.ACCOUNT", "DEMOEUR", "IBM", 120.5, 100);
//! client.submit_order(&order)?;
//! # Ok::<(), AppError>(())
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Resolved connection settings and their resolver
pub use crate::config::{Config, ConfigKey, ConfigResolver, ConfigSource, GatewayMode};

/// Library version information
pub use crate::{VERSION, version};

/// Logger setup
pub use crate::utils::logger::setup_logger;

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// CLIENT AND SERVICES
// ============================================================================

/// Gateway client
pub use crate::application::client::Client;

/// Operation registry
pub use crate::application::commands::Command;

/// Service traits implemented by the client
pub use crate::application::interfaces::{
    account::AccountService, market::MarketService, order::OrderService, server::ServerService,
};

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// Bar query types
pub use crate::model::bars::{BarBound, BarPeriod, BarRangeSyntax, BarsRequest, PeriodArg};

/// Order body
pub use crate::model::requests::OrderRequest;

/// Order vocabulary
pub use crate::presentation::order::{OrderAction, OrderPrice, OrderType};

// ============================================================================
// EXTERNAL RE-EXPORTS
// ============================================================================

/// Untyped JSON replies
pub use serde_json::Value;
