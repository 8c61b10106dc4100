/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Client for the TxTrader gateway JSON API
//!
//! One method per gateway endpoint. Arguments are validated locally, sent in a
//! single blocking round trip, and the decoded JSON reply is returned as is.
//!
//! # Example
//! ```ignore
//! use txtrader_client::prelude::*;
//!
//! let mut client = Client::from_env()?;
//! println!("{}", client.status()?);
//! let order = client.market_order("DEMO.ACCOUNT", "DEMOEUR", "GOOG", 10)?;
//! ```

use crate::application::config::{Config, ConfigResolver, GatewayMode};
use crate::application::interfaces::account::AccountService;
use crate::application::interfaces::market::MarketService;
use crate::application::interfaces::order::OrderService;
use crate::application::interfaces::server::ServerService;
use crate::error::AppError;
use crate::model::bars::{BarBound, BarPeriod, BarRangeSyntax, BarsRequest, PeriodArg};
use crate::model::http::HttpClient;
use crate::model::requests::{
    AccountRequest, IdRequest, LogonRequest, OrderRequest, PrimaryExchangeRequest, RouteRequest,
    ShutdownRequest, SymbolRequest,
};
use crate::model::utils::is_truthy;
use serde_json::Value;
use tracing::{debug, info, warn};

/// TxTrader gateway client
///
/// Holds the resolved configuration and the currently selected account. Not
/// meant to be shared across threads; use one client per thread.
pub struct Client {
    config: Config,
    http_client: HttpClient,
    account: String,
    bar_syntax: BarRangeSyntax,
}

impl Client {
    /// Creates a client for a resolved configuration
    ///
    /// # Errors
    /// [`AppError::Network`] if the HTTP transport cannot be built.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http_client = HttpClient::new(&config)?;
        info!(
            "TxTrader client for {} (mode {})",
            http_client.base_url(),
            config.mode
        );
        Ok(Self {
            account: config.account.clone(),
            config,
            http_client,
            bar_syntax: BarRangeSyntax::default(),
        })
    }

    /// Resolves the configuration through `resolver`, then creates the client
    ///
    /// # Errors
    /// Any configuration error; no client is produced for a partial configuration.
    pub fn from_resolver(resolver: &ConfigResolver) -> Result<Self, AppError> {
        Self::new(Config::resolve(resolver)?)
    }

    /// Creates a client configured from the environment, secret files and defaults
    ///
    /// # Errors
    /// Any configuration error.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_resolver(&ConfigResolver::from_env())
    }

    /// Selects which bar-range spellings `query_bars` accepts
    #[must_use]
    pub fn with_bar_syntax(mut self, syntax: BarRangeSyntax) -> Self {
        self.bar_syntax = syntax;
        self
    }

    /// Resolved configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default order route from the configuration
    pub fn route(&self) -> &str {
        &self.config.route
    }

    /// Gateway mode from the configuration
    pub fn mode(&self) -> GatewayMode {
        self.config.mode
    }

    /// Bar-range syntax in use
    pub fn bar_syntax(&self) -> BarRangeSyntax {
        self.bar_syntax
    }

    /// Validated bar query
    ///
    /// # Errors
    /// [`AppError::Value`] for a malformed range bound.
    pub fn query_bars_request(&self, request: &BarsRequest) -> Result<Value, AppError> {
        request.start.validate("start", self.bar_syntax)?;
        request.end.validate("end", self.bar_syntax)?;
        self.http_client.post("query_bars", request)
    }

    fn call(&self, operation: &str) -> Result<Value, AppError> {
        self.http_client.get(operation)
    }
}

impl ServerService for Client {
    fn help(&self) -> Result<Value, AppError> {
        self.call("help")
    }

    fn status(&self) -> Result<Value, AppError> {
        self.call("status")
    }

    fn version(&self) -> Result<Value, AppError> {
        self.call("version")
    }

    fn uptime(&self) -> Result<Value, AppError> {
        self.call("uptime")
    }

    fn time(&self) -> Result<Value, AppError> {
        self.call("time")
    }

    fn shutdown(&self, message: &str) -> Result<Value, AppError> {
        warn!("Requesting gateway shutdown: {}", message);
        self.http_client
            .post("shutdown", &ShutdownRequest { message })
    }

    fn gateway_logon(&self, username: &str, password: &str) -> Result<Value, AppError> {
        self.http_client
            .post("gateway_logon", &LogonRequest { username, password })
    }

    fn gateway_logoff(&self) -> Result<Value, AppError> {
        self.call("gateway_logoff")
    }
}

impl MarketService for Client {
    fn add_symbol(&self, symbol: &str) -> Result<Value, AppError> {
        self.http_client.post("add_symbol", &SymbolRequest { symbol })
    }

    fn del_symbol(&self, symbol: &str) -> Result<Value, AppError> {
        self.http_client.post("del_symbol", &SymbolRequest { symbol })
    }

    fn query_symbols(&self) -> Result<Value, AppError> {
        self.call("query_symbols")
    }

    fn query_all_symbols(&self) -> Result<Value, AppError> {
        self.call("query_all_symbols")
    }

    fn query_symbol(&self, symbol: &str) -> Result<Value, AppError> {
        self.http_client.post("query_symbol", &SymbolRequest { symbol })
    }

    fn query_symbol_data(&self, symbol: &str) -> Result<Value, AppError> {
        self.http_client
            .post("query_symbol_data", &SymbolRequest { symbol })
    }

    fn query_symbol_bars(&self, symbol: &str) -> Result<Value, AppError> {
        self.http_client
            .post("query_symbol_bars", &SymbolRequest { symbol })
    }

    fn query_bars<P, S, E>(&self, symbol: &str, period: P, start: S, end: E) -> Result<Value, AppError>
    where
        P: Into<PeriodArg>,
        S: Into<BarBound>,
        E: Into<BarBound>,
    {
        let period = BarPeriod::parse(&period.into())?;
        let request =
            BarsRequest::from_parts(symbol, period, start.into(), end.into(), self.bar_syntax)?;
        debug!("query_bars {} period={}", request.symbol, request.period);
        self.http_client.post("query_bars", &request)
    }

    fn set_primary_exchange(&self, symbol: &str, exchange: &str) -> Result<Value, AppError> {
        self.http_client.post(
            "set_primary_exchange",
            &PrimaryExchangeRequest { symbol, exchange },
        )
    }
}

impl AccountService for Client {
    fn query_accounts(&self) -> Result<Value, AppError> {
        self.call("query_accounts")
    }

    fn query_account(&self, account: &str, fields: Option<&str>) -> Result<Value, AppError> {
        self.http_client
            .post("query_account", &AccountRequest::new(account).with_fields(fields))
    }

    fn query_account_value(&self, account: &str) -> Result<Value, AppError> {
        self.query_account(account, Some(self.config.mode.account_value_field()))
    }

    fn set_account(&mut self, account: &str) -> Result<Value, AppError> {
        let ret = self
            .http_client
            .post("set_account", &AccountRequest::new(account))?;
        if is_truthy(&ret) {
            info!("Current account set to {}", account);
            self.account = account.to_string();
        } else {
            warn!("Gateway refused account {}: {}", account, ret);
        }
        Ok(ret)
    }

    fn current_account(&self) -> &str {
        &self.account
    }

    fn query_positions(&self) -> Result<Value, AppError> {
        self.call("query_positions")
    }
}

impl OrderService for Client {
    fn query_orders(&self) -> Result<Value, AppError> {
        self.call("query_orders")
    }

    fn query_order(&self, order_id: &str) -> Result<Value, AppError> {
        self.http_client.post("query_order", &IdRequest { id: order_id })
    }

    fn query_tickets(&self) -> Result<Value, AppError> {
        self.call("query_tickets")
    }

    fn query_executions(&self) -> Result<Value, AppError> {
        self.call("query_executions")
    }

    fn query_execution(&self, execution_id: &str) -> Result<Value, AppError> {
        self.http_client
            .post("query_execution", &IdRequest { id: execution_id })
    }

    fn query_order_executions(&self, order_id: &str) -> Result<Value, AppError> {
        self.http_client
            .post("query_order_executions", &IdRequest { id: order_id })
    }

    fn get_order_route(&self) -> Result<Value, AppError> {
        self.call("get_order_route")
    }

    fn set_order_route(&self, route: Value) -> Result<Value, AppError> {
        self.http_client
            .post("set_order_route", &RouteRequest { route })
    }

    fn submit_order(&self, order: &OrderRequest) -> Result<Value, AppError> {
        order.validate()?;
        info!("Submitting {}: {}", order.endpoint(), order);
        self.http_client.post(order.endpoint(), order)
    }

    fn cancel_order(&self, order_id: &str) -> Result<Value, AppError> {
        self.http_client.post("cancel_order", &IdRequest { id: order_id })
    }

    fn global_cancel(&self) -> Result<Value, AppError> {
        self.call("global_cancel")
    }
}
