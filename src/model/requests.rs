/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use crate::error::AppError;
use crate::presentation::order::{OrderPrice, OrderType};
use pretty_simple_display::DisplaySimple;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Body carrying a single symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolRequest<'a> {
    /// Ticker symbol
    pub symbol: &'a str,
}

/// Body carrying an order or execution id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdRequest<'a> {
    /// Order, ticket or execution id
    pub id: &'a str,
}

/// Body of a `shutdown` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShutdownRequest<'a> {
    /// Text written to the gateway log
    pub message: &'a str,
}

/// Body of `query_account` and `set_account`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountRequest<'a> {
    /// Account name
    pub account: &'a str,
    /// Comma separated field list; omitted for all fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<&'a str>,
}

impl<'a> AccountRequest<'a> {
    /// Request for a whole account
    pub fn new(account: &'a str) -> Self {
        Self {
            account,
            fields: None,
        }
    }

    /// Restricts the reply to `fields`; an empty list means all fields
    pub fn with_fields(mut self, fields: Option<&'a str>) -> Self {
        self.fields = fields.filter(|f| !f.is_empty());
        self
    }
}

/// Body of `set_order_route`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    /// Route name, or a `{route_name: {parameter: value}}` object
    pub route: Value,
}

/// Body of `gateway_logon`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogonRequest<'a> {
    /// Broker user
    pub username: &'a str,
    /// Broker password
    pub password: &'a str,
}

/// Body of `set_primary_exchange`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimaryExchangeRequest<'a> {
    /// Ticker symbol
    pub symbol: &'a str,
    /// Exchange code
    pub exchange: &'a str,
}

/// A single trading instruction
///
/// The sign of `quantity` encodes the direction: positive buys, negative sells.
/// A staged order carries a ticket tag and waits for manual approval on the gateway.
#[derive(Debug, Clone, PartialEq, DisplaySimple)]
pub struct OrderRequest {
    /// Ticket tag for staged orders
    pub tag: Option<String>,
    /// Trading account
    pub account: String,
    /// Order route
    pub route: String,
    /// Ticker symbol
    pub symbol: String,
    /// Signed share count
    pub quantity: i64,
    /// Price shape
    pub price: OrderPrice,
}

impl OrderRequest {
    /// Market order
    pub fn market(account: &str, route: &str, symbol: &str, quantity: i64) -> Self {
        Self {
            tag: None,
            account: account.to_string(),
            route: route.to_string(),
            symbol: symbol.to_string(),
            quantity,
            price: OrderPrice::Market,
        }
    }

    /// Limit order
    pub fn limit(account: &str, route: &str, symbol: &str, limit_price: f64, quantity: i64) -> Self {
        Self::market(account, route, symbol, quantity).with_price(OrderPrice::Limit(limit_price))
    }

    /// Stop order
    pub fn stop(account: &str, route: &str, symbol: &str, stop_price: f64, quantity: i64) -> Self {
        Self::market(account, route, symbol, quantity).with_price(OrderPrice::Stop(stop_price))
    }

    /// Stop-limit order
    pub fn stop_limit(
        account: &str,
        route: &str,
        symbol: &str,
        stop_price: f64,
        limit_price: f64,
        quantity: i64,
    ) -> Self {
        Self::market(account, route, symbol, quantity).with_price(OrderPrice::StopLimit {
            stop: stop_price,
            limit: limit_price,
        })
    }

    /// Set the price shape
    pub fn with_price(mut self, price: OrderPrice) -> Self {
        self.price = price;
        self
    }

    /// Stage the order under a ticket tag
    pub fn staged(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Order type implied by the price shape
    pub fn order_type(&self) -> OrderType {
        self.price.order_type()
    }

    /// Gateway endpoint the order is sent to
    pub fn endpoint(&self) -> &'static str {
        self.order_type().endpoint(self.tag.is_some())
    }

    /// Checks the order before it is sent
    ///
    /// # Errors
    /// [`AppError::Value`] for an empty account / route / symbol / tag, a zero
    /// quantity, or a price that is not a positive finite number.
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("account", &self.account)?;
        require_text("route", &self.route)?;
        require_text("symbol", &self.symbol)?;
        if let Some(tag) = &self.tag {
            require_text("tag", tag)?;
        }
        if self.quantity == 0 {
            return Err(AppError::Value("quantity: must be non-zero".to_string()));
        }
        if let Some(stop) = self.price.stop_price() {
            require_price("stop_price", stop)?;
        }
        if let Some(limit) = self.price.limit_price() {
            require_price("limit_price", limit)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct OrderBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    account: &'a str,
    route: &'a str,
    symbol: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_price: Option<f64>,
    quantity: i64,
}

impl Serialize for OrderRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OrderBody {
            tag: self.tag.as_deref(),
            account: &self.account,
            route: &self.route,
            symbol: &self.symbol,
            stop_price: self.price.stop_price(),
            limit_price: self.price.limit_price(),
            quantity: self.quantity,
        }
        .serialize(serializer)
    }
}

fn require_text(label: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Value(format!("{label}: must not be empty")));
    }
    Ok(())
}

fn require_price(label: &str, price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::Value(format!(
            "{label}: {price} must be a positive price"
        )));
    }
    Ok(())
}
