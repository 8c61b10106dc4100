/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use crate::error::AppError;
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trading action; the gateway encodes direction in the sign of the quantity
#[derive(Debug, Clone, Copy, DisplaySimple, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderAction {
    /// Buy (positive quantity)
    #[default]
    Buy,
    /// Sell (negative quantity)
    Sell,
    /// Sell short (negative quantity)
    #[serde(rename = "SELLSHORT")]
    SellShort,
    /// Buy to cover a short (positive quantity)
    #[serde(rename = "BUYTOCOVER")]
    BuyToCover,
}

impl OrderAction {
    /// Applies the action's sign to an unsigned share count
    #[must_use]
    pub fn signed_quantity(&self, quantity: i64) -> i64 {
        match self {
            OrderAction::Buy | OrderAction::BuyToCover => quantity.abs(),
            OrderAction::Sell | OrderAction::SellShort => -quantity.abs(),
        }
    }

    /// Upper-case name as typed on the command line
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderAction::Buy => "BUY",
            OrderAction::Sell => "SELL",
            OrderAction::SellShort => "SELLSHORT",
            OrderAction::BuyToCover => "BUYTOCOVER",
        }
    }
}

impl FromStr for OrderAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(OrderAction::Buy),
            "SELL" => Ok(OrderAction::Sell),
            "SELLSHORT" => Ok(OrderAction::SellShort),
            "BUYTOCOVER" => Ok(OrderAction::BuyToCover),
            _ => Err(AppError::Value(format!(
                "action: {s:?} must be one of BUY, SELL, SELLSHORT, BUYTOCOVER"
            ))),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, DisplaySimple, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Market order - executed immediately at current market price
    #[default]
    Market,
    /// Limit order - executed when price reaches specified level
    Limit,
    /// Stop order - becomes market order when price reaches specified level
    Stop,
    /// Stop limit order - becomes limit order when price reaches specified level
    #[serde(rename = "stoplimit")]
    StopLimit,
}

impl OrderType {
    /// Gateway endpoint for this order type, staged or not
    #[must_use]
    pub fn endpoint(&self, staged: bool) -> &'static str {
        match (self, staged) {
            (OrderType::Market, false) => "market_order",
            (OrderType::Market, true) => "stage_market_order",
            (OrderType::Limit, false) => "limit_order",
            (OrderType::Limit, true) => "stage_limit_order",
            (OrderType::Stop, false) => "stop_order",
            (OrderType::Stop, true) => "stage_stop_order",
            (OrderType::StopLimit, false) => "stoplimit_order",
            (OrderType::StopLimit, true) => "stage_stoplimit_order",
        }
    }
}

/// Price instruction of an order; exactly one shape per order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OrderPrice {
    /// No price
    #[default]
    Market,
    /// Limit price
    Limit(f64),
    /// Stop price
    Stop(f64),
    /// Stop price that turns into a limit order
    StopLimit {
        /// Trigger price
        stop: f64,
        /// Limit price once triggered
        limit: f64,
    },
}

impl OrderPrice {
    /// Picks the price shape from optional stop and limit prices
    #[must_use]
    pub fn from_options(stop: Option<f64>, limit: Option<f64>) -> Self {
        match (stop, limit) {
            (Some(stop), Some(limit)) => OrderPrice::StopLimit { stop, limit },
            (Some(stop), None) => OrderPrice::Stop(stop),
            (None, Some(limit)) => OrderPrice::Limit(limit),
            (None, None) => OrderPrice::Market,
        }
    }

    /// Order type implied by the price shape
    #[must_use]
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderPrice::Market => OrderType::Market,
            OrderPrice::Limit(_) => OrderType::Limit,
            OrderPrice::Stop(_) => OrderType::Stop,
            OrderPrice::StopLimit { .. } => OrderType::StopLimit,
        }
    }

    /// Stop price, if any
    #[must_use]
    pub fn stop_price(&self) -> Option<f64> {
        match self {
            OrderPrice::Stop(stop) | OrderPrice::StopLimit { stop, .. } => Some(*stop),
            _ => None,
        }
    }

    /// Limit price, if any
    #[must_use]
    pub fn limit_price(&self) -> Option<f64> {
        match self {
            OrderPrice::Limit(limit) | OrderPrice::StopLimit { limit, .. } => Some(*limit),
            _ => None,
        }
    }
}
