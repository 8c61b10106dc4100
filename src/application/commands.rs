/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Closed registry of gateway operations.
//!
//! [`Command`] names every operation with typed arguments. Untyped input, such
//! as a JSON object of named arguments, enters through [`Command::from_json`],
//! which performs the type checks the typed API gets from the compiler.

use crate::application::client::Client;
use crate::application::interfaces::account::AccountService;
use crate::application::interfaces::market::MarketService;
use crate::application::interfaces::order::OrderService;
use crate::application::interfaces::server::ServerService;
use crate::error::AppError;
use crate::model::bars::{BarBound, BarPeriod, BarsRequest};
use crate::model::requests::OrderRequest;
use crate::model::utils::{normalize_symbol, parse_route};
use crate::presentation::order::OrderPrice;
use serde_json::{Map, Value};

/// One gateway operation with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `help`
    Help,
    /// `status`
    Status,
    /// `version`
    Version,
    /// `uptime`
    Uptime,
    /// `time`
    Time,
    /// `shutdown`
    Shutdown {
        /// Log message
        message: String,
    },
    /// `gateway_logon`
    GatewayLogon {
        /// Broker user
        username: String,
        /// Broker password
        password: String,
    },
    /// `gateway_logoff`
    GatewayLogoff,
    /// `add_symbol`
    AddSymbol {
        /// Ticker symbol
        symbol: String,
    },
    /// `del_symbol`
    DelSymbol {
        /// Ticker symbol
        symbol: String,
    },
    /// `query_symbols`
    QuerySymbols,
    /// `query_all_symbols`
    QueryAllSymbols,
    /// `query_symbol`
    QuerySymbol {
        /// Ticker symbol
        symbol: String,
    },
    /// `query_symbol_data`
    QuerySymbolData {
        /// Ticker symbol
        symbol: String,
    },
    /// `query_symbol_bars`
    QuerySymbolBars {
        /// Ticker symbol
        symbol: String,
    },
    /// `query_bars`; the range is checked against the client's bar syntax on execution
    QueryBars(BarsRequest),
    /// `set_primary_exchange`
    SetPrimaryExchange {
        /// Ticker symbol
        symbol: String,
        /// Exchange code
        exchange: String,
    },
    /// `query_accounts`
    QueryAccounts,
    /// `query_account`
    QueryAccount {
        /// Account name
        account: String,
        /// Comma separated field list
        fields: Option<String>,
    },
    /// `set_account`
    SetAccount {
        /// Account name
        account: String,
    },
    /// `query_positions`
    QueryPositions,
    /// `query_orders`
    QueryOrders,
    /// `query_order`
    QueryOrder {
        /// Order id
        id: String,
    },
    /// `query_tickets`
    QueryTickets,
    /// `query_executions`
    QueryExecutions,
    /// `query_execution`
    QueryExecution {
        /// Execution id
        id: String,
    },
    /// `query_order_executions`
    QueryOrderExecutions {
        /// Order id
        id: String,
    },
    /// `get_order_route`
    GetOrderRoute,
    /// `set_order_route`
    SetOrderRoute {
        /// Route name or route object
        route: Value,
    },
    /// Any of the eight order endpoints
    SubmitOrder(OrderRequest),
    /// `cancel_order`
    CancelOrder {
        /// Order id
        id: String,
    },
    /// `global_cancel`
    GlobalCancel,
}

impl Command {
    /// Every operation name the registry understands
    pub const NAMES: [&'static str; 39] = [
        "help",
        "status",
        "version",
        "uptime",
        "time",
        "shutdown",
        "gateway_logon",
        "gateway_logoff",
        "add_symbol",
        "del_symbol",
        "query_symbols",
        "query_all_symbols",
        "query_symbol",
        "query_symbol_data",
        "query_symbol_bars",
        "query_bars",
        "set_primary_exchange",
        "query_accounts",
        "query_account",
        "set_account",
        "query_positions",
        "query_orders",
        "query_order",
        "query_tickets",
        "query_executions",
        "query_execution",
        "query_order_executions",
        "get_order_route",
        "set_order_route",
        "market_order",
        "stage_market_order",
        "limit_order",
        "stage_limit_order",
        "stop_order",
        "stage_stop_order",
        "stoplimit_order",
        "stage_stoplimit_order",
        "cancel_order",
        "global_cancel",
    ];

    /// Gateway operation name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Status => "status",
            Command::Version => "version",
            Command::Uptime => "uptime",
            Command::Time => "time",
            Command::Shutdown { .. } => "shutdown",
            Command::GatewayLogon { .. } => "gateway_logon",
            Command::GatewayLogoff => "gateway_logoff",
            Command::AddSymbol { .. } => "add_symbol",
            Command::DelSymbol { .. } => "del_symbol",
            Command::QuerySymbols => "query_symbols",
            Command::QueryAllSymbols => "query_all_symbols",
            Command::QuerySymbol { .. } => "query_symbol",
            Command::QuerySymbolData { .. } => "query_symbol_data",
            Command::QuerySymbolBars { .. } => "query_symbol_bars",
            Command::QueryBars(_) => "query_bars",
            Command::SetPrimaryExchange { .. } => "set_primary_exchange",
            Command::QueryAccounts => "query_accounts",
            Command::QueryAccount { .. } => "query_account",
            Command::SetAccount { .. } => "set_account",
            Command::QueryPositions => "query_positions",
            Command::QueryOrders => "query_orders",
            Command::QueryOrder { .. } => "query_order",
            Command::QueryTickets => "query_tickets",
            Command::QueryExecutions => "query_executions",
            Command::QueryExecution { .. } => "query_execution",
            Command::QueryOrderExecutions { .. } => "query_order_executions",
            Command::GetOrderRoute => "get_order_route",
            Command::SetOrderRoute { .. } => "set_order_route",
            Command::SubmitOrder(order) => order.endpoint(),
            Command::CancelOrder { .. } => "cancel_order",
            Command::GlobalCancel => "global_cancel",
        }
    }

    /// Builds a command from an operation name and a JSON object of named arguments
    ///
    /// Symbols are upper-cased. Integer and float arguments may be given as
    /// numbers or numeric strings.
    ///
    /// # Errors
    /// * [`AppError::UnknownCommand`] for a name not in [`Command::NAMES`]
    /// * [`AppError::Type`] for a missing argument or one of the wrong JSON type
    /// * [`AppError::Value`] for a malformed bar period
    pub fn from_json(name: &str, args: &Value) -> Result<Self, AppError> {
        let empty = Map::new();
        let args = match args {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => return Err(AppError::Type(format!("{name} arguments: {other}"))),
        };

        let command = match name {
            "help" => Command::Help,
            "status" => Command::Status,
            "version" => Command::Version,
            "uptime" => Command::Uptime,
            "time" => Command::Time,
            "shutdown" => Command::Shutdown {
                message: string_arg(args, "message")?,
            },
            "gateway_logon" => Command::GatewayLogon {
                username: string_arg(args, "username")?,
                password: string_arg(args, "password")?,
            },
            "gateway_logoff" => Command::GatewayLogoff,
            "add_symbol" => Command::AddSymbol {
                symbol: symbol_arg(args)?,
            },
            "del_symbol" => Command::DelSymbol {
                symbol: symbol_arg(args)?,
            },
            "query_symbols" => Command::QuerySymbols,
            "query_all_symbols" => Command::QueryAllSymbols,
            "query_symbol" => Command::QuerySymbol {
                symbol: symbol_arg(args)?,
            },
            "query_symbol_data" => Command::QuerySymbolData {
                symbol: symbol_arg(args)?,
            },
            "query_symbol_bars" => Command::QuerySymbolBars {
                symbol: symbol_arg(args)?,
            },
            "query_bars" => Command::QueryBars(BarsRequest {
                symbol: symbol_arg(args)?,
                period: BarPeriod::from_json(required(args, "period")?)?,
                start: BarBound::from_json("start", required(args, "start")?)?,
                end: BarBound::from_json("end", required(args, "end")?)?,
            }),
            "set_primary_exchange" => Command::SetPrimaryExchange {
                symbol: symbol_arg(args)?,
                exchange: string_arg(args, "exchange")?,
            },
            "query_accounts" => Command::QueryAccounts,
            "query_account" => Command::QueryAccount {
                account: string_arg(args, "account")?,
                fields: optional_string_arg(args, "fields")?,
            },
            "set_account" => Command::SetAccount {
                account: string_arg(args, "account")?,
            },
            "query_positions" => Command::QueryPositions,
            "query_orders" => Command::QueryOrders,
            "query_order" => Command::QueryOrder {
                id: id_arg(args)?,
            },
            "query_tickets" => Command::QueryTickets,
            "query_executions" => Command::QueryExecutions,
            "query_execution" => Command::QueryExecution {
                id: id_arg(args)?,
            },
            "query_order_executions" => Command::QueryOrderExecutions {
                id: id_arg(args)?,
            },
            "get_order_route" => Command::GetOrderRoute,
            "set_order_route" => Command::SetOrderRoute {
                route: match required(args, "route")? {
                    Value::String(s) => parse_route(s),
                    other => other.clone(),
                },
            },
            "market_order" | "stage_market_order" | "limit_order" | "stage_limit_order"
            | "stop_order" | "stage_stop_order" | "stoplimit_order" | "stage_stoplimit_order" => {
                Command::SubmitOrder(order_from_json(name, args)?)
            }
            "cancel_order" => Command::CancelOrder {
                id: id_arg(args)?,
            },
            "global_cancel" => Command::GlobalCancel,
            _ => return Err(AppError::UnknownCommand(name.to_string())),
        };
        Ok(command)
    }

    /// Runs the command against `client`, returning the gateway reply unmodified
    ///
    /// # Errors
    /// Whatever the corresponding client operation returns.
    pub fn execute(&self, client: &mut Client) -> Result<Value, AppError> {
        match self {
            Command::Help => client.help(),
            Command::Status => client.status(),
            Command::Version => client.version(),
            Command::Uptime => client.uptime(),
            Command::Time => client.time(),
            Command::Shutdown { message } => client.shutdown(message),
            Command::GatewayLogon { username, password } => {
                client.gateway_logon(username, password)
            }
            Command::GatewayLogoff => client.gateway_logoff(),
            Command::AddSymbol { symbol } => client.add_symbol(symbol),
            Command::DelSymbol { symbol } => client.del_symbol(symbol),
            Command::QuerySymbols => client.query_symbols(),
            Command::QueryAllSymbols => client.query_all_symbols(),
            Command::QuerySymbol { symbol } => client.query_symbol(symbol),
            Command::QuerySymbolData { symbol } => client.query_symbol_data(symbol),
            Command::QuerySymbolBars { symbol } => client.query_symbol_bars(symbol),
            Command::QueryBars(request) => client.query_bars_request(request),
            Command::SetPrimaryExchange { symbol, exchange } => {
                client.set_primary_exchange(symbol, exchange)
            }
            Command::QueryAccounts => client.query_accounts(),
            Command::QueryAccount { account, fields } => {
                client.query_account(account, fields.as_deref())
            }
            Command::SetAccount { account } => client.set_account(account),
            Command::QueryPositions => client.query_positions(),
            Command::QueryOrders => client.query_orders(),
            Command::QueryOrder { id } => client.query_order(id),
            Command::QueryTickets => client.query_tickets(),
            Command::QueryExecutions => client.query_executions(),
            Command::QueryExecution { id } => client.query_execution(id),
            Command::QueryOrderExecutions { id } => client.query_order_executions(id),
            Command::GetOrderRoute => client.get_order_route(),
            Command::SetOrderRoute { route } => client.set_order_route(route.clone()),
            Command::SubmitOrder(order) => client.submit_order(order),
            Command::CancelOrder { id } => client.cancel_order(id),
            Command::GlobalCancel => client.global_cancel(),
        }
    }
}

fn required<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a Value, AppError> {
    match args.get(key) {
        Some(Value::Null) | None => Err(AppError::Type(format!("{key}: missing argument"))),
        Some(value) => Ok(value),
    }
}

fn string_arg(args: &Map<String, Value>, key: &str) -> Result<String, AppError> {
    match required(args, key)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(AppError::Type(format!("{key}: {other}"))),
    }
}

fn optional_string_arg(args: &Map<String, Value>, key: &str) -> Result<Option<String>, AppError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(AppError::Type(format!("{key}: {other}"))),
    }
}

fn symbol_arg(args: &Map<String, Value>) -> Result<String, AppError> {
    string_arg(args, "symbol").map(|s| normalize_symbol(&s))
}

fn id_arg(args: &Map<String, Value>) -> Result<String, AppError> {
    match required(args, "id")? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(AppError::Type(format!("id: {other}"))),
    }
}

fn int_arg(args: &Map<String, Value>, key: &str) -> Result<i64, AppError> {
    let value = required(args, key)?;
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AppError::Type(format!("{key}: {value}")))
}

fn float_arg(args: &Map<String, Value>, key: &str) -> Result<f64, AppError> {
    let value = required(args, key)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AppError::Type(format!("{key}: {value}")))
}

fn order_from_json(name: &str, args: &Map<String, Value>) -> Result<OrderRequest, AppError> {
    let staged = name.starts_with("stage_");
    let kind = name.trim_start_matches("stage_").trim_end_matches("_order");
    let price = match kind {
        "market" => OrderPrice::Market,
        "limit" => OrderPrice::Limit(float_arg(args, "limit_price")?),
        "stop" => OrderPrice::Stop(float_arg(args, "stop_price")?),
        _ => OrderPrice::StopLimit {
            stop: float_arg(args, "stop_price")?,
            limit: float_arg(args, "limit_price")?,
        },
    };

    let mut order = OrderRequest::market(
        &string_arg(args, "account")?,
        &string_arg(args, "route")?,
        &symbol_arg(args)?,
        int_arg(args, "quantity")?,
    )
    .with_price(price);
    if staged {
        order = order.staged(&string_arg(args, "tag")?);
    }
    Ok(order)
}

impl From<OrderRequest> for Command {
    fn from(order: OrderRequest) -> Self {
        Command::SubmitOrder(order)
    }
}

