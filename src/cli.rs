/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! `txtrader` command line interface.
//!
//! Global options override the matching `TXTRADER_*` configuration keys; each
//! subcommand maps onto one [`Command`] and prints the gateway reply as JSON.

use crate::application::client::Client;
use crate::application::commands::Command;
use crate::application::config::{ConfigKey, ConfigResolver};
use crate::application::interfaces::account::AccountService;
use crate::application::interfaces::order::OrderService;
use crate::application::interfaces::server::ServerService;
use crate::error::AppError;
use crate::model::bars::{BarBound, BarPeriod, BarsRequest};
use crate::model::requests::OrderRequest;
use crate::model::utils::{normalize_symbol, parse_route};
use crate::presentation::order::{OrderAction, OrderPrice, OrderType};
use crate::utils::logger::setup_logger;
use clap::{ArgAction, Parser, Subcommand};
use serde_json::Value;
use std::io::{self, BufRead, Write};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "txtrader", version, about = "TxTrader securities trading API client")]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Transport protocol (http or https)
    #[arg(long)]
    pub protocol: Option<String>,

    /// Gateway host
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// Gateway JSON API port
    #[arg(short = 'p', long)]
    pub port: Option<String>,

    /// Gateway user
    #[arg(short = 'U', long)]
    pub username: Option<String>,

    /// Gateway password
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// Trading account
    #[arg(short = 'a', long, value_name = "TRADING_ACCOUNT")]
    pub account: Option<String>,

    /// Order route
    #[arg(short = 'r', long, value_name = "ORDER_ROUTE")]
    pub route: Option<String>,

    /// Gateway mode (rtx or tws)
    #[arg(short = 'm', long)]
    pub mode: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<String>,

    /// Output detailed error diagnostics
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Minimize JSON output
    #[arg(short = 'c', long)]
    pub compress: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "snake_case")]
pub enum Commands {
    /// Output current API connection status
    Status,
    /// Request server shutdown, writing MESSAGE to the log
    Shutdown { message: String },
    /// Output start time and elapsed time for current server instance
    Uptime,
    /// Output timestamp (YYYY-MM-DD HH:MM:SS) of the latest datafeed time update
    Time,
    /// Output release version of current server instance
    Version,
    /// Output server help text
    Help,
    /// Log the gateway on to the broker
    GatewayLogon { username: String, password: String },
    /// Log the gateway off from the broker
    GatewayLogoff,
    /// Request subscription to a symbol for price updates and order entry
    AddSymbol { symbol: String },
    /// Delete subscription to a symbol for price updates and order entry
    DelSymbol { symbol: String },
    /// Return the list of active symbols
    QuerySymbols,
    /// Return current data for all active symbols
    QueryAllSymbols,
    /// Return current data for given symbol
    QuerySymbol { symbol: String },
    /// Return raw data for given symbol
    QuerySymbolData { symbol: String },
    /// Return current bar data for given symbol
    QuerySymbolBars { symbol: String },
    /// Return bar data: PERIOD is minutes or D/W/M, START/END are YYYY-MM-DD HH:MM[:SS], '.' or -N
    QueryBars {
        symbol: String,
        period: String,
        #[arg(allow_hyphen_values = true)]
        start: String,
        #[arg(allow_hyphen_values = true)]
        end: String,
    },
    /// Set the primary exchange for a symbol
    SetPrimaryExchange { symbol: String, exchange: String },
    /// Return the list of trading accounts
    QueryAccounts,
    /// Query account data; FIELDS is a comma separated list, empty for all fields
    QueryAccount {
        account: String,
        #[arg(default_value = "")]
        fields: String,
    },
    /// Select the current trading account
    SetAccount { account: String },
    /// Return positions keyed by account
    QueryPositions,
    /// Return order/ticket status fields for given order id
    QueryOrder { order_id: String },
    /// Return order/ticket status fields for all orders
    QueryOrders,
    /// Return all staged order tickets keyed by order id
    QueryTickets,
    /// Return execution report fields for given execution id
    QueryExecution { execution_id: String },
    /// Return execution reports for given order id
    QueryOrderExecutions { order_id: String },
    /// Return execution reports keyed by execution id
    QueryExecutions,
    /// Submit an order to buy/sell/sell-short/buy-to-cover
    Submit {
        /// BUY, SELL, SELLSHORT or BUYTOCOVER
        action: String,
        quantity: i64,
        symbol: String,
        /// Submit as staged order with tag
        #[arg(long, value_name = "TAG")]
        staged: Option<String>,
        /// Stop price
        #[arg(short = 's', long, value_name = "STOP_PRICE")]
        stop: Option<f64>,
        /// Limit price
        #[arg(short = 'l', long, value_name = "LIMIT_PRICE")]
        limit: Option<f64>,
        /// Transmit the order without a confirmation prompt
        #[arg(short = 'f', long)]
        force: bool,
    },
    /// Submit a market order
    MarketOrder {
        account: String,
        route: String,
        symbol: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Submit a staged market order (requires manual approval on the gateway)
    StageMarketOrder {
        tag: String,
        account: String,
        route: String,
        symbol: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Submit a limit order
    LimitOrder {
        account: String,
        route: String,
        symbol: String,
        price: f64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Submit a staged limit order
    StageLimitOrder {
        tag: String,
        account: String,
        route: String,
        symbol: String,
        price: f64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Submit a stop order
    StopOrder {
        account: String,
        route: String,
        symbol: String,
        price: f64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Submit a staged stop order
    StageStopOrder {
        tag: String,
        account: String,
        route: String,
        symbol: String,
        price: f64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Submit a stop-limit order
    StoplimitOrder {
        account: String,
        route: String,
        symbol: String,
        stop_price: f64,
        limit_price: f64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Submit a staged stop-limit order
    StageStoplimitOrder {
        tag: String,
        account: String,
        route: String,
        symbol: String,
        stop_price: f64,
        limit_price: f64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Request cancellation of a pending order
    CancelOrder { order_id: String },
    /// Request cancellation of all pending orders
    GlobalCancel,
    /// Return current order route
    GetOrderRoute,
    /// Set order route; a JSON object {"route_name": {parameter: value}} is parsed
    SetOrderRoute { route: String },
}

impl Cli {
    /// Resolver with the global options as explicit overrides
    pub fn resolver(&self) -> ConfigResolver {
        ConfigResolver::from_env().with_overrides(self.overrides())
    }

    /// Global options keyed by configuration key
    pub fn overrides(&self) -> Vec<(ConfigKey, Option<String>)> {
        vec![
            (ConfigKey::Protocol, self.protocol.clone()),
            (ConfigKey::Host, self.host.clone()),
            (ConfigKey::HttpPort, self.port.clone()),
            (ConfigKey::Username, self.username.clone()),
            (ConfigKey::Password, self.password.clone()),
            (ConfigKey::ApiAccount, self.account.clone()),
            (ConfigKey::Route, self.route.clone()),
            (ConfigKey::Mode, self.mode.clone()),
            (ConfigKey::Timeout, self.timeout.clone()),
        ]
    }
}

impl Commands {
    /// Maps a subcommand onto the command registry
    ///
    /// Symbols are upper-cased. `help` and `submit` need the client and are
    /// handled by [`run`]; they yield `None` here.
    ///
    /// # Errors
    /// [`AppError::Value`] for a malformed bar period.
    pub fn to_command(&self) -> Result<Option<Command>, AppError> {
        let command = match self {
            Commands::Help | Commands::Submit { .. } => return Ok(None),
            Commands::Status => Command::Status,
            Commands::Shutdown { message } => Command::Shutdown {
                message: message.clone(),
            },
            Commands::Uptime => Command::Uptime,
            Commands::Time => Command::Time,
            Commands::Version => Command::Version,
            Commands::GatewayLogon { username, password } => Command::GatewayLogon {
                username: username.clone(),
                password: password.clone(),
            },
            Commands::GatewayLogoff => Command::GatewayLogoff,
            Commands::AddSymbol { symbol } => Command::AddSymbol {
                symbol: normalize_symbol(symbol),
            },
            Commands::DelSymbol { symbol } => Command::DelSymbol {
                symbol: normalize_symbol(symbol),
            },
            Commands::QuerySymbols => Command::QuerySymbols,
            Commands::QueryAllSymbols => Command::QueryAllSymbols,
            Commands::QuerySymbol { symbol } => Command::QuerySymbol {
                symbol: normalize_symbol(symbol),
            },
            Commands::QuerySymbolData { symbol } => Command::QuerySymbolData {
                symbol: normalize_symbol(symbol),
            },
            Commands::QuerySymbolBars { symbol } => Command::QuerySymbolBars {
                symbol: normalize_symbol(symbol),
            },
            Commands::QueryBars {
                symbol,
                period,
                start,
                end,
            } => Command::QueryBars(BarsRequest {
                symbol: normalize_symbol(symbol),
                period: period.parse::<BarPeriod>()?,
                start: BarBound::from(start.as_str()),
                end: BarBound::from(end.as_str()),
            }),
            Commands::SetPrimaryExchange { symbol, exchange } => Command::SetPrimaryExchange {
                symbol: normalize_symbol(symbol),
                exchange: exchange.clone(),
            },
            Commands::QueryAccounts => Command::QueryAccounts,
            Commands::QueryAccount { account, fields } => Command::QueryAccount {
                account: account.clone(),
                fields: Some(fields.clone()).filter(|f| !f.is_empty()),
            },
            Commands::SetAccount { account } => Command::SetAccount {
                account: account.clone(),
            },
            Commands::QueryPositions => Command::QueryPositions,
            Commands::QueryOrder { order_id } => Command::QueryOrder {
                id: order_id.clone(),
            },
            Commands::QueryOrders => Command::QueryOrders,
            Commands::QueryTickets => Command::QueryTickets,
            Commands::QueryExecution { execution_id } => Command::QueryExecution {
                id: execution_id.clone(),
            },
            Commands::QueryOrderExecutions { order_id } => Command::QueryOrderExecutions {
                id: order_id.clone(),
            },
            Commands::QueryExecutions => Command::QueryExecutions,
            Commands::MarketOrder {
                account,
                route,
                symbol,
                quantity,
            } => OrderRequest::market(account, route, &normalize_symbol(symbol), *quantity).into(),
            Commands::StageMarketOrder {
                tag,
                account,
                route,
                symbol,
                quantity,
            } => OrderRequest::market(account, route, &normalize_symbol(symbol), *quantity)
                .staged(tag)
                .into(),
            Commands::LimitOrder {
                account,
                route,
                symbol,
                price,
                quantity,
            } => OrderRequest::limit(account, route, &normalize_symbol(symbol), *price, *quantity)
                .into(),
            Commands::StageLimitOrder {
                tag,
                account,
                route,
                symbol,
                price,
                quantity,
            } => OrderRequest::limit(account, route, &normalize_symbol(symbol), *price, *quantity)
                .staged(tag)
                .into(),
            Commands::StopOrder {
                account,
                route,
                symbol,
                price,
                quantity,
            } => OrderRequest::stop(account, route, &normalize_symbol(symbol), *price, *quantity)
                .into(),
            Commands::StageStopOrder {
                tag,
                account,
                route,
                symbol,
                price,
                quantity,
            } => OrderRequest::stop(account, route, &normalize_symbol(symbol), *price, *quantity)
                .staged(tag)
                .into(),
            Commands::StoplimitOrder {
                account,
                route,
                symbol,
                stop_price,
                limit_price,
                quantity,
            } => OrderRequest::stop_limit(
                account,
                route,
                &normalize_symbol(symbol),
                *stop_price,
                *limit_price,
                *quantity,
            )
            .into(),
            Commands::StageStoplimitOrder {
                tag,
                account,
                route,
                symbol,
                stop_price,
                limit_price,
                quantity,
            } => OrderRequest::stop_limit(
                account,
                route,
                &normalize_symbol(symbol),
                *stop_price,
                *limit_price,
                *quantity,
            )
            .staged(tag)
            .into(),
            Commands::CancelOrder { order_id } => Command::CancelOrder {
                id: order_id.clone(),
            },
            Commands::GlobalCancel => Command::GlobalCancel,
            Commands::GetOrderRoute => Command::GetOrderRoute,
            Commands::SetOrderRoute { route } => Command::SetOrderRoute {
                route: parse_route(route),
            },
        };
        Ok(Some(command))
    }
}

/// Builds the order for a `submit` subcommand
///
/// SELL and SELLSHORT negate the quantity; the order type follows from the
/// stop and limit prices given.
///
/// # Errors
/// [`AppError::Value`] for an unknown action.
#[allow(clippy::too_many_arguments)]
pub fn submit_order_request(
    action: &str,
    quantity: i64,
    symbol: &str,
    staged: Option<&str>,
    stop: Option<f64>,
    limit: Option<f64>,
    account: &str,
    route: &str,
) -> Result<OrderRequest, AppError> {
    let action = action.parse::<OrderAction>()?;
    let mut order = OrderRequest::market(
        account,
        route,
        &normalize_symbol(symbol),
        action.signed_quantity(quantity),
    )
    .with_price(OrderPrice::from_options(stop, limit));
    if let Some(tag) = staged.filter(|t| !t.is_empty()) {
        order = order.staged(tag);
    }
    Ok(order)
}

/// One-line description shown before an order is transmitted
pub fn describe_order(action: OrderAction, order: &OrderRequest) -> String {
    let kind = match order.order_type() {
        OrderType::Market => "market",
        OrderType::Limit => "limit",
        OrderType::Stop => "stop",
        OrderType::StopLimit => "stop_limit",
    };
    let prices = match order.price {
        OrderPrice::Market => String::new(),
        OrderPrice::Limit(limit) => format!(" with limit {limit}"),
        OrderPrice::Stop(stop) => format!(" with stop {stop}"),
        OrderPrice::StopLimit { stop, limit } => format!(" with stop {stop} and limit {limit}"),
    };
    let (staged, ticket) = match &order.tag {
        Some(tag) => ("staged ", format!(" with ticket '{tag}'")),
        None => ("", String::new()),
    };
    format!(
        "{staged}{kind} order to {} {} {}{prices}{ticket} account={} route={}",
        action.as_str(),
        order.quantity.abs(),
        order.symbol,
        order.account,
        order.route
    )
}

/// Asks a yes/no question; anything but `y` / `yes` is a no
///
/// # Errors
/// [`AppError::Io`] if the prompt cannot be written or the answer read.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool, AppError> {
    write!(output, "{prompt} [y/N]: ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Renders a gateway reply: pretty JSON with sorted keys, or compact
///
/// # Errors
/// [`AppError::Json`] if the value cannot be encoded.
pub fn format_output(value: &Value, compress: bool) -> Result<String, AppError> {
    if compress {
        Ok(serde_json::to_string(value)?)
    } else {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Renders the server help: version line, then each command's help sorted by name
pub fn format_help(version: &Value, help: &Value) -> String {
    let version = match version.get("txtrader") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => version.to_string(),
    };
    let mut text = format!("\n{version}\n\n");
    if let Value::Object(entries) = help {
        let mut entries: Vec<_> = entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (_, entry) in entries {
            match entry {
                Value::String(s) => text.push_str(s),
                other => text.push_str(&other.to_string()),
            }
            text.push('\n');
        }
    } else {
        text.push_str(&help.to_string());
        text.push('\n');
    }
    text
}

/// Runs one parsed command line
///
/// # Errors
/// Configuration, validation, transport or I/O errors; [`AppError::Aborted`]
/// when an order confirmation is declined.
pub fn run(cli: Cli) -> Result<(), AppError> {
    setup_logger(cli.verbose);
    let mut client = Client::from_resolver(&cli.resolver())?;
    debug!("Running {:?}", cli.command);

    let stdout = io::stdout();
    let result = match &cli.command {
        Commands::Help => {
            let text = format_help(&client.version()?, &client.help()?);
            write!(stdout.lock(), "{text}")?;
            return Ok(());
        }
        Commands::Submit {
            action,
            quantity,
            symbol,
            staged,
            stop,
            limit,
            force,
        } => {
            let order = submit_order_request(
                action,
                *quantity,
                symbol,
                staged.as_deref(),
                *stop,
                *limit,
                client.current_account(),
                client.route(),
            )?;
            if !force {
                let prompt = format!(
                    "Submit {}... Confirm?",
                    describe_order(action.parse::<OrderAction>()?, &order)
                );
                if !confirm(&prompt, &mut io::stdin().lock(), &mut io::stderr())? {
                    return Err(AppError::Aborted);
                }
            }
            client.submit_order(&order)?
        }
        other => match other.to_command()? {
            Some(command) => command.execute(&mut client)?,
            None => return Err(AppError::UnknownCommand(format!("{other:?}"))),
        },
    };

    writeln!(stdout.lock(), "{}", format_output(&result, cli.compress)?)?;
    Ok(())
}

/// Writes an error the way the command line reports it
///
/// One `Kind: message` line; with `verbose` the debug rendering and the
/// chain of underlying causes follow.
pub fn report_error<W: Write>(error: &AppError, verbose: bool, output: &mut W) -> io::Result<()> {
    writeln!(output, "{}: {}", error.kind(), error)?;
    if verbose {
        writeln!(output, "{error:#?}")?;
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            writeln!(output, "caused by: {cause}")?;
            source = cause.source();
        }
    }
    Ok(())
}
