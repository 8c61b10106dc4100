use crate::error::AppError;
use crate::model::requests::OrderRequest;
use serde_json::Value;

/// Service for submitting, querying and cancelling orders
///
/// Every order variant is a thin wrapper over [`OrderService::submit_order`];
/// they differ only in the endpoint and the price fields sent.
pub trait OrderService {
    /// Returns orders keyed by order id
    fn query_orders(&self) -> Result<Value, AppError>;

    /// Returns order / ticket status for one order id
    fn query_order(&self, order_id: &str) -> Result<Value, AppError>;

    /// Returns staged order tickets keyed by order id
    fn query_tickets(&self) -> Result<Value, AppError>;

    /// Returns execution reports keyed by execution id
    fn query_executions(&self) -> Result<Value, AppError>;

    /// Returns one execution report
    fn query_execution(&self, execution_id: &str) -> Result<Value, AppError>;

    /// Returns the execution reports of one order
    fn query_order_executions(&self, order_id: &str) -> Result<Value, AppError>;

    /// Returns the current order route
    fn get_order_route(&self) -> Result<Value, AppError>;

    /// Sets the order route, given as a name or a `{route_name: {parameter: value}}` object
    fn set_order_route(&self, route: Value) -> Result<Value, AppError>;

    /// Validates and submits an order to the endpoint matching its type
    fn submit_order(&self, order: &OrderRequest) -> Result<Value, AppError>;

    /// Requests cancellation of a pending order
    fn cancel_order(&self, order_id: &str) -> Result<Value, AppError>;

    /// Requests cancellation of all pending orders
    fn global_cancel(&self) -> Result<Value, AppError>;

    /// Submits a market order
    fn market_order(
        &self,
        account: &str,
        route: &str,
        symbol: &str,
        quantity: i64,
    ) -> Result<Value, AppError> {
        self.submit_order(&OrderRequest::market(account, route, symbol, quantity))
    }

    /// Stages a market order for manual approval
    fn stage_market_order(
        &self,
        tag: &str,
        account: &str,
        route: &str,
        symbol: &str,
        quantity: i64,
    ) -> Result<Value, AppError> {
        self.submit_order(&OrderRequest::market(account, route, symbol, quantity).staged(tag))
    }

    /// Submits a limit order
    fn limit_order(
        &self,
        account: &str,
        route: &str,
        symbol: &str,
        limit_price: f64,
        quantity: i64,
    ) -> Result<Value, AppError> {
        self.submit_order(&OrderRequest::limit(account, route, symbol, limit_price, quantity))
    }

    /// Stages a limit order for manual approval
    fn stage_limit_order(
        &self,
        tag: &str,
        account: &str,
        route: &str,
        symbol: &str,
        limit_price: f64,
        quantity: i64,
    ) -> Result<Value, AppError> {
        self.submit_order(
            &OrderRequest::limit(account, route, symbol, limit_price, quantity).staged(tag),
        )
    }

    /// Submits a stop order
    fn stop_order(
        &self,
        account: &str,
        route: &str,
        symbol: &str,
        stop_price: f64,
        quantity: i64,
    ) -> Result<Value, AppError> {
        self.submit_order(&OrderRequest::stop(account, route, symbol, stop_price, quantity))
    }

    /// Stages a stop order for manual approval
    fn stage_stop_order(
        &self,
        tag: &str,
        account: &str,
        route: &str,
        symbol: &str,
        stop_price: f64,
        quantity: i64,
    ) -> Result<Value, AppError> {
        self.submit_order(
            &OrderRequest::stop(account, route, symbol, stop_price, quantity).staged(tag),
        )
    }

    /// Submits a stop-limit order
    #[allow(clippy::too_many_arguments)]
    fn stoplimit_order(
        &self,
        account: &str,
        route: &str,
        symbol: &str,
        stop_price: f64,
        limit_price: f64,
        quantity: i64,
    ) -> Result<Value, AppError> {
        self.submit_order(&OrderRequest::stop_limit(
            account,
            route,
            symbol,
            stop_price,
            limit_price,
            quantity,
        ))
    }

    /// Stages a stop-limit order for manual approval
    #[allow(clippy::too_many_arguments)]
    fn stage_stoplimit_order(
        &self,
        tag: &str,
        account: &str,
        route: &str,
        symbol: &str,
        stop_price: f64,
        limit_price: f64,
        quantity: i64,
    ) -> Result<Value, AppError> {
        self.submit_order(
            &OrderRequest::stop_limit(account, route, symbol, stop_price, limit_price, quantity)
                .staged(tag),
        )
    }
}
