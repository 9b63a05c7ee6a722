//! Order endpoints
//!
//! These endpoints require authentication. Cancellation uses DELETE with a
//! JSON body.

use bpx_types::{MarketType, Params};
use tracing::{debug, instrument};

use crate::builder::RequestBuilder;
use crate::error::RestResult;
use crate::request::{Method, RequestDescriptor};
use crate::types::{OrderRef, OrderRequest, ToParams};

/// Order placement, lookup and cancellation
pub struct OrderEndpoints<'a> {
    builder: &'a RequestBuilder,
}

impl<'a> OrderEndpoints<'a> {
    pub fn new(builder: &'a RequestBuilder) -> Self {
        Self { builder }
    }

    /// Look up one open order
    #[instrument(skip(self))]
    pub fn get_open_order(
        &self,
        symbol: &str,
        order: &OrderRef,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder
            .signed(Method::Get, "api/v1/order", "orderQuery", order.to_params(symbol), window)
    }

    /// Place an order
    ///
    /// # Arguments
    /// * `order` - Order request with all parameters
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side, order_type = %order.order_type))]
    pub fn execute_order(
        &self,
        order: &OrderRequest,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        let params = order.to_params()?;

        debug!(
            "Placing {} {} order for {:?} {}",
            order.side,
            order.order_type,
            order.quantity.or(order.quote_quantity),
            order.symbol
        );

        self.builder
            .signed(Method::Post, "api/v1/order", "orderExecute", params, window)
    }

    /// Cancel one order
    #[instrument(skip(self))]
    pub fn cancel_order(
        &self,
        symbol: &str,
        order: &OrderRef,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder
            .signed(Method::Delete, "api/v1/order", "orderCancel", order.to_params(symbol), window)
    }

    /// All open orders, optionally filtered
    #[instrument(skip(self))]
    pub fn get_open_orders(
        &self,
        symbol: Option<&str>,
        market_type: Option<MarketType>,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        let mut params = Params::new();
        params
            .insert_opt("symbol", symbol)
            .insert_opt("marketType", market_type);
        self.builder
            .signed(Method::Get, "api/v1/orders", "orderQueryAll", params, window)
    }

    /// Cancel every open order in `symbol`
    #[instrument(skip(self))]
    pub fn cancel_all_orders(&self, symbol: &str, window: Option<u64>) -> RestResult<RequestDescriptor> {
        self.builder.signed(
            Method::Delete,
            "api/v1/orders",
            "orderCancelAll",
            Params::new().with("symbol", symbol),
            window,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_auth::{signing_string, Credentials};
    use bpx_types::{Side, TimeInForce};
    use rust_decimal_macros::dec;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(
            Credentials::new("key", "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=").unwrap(),
        )
    }

    #[test]
    fn test_execute_order_signs_body() {
        let builder = builder();
        let order = OrderRequest::limit("SOL_USDC", Side::Bid, dec!(1), dec!(20)).post_only();
        let request = builder.orders().execute_order(&order, None).unwrap();

        let body = request.body.clone().unwrap();
        let timestamp: i64 = request.headers["X-Timestamp"].parse().unwrap();
        let expected = builder
            .credentials()
            .sign(&signing_string("orderExecute", &body, timestamp, 5000));

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.headers["X-Signature"], expected);
        assert_eq!(
            body.canonical(),
            "orderType=Limit&postOnly=true&price=20&quantity=1&selfTradePrevention=RejectBoth&side=Bid&symbol=SOL_USDC"
        );
    }

    #[test]
    fn test_market_order_never_sends_price() {
        let order = OrderRequest::market("SOL_USDC", Side::Ask, dec!(3))
            .with_price(dec!(99))
            .with_time_in_force(TimeInForce::Ioc);
        let request = builder().orders().execute_order(&order, None).unwrap();
        assert!(!request.body.unwrap().contains_key("price"));
    }

    #[test]
    fn test_cancel_order_is_delete_with_body() {
        let request = builder()
            .orders()
            .cancel_order("SOL_USDC", &OrderRef::OrderId("42".into()), None)
            .unwrap();

        assert_eq!(request.method, Method::Delete);
        assert!(request.query.is_none());
        assert_eq!(
            request.json_body(),
            Some(serde_json::json!({"orderId": "42", "symbol": "SOL_USDC"}))
        );
    }

    #[test]
    fn test_open_orders_filters() {
        let request = builder()
            .orders()
            .get_open_orders(None, Some(MarketType::Spot), None)
            .unwrap();
        assert_eq!(
            request.full_url().unwrap(),
            "https://api.backpack.exchange/api/v1/orders?marketType=SPOT"
        );
    }
}
