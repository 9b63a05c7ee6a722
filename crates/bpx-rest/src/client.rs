//! Async REST clients
//!
//! [`AccountClient`] signs every request; [`PublicClient`] sends none of the
//! authentication headers. Both delegate request construction to the
//! endpoint catalog and execution to a [`Transport`].

use bpx_auth::Credentials;
use bpx_types::{Blockchain, BorrowLendMarketHistoryInterval, KlineInterval, MarketType};
use tracing::{info, instrument};

use crate::builder::{PublicRequests, RequestBuilder};
use crate::config::ClientConfig;
use crate::error::RestResult;
use crate::request::RequestDescriptor;
use crate::response::ApiResponse;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    AccountSettings, BorrowHistoryQuery, BorrowLendRequest, BorrowPositionHistoryQuery,
    CapitalHistoryQuery, FillHistoryQuery, InterestHistoryQuery, MaxOrderQuery,
    MaxWithdrawalQuery, OrderHistoryQuery, OrderRef, OrderRequest, Page, QuoteHistoryQuery,
    QuoteRequest, RfqHistoryQuery, RfqRequest, SettlementHistoryQuery, SymbolHistoryQuery,
    WithdrawalRequest,
};

/// Authenticated Backpack client
///
/// Every operation takes an optional `window` overriding the client default
/// for that call.
///
/// # Example
///
/// ```no_run
/// use bpx_rest::{AccountClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AccountClient::new(Credentials::from_env()?)?;
///     let balances = client.get_balances(None).await?;
///     println!("{:?}", balances);
///     Ok(())
/// }
/// ```
pub struct AccountClient<T: Transport = HttpTransport> {
    builder: RequestBuilder,
    transport: T,
}

impl AccountClient<HttpTransport> {
    /// Create a client with default configuration
    pub fn new(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client from `BPX_PUBLIC_KEY` / `BPX_SECRET_KEY`
    pub fn from_env() -> RestResult<Self> {
        Self::new(Credentials::from_env()?)
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> RestResult<Self> {
        let builder = config.request_builder(credentials)?;
        let transport = HttpTransport::new(&config)?;
        info!("Created Backpack account client");
        Ok(Self::with_transport(builder, transport))
    }
}

impl<T: Transport> AccountClient<T> {
    /// Create a client over any transport
    pub fn with_transport(builder: RequestBuilder, transport: T) -> Self {
        Self { builder, transport }
    }

    /// Request builder backing this client
    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Default window (ms)
    pub fn window(&self) -> u64 {
        self.builder.window()
    }

    /// Change the default window
    pub fn set_window(&mut self, window: u64) -> RestResult<()> {
        Ok(self.builder.set_window(window)?)
    }

    /// Execute a prepared request
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn send(&self, request: RequestDescriptor) -> RestResult<ApiResponse> {
        self.transport.execute(&request).await
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// Account settings
    pub async fn get_account(&self, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_account(window)?).await
    }

    /// Update account settings
    pub async fn update_account(
        &self,
        settings: &AccountSettings,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.account().update_account(settings, window)?).await
    }

    /// Maximum borrowable quantity
    pub async fn get_max_borrow_quantity(
        &self,
        symbol: &str,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_max_borrow_quantity(symbol, window)?).await
    }

    /// Maximum order quantity
    pub async fn get_max_order_quantity(
        &self,
        query: &MaxOrderQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_max_order_quantity(query, window)?).await
    }

    /// Maximum withdrawal quantity
    pub async fn get_max_withdrawal_quantity(
        &self,
        query: &MaxWithdrawalQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_max_withdrawal_quantity(query, window)?).await
    }

    /// Open futures positions
    pub async fn get_open_positions(&self, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_open_positions(window)?).await
    }

    // ========================================================================
    // Borrow / Lend
    // ========================================================================

    /// Open borrow/lend positions
    pub async fn get_borrow_lend_positions(&self, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.borrow_lend().get_borrow_lend_positions(window)?).await
    }

    /// Borrow or lend
    pub async fn execute_borrow_lend(
        &self,
        request: &BorrowLendRequest,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.borrow_lend().execute_borrow_lend(request, window)?).await
    }

    // ========================================================================
    // Capital
    // ========================================================================

    /// Account balances
    pub async fn get_balances(&self, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_balances(window)?).await
    }

    /// Collateral summary
    pub async fn get_collateral(
        &self,
        subaccount_id: Option<u32>,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_collateral(subaccount_id, window)?).await
    }

    /// Deposit history
    pub async fn get_deposits(
        &self,
        query: &CapitalHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_deposits(query, window)?).await
    }

    /// Deposit address for a chain
    pub async fn get_deposit_address(
        &self,
        blockchain: Blockchain,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_deposit_address(blockchain, window)?).await
    }

    /// Withdrawal history
    pub async fn get_withdrawals(
        &self,
        query: &CapitalHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_withdrawals(query, window)?).await
    }

    /// Request a withdrawal
    pub async fn withdrawal(
        &self,
        request: &WithdrawalRequest,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().withdrawal(request, window)?).await
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Borrow/lend movements
    pub async fn get_borrow_history(
        &self,
        query: &BorrowHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_borrow_history(query, window)?).await
    }

    /// Borrow/lend position history
    pub async fn get_borrow_position_history(
        &self,
        query: &BorrowPositionHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_borrow_position_history(query, window)?).await
    }

    /// Interest payments
    pub async fn get_interest_history(
        &self,
        query: &InterestHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_interest_history(query, window)?).await
    }

    /// Fill history
    pub async fn get_fill_history(
        &self,
        query: &FillHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_fill_history(query, window)?).await
    }

    /// Funding payments
    pub async fn get_funding_payments(
        &self,
        query: &SymbolHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_funding_payments(query, window)?).await
    }

    /// Order history
    pub async fn get_order_history(
        &self,
        query: &OrderHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_order_history(query, window)?).await
    }

    /// Realized profit and loss
    pub async fn get_profit_and_loss_history(
        &self,
        query: &SymbolHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_profit_and_loss_history(query, window)?).await
    }

    /// RFQ history
    pub async fn get_rfq_history(
        &self,
        query: &RfqHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_rfq_history(query, window)?).await
    }

    /// Quote history
    pub async fn get_quote_history(
        &self,
        query: &QuoteHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_quote_history(query, window)?).await
    }

    /// Settlement history
    pub async fn get_settlement_history(
        &self,
        query: &SettlementHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_settlement_history(query, window)?).await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Look up one open order
    pub async fn get_open_order(
        &self,
        symbol: &str,
        order: &OrderRef,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().get_open_order(symbol, order, window)?).await
    }

    /// Place an order
    pub async fn execute_order(
        &self,
        order: &OrderRequest,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().execute_order(order, window)?).await
    }

    /// Cancel one order
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order: &OrderRef,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().cancel_order(symbol, order, window)?).await
    }

    /// All open orders
    pub async fn get_open_orders(
        &self,
        symbol: Option<&str>,
        market_type: Option<MarketType>,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().get_open_orders(symbol, market_type, window)?).await
    }

    /// Cancel every open order in a market
    pub async fn cancel_all_orders(
        &self,
        symbol: &str,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().cancel_all_orders(symbol, window)?).await
    }

    // ========================================================================
    // RFQ
    // ========================================================================

    /// Submit a request for quote
    pub async fn submit_rfq(
        &self,
        rfq: &RfqRequest,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.rfq().submit_rfq(rfq, window)?).await
    }

    /// Answer a request for quote
    pub async fn submit_quote(
        &self,
        quote: &QuoteRequest,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.rfq().submit_quote(quote, window)?).await
    }
}

impl<T: Transport> std::fmt::Debug for AccountClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClient")
            .field("builder", &self.builder)
            .finish()
    }
}

/// Unauthenticated Backpack client for market data
///
/// # Example
///
/// ```no_run
/// use bpx_rest::PublicClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PublicClient::new()?;
///     let ticker = client.get_ticker("SOL_USDC").await?;
///     println!("{:?}", ticker);
///     Ok(())
/// }
/// ```
pub struct PublicClient<T: Transport = HttpTransport> {
    requests: PublicRequests,
    transport: T,
}

impl PublicClient<HttpTransport> {
    /// Create a client with default configuration
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = HttpTransport::new(&config)?;
        info!("Created Backpack public client");
        Ok(Self::with_transport(config.public_requests(), transport))
    }
}

impl<T: Transport> PublicClient<T> {
    /// Create a client over any transport
    pub fn with_transport(requests: PublicRequests, transport: T) -> Self {
        Self { requests, transport }
    }

    /// Request builder backing this client
    pub fn requests(&self) -> &PublicRequests {
        &self.requests
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute a prepared request
    #[instrument(skip(self, request), fields(url = %request.url))]
    pub async fn send(&self, request: RequestDescriptor) -> RestResult<ApiResponse> {
        self.transport.execute(&request).await
    }

    /// All assets
    pub async fn get_assets(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_assets()).await
    }

    /// Collateral parameters for all assets
    pub async fn get_collaterals(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_collaterals()).await
    }

    /// Borrow/lend markets
    pub async fn get_borrow_lend_markets(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_borrow_lend_markets()).await
    }

    /// Borrow/lend market history
    pub async fn get_borrow_lend_market_history(
        &self,
        interval: BorrowLendMarketHistoryInterval,
        symbol: Option<&str>,
    ) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_borrow_lend_market_history(interval, symbol)).await
    }

    /// All markets
    pub async fn get_markets(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_markets()).await
    }

    /// A single market
    pub async fn get_market(&self, symbol: &str) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_market(symbol)).await
    }

    /// 24h ticker for one market
    pub async fn get_ticker(&self, symbol: &str) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_ticker(symbol)).await
    }

    /// 24h tickers for all markets
    pub async fn get_tickers(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_tickers()).await
    }

    /// Order book depth
    pub async fn get_depth(&self, symbol: &str) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_depth(symbol)).await
    }

    /// Candles for a market
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_time: i64,
        end_time: Option<i64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_klines(symbol, interval, start_time, end_time)?).await
    }

    /// Mark prices
    pub async fn get_mark_prices(&self, symbol: Option<&str>) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_mark_prices(symbol)).await
    }

    /// Open interest
    pub async fn get_open_interest(&self, symbol: Option<&str>) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_open_interest(symbol)).await
    }

    /// Historical funding rates
    pub async fn get_funding_interval_rates(
        &self,
        symbol: &str,
        page: Page,
    ) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_funding_interval_rates(symbol, page)?).await
    }

    /// System status
    pub async fn get_status(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_status()).await
    }

    /// Liveness check
    pub async fn get_ping(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_ping()).await
    }

    /// Server time
    pub async fn get_time(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_time()).await
    }

    /// Most recent trades
    pub async fn get_recent_trades(
        &self,
        symbol: &str,
        limit: Option<i64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_recent_trades(symbol, limit)?).await
    }

    /// Historical trades
    pub async fn get_history_trades(&self, symbol: &str, page: Page) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_history_trades(symbol, page)?).await
    }
}

impl<T: Transport> std::fmt::Debug for PublicClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicClient")
            .field("base_url", &self.requests.base_url())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use crate::transport::MockTransport;
    use bpx_auth::{HEADER_API_KEY, HEADER_WINDOW};
    use bpx_types::{Side, TimeInForce, ValidationError};
    use rust_decimal_macros::dec;
    use serde_json::json;

    const SECRET: &str = "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=";

    fn account_client() -> AccountClient<MockTransport> {
        let credentials = Credentials::new("public_key", SECRET).unwrap();
        AccountClient::with_transport(RequestBuilder::new(credentials), MockTransport::new())
    }

    fn public_client() -> PublicClient<MockTransport> {
        PublicClient::with_transport(PublicRequests::new(), MockTransport::new())
    }

    #[test]
    fn test_with_config_rejects_zero_window() {
        let credentials = Credentials::new("public_key", SECRET).unwrap();
        let err = AccountClient::with_config(credentials, ClientConfig::new().with_window(0))
            .unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::ZeroWindow));
    }

    #[tokio::test]
    async fn test_get_balances() {
        let client = account_client();
        client
            .transport()
            .push_json(json!({"SOL": {"available": "1", "locked": "0", "staked": "0"}}));

        let response = client.get_balances(None).await.unwrap();
        assert_eq!(response.as_json().unwrap()["SOL"]["available"], "1");

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "https://api.backpack.exchange/api/v1/capital");
        assert_eq!(request.headers[HEADER_API_KEY], "public_key");
        assert_eq!(request.headers.len(), 5);
    }

    #[tokio::test]
    async fn test_window_override_per_call() {
        let client = account_client();
        client.transport().push_json(json!([]));
        client.transport().push_json(json!([]));

        client.get_open_orders(None, None, Some(20_000)).await.unwrap();
        client.get_open_orders(None, None, None).await.unwrap();

        let requests = client.transport().take_requests();
        assert_eq!(requests[0].headers[HEADER_WINDOW], "20000");
        assert_eq!(requests[1].headers[HEADER_WINDOW], "5000");
    }

    #[tokio::test]
    async fn test_set_window() {
        let mut client = account_client();
        client.set_window(9000).unwrap();
        assert_eq!(client.window(), 9000);
        assert!(client.set_window(0).is_err());

        client.transport().push_json(json!({}));
        client.get_account(None).await.unwrap();
        assert_eq!(client.transport().last_request().unwrap().headers[HEADER_WINDOW], "9000");
    }

    #[tokio::test]
    async fn test_validation_fails_before_sending() {
        let client = account_client();
        let order = OrderRequest::limit("SOL_USDC", Side::Bid, dec!(1), dec!(20));

        let err = client.execute_order(&order, None).await.unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::MissingField("timeInForce")));
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_execute_order_posts_json() {
        let client = account_client();
        client.transport().push_json(json!({"id": "1", "status": "New"}));

        let order = OrderRequest::limit("SOL_USDC", Side::Bid, dec!(1), dec!(20))
            .with_time_in_force(TimeInForce::Gtc);
        client.execute_order(&order, None).await.unwrap();

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        let body = request.body.unwrap();
        assert_eq!(body.get("timeInForce").and_then(|v| v.as_str()), Some("GTC"));
        assert_eq!(body.get("price").and_then(|v| v.as_str()), Some("20"));
    }

    #[tokio::test]
    async fn test_cancel_all_orders_uses_delete() {
        let client = account_client();
        client.transport().push_json(json!([]));

        client.cancel_all_orders("SOL_USDC", None).await.unwrap();
        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "https://api.backpack.exchange/api/v1/orders");
    }

    #[tokio::test]
    async fn test_public_ping_returns_text() {
        let client = public_client();
        client.transport().push_text("pong");

        let response = client.get_ping().await.unwrap();
        assert_eq!(response.as_text(), Some("pong"));

        let request = client.transport().last_request().unwrap();
        assert!(request.headers.is_empty());
    }

    #[tokio::test]
    async fn test_public_klines_rejects_negative_start() {
        let client = public_client();
        let err = client
            .get_klines("SOL_USDC", KlineInterval::OneMinute, -1, None)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_status_error_propagates() {
        let client = public_client();
        client.transport().push_error(crate::RestError::Status {
            status: 429,
            body: "Too many requests".into(),
        });

        let err = client.get_status().await.unwrap_err();
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let client = account_client();
        let debug = format!("{:?}", client);
        assert!(debug.contains("AccountClient"));
        assert!(!debug.contains(SECRET));
    }
}
