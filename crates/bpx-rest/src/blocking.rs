//! Blocking REST clients
//!
//! Same operations as the async clients, executed on the calling thread
//! through a [`BlockingTransport`].

use bpx_auth::Credentials;
use bpx_types::{Blockchain, BorrowLendMarketHistoryInterval, KlineInterval, MarketType};
use tracing::{info, instrument};

use crate::builder::{PublicRequests, RequestBuilder};
use crate::config::ClientConfig;
use crate::error::RestResult;
use crate::request::RequestDescriptor;
use crate::response::ApiResponse;
use crate::transport::{BlockingHttpTransport, BlockingTransport};
use crate::types::{
    AccountSettings, BorrowHistoryQuery, BorrowLendRequest, BorrowPositionHistoryQuery,
    CapitalHistoryQuery, FillHistoryQuery, InterestHistoryQuery, MaxOrderQuery,
    MaxWithdrawalQuery, OrderHistoryQuery, OrderRef, OrderRequest, Page, QuoteHistoryQuery,
    QuoteRequest, RfqHistoryQuery, RfqRequest, SettlementHistoryQuery, SymbolHistoryQuery,
    WithdrawalRequest,
};

/// Authenticated Backpack client that blocks on every call
pub struct BlockingAccountClient<T: BlockingTransport = BlockingHttpTransport> {
    builder: RequestBuilder,
    transport: T,
}

impl BlockingAccountClient<BlockingHttpTransport> {
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
        let transport = BlockingHttpTransport::new(&config)?;
        info!("Created blocking Backpack account client");
        Ok(Self::with_transport(builder, transport))
    }
}

impl<T: BlockingTransport> BlockingAccountClient<T> {
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
    pub fn send(&self, request: RequestDescriptor) -> RestResult<ApiResponse> {
        self.transport.execute(&request)
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// Account settings
    pub fn get_account(&self, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_account(window)?)
    }

    /// Update account settings
    pub fn update_account(
        &self,
        settings: &AccountSettings,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.account().update_account(settings, window)?)
    }

    /// Maximum borrowable quantity
    pub fn get_max_borrow_quantity(
        &self,
        symbol: &str,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_max_borrow_quantity(symbol, window)?)
    }

    /// Maximum order quantity
    pub fn get_max_order_quantity(
        &self,
        query: &MaxOrderQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_max_order_quantity(query, window)?)
    }

    /// Maximum withdrawal quantity
    pub fn get_max_withdrawal_quantity(
        &self,
        query: &MaxWithdrawalQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_max_withdrawal_quantity(query, window)?)
    }

    /// Open futures positions
    pub fn get_open_positions(&self, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.account().get_open_positions(window)?)
    }

    // ========================================================================
    // Borrow / Lend
    // ========================================================================

    /// Open borrow/lend positions
    pub fn get_borrow_lend_positions(&self, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.borrow_lend().get_borrow_lend_positions(window)?)
    }

    /// Borrow or lend
    pub fn execute_borrow_lend(
        &self,
        request: &BorrowLendRequest,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.borrow_lend().execute_borrow_lend(request, window)?)
    }

    // ========================================================================
    // Capital
    // ========================================================================

    /// Account balances
    pub fn get_balances(&self, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_balances(window)?)
    }

    /// Collateral summary
    pub fn get_collateral(
        &self,
        subaccount_id: Option<u32>,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_collateral(subaccount_id, window)?)
    }

    /// Deposit history
    pub fn get_deposits(
        &self,
        query: &CapitalHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_deposits(query, window)?)
    }

    /// Deposit address for a chain
    pub fn get_deposit_address(
        &self,
        blockchain: Blockchain,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_deposit_address(blockchain, window)?)
    }

    /// Withdrawal history
    pub fn get_withdrawals(
        &self,
        query: &CapitalHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().get_withdrawals(query, window)?)
    }

    /// Request a withdrawal
    pub fn withdrawal(
        &self,
        request: &WithdrawalRequest,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.capital().withdrawal(request, window)?)
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Borrow/lend movements
    pub fn get_borrow_history(
        &self,
        query: &BorrowHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_borrow_history(query, window)?)
    }

    /// Borrow/lend position history
    pub fn get_borrow_position_history(
        &self,
        query: &BorrowPositionHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_borrow_position_history(query, window)?)
    }

    /// Interest payments
    pub fn get_interest_history(
        &self,
        query: &InterestHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_interest_history(query, window)?)
    }

    /// Fill history
    pub fn get_fill_history(
        &self,
        query: &FillHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_fill_history(query, window)?)
    }

    /// Funding payments
    pub fn get_funding_payments(
        &self,
        query: &SymbolHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_funding_payments(query, window)?)
    }

    /// Order history
    pub fn get_order_history(
        &self,
        query: &OrderHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_order_history(query, window)?)
    }

    /// Realized profit and loss
    pub fn get_profit_and_loss_history(
        &self,
        query: &SymbolHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_profit_and_loss_history(query, window)?)
    }

    /// RFQ history
    pub fn get_rfq_history(
        &self,
        query: &RfqHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_rfq_history(query, window)?)
    }

    /// Quote history
    pub fn get_quote_history(
        &self,
        query: &QuoteHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_quote_history(query, window)?)
    }

    /// Settlement history
    pub fn get_settlement_history(
        &self,
        query: &SettlementHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.history().get_settlement_history(query, window)?)
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Look up one open order
    pub fn get_open_order(
        &self,
        symbol: &str,
        order: &OrderRef,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().get_open_order(symbol, order, window)?)
    }

    /// Place an order
    pub fn execute_order(
        &self,
        order: &OrderRequest,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().execute_order(order, window)?)
    }

    /// Cancel one order
    pub fn cancel_order(
        &self,
        symbol: &str,
        order: &OrderRef,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().cancel_order(symbol, order, window)?)
    }

    /// All open orders
    pub fn get_open_orders(
        &self,
        symbol: Option<&str>,
        market_type: Option<MarketType>,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().get_open_orders(symbol, market_type, window)?)
    }

    /// Cancel every open order in a market
    pub fn cancel_all_orders(&self, symbol: &str, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.orders().cancel_all_orders(symbol, window)?)
    }

    // ========================================================================
    // RFQ
    // ========================================================================

    /// Submit a request for quote
    pub fn submit_rfq(&self, rfq: &RfqRequest, window: Option<u64>) -> RestResult<ApiResponse> {
        self.send(self.builder.rfq().submit_rfq(rfq, window)?)
    }

    /// Answer a request for quote
    pub fn submit_quote(
        &self,
        quote: &QuoteRequest,
        window: Option<u64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.builder.rfq().submit_quote(quote, window)?)
    }
}

impl<T: BlockingTransport> std::fmt::Debug for BlockingAccountClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingAccountClient")
            .field("builder", &self.builder)
            .finish()
    }
}

/// Unauthenticated Backpack client that blocks on every call
pub struct BlockingPublicClient<T: BlockingTransport = BlockingHttpTransport> {
    requests: PublicRequests,
    transport: T,
}

impl BlockingPublicClient<BlockingHttpTransport> {
    /// Create a client with default configuration
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = BlockingHttpTransport::new(&config)?;
        info!("Created blocking Backpack public client");
        Ok(Self::with_transport(config.public_requests(), transport))
    }
}

impl<T: BlockingTransport> BlockingPublicClient<T> {
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
    pub fn send(&self, request: RequestDescriptor) -> RestResult<ApiResponse> {
        self.transport.execute(&request)
    }

    /// All assets
    pub fn get_assets(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_assets())
    }

    /// Collateral parameters for all assets
    pub fn get_collaterals(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_collaterals())
    }

    /// Borrow/lend markets
    pub fn get_borrow_lend_markets(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_borrow_lend_markets())
    }

    /// Borrow/lend market history
    pub fn get_borrow_lend_market_history(
        &self,
        interval: BorrowLendMarketHistoryInterval,
        symbol: Option<&str>,
    ) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_borrow_lend_market_history(interval, symbol))
    }

    /// All markets
    pub fn get_markets(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_markets())
    }

    /// A single market
    pub fn get_market(&self, symbol: &str) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_market(symbol))
    }

    /// 24h ticker for one market
    pub fn get_ticker(&self, symbol: &str) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_ticker(symbol))
    }

    /// 24h tickers for all markets
    pub fn get_tickers(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_tickers())
    }

    /// Order book depth
    pub fn get_depth(&self, symbol: &str) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_depth(symbol))
    }

    /// Candles for a market
    pub fn get_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_time: i64,
        end_time: Option<i64>,
    ) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_klines(symbol, interval, start_time, end_time)?)
    }

    /// Mark prices
    pub fn get_mark_prices(&self, symbol: Option<&str>) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_mark_prices(symbol))
    }

    /// Open interest
    pub fn get_open_interest(&self, symbol: Option<&str>) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_open_interest(symbol))
    }

    /// Historical funding rates
    pub fn get_funding_interval_rates(&self, symbol: &str, page: Page) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_funding_interval_rates(symbol, page)?)
    }

    /// System status
    pub fn get_status(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_status())
    }

    /// Liveness check
    pub fn get_ping(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_ping())
    }

    /// Server time
    pub fn get_time(&self) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_time())
    }

    /// Most recent trades
    pub fn get_recent_trades(&self, symbol: &str, limit: Option<i64>) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_recent_trades(symbol, limit)?)
    }

    /// Historical trades
    pub fn get_history_trades(&self, symbol: &str, page: Page) -> RestResult<ApiResponse> {
        self.send(self.requests.market().get_history_trades(symbol, page)?)
    }
}

impl<T: BlockingTransport> std::fmt::Debug for BlockingPublicClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingPublicClient")
            .field("base_url", &self.requests.base_url())
            .finish()
    }
}
