//! Request option types for Backpack REST endpoints
//!
//! Every type here turns into [`Params`] through [`ToParams`], validating as
//! it goes. An `Option` field that is `None` is left out of the request;
//! `Some(0)` is sent as `0`.

use bpx_types::validate::{check_limit, check_non_negative_opt};
use bpx_types::{
    Blockchain, BorrowLendEventType, BorrowLendPositionState, BorrowLendSide, FillType,
    InterestPaymentSource, MarketType, OrderType, Params, SelfTradePrevention,
    SettlementSourceFilter, Side, TimeInForce, ValidationError, ValidationResult,
};
use rust_decimal::Decimal;

/// Conversion of an options struct into validated request parameters
pub trait ToParams {
    /// Validate and render the parameters
    fn to_params(&self) -> ValidationResult<Params>;
}

// ============================================================================
// Paging and time ranges
// ============================================================================

/// Page selection shared by history endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of rows, `0..=1000`
    pub limit: Option<i64>,
    /// Rows to skip, `>= 0`
    pub offset: Option<i64>,
}

impl Page {
    /// Page with both bounds set
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Page with only a limit
    pub fn limit(limit: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }

    /// Set the offset
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Validate and add `limit` / `offset` to `params`
    pub fn apply(&self, params: &mut Params) -> ValidationResult<()> {
        if let Some(limit) = self.limit {
            params.insert("limit", check_limit(limit)?);
        }
        params.insert_opt("offset", check_non_negative_opt("offset", self.offset)?);
        Ok(())
    }
}

/// Time bounds in milliseconds since the epoch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl TimeRange {
    /// Range with both bounds
    pub fn new(from: i64, to: i64) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Range open at the end
    pub fn since(from: i64) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Validate and add `from` / `to` to `params`
    pub fn apply(&self, params: &mut Params) -> ValidationResult<()> {
        params
            .insert_opt("from", check_non_negative_opt("from", self.from)?)
            .insert_opt("to", check_non_negative_opt("to", self.to)?);
        Ok(())
    }
}

// ============================================================================
// Orders
// ============================================================================

/// Order request for placing new orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Market symbol (e.g., "SOL_USDC")
    pub symbol: String,
    /// Bid or Ask
    pub side: Side,
    /// Market or Limit
    pub order_type: OrderType,
    /// Base quantity
    pub quantity: Option<Decimal>,
    /// Quote quantity (market orders)
    pub quote_quantity: Option<Decimal>,
    /// Limit price, ignored for market orders
    pub price: Option<Decimal>,
    /// Trigger price for conditional orders
    pub trigger_price: Option<Decimal>,
    /// Required unless `post_only` is set
    pub time_in_force: Option<TimeInForce>,
    pub self_trade_prevention: SelfTradePrevention,
    /// Client-chosen order id
    pub client_id: Option<u32>,
    pub post_only: bool,
    pub reduce_only: bool,
    pub auto_borrow: bool,
    pub auto_borrow_repay: bool,
    pub auto_lend: bool,
    pub auto_lend_redeem: bool,
}

impl OrderRequest {
    fn base(symbol: impl Into<String>, side: Side, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity: None,
            quote_quantity: None,
            price: None,
            trigger_price: None,
            time_in_force: None,
            self_trade_prevention: SelfTradePrevention::default(),
            client_id: None,
            post_only: false,
            reduce_only: false,
            auto_borrow: false,
            auto_borrow_repay: false,
            auto_lend: false,
            auto_lend_redeem: false,
        }
    }

    /// Create a market order sized in the base asset
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        let mut order = Self::base(symbol, side, OrderType::Market);
        order.quantity = Some(quantity);
        order
    }

    /// Create a market order sized in the quote asset
    pub fn market_quote(symbol: impl Into<String>, side: Side, quote_quantity: Decimal) -> Self {
        let mut order = Self::base(symbol, side, OrderType::Market);
        order.quote_quantity = Some(quote_quantity);
        order
    }

    /// Create a limit order
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        let mut order = Self::base(symbol, side, OrderType::Limit);
        order.quantity = Some(quantity);
        order.price = Some(price);
        order
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set self-trade prevention
    pub fn with_self_trade_prevention(mut self, stp: SelfTradePrevention) -> Self {
        self.self_trade_prevention = stp;
        self
    }

    /// Set the limit price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the trigger price
    pub fn with_trigger_price(mut self, price: Decimal) -> Self {
        self.trigger_price = Some(price);
        self
    }

    /// Set the client order id
    pub fn with_client_id(mut self, client_id: u32) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Set as post-only (maker only)
    pub fn post_only(mut self) -> Self {
        self.post_only = true;
        self
    }

    /// Set as reduce-only
    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    /// Borrow to fill the order if needed
    pub fn with_auto_borrow(mut self) -> Self {
        self.auto_borrow = true;
        self
    }

    /// Repay borrows with the proceeds
    pub fn with_auto_borrow_repay(mut self) -> Self {
        self.auto_borrow_repay = true;
        self
    }

    /// Lend the proceeds
    pub fn with_auto_lend(mut self) -> Self {
        self.auto_lend = true;
        self
    }

    /// Redeem lent funds to fill the order if needed
    pub fn with_auto_lend_redeem(mut self) -> Self {
        self.auto_lend_redeem = true;
        self
    }
}

impl ToParams for OrderRequest {
    fn to_params(&self) -> ValidationResult<Params> {
        if self.quantity.is_none() && self.quote_quantity.is_none() {
            return Err(ValidationError::MissingField("quantity"));
        }

        let mut params = Params::new();
        params
            .insert("symbol", &self.symbol)
            .insert("side", self.side)
            .insert("orderType", self.order_type)
            .insert("selfTradePrevention", self.self_trade_prevention)
            .insert_opt("quantity", self.quantity)
            .insert_opt("quoteQuantity", self.quote_quantity)
            .insert_opt("triggerPrice", self.trigger_price)
            .insert_opt("clientId", self.client_id);

        if self.order_type == OrderType::Limit {
            let price = self.price.ok_or(ValidationError::MissingField("price"))?;
            params.insert("price", price);
        }

        if self.post_only {
            params.insert("postOnly", true);
        } else {
            let tif = self
                .time_in_force
                .ok_or(ValidationError::MissingField("timeInForce"))?;
            params.insert("timeInForce", tif);
        }

        params
            .insert_flag("reduceOnly", self.reduce_only)
            .insert_flag("autoBorrow", self.auto_borrow)
            .insert_flag("autoBorrowRepay", self.auto_borrow_repay)
            .insert_flag("autoLend", self.auto_lend)
            .insert_flag("autoLendRedeem", self.auto_lend_redeem);

        Ok(params)
    }
}

/// Identifies a single order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    /// Exchange-assigned id
    OrderId(String),
    /// Client-assigned id
    ClientId(u32),
}

impl OrderRef {
    fn apply(&self, params: &mut Params) {
        match self {
            Self::OrderId(id) => params.insert("orderId", id),
            Self::ClientId(id) => params.insert("clientId", *id),
        };
    }

    /// Parameters addressing this order in `symbol`
    pub fn to_params(&self, symbol: &str) -> Params {
        let mut params = Params::new().with("symbol", symbol);
        self.apply(&mut params);
        params
    }
}

// ============================================================================
// Capital
// ============================================================================

/// Withdrawal request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalRequest {
    /// Destination address
    pub address: String,
    /// Asset symbol (e.g., "USDC")
    pub symbol: String,
    pub blockchain: Blockchain,
    pub quantity: Decimal,
    pub client_id: Option<String>,
    /// Required when 2FA is enabled on the account
    pub two_factor_token: Option<String>,
    pub auto_borrow: bool,
    pub auto_lend_redeem: bool,
}

impl WithdrawalRequest {
    /// Create a withdrawal
    pub fn new(
        address: impl Into<String>,
        symbol: impl Into<String>,
        blockchain: Blockchain,
        quantity: Decimal,
    ) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            blockchain,
            quantity,
            client_id: None,
            two_factor_token: None,
            auto_borrow: false,
            auto_lend_redeem: false,
        }
    }

    /// Set the client id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the two-factor token
    pub fn with_two_factor_token(mut self, token: impl Into<String>) -> Self {
        self.two_factor_token = Some(token.into());
        self
    }

    /// Borrow if the balance is short
    pub fn with_auto_borrow(mut self) -> Self {
        self.auto_borrow = true;
        self
    }

    /// Redeem lent funds if the balance is short
    pub fn with_auto_lend_redeem(mut self) -> Self {
        self.auto_lend_redeem = true;
        self
    }
}

impl ToParams for WithdrawalRequest {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert("address", &self.address)
            .insert("symbol", &self.symbol)
            .insert("blockchain", self.blockchain)
            .insert("quantity", self.quantity)
            .insert_opt("clientId", self.client_id.as_deref())
            .insert_opt("twoFactorToken", self.two_factor_token.as_deref())
            .insert_flag("autoBorrow", self.auto_borrow)
            .insert_flag("autoLendRedeem", self.auto_lend_redeem);
        Ok(params)
    }
}

/// Deposit or withdrawal history filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapitalHistoryQuery {
    pub page: Page,
    pub range: TimeRange,
}

impl CapitalHistoryQuery {
    /// Query a page
    pub fn page(page: Page) -> Self {
        Self {
            page,
            range: TimeRange::default(),
        }
    }

    /// Restrict to a time range
    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = range;
        self
    }
}

impl ToParams for CapitalHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        self.page.apply(&mut params)?;
        self.range.apply(&mut params)?;
        Ok(params)
    }
}

// ============================================================================
// Account
// ============================================================================

/// Account settings update; unset fields are left unchanged
///
/// Unlike order flags, booleans here are sent as given, including `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountSettings {
    pub auto_borrow_settlements: Option<bool>,
    pub auto_lend: Option<bool>,
    pub auto_realize_pnl: Option<bool>,
    pub auto_repay_borrows: Option<bool>,
    pub leverage_limit: Option<Decimal>,
}

impl ToParams for AccountSettings {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert_opt("autoBorrowSettlements", self.auto_borrow_settlements)
            .insert_opt("autoLend", self.auto_lend)
            .insert_opt("autoRealizePnl", self.auto_realize_pnl)
            .insert_opt("autoRepayBorrows", self.auto_repay_borrows)
            .insert_opt("leverageLimit", self.leverage_limit);
        Ok(params)
    }
}

/// Maximum order quantity query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxOrderQuery {
    pub symbol: String,
    pub side: Side,
    pub price: Option<Decimal>,
    pub reduce_only: Option<bool>,
    pub auto_borrow: Option<bool>,
    pub auto_borrow_repay: Option<bool>,
    pub auto_lend_redeem: Option<bool>,
}

impl MaxOrderQuery {
    pub fn new(symbol: impl Into<String>, side: Side) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            price: None,
            reduce_only: None,
            auto_borrow: None,
            auto_borrow_repay: None,
            auto_lend_redeem: None,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }
}

impl ToParams for MaxOrderQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert("symbol", &self.symbol)
            .insert("side", self.side)
            .insert_opt("price", self.price)
            .insert_opt("reduceOnly", self.reduce_only)
            .insert_opt("autoBorrow", self.auto_borrow)
            .insert_opt("autoBorrowRepay", self.auto_borrow_repay)
            .insert_opt("autoLendRedeem", self.auto_lend_redeem);
        Ok(params)
    }
}

/// Maximum withdrawal quantity query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxWithdrawalQuery {
    pub symbol: String,
    pub auto_borrow: Option<bool>,
    pub auto_lend_redeem: Option<bool>,
}

impl MaxWithdrawalQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            auto_borrow: None,
            auto_lend_redeem: None,
        }
    }
}

impl ToParams for MaxWithdrawalQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert("symbol", &self.symbol)
            .insert_opt("autoBorrow", self.auto_borrow)
            .insert_opt("autoLendRedeem", self.auto_lend_redeem);
        Ok(params)
    }
}

// ============================================================================
// Borrow / lend
// ============================================================================

/// Borrow or lend execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowLendRequest {
    pub symbol: String,
    pub side: BorrowLendSide,
    pub quantity: Decimal,
}

impl BorrowLendRequest {
    pub fn new(symbol: impl Into<String>, side: BorrowLendSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
        }
    }
}

impl ToParams for BorrowLendRequest {
    fn to_params(&self) -> ValidationResult<Params> {
        Ok(Params::new()
            .with("symbol", &self.symbol)
            .with("side", self.side)
            .with("quantity", self.quantity))
    }
}

// ============================================================================
// RFQ
// ============================================================================

/// Request for quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RfqRequest {
    pub symbol: String,
    pub side: Side,
    pub quantity: Option<Decimal>,
    pub quote_quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub client_id: Option<u32>,
}

impl RfqRequest {
    /// RFQ sized in the base asset
    pub fn new(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity: Some(quantity),
            quote_quantity: None,
            price: None,
            client_id: None,
        }
    }

    /// RFQ sized in the quote asset
    pub fn quote(symbol: impl Into<String>, side: Side, quote_quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity: None,
            quote_quantity: Some(quote_quantity),
            price: None,
            client_id: None,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_client_id(mut self, client_id: u32) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

impl ToParams for RfqRequest {
    fn to_params(&self) -> ValidationResult<Params> {
        if self.quantity.is_none() && self.quote_quantity.is_none() {
            return Err(ValidationError::MissingField("quantity"));
        }

        let mut params = Params::new();
        params
            .insert("symbol", &self.symbol)
            .insert("side", self.side)
            .insert_opt("quantity", self.quantity)
            .insert_opt("quoteQuantity", self.quote_quantity)
            .insert_opt("price", self.price)
            .insert_opt("clientId", self.client_id);
        Ok(params)
    }
}

/// Quote in response to an RFQ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub rfq_id: String,
    pub bid_price: Decimal,
    pub ask_price: Decimal,
    pub client_id: Option<u32>,
}

impl QuoteRequest {
    pub fn new(rfq_id: impl Into<String>, bid_price: Decimal, ask_price: Decimal) -> Self {
        Self {
            rfq_id: rfq_id.into(),
            bid_price,
            ask_price,
            client_id: None,
        }
    }
}

impl ToParams for QuoteRequest {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert("rfqId", &self.rfq_id)
            .insert("bidPrice", self.bid_price)
            .insert("askPrice", self.ask_price)
            .insert_opt("clientId", self.client_id);
        Ok(params)
    }
}

// ============================================================================
// History filters
// ============================================================================

/// Order history filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderHistoryQuery {
    pub symbol: Option<String>,
    pub order_id: Option<String>,
    pub market_type: Option<MarketType>,
    pub page: Page,
}

impl ToParams for OrderHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert_opt("symbol", self.symbol.as_deref())
            .insert_opt("orderId", self.order_id.as_deref())
            .insert_opt("marketType", self.market_type);
        self.page.apply(&mut params)?;
        Ok(params)
    }
}

/// Fill history filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillHistoryQuery {
    pub symbol: Option<String>,
    pub order_id: Option<String>,
    pub fill_type: Option<FillType>,
    pub market_type: Option<MarketType>,
    pub page: Page,
    pub range: TimeRange,
}

impl ToParams for FillHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert_opt("symbol", self.symbol.as_deref())
            .insert_opt("orderId", self.order_id.as_deref())
            .insert_opt("fillType", self.fill_type)
            .insert_opt("marketType", self.market_type);
        self.page.apply(&mut params)?;
        self.range.apply(&mut params)?;
        Ok(params)
    }
}

/// Borrow/lend movement history filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorrowHistoryQuery {
    pub event_type: Option<BorrowLendEventType>,
    pub position_id: Option<String>,
    pub symbol: Option<String>,
    pub page: Page,
}

impl ToParams for BorrowHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert_opt("type", self.event_type)
            .insert_opt("positionId", self.position_id.as_deref())
            .insert_opt("symbol", self.symbol.as_deref());
        self.page.apply(&mut params)?;
        Ok(params)
    }
}

/// Borrow/lend position history filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorrowPositionHistoryQuery {
    pub symbol: Option<String>,
    pub side: Option<BorrowLendSide>,
    pub state: Option<BorrowLendPositionState>,
    pub page: Page,
}

impl ToParams for BorrowPositionHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert_opt("symbol", self.symbol.as_deref())
            .insert_opt("side", self.side)
            .insert_opt("state", self.state);
        self.page.apply(&mut params)?;
        Ok(params)
    }
}

/// Interest payment history filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestHistoryQuery {
    pub symbol: Option<String>,
    pub position_id: Option<String>,
    pub source: Option<InterestPaymentSource>,
    pub page: Page,
}

impl ToParams for InterestHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert_opt("symbol", self.symbol.as_deref())
            .insert_opt("positionId", self.position_id.as_deref())
            .insert_opt("source", self.source);
        self.page.apply(&mut params)?;
        Ok(params)
    }
}

/// Filter by subaccount and symbol (funding payments, PnL)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolHistoryQuery {
    pub subaccount_id: Option<u32>,
    pub symbol: Option<String>,
    pub page: Page,
}

impl SymbolHistoryQuery {
    /// Filter on one symbol
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }
}

impl ToParams for SymbolHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert_opt("subaccountId", self.subaccount_id)
            .insert_opt("symbol", self.symbol.as_deref());
        self.page.apply(&mut params)?;
        Ok(params)
    }
}

/// Settlement history filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettlementHistoryQuery {
    pub source: Option<SettlementSourceFilter>,
    pub page: Page,
}

impl ToParams for SettlementHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params.insert_opt("source", self.source);
        self.page.apply(&mut params)?;
        Ok(params)
    }
}

/// RFQ history filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RfqHistoryQuery {
    pub rfq_id: Option<String>,
    pub symbol: Option<String>,
    pub page: Page,
}

impl ToParams for RfqHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert_opt("rfqId", self.rfq_id.as_deref())
            .insert_opt("symbol", self.symbol.as_deref());
        self.page.apply(&mut params)?;
        Ok(params)
    }
}

/// Quote history filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteHistoryQuery {
    pub quote_id: Option<String>,
    pub symbol: Option<String>,
    pub page: Page,
}

impl ToParams for QuoteHistoryQuery {
    fn to_params(&self) -> ValidationResult<Params> {
        let mut params = Params::new();
        params
            .insert_opt("quoteId", self.quote_id.as_deref())
            .insert_opt("symbol", self.symbol.as_deref());
        self.page.apply(&mut params)?;
        Ok(params)
    }
}
