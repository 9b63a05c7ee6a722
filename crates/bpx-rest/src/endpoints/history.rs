//! History endpoints under `wapi/v1/history`
//!
//! These endpoints require authentication. Every query is a GET whose
//! filters travel in the query string.

use tracing::instrument;

use crate::builder::RequestBuilder;
use crate::error::RestResult;
use crate::request::{Method, RequestDescriptor};
use crate::types::{
    BorrowHistoryQuery, BorrowPositionHistoryQuery, FillHistoryQuery, InterestHistoryQuery,
    OrderHistoryQuery, QuoteHistoryQuery, RfqHistoryQuery, SettlementHistoryQuery,
    SymbolHistoryQuery, ToParams,
};

/// History queries
pub struct HistoryEndpoints<'a> {
    builder: &'a RequestBuilder,
}

impl<'a> HistoryEndpoints<'a> {
    pub fn new(builder: &'a RequestBuilder) -> Self {
        Self { builder }
    }

    fn query(
        &self,
        path: &str,
        instruction: &str,
        query: &impl ToParams,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder
            .signed(Method::Get, path, instruction, query.to_params()?, window)
    }

    /// Borrow/lend movements
    #[instrument(skip(self))]
    pub fn get_borrow_history(
        &self,
        query: &BorrowHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query("wapi/v1/history/borrowLend", "borrowHistoryQueryAll", query, window)
    }

    /// Borrow/lend position history
    #[instrument(skip(self))]
    pub fn get_borrow_position_history(
        &self,
        query: &BorrowPositionHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query(
            "wapi/v1/history/borrowLend/positions",
            "borrowPositionHistoryQueryAll",
            query,
            window,
        )
    }

    /// Interest payments
    #[instrument(skip(self))]
    pub fn get_interest_history(
        &self,
        query: &InterestHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query("wapi/v1/history/interest", "interestHistoryQueryAll", query, window)
    }

    /// Fills
    #[instrument(skip(self))]
    pub fn get_fill_history(
        &self,
        query: &FillHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query("wapi/v1/history/fills", "fillHistoryQueryAll", query, window)
    }

    /// Funding payments
    #[instrument(skip(self))]
    pub fn get_funding_payments(
        &self,
        query: &SymbolHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query("wapi/v1/history/funding", "fundingHistoryQueryAll", query, window)
    }

    /// Orders
    #[instrument(skip(self))]
    pub fn get_order_history(
        &self,
        query: &OrderHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query("wapi/v1/history/orders", "orderHistoryQueryAll", query, window)
    }

    /// Realized profit and loss
    #[instrument(skip(self))]
    pub fn get_profit_and_loss_history(
        &self,
        query: &SymbolHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query("wapi/v1/history/pnl", "pnlHistoryQueryAll", query, window)
    }

    /// Requests for quote
    #[instrument(skip(self))]
    pub fn get_rfq_history(
        &self,
        query: &RfqHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query("wapi/v1/history/rfq", "rfqHistoryQueryAll", query, window)
    }

    /// Quotes
    #[instrument(skip(self))]
    pub fn get_quote_history(
        &self,
        query: &QuoteHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query("wapi/v1/history/quote", "quoteHistoryQueryAll", query, window)
    }

    /// Settlements
    #[instrument(skip(self))]
    pub fn get_settlement_history(
        &self,
        query: &SettlementHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.query("wapi/v1/history/settlement", "settlementHistoryQueryAll", query, window)
    }
}
