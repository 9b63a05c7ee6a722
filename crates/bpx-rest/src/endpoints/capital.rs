//! Capital endpoints: balances, collateral, deposits and withdrawals
//!
//! These endpoints require authentication.

use bpx_types::{Blockchain, Params};
use tracing::{debug, instrument};

use crate::builder::RequestBuilder;
use crate::error::RestResult;
use crate::request::{Method, RequestDescriptor};
use crate::types::{CapitalHistoryQuery, ToParams, WithdrawalRequest};

/// Balances, deposits and withdrawals
pub struct CapitalEndpoints<'a> {
    builder: &'a RequestBuilder,
}

impl<'a> CapitalEndpoints<'a> {
    pub fn new(builder: &'a RequestBuilder) -> Self {
        Self { builder }
    }

    /// Account balances
    pub fn get_balances(&self, window: Option<u64>) -> RestResult<RequestDescriptor> {
        self.builder
            .signed(Method::Get, "api/v1/capital", "balanceQuery", Params::new(), window)
    }

    /// Collateral summary
    pub fn get_collateral(
        &self,
        subaccount_id: Option<u32>,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        let mut params = Params::new();
        params.insert_opt("subaccountId", subaccount_id);
        self.builder
            .signed(Method::Get, "api/v1/capital/collateral", "collateralQuery", params, window)
    }

    /// Deposit history
    #[instrument(skip(self))]
    pub fn get_deposits(
        &self,
        query: &CapitalHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder.signed(
            Method::Get,
            "wapi/v1/capital/deposits",
            "depositQueryAll",
            query.to_params()?,
            window,
        )
    }

    /// Deposit address for a chain
    pub fn get_deposit_address(
        &self,
        blockchain: Blockchain,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder.signed(
            Method::Get,
            "wapi/v1/capital/deposit/address",
            "depositAddressQuery",
            Params::new().with("blockchain", blockchain),
            window,
        )
    }

    /// Withdrawal history
    #[instrument(skip(self))]
    pub fn get_withdrawals(
        &self,
        query: &CapitalHistoryQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder.signed(
            Method::Get,
            "wapi/v1/capital/withdrawals",
            "withdrawalQueryAll",
            query.to_params()?,
            window,
        )
    }

    /// Request a withdrawal
    #[instrument(skip(self, request), fields(symbol = %request.symbol, blockchain = %request.blockchain))]
    pub fn withdrawal(
        &self,
        request: &WithdrawalRequest,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        let params = request.to_params()?;
        debug!("Withdrawing {} {} on {}", request.quantity, request.symbol, request.blockchain);

        self.builder
            .signed(Method::Post, "wapi/v1/capital/withdrawals", "withdraw", params, window)
    }
}
