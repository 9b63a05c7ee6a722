//! Account endpoints: settings, limits and open positions
//!
//! These endpoints require authentication.

use bpx_types::Params;
use tracing::instrument;

use crate::builder::RequestBuilder;
use crate::error::RestResult;
use crate::request::{Method, RequestDescriptor};
use crate::types::{AccountSettings, MaxOrderQuery, MaxWithdrawalQuery, ToParams};

/// Account settings, limits and positions
pub struct AccountEndpoints<'a> {
    builder: &'a RequestBuilder,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(builder: &'a RequestBuilder) -> Self {
        Self { builder }
    }

    /// Account settings
    pub fn get_account(&self, window: Option<u64>) -> RestResult<RequestDescriptor> {
        self.builder
            .signed(Method::Get, "api/v1/account", "accountQuery", Params::new(), window)
    }

    /// Update account settings
    #[instrument(skip(self))]
    pub fn update_account(
        &self,
        settings: &AccountSettings,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder.signed(
            Method::Patch,
            "api/v1/account",
            "accountUpdate",
            settings.to_params()?,
            window,
        )
    }

    /// Maximum borrowable quantity for `symbol`
    pub fn get_max_borrow_quantity(
        &self,
        symbol: &str,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder.signed(
            Method::Get,
            "api/v1/account/limits/borrow",
            "maxBorrowQuantity",
            Params::new().with("symbol", symbol),
            window,
        )
    }

    /// Maximum order quantity
    #[instrument(skip(self))]
    pub fn get_max_order_quantity(
        &self,
        query: &MaxOrderQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder.signed(
            Method::Get,
            "api/v1/account/limits/order",
            "maxOrderQuantity",
            query.to_params()?,
            window,
        )
    }

    /// Maximum withdrawal quantity
    #[instrument(skip(self))]
    pub fn get_max_withdrawal_quantity(
        &self,
        query: &MaxWithdrawalQuery,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder.signed(
            Method::Get,
            "api/v1/account/limits/withdrawal",
            "maxWithdrawalQuantity",
            query.to_params()?,
            window,
        )
    }

    /// Open futures positions
    pub fn get_open_positions(&self, window: Option<u64>) -> RestResult<RequestDescriptor> {
        self.builder
            .signed(Method::Get, "api/v1/position", "positionQuery", Params::new(), window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_auth::Credentials;
    use bpx_types::Side;
    use rust_decimal_macros::dec;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(
            Credentials::new("key", "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=").unwrap(),
        )
    }

    #[test]
    fn test_update_account_is_patch_with_body() {
        let settings = AccountSettings {
            auto_repay_borrows: Some(true),
            ..AccountSettings::default()
        };
        let request = builder().account().update_account(&settings, None).unwrap();

        assert_eq!(request.method, Method::Patch);
        assert!(request.query.is_none());
        assert_eq!(request.json_body(), Some(serde_json::json!({"autoRepayBorrows": true})));
    }

    #[test]
    fn test_max_order_quantity_query() {
        let query = MaxOrderQuery::new("SOL_USDC", Side::Bid).with_price(dec!(20));
        let request = builder().account().get_max_order_quantity(&query, None).unwrap();

        assert_eq!(
            request.full_url().unwrap(),
            "https://api.backpack.exchange/api/v1/account/limits/order?price=20&side=Bid&symbol=SOL_USDC"
        );
    }
}
