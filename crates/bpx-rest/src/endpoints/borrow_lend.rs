//! Borrow/lend endpoints

use bpx_types::Params;
use tracing::{debug, instrument};

use crate::builder::RequestBuilder;
use crate::error::RestResult;
use crate::request::{Method, RequestDescriptor};
use crate::types::{BorrowLendRequest, ToParams};

/// Borrow/lend positions and execution
pub struct BorrowLendEndpoints<'a> {
    builder: &'a RequestBuilder,
}

impl<'a> BorrowLendEndpoints<'a> {
    pub fn new(builder: &'a RequestBuilder) -> Self {
        Self { builder }
    }

    /// Open borrow/lend positions
    pub fn get_borrow_lend_positions(&self, window: Option<u64>) -> RestResult<RequestDescriptor> {
        self.builder.signed(
            Method::Get,
            "api/v1/borrowLend/positions",
            "borrowLendPositionQuery",
            Params::new(),
            window,
        )
    }

    /// Borrow or lend
    #[instrument(skip(self))]
    pub fn execute_borrow_lend(
        &self,
        request: &BorrowLendRequest,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        debug!("{} {} {}", request.side, request.quantity, request.symbol);
        self.builder.signed(
            Method::Post,
            "api/v1/borrowLend",
            "borrowLendExecute",
            request.to_params()?,
            window,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_auth::Credentials;
    use bpx_types::BorrowLendSide;
    use rust_decimal_macros::dec;

    #[test]
    fn test_execute_borrow_lend() {
        let builder = RequestBuilder::new(
            Credentials::new("key", "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=").unwrap(),
        );
        let request = BorrowLendRequest::new("USDC", BorrowLendSide::Lend, dec!(250));
        let descriptor = builder.borrow_lend().execute_borrow_lend(&request, None).unwrap();

        assert_eq!(descriptor.url, "https://api.backpack.exchange/api/v1/borrowLend");
        assert_eq!(
            descriptor.json_body(),
            Some(serde_json::json!({"quantity": "250", "side": "Lend", "symbol": "USDC"}))
        );
    }
}
