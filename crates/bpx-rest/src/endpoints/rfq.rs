//! Request-for-quote endpoints

use tracing::instrument;

use crate::builder::RequestBuilder;
use crate::error::RestResult;
use crate::request::{Method, RequestDescriptor};
use crate::types::{QuoteRequest, RfqRequest, ToParams};

/// RFQ submission and quoting
pub struct RfqEndpoints<'a> {
    builder: &'a RequestBuilder,
}

impl<'a> RfqEndpoints<'a> {
    pub fn new(builder: &'a RequestBuilder) -> Self {
        Self { builder }
    }

    /// Submit a request for quote
    #[instrument(skip(self))]
    pub fn submit_rfq(&self, rfq: &RfqRequest, window: Option<u64>) -> RestResult<RequestDescriptor> {
        self.builder
            .signed(Method::Post, "api/v1/rfq", "rfqSubmit", rfq.to_params()?, window)
    }

    /// Answer a request for quote
    #[instrument(skip(self))]
    pub fn submit_quote(
        &self,
        quote: &QuoteRequest,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        self.builder
            .signed(Method::Post, "api/v1/rfq/quote", "quoteSubmit", quote.to_params()?, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_auth::Credentials;
    use rust_decimal_macros::dec;

    #[test]
    fn test_submit_quote() {
        let builder = RequestBuilder::new(
            Credentials::new("key", "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=").unwrap(),
        );
        let quote = QuoteRequest::new("rfq-1", dec!(19.9), dec!(20.1));
        let request = builder.rfq().submit_quote(&quote, None).unwrap();

        assert_eq!(request.url, "https://api.backpack.exchange/api/v1/rfq/quote");
        assert_eq!(
            request.body.unwrap().canonical(),
            "askPrice=20.1&bidPrice=19.9&rfqId=rfq-1"
        );
    }
}
