//! Request construction: signing core and endpoint group accessors
//!
//! [`RequestBuilder`] turns an operation into a [`RequestDescriptor`] without
//! touching the network. Transports then execute the descriptor, so the same
//! builder backs both the async and the blocking clients.

use bpx_auth::{Credentials, RequestSigner};
use bpx_types::validate::check_window;
use bpx_types::{Params, ValidationResult};
use tracing::debug;

use crate::endpoints::{
    AccountEndpoints, BorrowLendEndpoints, CapitalEndpoints, HistoryEndpoints, MarketEndpoints,
    OrderEndpoints, RfqEndpoints,
};
use crate::error::RestResult;
use crate::request::{Headers, Method, RequestDescriptor};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.backpack.exchange/";

/// Default signature validity window in milliseconds
pub const DEFAULT_WINDOW: u64 = 5000;

fn normalize_base_url(url: impl Into<String>) -> String {
    let mut url = url.into();
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

/// Builds signed requests for account endpoints
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    credentials: Credentials,
    base_url: String,
    window: u64,
    debug: bool,
}

impl RequestBuilder {
    /// Create a builder with the default base URL and window
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            window: DEFAULT_WINDOW,
            debug: false,
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Set the default window
    ///
    /// Unchecked here; a zero window fails each signed call with `ZeroWindow`.
    /// Use [`set_window`](Self::set_window) to validate up front.
    pub fn with_window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }

    /// Log signing strings and headers
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Default window applied when a call does not override it
    pub fn window(&self) -> u64 {
        self.window
    }

    /// Change the default window
    pub fn set_window(&mut self, window: u64) -> ValidationResult<()> {
        self.window = check_window(window)?;
        Ok(())
    }

    /// Base URL, always ending in `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether debug output is enabled
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Credentials used for signing
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolve the window for one call
    pub fn effective_window(&self, window: Option<u64>) -> ValidationResult<u64> {
        check_window(window.unwrap_or(self.window))
    }

    /// Sign `params` under `instruction` and build the descriptor
    pub fn signed(
        &self,
        method: Method,
        path: &str,
        instruction: &str,
        params: Params,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        let window = self.effective_window(window)?;
        let signer = RequestSigner::new(&self.credentials, window).with_debug(self.debug);
        self.assemble(method, path, instruction, params, signer)
    }

    /// Like [`signed`](Self::signed) with a fixed timestamp
    pub fn signed_at(
        &self,
        method: Method,
        path: &str,
        instruction: &str,
        params: Params,
        timestamp: i64,
        window: Option<u64>,
    ) -> RestResult<RequestDescriptor> {
        let window = self.effective_window(window)?;
        let signer = RequestSigner::at(&self.credentials, timestamp, window).with_debug(self.debug);
        self.assemble(method, path, instruction, params, signer)
    }

    fn assemble(
        &self,
        method: Method,
        path: &str,
        instruction: &str,
        params: Params,
        signer: RequestSigner<'_>,
    ) -> RestResult<RequestDescriptor> {
        let headers = signer.sign(instruction, &params).to_map();
        debug!("Built {} {} ({})", method, path, instruction);

        Ok(RequestDescriptor::new(
            method,
            format!("{}{}", self.base_url, path),
            headers,
            params,
        ))
    }

    /// Account settings, limits and positions
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Borrow / lend
    pub fn borrow_lend(&self) -> BorrowLendEndpoints<'_> {
        BorrowLendEndpoints::new(self)
    }

    /// Balances, deposits and withdrawals
    pub fn capital(&self) -> CapitalEndpoints<'_> {
        CapitalEndpoints::new(self)
    }

    /// History queries
    pub fn history(&self) -> HistoryEndpoints<'_> {
        HistoryEndpoints::new(self)
    }

    /// Order placement and cancellation
    pub fn orders(&self) -> OrderEndpoints<'_> {
        OrderEndpoints::new(self)
    }

    /// Request for quote
    pub fn rfq(&self) -> RfqEndpoints<'_> {
        RfqEndpoints::new(self)
    }
}

/// Builds unauthenticated requests for public endpoints
#[derive(Debug, Clone)]
pub struct PublicRequests {
    base_url: String,
}

impl Default for PublicRequests {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicRequests {
    /// Create with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Base URL, always ending in `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET for `path`
    pub fn get(&self, path: &str, params: Params) -> RequestDescriptor {
        RequestDescriptor::new(
            Method::Get,
            format!("{}{}", self.base_url, path),
            Headers::new(),
            params,
        )
    }

    /// Market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_auth::{HEADER_SIGNATURE, HEADER_TIMESTAMP, HEADER_WINDOW};
    use bpx_types::ValidationError;

    const SECRET: &str = "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=";

    fn builder() -> RequestBuilder {
        RequestBuilder::new(Credentials::new("public_key", SECRET).unwrap())
    }

    #[test]
    fn test_defaults() {
        let builder = builder();
        assert_eq!(builder.window(), DEFAULT_WINDOW);
        assert_eq!(builder.base_url(), DEFAULT_BASE_URL);
        assert!(!builder.is_debug());
    }

    #[test]
    fn test_base_url_normalized() {
        let builder = builder().with_base_url("http://localhost:8080");
        assert_eq!(builder.base_url(), "http://localhost:8080/");
    }

    #[test]
    fn test_window_override() {
        let builder = builder();
        let request = builder
            .signed(Method::Get, "api/v1/capital", "balanceQuery", Params::new(), Some(60_000))
            .unwrap();
        assert_eq!(request.headers[HEADER_WINDOW], "60000");

        let request = builder
            .signed(Method::Get, "api/v1/capital", "balanceQuery", Params::new(), None)
            .unwrap();
        assert_eq!(request.headers[HEADER_WINDOW], "5000");
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut builder = builder();
        let err = builder
            .signed(Method::Get, "api/v1/capital", "balanceQuery", Params::new(), Some(0))
            .unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::ZeroWindow));

        assert_eq!(builder.set_window(0), Err(ValidationError::ZeroWindow));
        assert_eq!(builder.window(), DEFAULT_WINDOW);
        builder.set_window(10_000).unwrap();
        assert_eq!(builder.window(), 10_000);
    }

    #[test]
    fn test_signed_at_is_reproducible() {
        let builder = builder();
        let params = Params::new().with("symbol", "SOL_USDC");
        let a = builder
            .signed_at(Method::Delete, "api/v1/orders", "orderCancelAll", params.clone(), 1_700_000_000_000, None)
            .unwrap();
        let b = builder
            .with_debug(true)
            .signed_at(Method::Delete, "api/v1/orders", "orderCancelAll", params, 1_700_000_000_000, None)
            .unwrap();

        assert_eq!(a.headers[HEADER_SIGNATURE], b.headers[HEADER_SIGNATURE]);
        assert_eq!(a.headers[HEADER_TIMESTAMP], "1700000000000");
        assert_eq!(a.url, "https://api.backpack.exchange/api/v1/orders");
    }

    #[test]
    fn test_public_requests_have_no_headers() {
        let request = PublicRequests::new().get("api/v1/status", Params::new());
        assert!(request.headers.is_empty());
        assert_eq!(request.url, "https://api.backpack.exchange/api/v1/status");
    }
}
