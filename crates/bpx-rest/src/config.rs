//! Client configuration

use bpx_auth::Credentials;
use bpx_types::validate::check_window;
use bpx_types::ValidationResult;

use crate::builder::{PublicRequests, RequestBuilder, DEFAULT_BASE_URL, DEFAULT_WINDOW};

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
pub const DEFAULT_USER_AGENT: &str = concat!("bpx-rest/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,
    /// Default signature window (ms)
    pub window: u64,
    /// Log signing strings and headers
    pub debug: bool,
    /// Proxy URL for all requests
    pub proxy: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            window: DEFAULT_WINDOW,
            debug: false,
            proxy: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set default window
    pub fn with_window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }

    /// Enable debug output
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Route requests through a proxy
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Effective user agent
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Signed request builder for these settings
    ///
    /// Fails with `ZeroWindow` if the default window is zero.
    pub fn request_builder(&self, credentials: Credentials) -> ValidationResult<RequestBuilder> {
        Ok(RequestBuilder::new(credentials)
            .with_base_url(self.base_url.clone())
            .with_window(check_window(self.window)?)
            .with_debug(self.debug))
    }

    /// Public request builder for these settings
    pub fn public_requests(&self) -> PublicRequests {
        PublicRequests::new().with_base_url(self.base_url.clone())
    }
}
