//! Canonical signing string and authentication headers
//!
//! Backpack signature algorithm:
//! 1. `instruction=<instruction>`
//! 2. Parameters sorted by key, rendered `key=value` (booleans lowercase),
//!    joined with `&` and appended after a `&`, only if there are any
//! 3. `&timestamp=<ms since epoch>&window=<ms>`
//! 4. Ed25519 over the UTF-8 bytes, base64 encoded

use bpx_types::Params;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

use crate::credentials::Credentials;

/// Header carrying the public key
pub const HEADER_API_KEY: &str = "X-API-Key";
/// Header carrying the base64 signature
pub const HEADER_SIGNATURE: &str = "X-Signature";
/// Header carrying the signed timestamp
pub const HEADER_TIMESTAMP: &str = "X-Timestamp";
/// Header carrying the validity window
pub const HEADER_WINDOW: &str = "X-Window";
/// Content type header name
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// Content type sent on every authenticated request
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Build the canonical string that gets signed
///
/// The output depends only on the arguments; the iteration order of
/// [`Params`] is always ascending by key.
pub fn signing_string(instruction: &str, params: &Params, timestamp: i64, window: u64) -> String {
    let mut sign_str = format!("instruction={}", instruction);

    if !params.is_empty() {
        sign_str.push('&');
        sign_str.push_str(&params.canonical());
    }

    sign_str.push_str(&format!("&timestamp={}&window={}", timestamp, window));
    sign_str
}

/// Milliseconds since the Unix epoch
pub fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Authentication headers for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Public key identifier
    pub api_key: String,
    /// Base64 Ed25519 signature
    pub signature: String,
    /// Signed timestamp (ms)
    pub timestamp: i64,
    /// Effective window (ms)
    pub window: u64,
}

impl SignedHeaders {
    /// The four `X-*` headers plus `Content-Type`
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (HEADER_API_KEY.to_string(), self.api_key.clone()),
            (HEADER_SIGNATURE.to_string(), self.signature.clone()),
            (HEADER_TIMESTAMP.to_string(), self.timestamp.to_string()),
            (HEADER_WINDOW.to_string(), self.window.to_string()),
            (HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()),
        ])
    }
}

/// Request signer for building authenticated requests
///
/// Captures a fresh timestamp when created; create one per request.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    timestamp: i64,
    window: u64,
    debug: bool,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer stamped with the current time
    pub fn new(credentials: &'a Credentials, window: u64) -> Self {
        Self::at(credentials, timestamp_millis(), window)
    }

    /// Create a request signer for a fixed timestamp
    pub fn at(credentials: &'a Credentials, timestamp: i64, window: u64) -> Self {
        Self {
            credentials,
            timestamp,
            window,
            debug: false,
        }
    }

    /// Emit the signing string and headers as debug events
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Get the timestamp for this request
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Get the window for this request
    pub fn window(&self) -> u64 {
        self.window
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign `instruction` over `params` and assemble the headers
    pub fn sign(&self, instruction: &str, params: &Params) -> SignedHeaders {
        let sign_str = signing_string(instruction, params, self.timestamp, self.window);
        if self.debug {
            debug!(target: "bpx_auth::debug", signing_string = %sign_str, "Signing request");
        }

        let headers = SignedHeaders {
            api_key: self.credentials.api_key().to_string(),
            signature: self.credentials.sign(&sign_str),
            timestamp: self.timestamp,
            window: self.window,
        };
        if self.debug {
            debug!(target: "bpx_auth::debug", headers = ?headers.to_map(), "Assembled headers");
        }

        headers
    }
}
