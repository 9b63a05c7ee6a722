//! Request signing for the Backpack Exchange API
//!
//! Every private Backpack request is authenticated with an Ed25519 signature
//! over a canonical string built from an instruction name, the request
//! parameters, a timestamp and a validity window.
//!
//! # Example
//!
//! ```no_run
//! use bpx_auth::{Credentials, RequestSigner};
//! use bpx_types::Params;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//! let params = Params::new().with("symbol", "SOL_USDC");
//!
//! let headers = RequestSigner::new(&creds, 5000).sign("orderQueryAll", &params);
//! println!("X-Signature: {}", headers.signature);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::{Credentials, PUBLIC_KEY_ENV, SECRET_KEY_ENV};
pub use error::{AuthError, AuthResult};
pub use signer::{
    signing_string, timestamp_millis, RequestSigner, SignedHeaders, CONTENT_TYPE_JSON,
    HEADER_API_KEY, HEADER_CONTENT_TYPE, HEADER_SIGNATURE, HEADER_TIMESTAMP, HEADER_WINDOW,
};
