//! REST API client for Backpack Exchange
//!
//! This crate provides async and blocking clients for Backpack's REST API,
//! covering market data, account settings, capital movements, borrow/lend,
//! order management, history queries and RFQ.
//!
//! # Architecture
//!
//! - [`RequestBuilder`] signs account requests and [`PublicRequests`] builds
//!   public ones. Both produce a [`RequestDescriptor`] and never touch the
//!   network.
//! - A [`Transport`] (or [`BlockingTransport`]) executes descriptors.
//!   [`HttpTransport`] and [`BlockingHttpTransport`] use `reqwest`.
//! - [`AccountClient`] / [`PublicClient`] and their blocking twins pair the
//!   two.
//!
//! Arguments are validated before anything is signed; an invalid call fails
//! with [`RestError::Validation`] and sends nothing.
//!
//! # Authentication
//!
//! Account endpoints are signed with Ed25519. See [`bpx_auth`] for the
//! canonical signing string.
//!
//! # Example
//!
//! ```no_run
//! use bpx_rest::{AccountClient, Credentials, OrderRequest, PublicClient};
//! use bpx_rest::{Side, TimeInForce};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let public = PublicClient::new()?;
//!     let ticker = public.get_ticker("SOL_USDC").await?;
//!     println!("SOL/USDC: {:?}", ticker);
//!
//!     // Account endpoints (auth required)
//!     let client = AccountClient::new(Credentials::from_env()?)?;
//!     let order = OrderRequest::limit("SOL_USDC", Side::Bid, dec!(1), dec!(20))
//!         .with_time_in_force(TimeInForce::Gtc);
//!     let placed = client.execute_order(&order, None).await?;
//!     println!("Placed: {:?}", placed);
//!
//!     Ok(())
//! }
//! ```

pub mod blocking;
pub mod builder;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod portfolio;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

// Re-export main types
pub use blocking::{BlockingAccountClient, BlockingPublicClient};
pub use builder::{PublicRequests, RequestBuilder, DEFAULT_BASE_URL, DEFAULT_WINDOW};
pub use client::{AccountClient, PublicClient};
pub use config::ClientConfig;
pub use error::{RestError, RestResult};
pub use request::{Headers, Method, RequestDescriptor};
pub use response::ApiResponse;
pub use transport::{BlockingHttpTransport, BlockingTransport, HttpTransport, Transport};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

pub use types::{
    AccountSettings, BorrowHistoryQuery, BorrowLendRequest, BorrowPositionHistoryQuery,
    CapitalHistoryQuery, FillHistoryQuery, InterestHistoryQuery, MaxOrderQuery,
    MaxWithdrawalQuery, OrderHistoryQuery, OrderRef, OrderRequest, Page, QuoteHistoryQuery,
    QuoteRequest, RfqHistoryQuery, RfqRequest, SettlementHistoryQuery, SymbolHistoryQuery,
    TimeRange, ToParams, WithdrawalRequest,
};

// Re-export auth and shared types
pub use bpx_auth::{AuthError, Credentials};
pub use bpx_types::*;
