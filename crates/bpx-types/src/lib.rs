//! Shared types for the Backpack Exchange REST API
//!
//! This crate holds the pieces every other crate in the workspace agrees on.
//! It has no networking and no cryptography.
//!
//! # Key Types
//!
//! - [`Params`], [`ParamValue`] - Key-ordered request parameters
//! - [`Blockchain`], [`KlineInterval`], [`TimeInForce`], [`SelfTradePrevention`], ... - Exchange constant sets
//! - [`ValidationError`] - Argument errors raised before a request is built
//! - [`validate`] - `limit`, offset and window checks

pub mod enums;
pub mod error;
pub mod params;
pub mod validate;

// Re-export commonly used types
pub use enums::*;
pub use error::*;
pub use params::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
