//! Validation errors raised before any request is signed or sent

use thiserror::Error;

/// An argument failed validation
///
/// These are always fatal to the call that produced them; nothing is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `limit` outside of the accepted range
    #[error("Limit value {value} is out of allowed minimal 0 and maximal 1000")]
    LimitOutOfRange { value: i64 },

    /// A value that must not be negative was negative
    #[error("Value {value} of {field} can't be negative")]
    NegativeValue { field: &'static str, value: i64 },

    /// A string did not name a member of a closed constant set
    #[error("No such {kind} value {value}, see https://docs.backpack.exchange/")]
    InvalidEnum { kind: &'static str, value: String },

    /// A string did not name a supported kline interval
    #[error("{0} is not a valid time interval, see https://docs.backpack.exchange/")]
    InvalidInterval(String),

    /// A field required by the chosen branch was not provided
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The signature validity window was zero
    #[error("Window must be greater than zero")]
    ZeroWindow,
}

impl ValidationError {
    /// Create a negative value error
    pub fn negative(field: &'static str, value: i64) -> Self {
        Self::NegativeValue { field, value }
    }

    /// Returns true for errors caused by a value outside of a closed set
    pub fn is_invalid_member(&self) -> bool {
        matches!(self, Self::InvalidEnum { .. } | Self::InvalidInterval(_))
    }
}

/// Result type alias for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
