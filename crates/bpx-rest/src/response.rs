//! Response decoding with raw-text fallback

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{RestError, RestResult};

/// A decoded response body
///
/// The exchange answers with JSON almost everywhere, but some endpoints
/// (`ping`, error pages from intermediaries) return plain text. Callers get
/// whichever shape arrived.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Body was JSON
    Json(Value),
    /// Body was not JSON, or not declared as JSON
    Text(String),
}

impl ApiResponse {
    /// Decode a body given its `Content-Type` header
    ///
    /// Anything not declared as JSON, or declared as JSON but unparseable,
    /// is returned as text.
    pub fn decode(content_type: Option<&str>, body: String) -> Self {
        let declared_json = content_type
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false);

        if !declared_json {
            return Self::Text(body);
        }

        match serde_json::from_str(&body) {
            Ok(value) => Self::Json(value),
            Err(e) => {
                warn!("Response declared JSON but failed to parse ({}), returning text", e);
                Self::Text(body)
            }
        }
    }

    /// Check if the body was JSON
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Get the JSON value
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Get the raw text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// Take the JSON value
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Decode into a typed value
    pub fn json<T: DeserializeOwned>(self) -> RestResult<T> {
        match self {
            Self::Json(value) => {
                serde_json::from_value(value).map_err(|e| RestError::Parse(e.to_string()))
            }
            Self::Text(text) => Err(RestError::Parse(format!("Expected JSON, got text: {}", text))),
        }
    }
}
