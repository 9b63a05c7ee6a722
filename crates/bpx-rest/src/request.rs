//! Transport-agnostic request descriptors

use bpx_types::{ParamValue, Params};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{RestError, RestResult};

/// Header name to value
pub type Headers = BTreeMap<String, String>;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
    Patch,
}

impl Method {
    /// Returns the method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// GET carries parameters in the query string, everything else in a JSON body
    pub fn uses_query(&self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready for a transport
///
/// Produced fresh per call and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Absolute URL without query string
    pub url: String,
    /// Request headers (empty for public endpoints)
    pub headers: Headers,
    /// Query string parameters
    pub query: Option<Params>,
    /// JSON body parameters
    pub body: Option<Params>,
}

impl RequestDescriptor {
    /// Create a descriptor, routing `params` to the query string or the body
    /// depending on `method`
    pub fn new(method: Method, url: impl Into<String>, headers: Headers, params: Params) -> Self {
        let (query, body) = if method.uses_query() {
            ((!params.is_empty()).then_some(params), None)
        } else {
            (None, Some(params))
        };

        Self {
            method,
            url: url.into(),
            headers,
            query,
            body,
        }
    }

    /// The parameters that were signed, wherever they travel
    pub fn params(&self) -> Option<&Params> {
        self.query.as_ref().or(self.body.as_ref())
    }

    /// URL including the encoded query string
    pub fn full_url(&self) -> RestResult<String> {
        match &self.query {
            Some(query) if !query.is_empty() => {
                let encoded = serde_urlencoded::to_string(query.to_pairs())
                    .map_err(|e| RestError::Transport(e.to_string()))?;
                Ok(format!("{}?{}", self.url, encoded))
            }
            _ => Ok(self.url.clone()),
        }
    }

    /// JSON body, if any
    pub fn json_body(&self) -> Option<Value> {
        self.body.as_ref().map(|body| {
            let object: Map<String, Value> = body
                .iter()
                .map(|(key, value)| (key.to_string(), param_to_json(value)))
                .collect();
            Value::Object(object)
        })
    }
}

fn param_to_json(value: &ParamValue) -> Value {
    match value {
        ParamValue::Str(s) => Value::String(s.clone()),
        ParamValue::Int(n) => Value::from(*n),
        ParamValue::Bool(b) => Value::Bool(*b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_routes_to_query() {
        let params = Params::new().with("symbol", "SOL_USDC").with("limit", 100i64);
        let request = RequestDescriptor::new(
            Method::Get,
            "https://api.backpack.exchange/api/v1/trades",
            Headers::new(),
            params,
        );

        assert!(request.body.is_none());
        assert_eq!(
            request.full_url().unwrap(),
            "https://api.backpack.exchange/api/v1/trades?limit=100&symbol=SOL_USDC"
        );
    }

    #[test]
    fn test_empty_get_has_no_query() {
        let request = RequestDescriptor::new(
            Method::Get,
            "https://api.backpack.exchange/api/v1/capital",
            Headers::new(),
            Params::new(),
        );
        assert!(request.query.is_none());
        assert_eq!(request.full_url().unwrap(), "https://api.backpack.exchange/api/v1/capital");
    }

    #[test]
    fn test_delete_routes_to_body() {
        let params = Params::new().with("symbol", "SOL_USDC");
        let request = RequestDescriptor::new(
            Method::Delete,
            "https://api.backpack.exchange/api/v1/orders",
            Headers::new(),
            params.clone(),
        );

        assert!(request.query.is_none());
        assert_eq!(request.params(), Some(&params));
        assert_eq!(
            request.json_body(),
            Some(serde_json::json!({"symbol": "SOL_USDC"}))
        );
    }

    #[test]
    fn test_json_body_keeps_value_types() {
        let params = Params::new()
            .with("symbol", "SOL_USDC")
            .with("clientId", 7u32)
            .with("postOnly", true)
            .with("quantity", "0.5");
        let request = RequestDescriptor::new(Method::Post, "https://x/api/v1/order", Headers::new(), params);

        assert_eq!(
            request.json_body(),
            Some(serde_json::json!({
                "clientId": 7,
                "postOnly": true,
                "quantity": "0.5",
                "symbol": "SOL_USDC",
            }))
        );
        assert_eq!(
            serde_json::to_value(request.body.as_ref().unwrap()).unwrap(),
            request.json_body().unwrap()
        );
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        let request = RequestDescriptor::new(Method::Delete, "https://x/", Headers::new(), Params::new());
        assert_eq!(request.json_body(), Some(serde_json::json!({})));
    }

    #[test]
    fn test_query_values_are_encoded() {
        let params = Params::new().with("address", "a b&c");
        let request = RequestDescriptor::new(Method::Get, "https://x/", Headers::new(), params);
        assert_eq!(request.full_url().unwrap(), "https://x/?address=a+b%26c");
    }
}
