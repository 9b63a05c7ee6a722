//! HTTP transport abstraction
//!
//! Endpoints only build [`RequestDescriptor`]s; a transport executes them.
//! This keeps signing and validation testable without network calls and
//! lets the same catalog back both async and blocking clients.
//!
//! # Example
//!
//! ```no_run
//! use bpx_rest::transport::{HttpTransport, Transport};
//! use bpx_rest::{ClientConfig, PublicRequests, RestError};
//!
//! async fn example() -> Result<(), RestError> {
//!     let transport = HttpTransport::new(&ClientConfig::default())?;
//!     let request = PublicRequests::new().market().get_status();
//!     let response = transport.execute(&request).await?;
//!     println!("{:?}", response);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use bpx_types::Params;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{RestError, RestResult};
use crate::request::{Headers, Method, RequestDescriptor};
use crate::response::ApiResponse;

/// Async transport
///
/// Non-2xx responses surface as [`RestError::Status`]; bodies are decoded
/// with [`ApiResponse::decode`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET with query parameters
    async fn get(&self, url: &str, headers: &Headers, query: Option<&Params>) -> RestResult<ApiResponse>;

    /// POST with a JSON body
    async fn post(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse>;

    /// DELETE with a JSON body
    async fn delete(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse>;

    /// PATCH with a JSON body
    async fn patch(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse>;

    /// Execute a descriptor, dispatching on its method
    async fn execute(&self, request: &RequestDescriptor) -> RestResult<ApiResponse> {
        let RequestDescriptor { method, url, headers, query, body } = request;
        match method {
            Method::Get => self.get(url, headers, query.as_ref()).await,
            Method::Post => self.post(url, headers, body.as_ref()).await,
            Method::Delete => self.delete(url, headers, body.as_ref()).await,
            Method::Patch => self.patch(url, headers, body.as_ref()).await,
        }
    }
}

/// Blocking transport, the synchronous mirror of [`Transport`]
pub trait BlockingTransport: Send + Sync {
    /// GET with query parameters
    fn get(&self, url: &str, headers: &Headers, query: Option<&Params>) -> RestResult<ApiResponse>;

    /// POST with a JSON body
    fn post(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse>;

    /// DELETE with a JSON body
    fn delete(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse>;

    /// PATCH with a JSON body
    fn patch(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse>;

    /// Execute a descriptor, dispatching on its method
    fn execute(&self, request: &RequestDescriptor) -> RestResult<ApiResponse> {
        let RequestDescriptor { method, url, headers, query, body } = request;
        match method {
            Method::Get => self.get(url, headers, query.as_ref()),
            Method::Post => self.post(url, headers, body.as_ref()),
            Method::Delete => self.delete(url, headers, body.as_ref()),
            Method::Patch => self.patch(url, headers, body.as_ref()),
        }
    }
}

/// Async transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from configuration
    pub fn new(config: &ClientConfig) -> RestResult<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent());

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send_json(
        &self,
        request: reqwest::RequestBuilder,
        headers: &Headers,
        body: Option<&Params>,
    ) -> RestResult<ApiResponse> {
        let mut request = apply_headers(request, headers);
        if let Some(body) = body {
            request = request.json(body);
        }
        read_response(request.send().await?).await
    }
}

fn apply_headers(request: reqwest::RequestBuilder, headers: &Headers) -> reqwest::RequestBuilder {
    headers
        .iter()
        .fold(request, |request, (name, value)| request.header(name, value))
}

async fn read_response(response: reqwest::Response) -> RestResult<ApiResponse> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await?;

    debug!("Response status {}", status);
    if !status.is_success() {
        return Err(RestError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(ApiResponse::decode(content_type.as_deref(), body))
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, headers, query))]
    async fn get(&self, url: &str, headers: &Headers, query: Option<&Params>) -> RestResult<ApiResponse> {
        let mut request = apply_headers(self.client.get(url), headers);
        if let Some(query) = query {
            request = request.query(&query.to_pairs());
        }
        read_response(request.send().await?).await
    }

    #[instrument(skip(self, headers, body))]
    async fn post(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.send_json(self.client.post(url), headers, body).await
    }

    #[instrument(skip(self, headers, body))]
    async fn delete(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.send_json(self.client.delete(url), headers, body).await
    }

    #[instrument(skip(self, headers, body))]
    async fn patch(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.send_json(self.client.patch(url), headers, body).await
    }
}

/// Blocking transport backed by `reqwest::blocking`
///
/// Must not be created or dropped inside an async runtime.
#[derive(Debug, Clone)]
pub struct BlockingHttpTransport {
    client: reqwest::blocking::Client,
}

impl BlockingHttpTransport {
    /// Build a transport from configuration
    pub fn new(config: &ClientConfig) -> RestResult<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent());

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing client
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    fn send_json(
        &self,
        request: reqwest::blocking::RequestBuilder,
        headers: &Headers,
        body: Option<&Params>,
    ) -> RestResult<ApiResponse> {
        let mut request = apply_blocking_headers(request, headers);
        if let Some(body) = body {
            request = request.json(body);
        }
        read_blocking_response(request.send()?)
    }
}

fn apply_blocking_headers(
    request: reqwest::blocking::RequestBuilder,
    headers: &Headers,
) -> reqwest::blocking::RequestBuilder {
    headers
        .iter()
        .fold(request, |request, (name, value)| request.header(name, value))
}

fn read_blocking_response(response: reqwest::blocking::Response) -> RestResult<ApiResponse> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.text()?;

    debug!("Response status {}", status);
    if !status.is_success() {
        return Err(RestError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(ApiResponse::decode(content_type.as_deref(), body))
}

impl BlockingTransport for BlockingHttpTransport {
    #[instrument(skip(self, headers, query))]
    fn get(&self, url: &str, headers: &Headers, query: Option<&Params>) -> RestResult<ApiResponse> {
        let mut request = apply_blocking_headers(self.client.get(url), headers);
        if let Some(query) = query {
            request = request.query(&query.to_pairs());
        }
        read_blocking_response(request.send()?)
    }

    #[instrument(skip(self, headers, body))]
    fn post(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.send_json(self.client.post(url), headers, body)
    }

    #[instrument(skip(self, headers, body))]
    fn delete(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.send_json(self.client.delete(url), headers, body)
    }

    #[instrument(skip(self, headers, body))]
    fn patch(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.send_json(self.client.patch(url), headers, body)
    }
}

/// Mock transport for testing
///
/// Records every request and replays queued responses in order. Serves both
/// [`Transport`] and [`BlockingTransport`].
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: parking_lot::Mutex<Vec<RequestDescriptor>>,
    responses: parking_lot::Mutex<std::collections::VecDeque<RestResult<ApiResponse>>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push_response(&self, response: ApiResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queue a JSON response
    pub fn push_json(&self, value: serde_json::Value) {
        self.push_response(ApiResponse::Json(value));
    }

    /// Queue a text response
    pub fn push_text(&self, text: impl Into<String>) {
        self.push_response(ApiResponse::Text(text.into()));
    }

    /// Queue an error
    pub fn push_error(&self, error: RestError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Number of requests recorded so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<RequestDescriptor> {
        self.requests.lock().last().cloned()
    }

    /// Take all recorded requests
    pub fn take_requests(&self) -> Vec<RequestDescriptor> {
        std::mem::take(&mut *self.requests.lock())
    }

    fn record(
        &self,
        method: Method,
        url: &str,
        headers: &Headers,
        query: Option<&Params>,
        body: Option<&Params>,
    ) -> RestResult<ApiResponse> {
        self.requests.lock().push(RequestDescriptor {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            query: query.cloned(),
            body: body.cloned(),
        });

        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RestError::Transport("no mock response queued".into())))
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str, headers: &Headers, query: Option<&Params>) -> RestResult<ApiResponse> {
        self.record(Method::Get, url, headers, query, None)
    }

    async fn post(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.record(Method::Post, url, headers, None, body)
    }

    async fn delete(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.record(Method::Delete, url, headers, None, body)
    }

    async fn patch(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.record(Method::Patch, url, headers, None, body)
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl BlockingTransport for MockTransport {
    fn get(&self, url: &str, headers: &Headers, query: Option<&Params>) -> RestResult<ApiResponse> {
        self.record(Method::Get, url, headers, query, None)
    }

    fn post(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.record(Method::Post, url, headers, None, body)
    }

    fn delete(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.record(Method::Delete, url, headers, None, body)
    }

    fn patch(&self, url: &str, headers: &Headers, body: Option<&Params>) -> RestResult<ApiResponse> {
        self.record(Method::Patch, url, headers, None, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: Method) -> RequestDescriptor {
        RequestDescriptor::new(
            method,
            "https://mock.test/api/v1/orders",
            Headers::new(),
            Params::new().with("symbol", "SOL_USDC"),
        )
    }

    fn signed_headers() -> Headers {
        Headers::from([
            ("X-API-Key".to_string(), "key".to_string()),
            ("X-Window".to_string(), "5000".to_string()),
        ])
    }

    #[test]
    fn test_apply_headers() {
        let client = reqwest::Client::new();
        let request = apply_headers(client.get("https://mock.test/api/v1/capital"), &signed_headers())
            .build()
            .unwrap();

        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.headers()["X-API-Key"], "key");
        assert_eq!(request.headers()["X-Window"], "5000");
    }

    #[test]
    fn test_apply_blocking_headers() {
        let client = reqwest::blocking::Client::new();
        let request =
            apply_blocking_headers(client.delete("https://mock.test/api/v1/orders"), &signed_headers())
                .build()
                .unwrap();

        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.headers()["X-Window"], "5000");
    }

    #[tokio::test]
    async fn test_mock_transport_execute() {
        let transport = MockTransport::new();
        transport.push_json(json!([]));

        let response = Transport::execute(&transport, &request(Method::Get)).await.unwrap();
        assert_eq!(response, ApiResponse::Json(json!([])));

        let recorded = transport.last_request().unwrap();
        assert_eq!(recorded, request(Method::Get));
    }

    #[tokio::test]
    async fn test_mock_transport_dispatches_on_method() {
        let transport = MockTransport::new();
        for _ in 0..3 {
            transport.push_json(json!({}));
        }

        Transport::execute(&transport, &request(Method::Delete)).await.unwrap();
        Transport::execute(&transport, &request(Method::Patch)).await.unwrap();
        Transport::execute(&transport, &request(Method::Post)).await.unwrap();

        let methods: Vec<Method> = transport.take_requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Delete, Method::Patch, Method::Post]);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_transport_empty_queue() {
        let transport = MockTransport::new();
        let result = Transport::execute(&transport, &request(Method::Get)).await;
        assert!(matches!(result, Err(RestError::Transport(_))));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_mock_blocking_transport() {
        let transport = MockTransport::new();
        transport.push_text("pong");
        transport.push_error(RestError::Status {
            status: 503,
            body: "unavailable".into(),
        });

        let response = BlockingTransport::execute(&transport, &request(Method::Get)).unwrap();
        assert_eq!(response.as_text(), Some("pong"));

        let err = BlockingTransport::execute(&transport, &request(Method::Get)).unwrap_err();
        assert_eq!(err.status(), Some(503));
    }
}
