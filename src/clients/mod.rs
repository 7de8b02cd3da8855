//! HTTP client adapters for the upstream travel data sources.
//!
//! Each adapter wraps an [`HttpClient`] built once with an immutable base URL,
//! timeout and set of request interceptors. Adapters log failures and hand the
//! error back to the caller untouched; retry and fallback live elsewhere.

pub mod countries;
pub mod opentripmap;

pub use countries::CountriesClient;
pub use opentripmap::OpenTripMapClient;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Request timeout applied when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Client configuration error: {0}")]
    Config(String),
    #[error("Invalid path segment: {0:?}")]
    InvalidPath(String),
}

impl ClientError {
    /// HTTP status attached to the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::Config(_) | Self::InvalidPath(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Hook run on every request built by an [`HttpClient`], before call-site
/// parameters are attached.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Appends a fixed query parameter, typically an API key.
#[derive(Clone)]
pub struct QueryParamInterceptor {
    name: String,
    value: String,
}

impl QueryParamInterceptor {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl RequestInterceptor for QueryParamInterceptor {
    fn intercept(&self, request: RequestBuilder) -> RequestBuilder {
        request.query(&[(self.name.as_str(), self.value.as_str())])
    }
}

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    base_url: Url,
    interceptors: Arc<[Arc<dyn RequestInterceptor>]>,
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        interceptors: Vec<Arc<dyn RequestInterceptor>>,
    ) -> ClientResult<Self> {
        let parsed = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        if timeout.is_zero() {
            return Err(ClientError::Config("timeout cannot be zero".to_string()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let inner = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            inner,
            base_url: parsed,
            interceptors: interceptors.into(),
        })
    }

    /// Appends `segments` to the base URL, each percent-encoded as a single
    /// path segment, so caller-supplied values cannot add segments or a
    /// query string.
    pub fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(ClientError::InvalidPath(segment.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("base URL '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds a request scoped to the base URL with every interceptor applied.
    pub fn request(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder> {
        let request = self.inner.request(method, self.url(segments)?);
        Ok(self
            .interceptors
            .iter()
            .fold(request, |request, interceptor| interceptor.intercept(request)))
    }

    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    pub async fn get_json<T, Q>(&self, segments: &[&str], query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.request(Method::GET, segments)?.query(query))
            .await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let message = response
                .text()
                .await
                .ok()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            Err(ClientError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}
