use super::{ClientResult, HttpClient};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::error;

pub const COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Client for the REST countries lookup API.
#[derive(Clone)]
pub struct CountriesClient {
    http: HttpClient,
}

impl CountriesClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url, timeout, Vec::new())?,
        })
    }

    /// GET the path made of `segments` under the base URL. Failures are
    /// logged and returned as-is.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        self.http
            .get_json(segments, &[] as &[(&str, &str)])
            .await
            .inspect_err(|e| error!("Countries API error: {}", e))
    }
}
