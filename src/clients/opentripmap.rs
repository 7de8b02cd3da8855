use super::{ClientError, ClientResult, HttpClient, QueryParamInterceptor, RequestInterceptor};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

pub const OPENTRIPMAP_BASE_URL: &str = "https://api.opentripmap.com/0.1/en/places";

/// Query parameter the points-of-interest API reads its key from.
pub const API_KEY_PARAM: &str = "apikey";

/// Client for the points-of-interest API.
///
/// The API key is attached by an interceptor, so call sites never pass it.
#[derive(Clone)]
pub struct OpenTripMapClient {
    http: HttpClient,
}

impl OpenTripMapClient {
    pub fn new(base_url: &str, timeout: Duration, api_key: &str) -> ClientResult<Self> {
        let api_key: Arc<dyn RequestInterceptor> =
            Arc::new(QueryParamInterceptor::new(API_KEY_PARAM, api_key));
        Ok(Self {
            http: HttpClient::new(base_url, timeout, vec![api_key])?,
        })
    }

    pub async fn get<T, Q>(&self, segments: &[&str], query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.http
            .get_json(segments, query)
            .await
            .inspect_err(log_failure)
    }
}

fn log_failure(e: &ClientError) {
    if e.is_unauthorized() {
        error!(
            "OpenTripMap API: invalid or missing API key. Get a free key from https://opentripmap.io/register"
        );
    } else {
        error!("OpenTripMap API error: {}", e);
    }
}
