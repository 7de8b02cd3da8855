use super::key::QueryKey;
use crate::clients::{ClientError, ClientResult};
use moka::future::Cache;
use moka::Expiry;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_MAX_ENTRIES: u64 = 1_000;
pub const DEFAULT_RETRY: u32 = 1;

#[derive(Error, Debug, Clone)]
pub enum QueryError {
    #[error("{0}")]
    Fetch(Arc<ClientError>),
    #[error("Cached value for {0} has an unexpected type")]
    TypeMismatch(QueryKey),
}

/// Outcome of a query as seen by a consumer.
#[derive(Debug)]
pub enum QueryResult<T> {
    /// The query is disabled and nothing was fetched.
    Idle,
    Success(Arc<T>),
    Error(QueryError),
}

impl<T> Clone for QueryResult<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Success(data) => Self::Success(data.clone()),
            Self::Error(e) => Self::Error(e.clone()),
        }
    }
}

impl<T> QueryResult<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&QueryError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// How long a fetched value is served before the next request refetches.
    pub stale_time: Duration,
    pub enabled: bool,
}

impl QueryOptions {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[derive(Debug, Clone)]
pub struct QueryClientConfig {
    pub max_entries: u64,
    /// Extra attempts after a failed fetch.
    pub retry: u32,
}

impl Default for QueryClientConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            retry: DEFAULT_RETRY,
        }
    }
}

#[derive(Clone)]
struct CachedEntry {
    value: Arc<dyn Any + Send + Sync>,
    stale_time: Duration,
}

struct StalenessExpiry;

impl Expiry<QueryKey, CachedEntry> for StalenessExpiry {
    fn expire_after_create(
        &self,
        _key: &QueryKey,
        value: &CachedEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.stale_time)
    }
}

/// Keyed cache of query results.
///
/// Concurrent requests for the same key share one in-flight fetch. Successful
/// values live for their staleness window; failures are never stored.
#[derive(Clone)]
pub struct QueryClient {
    cache: Cache<QueryKey, CachedEntry>,
    retry: u32,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(QueryClientConfig::default())
    }
}

impl QueryClient {
    pub fn new(config: QueryClientConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(StalenessExpiry)
            .build();

        Self {
            cache,
            retry: config.retry,
        }
    }

    pub async fn fetch<T, F, Fut>(
        &self,
        key: QueryKey,
        options: QueryOptions,
        fetcher: F,
    ) -> QueryResult<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send,
        Fut: Future<Output = ClientResult<T>> + Send,
    {
        if !options.enabled {
            debug!("Query {} is disabled, not fetching", key);
            return QueryResult::Idle;
        }

        let retry = self.retry;
        let stale_time = options.stale_time;
        let operation = key.operation();
        let init = async move {
            let mut attempt = 0;
            loop {
                match fetcher().await {
                    Ok(value) => {
                        let value: Arc<dyn Any + Send + Sync> = Arc::new(value);
                        return Ok(CachedEntry { value, stale_time });
                    }
                    Err(e) if attempt < retry => {
                        attempt += 1;
                        warn!(
                            "Query {} failed, retrying ({}/{}): {}",
                            operation, attempt, retry, e
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        match self.cache.try_get_with(key.clone(), init).await {
            Ok(entry) => match entry.value.downcast::<T>() {
                Ok(value) => QueryResult::Success(value),
                Err(_) => QueryResult::Error(QueryError::TypeMismatch(key)),
            },
            Err(e) => QueryResult::Error(QueryError::Fetch(e)),
        }
    }

    pub async fn invalidate(&self, key: &QueryKey) {
        self.cache.invalidate(key).await;
    }

    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}
