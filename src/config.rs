use crate::clients::countries::COUNTRIES_BASE_URL;
use crate::clients::opentripmap::OPENTRIPMAP_BASE_URL;
use crate::clients::DEFAULT_TIMEOUT;
use crate::query::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_RETRY};
use crate::query::QueryClientConfig;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub data_dir: String,
    pub countries_api_url: String,
    pub opentripmap_api_url: String,
    pub opentripmap_api_key: String,
    pub request_timeout: Duration,
    pub query_retry: u32,
    pub query_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            data_dir: "./data".to_string(),
            countries_api_url: COUNTRIES_BASE_URL.to_string(),
            opentripmap_api_url: OPENTRIPMAP_BASE_URL.to_string(),
            opentripmap_api_key: String::new(),
            request_timeout: DEFAULT_TIMEOUT,
            query_retry: DEFAULT_RETRY,
            query_cache_capacity: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(defaults.server_port),
            data_dir: env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            countries_api_url: env::var("COUNTRIES_API_URL").unwrap_or(defaults.countries_api_url),
            opentripmap_api_url: env::var("OPENTRIPMAP_API_URL")
                .unwrap_or(defaults.opentripmap_api_url),
            opentripmap_api_key: env::var("OPENTRIPMAP_API_KEY")
                .map(|key| key.trim().to_string())
                .unwrap_or_default(),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|secs| secs.parse().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            query_retry: env::var("QUERY_RETRY")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(defaults.query_retry),
            query_cache_capacity: env::var("QUERY_CACHE_CAPACITY")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap_or(defaults.query_cache_capacity),
        })
    }

    pub fn preferences_db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("preferences.db")
    }

    pub fn query_client_config(&self) -> QueryClientConfig {
        QueryClientConfig {
            max_entries: self.query_cache_capacity,
            retry: self.query_retry,
        }
    }

    pub fn has_opentripmap_key(&self) -> bool {
        !self.opentripmap_api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.has_opentripmap_key());
        assert_eq!(
            config.preferences_db_path(),
            PathBuf::from("./data").join("preferences.db")
        );

        let query = config.query_client_config();
        assert_eq!(query.retry, 1);
        assert_eq!(query.max_entries, 1000);
    }
}
