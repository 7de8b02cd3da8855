use crate::clients::{ClientResult, CountriesClient};
use crate::models::country::{AppDestination, RemoteCountry};
use crate::services::enrichment::{
    decorate, fallback_destinations, is_popular_country, DecorationSource, RandomDecorations,
};
use crate::services::CountryDataSource;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// What a destination operation returns when its fetch or mapping fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The fixed three-item list from [`fallback_destinations`].
    FallbackList,
    Empty,
}

impl FailurePolicy {
    fn substitute(self) -> Vec<AppDestination> {
        match self {
            Self::FallbackList => fallback_destinations(),
            Self::Empty => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum DestinationScope<'a> {
    /// All countries narrowed to the popular allow-list.
    Popular,
    Region(&'a str),
}

impl fmt::Display for DestinationScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Popular => write!(f, "popular destinations"),
            Self::Region(region) => write!(f, "destinations for region {}", region),
        }
    }
}

pub struct CountryService {
    client: CountriesClient,
    decorations: Arc<dyn DecorationSource>,
}

impl CountryService {
    pub fn new(client: CountriesClient) -> Self {
        Self::with_decorations(client, Arc::new(RandomDecorations))
    }

    pub fn with_decorations(
        client: CountriesClient,
        decorations: Arc<dyn DecorationSource>,
    ) -> Self {
        Self {
            client,
            decorations,
        }
    }

    pub async fn fetch_destinations(
        &self,
        scope: DestinationScope<'_>,
        on_failure: FailurePolicy,
    ) -> Vec<AppDestination> {
        let countries = match scope {
            DestinationScope::Popular => self.fetch_all_countries().await.map(|countries| {
                countries
                    .into_iter()
                    .filter(|country| is_popular_country(&country.name.common))
                    .collect::<Vec<_>>()
            }),
            DestinationScope::Region(region) => self.fetch_countries_by_region(region).await,
        };

        match countries {
            Ok(countries) => {
                debug!("Mapped {} countries into {}", countries.len(), scope);
                countries
                    .iter()
                    .map(|country| decorate(country, self.decorations.as_ref()))
                    .collect()
            }
            Err(e) => {
                error!("Error fetching {}: {}", scope, e);
                on_failure.substitute()
            }
        }
    }
}

#[async_trait]
impl CountryDataSource for CountryService {
    async fn fetch_all_countries(&self) -> ClientResult<Vec<RemoteCountry>> {
        self.client.get(&["all"]).await
    }

    async fn fetch_countries_by_region(&self, region: &str) -> ClientResult<Vec<RemoteCountry>> {
        self.client.get(&["region", region]).await
    }

    async fn fetch_popular_destinations(&self) -> Vec<AppDestination> {
        self.fetch_destinations(DestinationScope::Popular, FailurePolicy::FallbackList)
            .await
    }

    async fn fetch_destinations_by_region(&self, region: &str) -> Vec<AppDestination> {
        self.fetch_destinations(DestinationScope::Region(region), FailurePolicy::Empty)
            .await
    }
}
