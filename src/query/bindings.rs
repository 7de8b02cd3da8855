//! Query bindings for the travel data sources.
//!
//! Each binding pairs a data-access operation with its cache key, staleness
//! window and enablement gate. Caching, deduplication and retry are left to
//! [`QueryClient`].

use super::cache::{QueryClient, QueryOptions, QueryResult};
use super::key::QueryKey;
use crate::clients::ClientError;
use crate::models::country::{AppDestination, RemoteCountry};
use crate::models::place::{CityPlaces, Place, PlaceDetails};
use crate::services::place::{DEFAULT_KINDS, SEARCH_LIMIT};
use crate::services::{CountryDataSource, PlaceDataSource};
use std::sync::Arc;
use std::time::Duration;

pub const SEARCH_STALE_TIME: Duration = Duration::from_secs(5 * 60);
pub const COORDINATES_STALE_TIME: Duration = Duration::from_secs(10 * 60);
pub const ATTRACTIONS_STALE_TIME: Duration = Duration::from_secs(15 * 60);
pub const REGION_STALE_TIME: Duration = Duration::from_secs(30 * 60);
pub const DETAILS_STALE_TIME: Duration = Duration::from_secs(30 * 60);
pub const GLOBAL_STALE_TIME: Duration = Duration::from_secs(60 * 60);

/// Search text must be longer than this many characters.
pub const MIN_SEARCH_LEN: usize = 2;

pub fn search_enabled(query: &str) -> bool {
    query.chars().count() > MIN_SEARCH_LEN
}

pub fn coordinates_enabled(lat: f64, lon: f64) -> bool {
    lat != 0.0 && lon != 0.0
}

pub fn identifier_enabled(value: &str) -> bool {
    !value.is_empty()
}

#[derive(Clone)]
pub struct TravelQueries {
    client: QueryClient,
    countries: Arc<dyn CountryDataSource>,
    places: Arc<dyn PlaceDataSource>,
}

impl TravelQueries {
    pub fn new(
        client: QueryClient,
        countries: Arc<dyn CountryDataSource>,
        places: Arc<dyn PlaceDataSource>,
    ) -> Self {
        Self {
            client,
            countries,
            places,
        }
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    pub async fn all_countries(&self) -> QueryResult<Vec<RemoteCountry>> {
        let source = self.countries.as_ref();
        self.client
            .fetch(
                QueryKey::new("allCountries"),
                QueryOptions::new(GLOBAL_STALE_TIME),
                move || source.fetch_all_countries(),
            )
            .await
    }

    pub async fn countries_by_region(
        &self,
        region: &str,
        enabled: bool,
    ) -> QueryResult<Vec<RemoteCountry>> {
        let source = self.countries.as_ref();
        self.client
            .fetch(
                QueryKey::new("countriesByRegion").with(region),
                QueryOptions::new(REGION_STALE_TIME).enabled(enabled && identifier_enabled(region)),
                move || source.fetch_countries_by_region(region),
            )
            .await
    }

    pub async fn popular_destinations(&self) -> QueryResult<Vec<AppDestination>> {
        let source = self.countries.as_ref();
        self.client
            .fetch(
                QueryKey::new("popularDestinations"),
                QueryOptions::new(GLOBAL_STALE_TIME),
                move || async move { Ok::<_, ClientError>(source.fetch_popular_destinations().await) },
            )
            .await
    }

    pub async fn destinations_by_region(
        &self,
        region: &str,
        enabled: bool,
    ) -> QueryResult<Vec<AppDestination>> {
        let source = self.countries.as_ref();
        self.client
            .fetch(
                QueryKey::new("destinationsByRegion").with(region),
                QueryOptions::new(REGION_STALE_TIME).enabled(enabled && identifier_enabled(region)),
                move || async move { Ok::<_, ClientError>(source.fetch_destinations_by_region(region).await) },
            )
            .await
    }

    pub async fn search_places(
        &self,
        query: &str,
        enabled: bool,
    ) -> QueryResult<serde_json::Value> {
        let source = self.places.as_ref();
        self.client
            .fetch(
                QueryKey::new("searchPlaces").with(query),
                QueryOptions::new(SEARCH_STALE_TIME).enabled(enabled && search_enabled(query)),
                move || source.search_places(query, SEARCH_LIMIT),
            )
            .await
    }

    pub async fn places_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        radius: u32,
        enabled: bool,
    ) -> QueryResult<Vec<Place>> {
        let source = self.places.as_ref();
        self.client
            .fetch(
                QueryKey::new("placesByCoordinates")
                    .with(lat)
                    .with(lon)
                    .with(radius),
                QueryOptions::new(COORDINATES_STALE_TIME)
                    .enabled(enabled && coordinates_enabled(lat, lon)),
                move || source.fetch_places_by_coordinates(lat, lon, radius, DEFAULT_KINDS),
            )
            .await
    }

    pub async fn place_details(&self, xid: &str, enabled: bool) -> QueryResult<PlaceDetails> {
        let source = self.places.as_ref();
        self.client
            .fetch(
                QueryKey::new("placeDetails").with(xid),
                QueryOptions::new(DETAILS_STALE_TIME).enabled(enabled && identifier_enabled(xid)),
                move || source.fetch_place_details(xid),
            )
            .await
    }

    pub async fn popular_places(&self) -> QueryResult<Vec<CityPlaces>> {
        let source = self.places.as_ref();
        self.client
            .fetch(
                QueryKey::new("popularCityPlaces"),
                QueryOptions::new(GLOBAL_STALE_TIME),
                move || async move { Ok::<_, ClientError>(source.fetch_popular_destinations().await) },
            )
            .await
    }

    pub async fn city_attractions(
        &self,
        city_name: &str,
        lat: f64,
        lon: f64,
        enabled: bool,
    ) -> QueryResult<Vec<Place>> {
        let source = self.places.as_ref();
        let enabled = enabled && identifier_enabled(city_name) && coordinates_enabled(lat, lon);
        self.client
            .fetch(
                QueryKey::new("cityAttractions")
                    .with(city_name)
                    .with(lat)
                    .with(lon),
                QueryOptions::new(ATTRACTIONS_STALE_TIME).enabled(enabled),
                move || async move { Ok::<_, ClientError>(source.fetch_city_attractions(city_name, lat, lon).await) },
            )
            .await
    }
}
