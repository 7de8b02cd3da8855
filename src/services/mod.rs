pub mod country;
pub mod enrichment;
pub mod place;
pub mod preferences;

use crate::clients::ClientResult;
use crate::models::country::{AppDestination, RemoteCountry};
use crate::models::place::{CityPlaces, Place, PlaceDetails};
use async_trait::async_trait;

/// Country-backed operations consumed by the query bindings.
///
/// Raw fetches propagate failures; the destination operations never fail and
/// substitute their own fallback data instead.
#[async_trait]
pub trait CountryDataSource: Send + Sync {
    async fn fetch_all_countries(&self) -> ClientResult<Vec<RemoteCountry>>;

    async fn fetch_countries_by_region(&self, region: &str) -> ClientResult<Vec<RemoteCountry>>;

    async fn fetch_popular_destinations(&self) -> Vec<AppDestination>;

    async fn fetch_destinations_by_region(&self, region: &str) -> Vec<AppDestination>;
}

/// Points-of-interest operations consumed by the query bindings.
#[async_trait]
pub trait PlaceDataSource: Send + Sync {
    async fn search_places(&self, query: &str, limit: u32) -> ClientResult<serde_json::Value>;

    async fn fetch_places_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        radius: u32,
        kinds: &str,
    ) -> ClientResult<Vec<Place>>;

    async fn fetch_place_details(&self, xid: &str) -> ClientResult<PlaceDetails>;

    async fn fetch_popular_destinations(&self) -> Vec<CityPlaces>;

    async fn fetch_city_attractions(&self, city_name: &str, lat: f64, lon: f64) -> Vec<Place>;
}
