use crate::clients::{ClientResult, OpenTripMapClient};
use crate::models::place::{CityPlaces, Place, PlaceDetails, RadiusResponse};
use crate::services::PlaceDataSource;
use async_trait::async_trait;
use futures::future::join_all;
use tracing::{error, info};

pub const DEFAULT_KINDS: &str = "cultural,historic,interesting_places,tourist_facilities";
pub const ATTRACTION_KINDS: &str = "cultural,historic,interesting_places";

pub const DEFAULT_RADIUS: u32 = 5_000;
pub const POPULAR_RADIUS: u32 = 10_000;
pub const ATTRACTION_RADIUS: u32 = 15_000;

pub const SEARCH_LIMIT: u32 = 10;
/// Provider-side cap on radius search results.
pub const RADIUS_LIMIT: u32 = 20;
pub const PLACES_PER_POPULAR_CITY: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct PopularCity {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

pub const POPULAR_CITIES: [PopularCity; 6] = [
    PopularCity {
        name: "Rio de Janeiro",
        lat: -22.9068,
        lon: -43.1729,
    },
    PopularCity {
        name: "Barcelona",
        lat: 41.3851,
        lon: 2.1734,
    },
    PopularCity {
        name: "Tokyo",
        lat: 35.6762,
        lon: 139.6503,
    },
    PopularCity {
        name: "Paris",
        lat: 48.8566,
        lon: 2.3522,
    },
    PopularCity {
        name: "New York",
        lat: 40.7128,
        lon: -74.0060,
    },
    PopularCity {
        name: "London",
        lat: 51.5074,
        lon: -0.1278,
    },
];

pub struct PlaceService {
    client: OpenTripMapClient,
}

impl PlaceService {
    pub fn new(client: OpenTripMapClient) -> Self {
        Self { client }
    }

    async fn fetch_city(&self, city: &PopularCity) -> CityPlaces {
        let places = match self
            .fetch_places_by_coordinates(city.lat, city.lon, POPULAR_RADIUS, DEFAULT_KINDS)
            .await
        {
            Ok(mut places) => {
                places.truncate(PLACES_PER_POPULAR_CITY);
                places
            }
            Err(e) => {
                error!("Error fetching places for {}: {}", city.name, e);
                Vec::new()
            }
        };

        CityPlaces {
            city: city.name.to_string(),
            places,
        }
    }
}

#[async_trait]
impl PlaceDataSource for PlaceService {
    async fn search_places(&self, query: &str, limit: u32) -> ClientResult<serde_json::Value> {
        let limit = limit.to_string();
        self.client
            .get(
                &["autosuggest"],
                &[("name", query), ("limit", limit.as_str()), ("format", "json")],
            )
            .await
    }

    async fn fetch_places_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        radius: u32,
        kinds: &str,
    ) -> ClientResult<Vec<Place>> {
        let (radius, lon, lat, limit) = (
            radius.to_string(),
            lon.to_string(),
            lat.to_string(),
            RADIUS_LIMIT.to_string(),
        );
        let response: RadiusResponse = self
            .client
            .get(
                &["radius"],
                &[
                    ("radius", radius.as_str()),
                    ("lon", lon.as_str()),
                    ("lat", lat.as_str()),
                    ("kinds", kinds),
                    ("format", "json"),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;
        Ok(response.into_places())
    }

    async fn fetch_place_details(&self, xid: &str) -> ClientResult<PlaceDetails> {
        self.client
            .get(&["xid", xid], &[("format", "json")])
            .await
    }

    async fn fetch_popular_destinations(&self) -> Vec<CityPlaces> {
        let cities = join_all(POPULAR_CITIES.iter().map(|city| self.fetch_city(city))).await;

        info!(
            "Fetched popular places: {} of {} cities returned results",
            cities.iter().filter(|c| !c.places.is_empty()).count(),
            cities.len()
        );
        cities
    }

    async fn fetch_city_attractions(&self, city_name: &str, lat: f64, lon: f64) -> Vec<Place> {
        match self
            .fetch_places_by_coordinates(lat, lon, ATTRACTION_RADIUS, ATTRACTION_KINDS)
            .await
        {
            Ok(attractions) => attractions
                .into_iter()
                .map(|mut attraction| {
                    attraction.city = Some(city_name.to_string());
                    attraction
                })
                .collect(),
            Err(e) => {
                error!("Error fetching attractions for {}: {}", city_name, e);
                Vec::new()
            }
        }
    }
}
