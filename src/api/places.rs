use super::{query_response, AppState, JsonResponse};
use crate::models::place::{CityPlaces, Place, PlaceDetails};
use crate::services::place::DEFAULT_RADIUS;
use axum::extract::{Path, Query, State};
use std::sync::Arc;

#[derive(serde::Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Missing coordinates default to zero, which keeps the query disabled.
#[derive(serde::Deserialize)]
pub struct CoordinateParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<u32>,
}

pub async fn search_places(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> JsonResponse<Arc<serde_json::Value>> {
    let query = params.q.unwrap_or_default();
    query_response(app_state.queries.search_places(&query, true).await)
}

pub async fn get_places_nearby(
    State(app_state): State<AppState>,
    Query(params): Query<CoordinateParams>,
) -> JsonResponse<Arc<Vec<Place>>> {
    query_response(
        app_state
            .queries
            .places_by_coordinates(
                params.lat.unwrap_or_default(),
                params.lon.unwrap_or_default(),
                params.radius.unwrap_or(DEFAULT_RADIUS),
                true,
            )
            .await,
    )
}

pub async fn get_popular_places(
    State(app_state): State<AppState>,
) -> JsonResponse<Arc<Vec<CityPlaces>>> {
    query_response(app_state.queries.popular_places().await)
}

pub async fn get_place_details(
    State(app_state): State<AppState>,
    Path(xid): Path<String>,
) -> JsonResponse<Arc<PlaceDetails>> {
    query_response(app_state.queries.place_details(&xid, true).await)
}

pub async fn get_city_attractions(
    State(app_state): State<AppState>,
    Path(city): Path<String>,
    Query(params): Query<CoordinateParams>,
) -> JsonResponse<Arc<Vec<Place>>> {
    query_response(
        app_state
            .queries
            .city_attractions(
                &city,
                params.lat.unwrap_or_default(),
                params.lon.unwrap_or_default(),
                true,
            )
            .await,
    )
}
