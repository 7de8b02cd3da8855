use super::{query_response, AppState, JsonResponse};
use crate::models::country::{AppDestination, RemoteCountry};
use axum::extract::{Path, State};
use std::sync::Arc;

pub async fn get_all_countries(
    State(app_state): State<AppState>,
) -> JsonResponse<Arc<Vec<RemoteCountry>>> {
    query_response(app_state.queries.all_countries().await)
}

pub async fn get_countries_by_region(
    State(app_state): State<AppState>,
    Path(region): Path<String>,
) -> JsonResponse<Arc<Vec<RemoteCountry>>> {
    query_response(app_state.queries.countries_by_region(&region, true).await)
}

pub async fn get_popular_destinations(
    State(app_state): State<AppState>,
) -> JsonResponse<Arc<Vec<AppDestination>>> {
    query_response(app_state.queries.popular_destinations().await)
}

pub async fn get_destinations_by_region(
    State(app_state): State<AppState>,
    Path(region): Path<String>,
) -> JsonResponse<Arc<Vec<AppDestination>>> {
    query_response(
        app_state
            .queries
            .destinations_by_region(&region, true)
            .await,
    )
}
