//! JSON surface over the query bindings and the preference stores.

pub mod countries;
pub mod places;
pub mod preferences;

use crate::models::response::ApiResponse;
use crate::query::{QueryResult, TravelQueries};
use crate::services::preferences::{PreferenceError, PreferenceStore};
use axum::{http::StatusCode, routing::get, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub queries: TravelQueries,
    pub preferences: PreferenceStore,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/countries", get(countries::get_all_countries))
        .route(
            "/countries/region/{region}",
            get(countries::get_countries_by_region),
        )
        .route(
            "/destinations/popular",
            get(countries::get_popular_destinations),
        )
        .route(
            "/destinations/region/{region}",
            get(countries::get_destinations_by_region),
        )
        .route("/places/search", get(places::search_places))
        .route("/places/nearby", get(places::get_places_nearby))
        .route("/places/popular", get(places::get_popular_places))
        .route("/places/{xid}", get(places::get_place_details))
        .route(
            "/cities/{city}/attractions",
            get(places::get_city_attractions),
        )
        .route("/preferences/auth", get(preferences::get_auth))
        .route("/preferences/auth/login", post(preferences::login))
        .route("/preferences/auth/logout", post(preferences::logout))
        .route("/preferences/onboarding", get(preferences::get_onboarding))
        .route(
            "/preferences/onboarding/complete",
            post(preferences::complete_onboarding),
        )
        .route(
            "/preferences/onboarding/permissions",
            post(preferences::set_permission),
        )
        .route(
            "/preferences/onboarding/reset",
            post(preferences::reset_onboarding),
        )
        .route(
            "/preferences/settings",
            get(preferences::get_settings).post(preferences::update_settings),
        )
        .route(
            "/preferences/settings/theme",
            post(preferences::set_theme_mode),
        )
        .route(
            "/preferences/settings/theme/toggle",
            post(preferences::toggle_theme),
        )
        .route("/preferences/favorites", get(preferences::get_favorites))
        .route(
            "/preferences/favorites/{id}/toggle",
            post(preferences::toggle_favorite),
        )
        .route(
            "/health",
            get(|| async {
                (
                    StatusCode::OK,
                    Json(serde_json::json!({ "status": "healthy" })),
                )
            }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub type JsonResponse<T> = (StatusCode, Json<ApiResponse<T>>);

/// Disabled queries answer 200 with `fetched: false`; failed ones 502.
pub(crate) fn query_response<T: Serialize>(result: QueryResult<T>) -> JsonResponse<Arc<T>> {
    match result {
        QueryResult::Idle => (StatusCode::OK, Json(ApiResponse::not_fetched())),
        QueryResult::Success(data) => (StatusCode::OK, Json(ApiResponse::ok(data))),
        QueryResult::Error(e) => (StatusCode::BAD_GATEWAY, Json(ApiResponse::failed(e))),
    }
}

pub(crate) fn preference_response<T>(
    operation: &str,
    result: Result<T, PreferenceError>,
) -> JsonResponse<T> {
    match result {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))),
        Err(e) => {
            error!("Failed to {}: {}", operation, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failed(format!("Failed to {}: {}", operation, e))),
            )
        }
    }
}
