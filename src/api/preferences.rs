use super::{preference_response, AppState, JsonResponse};
use crate::models::preferences::{
    AuthState, Favorites, OnboardingState, PermissionKind, Settings, SettingsPatch, ThemeMode,
};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub token: String,
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct PermissionRequest {
    pub kind: PermissionKind,
    pub granted: bool,
}

#[derive(Deserialize)]
pub struct ThemeRequest {
    pub mode: ThemeMode,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggled {
    pub destination_id: String,
    pub is_favorite: bool,
}

pub async fn get_auth(State(app_state): State<AppState>) -> JsonResponse<AuthState> {
    preference_response("load auth state", app_state.preferences.auth().await)
}

pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> JsonResponse<AuthState> {
    preference_response(
        "log in",
        app_state
            .preferences
            .login(request.token, request.user_id)
            .await,
    )
}

pub async fn logout(State(app_state): State<AppState>) -> JsonResponse<AuthState> {
    preference_response("log out", app_state.preferences.logout().await)
}

pub async fn get_onboarding(State(app_state): State<AppState>) -> JsonResponse<OnboardingState> {
    preference_response(
        "load onboarding state",
        app_state.preferences.onboarding().await,
    )
}

pub async fn complete_onboarding(
    State(app_state): State<AppState>,
) -> JsonResponse<OnboardingState> {
    preference_response(
        "complete onboarding",
        app_state.preferences.set_onboarding_completed(true).await,
    )
}

pub async fn set_permission(
    State(app_state): State<AppState>,
    Json(request): Json<PermissionRequest>,
) -> JsonResponse<OnboardingState> {
    preference_response(
        "update permission",
        app_state
            .preferences
            .set_permission_granted(request.kind, request.granted)
            .await,
    )
}

pub async fn reset_onboarding(State(app_state): State<AppState>) -> JsonResponse<OnboardingState> {
    preference_response(
        "reset onboarding",
        app_state.preferences.reset_onboarding().await,
    )
}

pub async fn get_settings(State(app_state): State<AppState>) -> JsonResponse<Settings> {
    preference_response("load settings", app_state.preferences.settings().await)
}

pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> JsonResponse<Settings> {
    preference_response(
        "update settings",
        app_state.preferences.apply_settings(patch).await,
    )
}

pub async fn set_theme_mode(
    State(app_state): State<AppState>,
    Json(request): Json<ThemeRequest>,
) -> JsonResponse<Settings> {
    preference_response(
        "set theme mode",
        app_state.preferences.set_theme_mode(request.mode).await,
    )
}

pub async fn toggle_theme(State(app_state): State<AppState>) -> JsonResponse<Settings> {
    preference_response("toggle theme", app_state.preferences.toggle_theme().await)
}

pub async fn get_favorites(State(app_state): State<AppState>) -> JsonResponse<Favorites> {
    preference_response("load favorites", app_state.preferences.favorites().await)
}

pub async fn toggle_favorite(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> JsonResponse<FavoriteToggled> {
    let result = app_state
        .preferences
        .toggle_favorite(id.clone())
        .await
        .map(|is_favorite| FavoriteToggled {
            destination_id: id,
            is_favorite,
        });
    preference_response("toggle favorite", result)
}
