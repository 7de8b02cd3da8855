//! Persisted client state: auth session, onboarding flags, settings and
//! favorites.
//!
//! Each store is one JSON document in a SQLite key-value table. Updates are a
//! read-modify-write under the connection lock, so the last write wins.

use crate::models::preferences::{
    AuthState, Favorites, OnboardingState, PermissionKind, Settings, SettingsPatch,
    SupportedLanguage, ThemeMode,
};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::info;

const AUTH_STORE: &str = "auth-storage";
const ONBOARDING_STORE: &str = "onboarding-storage";
const SETTINGS_STORE: &str = "settings-storage";
const FAVORITES_STORE: &str = "favorites-storage";

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Preference store lock poisoned")]
    LockPoisoned,
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

#[derive(Clone)]
pub struct PreferenceStore {
    conn: Arc<Mutex<Connection>>,
}

impl PreferenceStore {
    pub fn open(path: &Path) -> Result<Self, PreferenceError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self::from_connection(Connection::open(path)?)?;
        info!("Opened preference store at {}", path.display());
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, PreferenceError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, PreferenceError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn load<T>(&self, name: &'static str) -> Result<T, PreferenceError>
    where
        T: DeserializeOwned + Default + Send + 'static,
    {
        self.with_connection(move |conn| read_document(conn, name))
            .await
    }

    async fn update<T, F>(&self, name: &'static str, apply: F) -> Result<T, PreferenceError>
    where
        T: Serialize + DeserializeOwned + Default + Send + 'static,
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.with_connection(move |conn| {
            let mut document: T = read_document(conn, name)?;
            apply(&mut document);
            conn.execute(
                "INSERT INTO preferences (name, value) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET value = excluded.value",
                params![name, serde_json::to_string(&document)?],
            )?;
            Ok(document)
        })
        .await
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, PreferenceError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, PreferenceError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| PreferenceError::LockPoisoned)?;
            f(&guard)
        })
        .await
        .map_err(|e| PreferenceError::TaskFailed(e.to_string()))?
    }

    pub async fn auth(&self) -> Result<AuthState, PreferenceError> {
        self.load(AUTH_STORE).await
    }

    pub async fn login(&self, token: String, user_id: String) -> Result<AuthState, PreferenceError> {
        self.update(AUTH_STORE, move |auth: &mut AuthState| {
            auth.token = Some(token);
            auth.user_id = Some(user_id);
        })
        .await
    }

    pub async fn logout(&self) -> Result<AuthState, PreferenceError> {
        self.update(AUTH_STORE, |auth: &mut AuthState| *auth = AuthState::default())
            .await
    }

    pub async fn onboarding(&self) -> Result<OnboardingState, PreferenceError> {
        self.load(ONBOARDING_STORE).await
    }

    pub async fn set_onboarding_completed(
        &self,
        completed: bool,
    ) -> Result<OnboardingState, PreferenceError> {
        self.update(ONBOARDING_STORE, move |state: &mut OnboardingState| {
            state.is_completed = completed;
        })
        .await
    }

    pub async fn set_permission_granted(
        &self,
        kind: PermissionKind,
        granted: bool,
    ) -> Result<OnboardingState, PreferenceError> {
        self.update(ONBOARDING_STORE, move |state: &mut OnboardingState| {
            state.permissions_granted.set(kind, granted);
        })
        .await
    }

    pub async fn reset_onboarding(&self) -> Result<OnboardingState, PreferenceError> {
        self.update(ONBOARDING_STORE, |state: &mut OnboardingState| {
            *state = OnboardingState::default();
        })
        .await
    }

    pub async fn settings(&self) -> Result<Settings, PreferenceError> {
        self.load(SETTINGS_STORE).await
    }

    pub async fn set_theme_mode(&self, mode: ThemeMode) -> Result<Settings, PreferenceError> {
        self.update(SETTINGS_STORE, move |settings: &mut Settings| {
            settings.set_theme_mode(mode)
        })
        .await
    }

    pub async fn toggle_theme(&self) -> Result<Settings, PreferenceError> {
        self.update(SETTINGS_STORE, Settings::toggle_theme).await
    }

    pub async fn set_notifications(&self, enabled: bool) -> Result<Settings, PreferenceError> {
        self.apply_settings(SettingsPatch {
            notifications: Some(enabled),
            ..SettingsPatch::default()
        })
        .await
    }

    pub async fn set_location_services(&self, enabled: bool) -> Result<Settings, PreferenceError> {
        self.apply_settings(SettingsPatch {
            location_services: Some(enabled),
            ..SettingsPatch::default()
        })
        .await
    }

    pub async fn set_language(
        &self,
        language: SupportedLanguage,
    ) -> Result<Settings, PreferenceError> {
        self.apply_settings(SettingsPatch {
            language: Some(language),
            ..SettingsPatch::default()
        })
        .await
    }

    pub async fn apply_settings(&self, patch: SettingsPatch) -> Result<Settings, PreferenceError> {
        self.update(SETTINGS_STORE, move |settings: &mut Settings| {
            if let Some(enabled) = patch.notifications {
                settings.notifications = enabled;
            }
            if let Some(enabled) = patch.location_services {
                settings.location_services = enabled;
            }
            if let Some(language) = patch.language {
                settings.language = language;
            }
        })
        .await
    }

    pub async fn favorites(&self) -> Result<Favorites, PreferenceError> {
        self.load(FAVORITES_STORE).await
    }

    /// Returns whether the destination is a favorite after the toggle.
    pub async fn toggle_favorite(&self, destination_id: String) -> Result<bool, PreferenceError> {
        let id = destination_id.clone();
        let favorites = self
            .update(FAVORITES_STORE, move |favorites: &mut Favorites| {
                if !favorites.destination_ids.remove(&destination_id) {
                    favorites.destination_ids.insert(destination_id);
                }
            })
            .await?;
        Ok(favorites.destination_ids.contains(&id))
    }
}

fn read_document<T>(conn: &Connection, name: &str) -> Result<T, PreferenceError>
where
    T: DeserializeOwned + Default,
{
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM preferences WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(T::default()),
    }
}
