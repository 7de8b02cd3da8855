use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    Notifications,
    Location,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsGranted {
    pub notifications: bool,
    pub location: bool,
}

impl PermissionsGranted {
    pub fn set(&mut self, kind: PermissionKind, granted: bool) {
        match kind {
            PermissionKind::Notifications => self.notifications = granted,
            PermissionKind::Location => self.location = granted,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    pub is_completed: bool,
    pub permissions_granted: PermissionsGranted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    #[default]
    En,
    Pt,
    Es,
    Fr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub mode: ThemeMode,
    pub is_dark: bool,
    pub notifications: bool,
    pub location_services: bool,
    pub language: SupportedLanguage,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: ThemeMode::System,
            is_dark: false,
            notifications: true,
            location_services: true,
            language: SupportedLanguage::En,
        }
    }
}

impl Settings {
    /// The system theme is resolved on the device, so only an explicit
    /// `dark` mode turns `is_dark` on here.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.is_dark = mode == ThemeMode::Dark;
    }

    pub fn toggle_theme(&mut self) {
        let next = if self.mode == ThemeMode::Light {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        };
        self.set_theme_mode(next);
    }
}

/// Partial settings update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub notifications: Option<bool>,
    pub location_services: Option<bool>,
    pub language: Option<SupportedLanguage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorites {
    pub destination_ids: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_theme_from_system_goes_light() {
        let mut settings = Settings::default();
        settings.toggle_theme();
        assert_eq!(settings.mode, ThemeMode::Light);
        assert!(!settings.is_dark);

        settings.toggle_theme();
        assert_eq!(settings.mode, ThemeMode::Dark);
        assert!(settings.is_dark);
    }

    #[test]
    fn test_system_mode_is_not_dark() {
        let mut settings = Settings::default();
        settings.set_theme_mode(ThemeMode::Dark);
        settings.set_theme_mode(ThemeMode::System);
        assert!(!settings.is_dark);
    }

    #[test]
    fn test_persisted_shape_uses_camel_case() {
        let state = OnboardingState {
            is_completed: true,
            permissions_granted: PermissionsGranted {
                notifications: true,
                location: false,
            },
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["isCompleted"], true);
        assert_eq!(json["permissionsGranted"]["notifications"], true);
    }
}
