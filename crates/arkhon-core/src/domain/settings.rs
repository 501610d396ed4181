//! Typed user preferences.
//!
//! Both structs are stored as JSON documents. Unknown keys are rejected so a
//! typo in a stored document surfaces as an error instead of being ignored.

use serde::{Deserialize, Serialize};

/// Channels a user receives notifications on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationSettings {
    pub in_app: bool,
    pub email: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            in_app: true,
            email: false,
        }
    }
}

/// Who may see a resource category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Followers,
    Private,
}

/// Per-category visibility of a user's profile data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrivacySettings {
    pub profile: Visibility,
    pub image: Visibility,
    pub comments: Visibility,
    pub favorites: Visibility,
    pub projects: Visibility,
    pub components: Visibility,
    pub followers: Visibility,
    pub following: Visibility,
    pub inventory: Visibility,
    pub formations: Visibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_privacy_document_fills_defaults() {
        let privacy: PrivacySettings =
            serde_json::from_str(r#"{"inventory":"private"}"#).unwrap();

        assert_eq!(privacy.inventory, Visibility::Private);
        assert_eq!(privacy.profile, Visibility::Public);
    }

    #[test]
    fn test_unknown_privacy_key_rejected() {
        let result = serde_json::from_str::<PrivacySettings>(r#"{"wallet":"private"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_notification_defaults() {
        let settings: NotificationSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.in_app);
        assert!(!settings.email);
    }
}
