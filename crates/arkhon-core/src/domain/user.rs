use chrono::{DateTime, Utc};

use super::settings::{NotificationSettings, PrivacySettings};

/// Numeric user identifier assigned by storage.
pub type UserId = i64;

/// User entity - represents a registered account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub verified: bool,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub xp: i64,
    pub arkhoin: i64,
    pub notification: NotificationSettings,
    pub privacy: PrivacySettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Experience points granted on registration.
    pub const STARTING_XP: i64 = 500;
    /// In-app currency granted on registration.
    pub const STARTING_ARKHOIN: i64 = 1000;

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A user that has not been persisted yet. Storage assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        first_name: String,
        last_name: String,
        username: String,
        email: String,
        password_hash: String,
    ) -> Self {
        Self {
            first_name,
            last_name,
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Materialize the full entity once storage has assigned an id.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            bio: String::new(),
            verified: false,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            xp: User::STARTING_XP,
            arkhoin: User::STARTING_ARKHOIN,
            notification: NotificationSettings::default(),
            privacy: PrivacySettings::default(),
            created_at: self.created_at,
            updated_at: self.created_at,
            deleted_at: None,
        }
    }
}
