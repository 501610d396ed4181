//! Domain entities - the core business objects.

mod credentials;
mod permission;
mod settings;
mod user;

pub use credentials::{LoginCredentials, Registration};
pub use permission::Permission;
pub use settings::{NotificationSettings, PrivacySettings, Visibility};
pub use user::{NewUser, User, UserId};
