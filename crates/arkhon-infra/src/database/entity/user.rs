//! User entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use arkhon_core::domain::{NewUser, User};
use arkhon_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub verified: bool,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub xp: i64,
    pub arkhoin: i64,
    pub notification: Json,
    pub privacy: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::permission::Entity")]
    Permission,
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
///
/// Fails when a stored preference document no longer matches its type.
impl TryFrom<Model> for User {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            verified: model.verified,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            xp: model.xp,
            arkhoin: model.arkhoin,
            notification: serde_json::from_value(model.notification)
                .map_err(|e| RepoError::Query(format!("notification settings: {e}")))?,
            privacy: serde_json::from_value(model.privacy)
                .map_err(|e| RepoError::Query(format!("privacy settings: {e}")))?,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
        })
    }
}

/// Build an insertable ActiveModel; the id is left to the sequence.
impl TryFrom<NewUser> for ActiveModel {
    type Error = RepoError;

    fn try_from(user: NewUser) -> Result<Self, Self::Error> {
        // Serialize the same defaults the domain applies to a fresh user.
        let defaults = user.into_user(0);
        let to_json = |value: Result<serde_json::Value, serde_json::Error>| {
            value.map_err(|e| RepoError::Query(e.to_string()))
        };

        Ok(Self {
            id: NotSet,
            first_name: Set(defaults.first_name),
            last_name: Set(defaults.last_name),
            bio: Set(defaults.bio),
            verified: Set(defaults.verified),
            username: Set(defaults.username),
            email: Set(defaults.email),
            password_hash: Set(defaults.password_hash),
            xp: Set(defaults.xp),
            arkhoin: Set(defaults.arkhoin),
            notification: Set(to_json(serde_json::to_value(defaults.notification))?),
            privacy: Set(to_json(serde_json::to_value(defaults.privacy))?),
            created_at: Set(defaults.created_at.into()),
            updated_at: Set(defaults.updated_at.into()),
            deleted_at: Set(None),
        })
    }
}
