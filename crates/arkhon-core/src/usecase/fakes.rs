//! Minimal port implementations for use-case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewUser, Permission, User, UserId};
use crate::error::RepoError;
use crate::ports::{
    AuthError, PasswordService, PermissionRepository, TokenClaims, TokenError, TokenService,
    UserRepository,
};

#[derive(Default)]
pub struct FakeUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(RepoError::Constraint("users_username_key".into()));
        }
        let user = user.into_user(rows.len() as UserId + 1);
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.id == id && !u.is_deleted()).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|u| !u.is_deleted())
            .find(|u| username == Some(u.username.as_str()) || email == Some(u.email.as_str()))
            .cloned())
    }

    async fn soft_delete(&self, id: UserId) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id && !u.is_deleted())
            .ok_or(RepoError::NotFound)?;
        user.deleted_at = Some(Utc::now());
        Ok(())
    }
}

pub struct FakePermissions {
    rows: Result<Vec<Permission>, ()>,
}

impl FakePermissions {
    pub fn with(grants: &[(UserId, &str)]) -> Self {
        let rows = grants
            .iter()
            .enumerate()
            .map(|(i, (user_id, name))| Permission {
                id: i as i64 + 1,
                user_id: *user_id,
                name: (*name).to_owned(),
                created_at: Utc::now(),
            })
            .collect();
        Self { rows: Ok(rows) }
    }

    pub fn failing() -> Self {
        Self { rows: Err(()) }
    }
}

#[async_trait]
impl PermissionRepository for FakePermissions {
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Permission>, RepoError> {
        match &self.rows {
            Ok(rows) => Ok(rows.iter().filter(|p| p.user_id == user_id).cloned().collect()),
            Err(()) => Err(RepoError::Connection("connection refused".into())),
        }
    }
}

/// Reversible stand-in for a real hash.
pub struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        hash.strip_prefix("hashed:")
            .map(|plain| plain == password)
            .ok_or_else(|| AuthError::Hashing("unknown hash format".into()))
    }
}

/// Tokens of the form `token-<id>`.
pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        Ok(format!("token-{user_id}"))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let subject = token
            .strip_prefix("token-")
            .ok_or_else(|| TokenError::Malformed(token.to_owned()))?;
        Ok(TokenClaims {
            subject: subject.to_owned(),
            exp: i64::MAX,
        })
    }
}
