use std::sync::Arc;

use crate::domain::{LoginCredentials, NewUser, Registration, User, UserId};
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};

/// A user together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Registration, login and account operations.
#[derive(Clone)]
pub struct UserUseCase {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl UserUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Hash the password, insert the user and issue a token for it.
    ///
    /// Uniqueness is left to storage: a taken username or email comes back
    /// as `DomainError::Duplicate`.
    pub async fn register(&self, registration: Registration) -> Result<Session, DomainError> {
        let password_hash = self.passwords.hash(registration.password())?;

        let new_user = NewUser::new(
            registration.first_name().to_owned(),
            registration.last_name().to_owned(),
            registration.username().to_owned(),
            registration.email().to_owned(),
            password_hash,
        );
        let user = self.users.create(new_user).await?;
        let token = self.tokens.issue(user.id)?;

        Ok(Session { user, token })
    }

    /// Look the user up by username or email and check the password.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<Session, DomainError> {
        let user = self
            .users
            .find_by_username_or_email(credentials.username(), credentials.email())
            .await?
            .ok_or(DomainError::NotFound)?;

        if !self
            .passwords
            .verify(credentials.password(), &user.password_hash)?
        {
            return Err(DomainError::PasswordMismatch);
        }

        let token = self.tokens.issue(user.id)?;
        Ok(Session { user, token })
    }

    /// Resolve a bearer token to its subject. Storage is not consulted.
    pub fn authenticate(&self, token: &str) -> Result<UserId, DomainError> {
        let claims = self.tokens.verify(token)?;
        Ok(claims.user_id()?)
    }

    pub async fn profile(&self, id: UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        Ok(self.users.soft_delete(id).await?)
    }
}
