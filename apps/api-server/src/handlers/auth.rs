//! Authentication handlers.

use actix_web::{HttpResponse, web};

use arkhon_core::domain::{LoginCredentials, Registration};
use arkhon_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let registration = Registration::try_from_parts(
        &req.firstname,
        &req.lastname,
        &req.username,
        &req.email,
        &req.password,
    )?;

    let session = state.users.register(registration).await?;
    tracing::info!(user_id = session.user.id, "User registered");

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "User created".to_string(),
        token: session.token,
    }))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let credentials = LoginCredentials::try_from_parts(
        req.username.as_deref(),
        req.email.as_deref(),
        &req.password,
    )?;

    let session = state.users.login(credentials).await?;
    tracing::info!(user_id = session.user.id, "User logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        token: session.token,
    }))
}
