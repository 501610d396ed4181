//! Handlers for the authenticated user's own account.

use actix_web::{HttpResponse, web};

use arkhon_shared::dto::{
    MessageResponse, PermissionResponse, PermissionsResponse, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /users/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.users.profile(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id,
        firstname: user.first_name,
        lastname: user.last_name,
        username: user.username,
        email: user.email,
        bio: user.bio,
        verified: user.verified,
        xp: user.xp,
        arkhoin: user.arkhoin,
        created_at: user.created_at,
    }))
}

/// GET /users/me/permissions
pub async fn permissions(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let permissions = state.permissions.get_permissions(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(PermissionsResponse {
        permissions: permissions
            .into_iter()
            .map(|p| PermissionResponse {
                id: p.id,
                name: p.name,
                created_at: p.created_at,
            })
            .collect(),
    }))
}

/// DELETE /users/me - soft delete
pub async fn delete_me(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    state.users.delete(identity.user_id).await?;
    tracing::info!(user_id = identity.user_id, "User deleted");

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}
