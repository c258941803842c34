//! Axum route handlers for user profile records. Credentials and tokens are
//! the external auth layer's concern; this service only keeps the profile.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{NewUser, User, UserPatch};
use crate::state::AppState;

/// POST /api/v1/users
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> Result<Json<User>, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("email cannot be empty".to_string()));
    }
    if request.full_name.trim().is_empty() {
        return Err(AppError::Validation(
            "full_name cannot be empty".to_string(),
        ));
    }

    let user = state.store.create_user(request).await?;
    Ok(Json(user))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = state
        .store
        .fetch_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/:id
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UserPatch>,
) -> Result<Json<User>, AppError> {
    let user = state.store.update_user(user_id, request).await?;
    Ok(Json(user))
}
