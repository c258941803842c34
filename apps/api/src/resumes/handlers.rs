//! Axum route handlers for the Resume API: per-user CRUD plus the recent
//! activity feed. Every operation is scoped to the caller's identity, which
//! the external auth layer supplies as `user_id`.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity::ActivityRow;
use crate::models::resume::{NewResume, ResumePatch, ResumeRecord};
use crate::state::AppState;
use crate::storage::log_activity;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct ActivityQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

const DEFAULT_ACTIVITY_LIMIT: i64 = 10;

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let resumes = state.store.list_resumes(params.user_id).await?;
    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeRecord>, AppError> {
    let resume = state
        .store
        .fetch_resume_by_id_and_owner(resume_id, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    Ok(Json(resume))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<NewResume>,
) -> Result<Json<ResumeRecord>, AppError> {
    if request.version_name.trim().is_empty() {
        return Err(AppError::Validation(
            "version_name cannot be empty".to_string(),
        ));
    }

    let resume = state.store.create_resume(params.user_id, request).await?;

    log_activity(
        Arc::clone(&state.store),
        params.user_id,
        "created",
        format!("Created resume version: {}", resume.version_name),
        Some(resume.id),
    );
    Ok(Json(resume))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<ResumePatch>,
) -> Result<Json<ResumeRecord>, AppError> {
    let resume = state
        .store
        .update_resume(resume_id, params.user_id, request)
        .await?;

    log_activity(
        Arc::clone(&state.store),
        params.user_id,
        "updated",
        format!("Updated resume version: {}", resume.version_name),
        Some(resume_id),
    );
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    // Fetch first so the activity entry can name the deleted version.
    let resume = state
        .store
        .fetch_resume_by_id_and_owner(resume_id, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    state
        .store
        .delete_resume(resume_id, params.user_id)
        .await?;

    log_activity(
        Arc::clone(&state.store),
        params.user_id,
        "deleted",
        format!("Deleted resume version: {}", resume.version_name),
        Some(resume_id),
    );
    Ok(Json(json!({ "message": "Resume deleted successfully" })))
}

/// GET /api/v1/activities/recent
pub async fn handle_recent_activities(
    State(state): State<AppState>,
    Query(params): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityRow>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT).clamp(1, 100);
    let activities = state.store.recent_activities(params.user_id, limit).await?;
    Ok(Json(activities))
}
