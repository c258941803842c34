//! Axum route handler for resume downloads.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::errors::AppError;
use crate::resumes::handlers::UserIdQuery;
use crate::state::AppState;

/// GET /api/v1/resumes/:id/download
///
/// Streams the rendered artifact. The caller identity comes from the
/// external auth layer; the lookup is scoped to it, so a foreign resume id
/// yields 404 rather than leaking existence.
pub async fn handle_download_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Response, AppError> {
    let artifact = super::render_resume(
        &state.store,
        &state.engine,
        &state.config.render_scratch_dir,
        resume_id,
        params.user_id,
    )
    .await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        artifact.filename.replace('"', "'")
    );
    Ok((
        [
            (header::CONTENT_TYPE, artifact.media_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}
