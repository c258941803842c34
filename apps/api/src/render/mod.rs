//! Document-rendering pipeline.
//!
//! Compose sections → pick a layout → render markup → convert to a printable
//! artifact → log the download. The orchestrator only sees the storage and
//! engine collaborators as trait objects; everything downstream of the fetch
//! is deterministic.

pub mod convert;
pub mod engine;
pub mod handlers;
pub mod layout;
pub mod markup;
pub mod sections;

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::errors::AppError;
use crate::render::convert::RenderArtifact;
use crate::render::engine::RenderEngine;
use crate::render::sections::SectionPresence;
use crate::storage::{self, Store};

/// Renders the resume owned by `owner_id` into a downloadable artifact.
///
/// The fetch is scoped to `(resume_id, owner_id)` — a missing or foreign
/// resume is `NotFound` and nothing is rendered or logged. The download
/// activity is appended as detached work once the artifact exists; the
/// response never waits on it.
pub async fn render_resume(
    store: &Arc<dyn Store>,
    engine: &Arc<dyn RenderEngine>,
    scratch_dir: &Path,
    resume_id: Uuid,
    owner_id: Uuid,
) -> Result<RenderArtifact, AppError> {
    let record = store
        .fetch_resume_by_id_and_owner(resume_id, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    // Presence is recomputed on every render; the record may have changed.
    let presence = SectionPresence::of(&record);
    let two_column = layout::two_column(presence);
    let document = markup::render_document(&record, presence, two_column);
    let artifact =
        convert::convert_to_artifact(engine.as_ref(), scratch_dir, &record, &document).await?;

    storage::log_activity(
        Arc::clone(store),
        owner_id,
        "downloaded",
        format!("Downloaded resume version: {}", record.version_name),
        Some(resume_id),
    );

    Ok(artifact)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared test fixtures
// ────────────────────────────────────────────────────────────────────────────
