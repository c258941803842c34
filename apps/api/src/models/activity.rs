use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One audit trail entry: created / updated / deleted / downloaded.
/// Appended fire-and-forget; a failed write never affects the request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: String,
    pub resume_id: Option<Uuid>,
    pub details: String,
    pub created_at: DateTime<Utc>,
}
