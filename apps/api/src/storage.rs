//! Storage collaborator for the resume platform.
//!
//! `Store` is the seam between request handling (and the rendering
//! orchestrator) and persistence. `AppState` holds an `Arc<dyn Store>`;
//! production uses `PgStore`, unit tests swap in `memory::MemoryStore`.
//! Every resume lookup is scoped to `(id, owner)` so one user can never
//! fetch, edit, or download another user's resume.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity::ActivityRow;
use crate::models::resume::{NewResume, ResumePatch, ResumeRecord, ResumeRow};
use crate::models::user::{NewUser, User, UserPatch};

#[async_trait]
pub trait Store: Send + Sync {
    async fn fetch_resume_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ResumeRecord>, AppError>;

    async fn list_resumes(&self, owner_id: Uuid) -> Result<Vec<ResumeRecord>, AppError>;

    async fn create_resume(
        &self,
        owner_id: Uuid,
        new: NewResume,
    ) -> Result<ResumeRecord, AppError>;

    async fn update_resume(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: ResumePatch,
    ) -> Result<ResumeRecord, AppError>;

    async fn delete_resume(&self, id: Uuid, owner_id: Uuid) -> Result<(), AppError>;

    async fn append_activity(
        &self,
        owner_id: Uuid,
        activity_type: &str,
        details: &str,
        resume_id: Option<Uuid>,
    ) -> Result<(), AppError>;

    async fn recent_activities(
        &self,
        owner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityRow>, AppError>;

    async fn create_user(&self, new: NewUser) -> Result<User, AppError>;

    async fn fetch_user(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, AppError>;
}

/// Submits an activity append as detached background work. The response path
/// never waits on it; a failed write is logged and dropped.
pub fn log_activity(
    store: Arc<dyn Store>,
    user_id: Uuid,
    activity_type: &'static str,
    details: String,
    resume_id: Option<Uuid>,
) {
    tokio::spawn(async move {
        if let Err(err) = store
            .append_activity(user_id, activity_type, &details, resume_id)
            .await
        {
            warn!("Activity log write failed for user {user_id}: {err}");
        }
    });
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn version_name_taken(
        &self,
        owner_id: Uuid,
        version_name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM resumes
                WHERE user_id = $1 AND version_name = $2 AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(owner_id)
        .bind(version_name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn fetch_resume_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ResumeRecord>, AppError> {
        let row: Option<ResumeRow> =
            sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(ResumeRow::into_record))
    }

    async fn list_resumes(&self, owner_id: Uuid) -> Result<Vec<ResumeRecord>, AppError> {
        let rows: Vec<ResumeRow> =
            sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at ASC")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(ResumeRow::into_record).collect())
    }

    async fn create_resume(
        &self,
        owner_id: Uuid,
        new: NewResume,
    ) -> Result<ResumeRecord, AppError> {
        if self
            .version_name_taken(owner_id, &new.version_name, None)
            .await?
        {
            return Err(AppError::Validation(
                "Version name already exists for this user".to_string(),
            ));
        }

        let row: ResumeRow = sqlx::query_as(
            r#"
            INSERT INTO resumes
                (user_id, version_name, personal_info, experience, education,
                 skills, projects, certificates, achievements, links)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&new.version_name)
        .bind(Json(&new.personal_info))
        .bind(Json(&new.experience))
        .bind(Json(&new.education))
        .bind(&new.skills)
        .bind(Json(&new.projects))
        .bind(Json(&new.certificates))
        .bind(Json(&new.achievements))
        .bind(Json(&new.links))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn update_resume(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: ResumePatch,
    ) -> Result<ResumeRecord, AppError> {
        let existing = self
            .fetch_resume_by_id_and_owner(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

        if let Some(name) = &patch.version_name {
            if name != &existing.version_name
                && self.version_name_taken(owner_id, name, Some(id)).await?
            {
                return Err(AppError::Validation(
                    "Version name already exists for this user".to_string(),
                ));
            }
        }

        let row: ResumeRow = sqlx::query_as(
            r#"
            UPDATE resumes SET
                version_name  = COALESCE($1, version_name),
                personal_info = COALESCE($2, personal_info),
                experience    = COALESCE($3, experience),
                education     = COALESCE($4, education),
                skills        = COALESCE($5, skills),
                projects      = COALESCE($6, projects),
                certificates  = COALESCE($7, certificates),
                achievements  = COALESCE($8, achievements),
                links         = COALESCE($9, links),
                updated_at    = NOW()
            WHERE id = $10 AND user_id = $11
            RETURNING *
            "#,
        )
        .bind(patch.version_name)
        .bind(patch.personal_info.map(Json))
        .bind(patch.experience.map(Json))
        .bind(patch.education.map(Json))
        .bind(patch.skills)
        .bind(patch.projects.map(Json))
        .bind(patch.certificates.map(Json))
        .bind(patch.achievements.map(Json))
        .bind(patch.links.map(Json))
        .bind(id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn delete_resume(&self, id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Resume {id} not found")));
        }
        Ok(())
    }

    async fn append_activity(
        &self,
        owner_id: Uuid,
        activity_type: &str,
        details: &str,
        resume_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO activities (user_id, activity_type, resume_id, details)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(owner_id)
        .bind(activity_type)
        .bind(resume_id)
        .bind(details)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent_activities(
        &self,
        owner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityRow>, AppError> {
        Ok(sqlx::query_as(
            r#"
            SELECT * FROM activities
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_user(&self, new: NewUser) -> Result<User, AppError> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&new.email)
                .fetch_one(&self.pool)
                .await?;
        if taken {
            return Err(AppError::Validation(
                "Email already registered".to_string(),
            ));
        }

        Ok(sqlx::query_as(
            r#"
            INSERT INTO users (email, full_name, phone, address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&new.email)
        .bind(&new.full_name)
        .bind(&new.phone)
        .bind(&new.address)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn fetch_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, AppError> {
        let updated: Option<User> = sqlx::query_as(
            r#"
            UPDATE users SET
                full_name  = COALESCE($1, full_name),
                phone      = COALESCE($2, phone),
                address    = COALESCE($3, address),
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(patch.full_name)
        .bind(patch.phone)
        .bind(patch.address)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store for unit tests
// ────────────────────────────────────────────────────────────────────────────
