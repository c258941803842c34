//! Resume data model — one named, independently editable resume version per row.
//!
//! Section payloads are stored as JSONB and decoded into the typed structs
//! below at the storage boundary, so the renderer never sees a malformed or
//! partially-typed entry. List order is display order and is preserved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub technologies: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Accepts the legacy camelCase key used by existing clients.
    #[serde(default, alias = "credentialLink")]
    pub credential_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub platform: String,
    pub url: String,
}

/// A fully-typed resume version, ready for the rendering pipeline or an API
/// response. Produced from `ResumeRow` at the storage boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub version_name: String,
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
    pub achievements: Vec<Achievement>,
    pub links: Vec<LinkEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw database row. JSONB columns decode into the typed section structs;
/// a row that fails to decode is a storage error, not a renderer concern.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub version_name: String,
    pub personal_info: Json<PersonalInfo>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub skills: Vec<String>,
    pub projects: Json<Vec<Project>>,
    pub certificates: Json<Vec<Certificate>>,
    pub achievements: Json<Vec<Achievement>>,
    pub links: Json<Vec<LinkEntry>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn into_record(self) -> ResumeRecord {
        ResumeRecord {
            id: self.id,
            user_id: self.user_id,
            version_name: self.version_name,
            personal_info: self.personal_info.0,
            experience: self.experience.0,
            education: self.education.0,
            skills: self.skills,
            projects: self.projects.0,
            certificates: self.certificates.0,
            achievements: self.achievements.0,
            links: self.links.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Request body for creating a resume version. Omitted sections default to
/// empty lists so sparse resumes are valid.
#[derive(Debug, Clone, Deserialize)]
pub struct NewResume {
    pub version_name: String,
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

/// Partial update — only the supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumePatch {
    pub version_name: Option<String>,
    pub personal_info: Option<PersonalInfo>,
    pub experience: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<Project>>,
    pub certificates: Option<Vec<Certificate>>,
    pub achievements: Option<Vec<Achievement>>,
    pub links: Option<Vec<LinkEntry>>,
}
