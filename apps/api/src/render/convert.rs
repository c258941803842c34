//! Artifact Converter — turns the markup document into the binary printable
//! artifact, degrading to a plain-text rendition when the engine fails.
//!
//! The transient file is read into memory and removed on every exit path;
//! nothing persists beyond the request.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::render::engine::{ConvertOptions, RenderEngine};
use crate::render::sections::non_blank;

/// The fallback artifact keeps the PDF media type and `.pdf` filename so
/// existing download clients keep working.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct RenderArtifact {
    pub bytes: Bytes,
    pub media_type: &'static str,
    pub filename: String,
}

/// Transient output path, keyed by resume id. Two concurrent downloads of
/// the same resume race on this path; last writer wins.
fn transient_path(scratch_dir: &Path, record: &ResumeRecord) -> PathBuf {
    scratch_dir.join(format!("resume_{}.pdf", record.id))
}

/// Converts the document, falling back to plain text on any engine error.
/// Only a failure to write the fallback itself propagates.
pub async fn convert_to_artifact(
    engine: &dyn RenderEngine,
    scratch_dir: &Path,
    record: &ResumeRecord,
    markup: &str,
) -> Result<RenderArtifact, AppError> {
    let path = transient_path(scratch_dir, record);

    if let Err(engine_err) = engine
        .convert(markup, &path, &ConvertOptions::default())
        .await
    {
        warn!(
            "Conversion engine failed for resume {}: {engine_err}; writing plain-text fallback",
            record.id
        );
        if let Err(write_err) = tokio::fs::write(&path, fallback_text(record)).await {
            remove_transient(&path).await;
            return Err(AppError::Artifact(write_err));
        }
    }

    let bytes = tokio::fs::read(&path).await;
    remove_transient(&path).await;
    let bytes = bytes.map_err(AppError::Artifact)?;

    Ok(RenderArtifact {
        bytes: Bytes::from(bytes),
        media_type: PDF_MEDIA_TYPE,
        filename: format!("{}.pdf", record.version_name),
    })
}

async fn remove_transient(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(
                "Failed to remove transient artifact {}: {err}",
                path.display()
            );
        }
    }
}

/// Readable minimum for the degraded artifact: version name, personal info,
/// experience, education, and skills. Projects, certificates, achievements,
/// and links are intentionally left out.
fn fallback_text(record: &ResumeRecord) -> String {
    let info = &record.personal_info;
    let mut out = String::new();
    out.push_str(&format!("Resume: {}\n", record.version_name));
    out.push_str(&format!("Name: {}\n", info.name));
    out.push_str(&format!("Email: {}\n", info.email));
    out.push_str(&format!("Phone: {}\n", info.phone));
    out.push_str(&format!("Address: {}\n\n", info.address));

    out.push_str("Professional Summary:\n");
    out.push_str(&format!("{}\n\n", info.summary));

    out.push_str("Experience:\n");
    for exp in &record.experience {
        push_heading_line(&mut out, &exp.title, &exp.company, &exp.period);
        if let Some(desc) = non_blank(&exp.description) {
            out.push_str(desc);
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("Education:\n");
    for edu in &record.education {
        push_heading_line(&mut out, &edu.degree, &edu.institution, &edu.period);
        if let Some(desc) = non_blank(&edu.description) {
            out.push_str(desc);
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("Skills:\n");
    out.push_str(&record.skills.join(", "));
    out.push('\n');
    out
}

/// `<primary> at <affiliation> (<period>)`, skipping absent pieces.
fn push_heading_line(
    out: &mut String,
    primary: &str,
    affiliation: &Option<String>,
    period: &Option<String>,
) {
    out.push_str(primary);
    if let Some(affiliation) = non_blank(affiliation) {
        out.push_str(" at ");
        out.push_str(affiliation);
    }
    if let Some(period) = non_blank(period) {
        out.push_str(&format!(" ({period})"));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::engine::EngineError;
    use crate::render::fixtures::{full_record, sparse_record};
    use async_trait::async_trait;

    /// Writes a fake PDF on success, or fails without touching the output.
    struct FakeEngine {
        fail: bool,
    }

    #[async_trait]
    impl RenderEngine for FakeEngine {
        async fn convert(
            &self,
            _markup: &str,
            output: &Path,
            _options: &ConvertOptions,
        ) -> Result<(), EngineError> {
            if self.fail {
                return Err(EngineError::Failed {
                    code: Some(1),
                    stderr: "wkhtmltopdf: cannot connect to X server".to_string(),
                });
            }
            tokio::fs::write(output, b"%PDF-1.4 fake").await?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_successful_conversion_returns_pdf_bytes() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let record = full_record();

        let artifact =
            convert_to_artifact(&FakeEngine { fail: false }, scratch.path(), &record, "<html>")
                .await
                .expect("conversion should succeed");

        assert_eq!(&artifact.bytes[..], b"%PDF-1.4 fake");
        assert_eq!(artifact.media_type, PDF_MEDIA_TYPE);
        assert_eq!(artifact.filename, format!("{}.pdf", record.version_name));
    }

    #[tokio::test]
    async fn test_transient_file_removed_after_conversion() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let record = full_record();

        convert_to_artifact(&FakeEngine { fail: false }, scratch.path(), &record, "<html>")
            .await
            .expect("conversion should succeed");

        let leftovers = std::fs::read_dir(scratch.path())
            .expect("read scratch dir")
            .count();
        assert_eq!(leftovers, 0, "scratch dir must be clean after the request");
    }

    #[tokio::test]
    async fn test_engine_failure_falls_back_to_plain_text() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let record = full_record();

        let artifact =
            convert_to_artifact(&FakeEngine { fail: true }, scratch.path(), &record, "<html>")
                .await
                .expect("engine failure must be absorbed, not propagated");

        assert!(!artifact.bytes.is_empty(), "fallback must never be empty");
        let text = String::from_utf8(artifact.bytes.to_vec()).expect("fallback is utf-8");
        assert!(text.contains(&format!("Resume: {}", record.version_name)));
        assert!(text.contains(&format!("Name: {}", record.personal_info.name)));
        assert!(text.contains(&record.experience[0].title));
        assert!(text.contains(&record.education[0].degree));
        assert!(text.contains(&record.skills.join(", ")));

        // Compatibility quirk: the fallback still ships as a PDF download.
        assert_eq!(artifact.media_type, PDF_MEDIA_TYPE);
        assert!(artifact.filename.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_fallback_skips_absent_optional_fields() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let mut record = sparse_record();
        record.experience.push(crate::models::resume::Experience {
            title: "Engineer".to_string(),
            company: None,
            period: Some("2021".to_string()),
            description: None,
        });

        let artifact =
            convert_to_artifact(&FakeEngine { fail: true }, scratch.path(), &record, "<html>")
                .await
                .expect("fallback should be written");

        let text = String::from_utf8(artifact.bytes.to_vec()).expect("utf-8");
        assert!(text.contains("Engineer (2021)\n"));
        assert!(!text.contains(" at "), "missing company must not leave a dangling 'at'");
    }

    #[tokio::test]
    async fn test_unwritable_fallback_path_is_fatal() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let missing = scratch.path().join("does-not-exist");
        let record = full_record();

        let err = convert_to_artifact(&FakeEngine { fail: true }, &missing, &record, "<html>")
            .await
            .expect_err("fallback write failure must propagate");
        assert!(matches!(err, AppError::Artifact(_)));
    }
}
