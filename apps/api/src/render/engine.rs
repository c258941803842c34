//! Rendering engine collaborator — converts a markup document into a
//! paginated PDF on disk. The production engine shells out to wkhtmltopdf;
//! tests substitute fakes through the `RenderEngine` trait object held in
//! `AppState`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Engine failures are recovered by the artifact converter (plain-text
/// fallback); they never reach the HTTP caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch conversion engine: {0}")]
    Launch(std::io::Error),

    #[error("conversion engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("conversion engine exited with status {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
}

/// Fixed conversion options: A4 pages, 0.5in margins on all four sides,
/// UTF-8, outline disabled. Local resource access stays enabled so the
/// embedded stylesheet can reference local assets.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub page_size: &'static str,
    pub margin: &'static str,
    pub encoding: &'static str,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            page_size: "A4",
            margin: "0.5in",
            encoding: "UTF-8",
        }
    }
}

#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Converts `markup` into a paginated binary document at `output`.
    async fn convert(
        &self,
        markup: &str,
        output: &Path,
        options: &ConvertOptions,
    ) -> Result<(), EngineError>;
}

/// Spawns the wkhtmltopdf binary, feeding the document on stdin.
pub struct WkhtmltopdfEngine {
    binary: PathBuf,
}

impl WkhtmltopdfEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn build_args(options: &ConvertOptions, output: &Path) -> Vec<String> {
        vec![
            "--page-size".to_string(),
            options.page_size.to_string(),
            "--margin-top".to_string(),
            options.margin.to_string(),
            "--margin-right".to_string(),
            options.margin.to_string(),
            "--margin-bottom".to_string(),
            options.margin.to_string(),
            "--margin-left".to_string(),
            options.margin.to_string(),
            "--encoding".to_string(),
            options.encoding.to_string(),
            "--no-outline".to_string(),
            "--enable-local-file-access".to_string(),
            "--quiet".to_string(),
            "-".to_string(),
            output.to_string_lossy().into_owned(),
        ]
    }
}

#[async_trait]
impl RenderEngine for WkhtmltopdfEngine {
    async fn convert(
        &self,
        markup: &str,
        output: &Path,
        options: &ConvertOptions,
    ) -> Result<(), EngineError> {
        debug!(
            "Converting markup to {} via {}",
            output.display(),
            self.binary.display()
        );

        let mut child = Command::new(&self.binary)
            .args(Self::build_args(options, output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(EngineError::Launch)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(markup.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let finished = child.wait_with_output().await?;
        if !finished.status.success() {
            return Err(EngineError::Failed {
                code: finished.status.code(),
                stderr: String::from_utf8_lossy(&finished.stderr).into_owned(),
            });
        }
        Ok(())
    }
}
