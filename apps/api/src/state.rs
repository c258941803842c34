use std::sync::Arc;

use crate::config::Config;
use crate::render::engine::RenderEngine;
use crate::storage::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Storage collaborator. Production: `PgStore`; tests swap in a memory store.
    pub store: Arc<dyn Store>,
    /// Markup-to-PDF conversion engine. Production: `WkhtmltopdfEngine`.
    pub engine: Arc<dyn RenderEngine>,
    pub config: Config,
}
