use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::generation::ContentGenerator;
use crate::render::ExportSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analyzer. Default: RandomizedAnalyzer, seeded from ANALYZER_SEED when set.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    /// Pluggable questionnaire generator. Default: TemplatedGenerator.
    pub generator: Arc<dyn ContentGenerator>,
    /// Keeps a copy of every export when EXPORT_DIR is set.
    pub export_sink: Option<Arc<dyn ExportSink>>,
}
