use std::sync::Arc;

use crate::analysis::lexicon::Lexicon;
use crate::config::Config;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable storage backend. Default: in-memory `MemStore`.
    pub store: Arc<dyn ResumeStore>,
    /// Stopwords and vocabulary used by keyword extraction.
    pub lexicon: Arc<Lexicon>,
    pub config: Config,
}
