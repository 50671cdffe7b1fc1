use std::sync::Arc;

use crate::review_source::ReviewSource;
use crate::selection::SelectionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Upstream review feed. Default: `HostawayClient`.
    pub review_source: Arc<dyn ReviewSource>,
    /// Persisted selection set. Default: `PgSelectionStore`.
    pub selections: Arc<dyn SelectionStore>,
}
