use std::sync::Arc;

use summarizer_core::{PdfBackend, Summarizer};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
    pub backend: Arc<dyn PdfBackend>,
}
