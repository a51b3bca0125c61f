use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};

use crate::models::{ApiError, SummaryResponse};
use crate::state::AppState;
use crate::upload;

pub async fn summarize_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SummaryResponse>, ApiError> {
    let file = upload::parse_multipart(multipart)
        .await
        .map_err(ApiError::BadRequest)?;

    if !file.is_pdf() {
        return Err(ApiError::BadRequest("Only PDF files are accepted".into()));
    }

    tracing::info!(filename = %file.filename, bytes = file.data.len(), "upload received");

    // Temp dir is removed on drop, on every exit path.
    let temp_dir = tempfile::tempdir().map_err(ApiError::processing)?;
    let pdf_path = temp_dir.path().join("upload.pdf");
    tokio::fs::write(&pdf_path, &file.data)
        .await
        .map_err(ApiError::processing)?;

    let raw = extract_blocking(&state, pdf_path).await?;
    drop(temp_dir);

    let chunks = state.summarizer.prepare_text(&raw)?;
    let summary = state.summarizer.summarize_chunks(&chunks).await?;

    tracing::info!(
        filename = %file.filename,
        chunks = summary.stats.chunks,
        summarized = summary.stats.summarized,
        failed = summary.stats.failed + summary.stats.unavailable,
        "summary complete"
    );

    Ok(Json(SummaryResponse {
        summary: summary.text(),
    }))
}

/// Layout extraction is CPU-bound; keep it off the async workers.
async fn extract_blocking(state: &AppState, path: PathBuf) -> Result<String, ApiError> {
    let summarizer = Arc::clone(&state.summarizer);
    let backend = Arc::clone(&state.backend);
    tokio::task::spawn_blocking(move || summarizer.extract_text(&path, backend.as_ref()))
        .await
        .map_err(ApiError::processing)?
        .map_err(ApiError::from)
}
