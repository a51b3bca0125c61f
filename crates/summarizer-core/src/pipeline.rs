use std::path::Path;
use std::sync::Arc;

use crate::backend::PdfBackend;
use crate::layout::extract_raw_text;
use crate::oracle::{HuggingFaceOracle, SummarizationOracle};
use crate::{
    Chunk, FinalSummary, Page, PipelineError, RawSummary, SummarizerConfig, SummaryStats,
    chunk_text, normalize_text, orchestrator, postprocess_summary,
};

/// A configured PDF summarization pipeline.
///
/// Holds a [`SummarizerConfig`] and an oracle handle, and exposes each
/// pipeline step as a method:
///
/// 1. [`extract_text`](Self::extract_text): PDF → raw text (blocking)
/// 2. [`prepare_text`](Self::prepare_text): raw text → normalized chunks
/// 3. [`summarize_chunks`](Self::summarize_chunks): chunks → final summary
pub struct Summarizer {
    config: SummarizerConfig,
    oracle: Arc<dyn SummarizationOracle>,
}

impl Summarizer {
    pub fn new(
        config: SummarizerConfig,
        oracle: Arc<dyn SummarizationOracle>,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config, oracle })
    }

    /// Build a pipeline backed by the HTTP oracle described in `config`.
    pub fn from_config(config: SummarizerConfig) -> Result<Self, PipelineError> {
        let oracle = Arc::new(HuggingFaceOracle::from_config(&config));
        Self::new(config, oracle)
    }

    /// Run the layout parser and rebuild the document's raw text.
    pub fn extract_text(
        &self,
        path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<String, PipelineError> {
        let pages = backend.extract_pages(path)?;
        tracing::debug!(path = %path.display(), pages = pages.len(), "layout extracted");
        Ok(self.text_from_pages(&pages))
    }

    pub fn text_from_pages(&self, pages: &[Page]) -> String {
        extract_raw_text(pages, self.config.gap_threshold)
    }

    /// Normalize raw text and cut it into chunks.
    ///
    /// Fails with [`PipelineError::EmptyText`] when nothing but whitespace was
    /// extracted, before any oracle call is made.
    pub fn prepare_text(&self, raw: &str) -> Result<Vec<Chunk>, PipelineError> {
        let normalized = normalize_text(raw);
        if normalized.is_empty() {
            return Err(PipelineError::EmptyText);
        }
        let chunks = chunk_text(&normalized, self.config.chunk_size);
        tracing::info!(
            chars = normalized.chars().count(),
            chunks = chunks.len(),
            "text prepared"
        );
        Ok(chunks)
    }

    /// Summarize chunks and assemble the post-processed result.
    pub async fn summarize_chunks(&self, chunks: &[Chunk]) -> Result<FinalSummary, PipelineError> {
        let raw = orchestrator::summarize_chunks(chunks, self.oracle.as_ref(), &self.config).await?;
        Ok(assemble(&raw))
    }

    /// Raw text in, final summary out.
    pub async fn summarize_text(&self, raw: &str) -> Result<FinalSummary, PipelineError> {
        let chunks = self.prepare_text(raw)?;
        self.summarize_chunks(&chunks).await
    }
}

/// Post-process each raw summary, in order.
pub fn assemble(raw: &[RawSummary]) -> FinalSummary {
    let segments = raw
        .iter()
        .map(|r| postprocess_summary(&r.to_string()))
        .collect();
    FinalSummary {
        segments,
        stats: SummaryStats::from_raw(raw),
    }
}
