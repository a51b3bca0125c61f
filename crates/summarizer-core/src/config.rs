use std::time::Duration;

use crate::PipelineError;
use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::layout::{DEFAULT_GAP_THRESHOLD, DEFAULT_TOLERANCE};

/// Hosted BART summarization model.
pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Configuration for one summarization pipeline.
#[derive(Clone)]
pub struct SummarizerConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Chunks shorter than this are not sent to the oracle.
    pub min_chunk_chars: usize,
    /// Chunks are cut to this many characters before submission.
    pub max_input_chars: usize,
    pub request_timeout_secs: u64,
    /// Horizontal gap above which two words get a space between them.
    pub gap_threshold: f32,
    pub x_tolerance: f32,
    pub y_tolerance: f32,
}

impl std::fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("chunk_size", &self.chunk_size)
            .field("min_chunk_chars", &self.min_chunk_chars)
            .field("max_input_chars", &self.max_input_chars)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("gap_threshold", &self.gap_threshold)
            .field("x_tolerance", &self.x_tolerance)
            .field("y_tolerance", &self.y_tolerance)
            .finish()
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            min_chunk_chars: 50,
            max_input_chars: 2000,
            request_timeout_secs: 120,
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            x_tolerance: DEFAULT_TOLERANCE,
            y_tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SummarizerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.chunk_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "chunk_size must be at least 1".into(),
            ));
        }
        if self.max_input_chars == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_input_chars must be at least 1".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(PipelineError::InvalidConfig(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(PipelineError::InvalidConfig("api_url is empty".into()));
        }
        Ok(())
    }
}
