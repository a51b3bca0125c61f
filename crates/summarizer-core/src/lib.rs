use std::fmt;

use thiserror::Error;

pub mod backend;
pub mod chunk;
pub mod config;
pub mod config_file;
pub mod layout;
pub mod normalize;
pub mod oracle;
pub mod orchestrator;
pub mod pipeline;
pub mod postprocess;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use chunk::chunk_text;
pub use config::SummarizerConfig;
pub use layout::{WordExtractor, extract_raw_text};
pub use normalize::normalize_text;
pub use oracle::{HuggingFaceOracle, OracleError, SummarizationOracle};
pub use orchestrator::summarize_chunks;
pub use pipeline::Summarizer;
pub use postprocess::postprocess_summary;

/// Separator placed between post-processed chunk summaries.
pub const SUMMARY_SEPARATOR: &str = "\n\n";

/// A word token with its horizontal extent on the page.
///
/// `top`/`bottom` are only used while grouping glyphs into lines; the text
/// reconstruction itself looks at `x0`/`x1` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedWord {
    pub text: String,
    pub x0: f32,
    pub x1: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PositionedWord {
    /// A word on a single baseline, for callers that only care about x.
    pub fn new(text: impl Into<String>, x0: f32, x1: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top: 0.0,
            bottom: 0.0,
        }
    }
}

/// The words of one page, in the order the layout parser yields them.
pub type Page = Vec<PositionedWord>;

/// A contiguous slice of normalized text, tagged with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
}

impl Chunk {
    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The oracle's answer for one chunk, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSummary {
    /// Summary text returned by the oracle.
    Text(String),
    /// Chunk was below the minimum length; no request was made.
    TooShort,
    /// Oracle answered with a non-success status.
    Failed { status: u16, body: String },
    /// Request never produced a response (connect error, reset, timeout).
    Unavailable { reason: String },
}

impl fmt::Display for RawSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawSummary::Text(text) => f.write_str(text),
            RawSummary::TooShort => f.write_str("Text too short for meaningful summary"),
            RawSummary::Failed { status, body } => write!(
                f,
                "Summary failed (API status: {}, details: {})",
                status, body
            ),
            RawSummary::Unavailable { reason } => {
                write!(f, "service unavailable due to exception: {}", reason)
            }
        }
    }
}

/// Counters describing how a document's chunks fared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub chunks: usize,
    pub summarized: usize,
    pub too_short: usize,
    pub failed: usize,
    pub unavailable: usize,
}

impl SummaryStats {
    pub fn from_raw(raw: &[RawSummary]) -> Self {
        let mut stats = SummaryStats {
            chunks: raw.len(),
            ..Default::default()
        };
        for r in raw {
            match r {
                RawSummary::Text(_) => stats.summarized += 1,
                RawSummary::TooShort => stats.too_short += 1,
                RawSummary::Failed { .. } => stats.failed += 1,
                RawSummary::Unavailable { .. } => stats.unavailable += 1,
            }
        }
        stats
    }
}

/// Output of a full pipeline run.
#[derive(Debug, Clone)]
pub struct FinalSummary {
    /// Post-processed segments, one per chunk, in chunk order.
    pub segments: Vec<String>,
    pub stats: SummaryStats,
}

impl FinalSummary {
    /// Segments joined by [`SUMMARY_SEPARATOR`].
    pub fn text(&self) -> String {
        self.segments.join(SUMMARY_SEPARATOR)
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No text found in PDF")]
    EmptyText,
    #[error("PDF extraction failed: {0}")]
    Backend(#[from] BackendError),
    #[error("unexpected oracle response for chunk {index}: {message}")]
    MalformedResponse { index: usize, message: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_rendering() {
        assert_eq!(
            RawSummary::TooShort.to_string(),
            "Text too short for meaningful summary"
        );
        assert_eq!(
            RawSummary::Failed {
                status: 503,
                body: "loading".into()
            }
            .to_string(),
            "Summary failed (API status: 503, details: loading)"
        );
        assert_eq!(
            RawSummary::Unavailable {
                reason: "connection reset".into()
            }
            .to_string(),
            "service unavailable due to exception: connection reset"
        );
        assert_eq!(RawSummary::Text("ok".into()).to_string(), "ok");
    }

    #[test]
    fn stats_count_each_kind() {
        let raw = vec![
            RawSummary::Text("a".into()),
            RawSummary::TooShort,
            RawSummary::Failed {
                status: 500,
                body: String::new(),
            },
            RawSummary::Text("b".into()),
            RawSummary::Unavailable {
                reason: "timeout".into(),
            },
        ];
        let stats = SummaryStats::from_raw(&raw);
        assert_eq!(stats.chunks, 5);
        assert_eq!(stats.summarized, 2);
        assert_eq!(stats.too_short, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.unavailable, 1);
    }

    #[test]
    fn final_summary_joins_with_blank_line() {
        let summary = FinalSummary {
            segments: vec!["one".into(), "two".into()],
            stats: SummaryStats::default(),
        };
        assert_eq!(summary.text(), "one\n\ntwo");
    }

    #[test]
    fn chunk_len_counts_chars() {
        let chunk = Chunk {
            index: 0,
            text: "héllo".into(),
        };
        assert_eq!(chunk.char_len(), 5);
    }
}
