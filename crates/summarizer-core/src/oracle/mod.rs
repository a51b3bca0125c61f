//! Summarization oracle trait and implementations.

pub mod huggingface;
pub mod mock;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

pub use huggingface::HuggingFaceOracle;

/// Error type for oracle calls, separating the outcomes the orchestrator
/// treats differently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The oracle answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// No response: connection refused, reset, DNS failure, ...
    #[error("{0}")]
    Transport(String),
    /// No response within the per-request timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// A success status with a body that is not a summary list.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A remote model that turns a passage of text into a summary.
pub trait SummarizationOracle: Send + Sync {
    /// Short human-readable name used in logs.
    fn name(&self) -> &str;

    /// Summarize `input`, giving up after `timeout`.
    fn summarize<'a>(
        &'a self,
        input: &'a str,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, OracleError>> + Send + 'a>>;
}
