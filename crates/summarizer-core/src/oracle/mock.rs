//! Mock summarization oracle for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{OracleError, SummarizationOracle};

/// A configurable response for [`MockOracle`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this summary text.
    Summary(String),
    /// Echo the submitted input back as the summary.
    Echo,
    /// Simulate a non-success HTTP status.
    Status { status: u16, body: String },
    /// Simulate a transport failure.
    Transport(String),
    /// Simulate a success status with an unusable body.
    Malformed(String),
}

/// In-memory [`SummarizationOracle`] for tests.
///
/// Prefix rules from [`on_prefix`](Self::on_prefix) win over the fixed
/// answer. Every call is counted and its input recorded, and can be delayed
/// to shuffle completion order.
pub struct MockOracle {
    fallback: MockResponse,
    by_prefix: Vec<(String, MockResponse)>,
    delay: Option<Duration>,
    delay_by_prefix: Vec<(String, Duration)>,
    call_count: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl MockOracle {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            fallback: response,
            by_prefix: Vec::new(),
            delay: None,
            delay_by_prefix: Vec::new(),
            call_count: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Return `response` for inputs starting with `prefix`.
    pub fn on_prefix(mut self, prefix: impl Into<String>, response: MockResponse) -> Self {
        self.by_prefix.push((prefix.into(), response));
        self
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set latency for inputs starting with `prefix`, overriding [`with_delay`](Self::with_delay).
    pub fn with_delay_for(mut self, prefix: impl Into<String>, delay: Duration) -> Self {
        self.delay_by_prefix.push((prefix.into(), delay));
        self
    }

    /// How many times `summarize()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every input submitted so far, in call order.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }

    fn next_response(&self, input: &str) -> MockResponse {
        if let Some((_, resp)) = self.by_prefix.iter().find(|(p, _)| input.starts_with(p)) {
            return resp.clone();
        }
        self.fallback.clone()
    }

    fn delay_for(&self, input: &str) -> Option<Duration> {
        self.delay_by_prefix
            .iter()
            .find(|(p, _)| input.starts_with(p.as_str()))
            .map(|(_, d)| *d)
            .or(self.delay)
    }
}

impl SummarizationOracle for MockOracle {
    fn name(&self) -> &str {
        "Mock"
    }

    fn summarize<'a>(
        &'a self,
        input: &'a str,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, OracleError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(input.to_string());
        let response = self.next_response(input);
        let delay = self.delay_for(input);

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match response {
                MockResponse::Summary(text) => Ok(text),
                MockResponse::Echo => Ok(input.to_string()),
                MockResponse::Status { status, body } => Err(OracleError::Status { status, body }),
                MockResponse::Transport(msg) => Err(OracleError::Transport(msg)),
                MockResponse::Malformed(msg) => Err(OracleError::MalformedResponse(msg)),
            }
        })
    }
}
