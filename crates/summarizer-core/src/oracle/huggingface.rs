use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{OracleError, SummarizationOracle};
use crate::SummarizerConfig;

#[derive(Serialize)]
struct SummaryRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct SummaryEntry {
    summary_text: String,
}

/// Hugging Face inference endpoint for a summarization model.
pub struct HuggingFaceOracle {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl HuggingFaceOracle {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self::new(
            reqwest::Client::new(),
            config.api_url.clone(),
            config.api_key.clone(),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl SummarizationOracle for HuggingFaceOracle {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    fn summarize<'a>(
        &'a self,
        input: &'a str,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, OracleError>> + Send + 'a>> {
        Box::pin(async move {
            let mut request = self
                .client
                .post(&self.api_url)
                .json(&SummaryRequest { inputs: input })
                .timeout(timeout);
            if let Some(ref key) = self.api_key {
                request = request.bearer_auth(key);
            }

            let resp = request.send().await.map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout(timeout)
                } else {
                    OracleError::Transport(e.to_string())
                }
            })?;

            tracing::info!(url = %self.api_url, status = resp.status().as_u16(), "oracle responded");
            interpret_response(resp).await
        })
    }
}

/// Turn an oracle HTTP response into summary text or an [`OracleError`].
pub(crate) async fn interpret_response(resp: reqwest::Response) -> Result<String, OracleError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| OracleError::Transport(e.to_string()))?;

    // Only a plain 200 carries summaries; 202/204 and friends are failures too.
    if status != reqwest::StatusCode::OK {
        return Err(OracleError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let entries: Vec<SummaryEntry> =
        serde_json::from_str(&body).map_err(|e| OracleError::MalformedResponse(e.to_string()))?;
    entries
        .into_iter()
        .next()
        .map(|entry| entry.summary_text)
        .ok_or_else(|| OracleError::MalformedResponse("empty result list".into()))
}
