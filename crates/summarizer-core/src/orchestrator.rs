use std::time::Instant;

use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::chunk::truncate_chars;
use crate::oracle::{OracleError, SummarizationOracle};
use crate::{Chunk, PipelineError, RawSummary, SummarizerConfig};

/// Summarize every chunk concurrently, returning one [`RawSummary`] per chunk.
///
/// All oracle requests are in flight at once on the calling task; results are
/// written back into the slot of the chunk they belong to, so `result[i]`
/// always answers `chunks[i]` whatever order the responses arrive in.
///
/// Per-chunk failures (non-success status, transport error, timeout) become
/// sentinel summaries. A success response with an unusable body is a
/// [`PipelineError::MalformedResponse`], returned once every request is done.
pub async fn summarize_chunks(
    chunks: &[Chunk],
    oracle: &dyn SummarizationOracle,
    config: &SummarizerConfig,
) -> Result<Vec<RawSummary>, PipelineError> {
    let timeout = config.request_timeout();
    let mut results: Vec<Option<RawSummary>> = vec![None; chunks.len()];
    let mut pending = FuturesUnordered::new();

    for (slot, chunk) in chunks.iter().enumerate() {
        let chars = chunk.char_len();
        if chars < config.min_chunk_chars {
            tracing::debug!(chunk = chunk.index, chars, "skipping: too short");
            results[slot] = Some(RawSummary::TooShort);
            continue;
        }

        let input = truncate_chars(&chunk.text, config.max_input_chars);
        pending.push(async move {
            let start = Instant::now();
            let result = match tokio::time::timeout(timeout, oracle.summarize(input, timeout)).await
            {
                Ok(result) => result,
                Err(_) => Err(OracleError::Timeout(timeout)),
            };
            (slot, result, start.elapsed())
        });
    }

    let mut fault: Option<PipelineError> = None;

    while let Some((slot, result, elapsed)) = pending.next().await {
        let index = chunks[slot].index;
        let elapsed_ms = elapsed.as_millis() as u64;

        let raw = match result {
            Ok(text) => {
                tracing::info!(chunk = index, oracle = oracle.name(), elapsed_ms, "chunk summarized");
                RawSummary::Text(text)
            }
            Err(OracleError::Status { status, body }) => {
                tracing::warn!(chunk = index, status, elapsed_ms, "oracle returned error status");
                RawSummary::Failed { status, body }
            }
            Err(err @ (OracleError::Transport(_) | OracleError::Timeout(_))) => {
                tracing::warn!(chunk = index, error = %err, elapsed_ms, "oracle unavailable");
                RawSummary::Unavailable {
                    reason: err.to_string(),
                }
            }
            Err(OracleError::MalformedResponse(message)) => {
                tracing::error!(chunk = index, error = %message, "malformed oracle response");
                if fault.is_none() {
                    fault = Some(PipelineError::MalformedResponse { index, message });
                }
                continue;
            }
        };
        results[slot] = Some(raw);
    }

    if let Some(err) = fault {
        return Err(err);
    }

    Ok(results.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::chunk_text;
    use crate::oracle::mock::{MockOracle, MockResponse};
    use std::time::Duration;

    fn chunk(index: usize, text: &str) -> Chunk {
        Chunk {
            index,
            text: text.to_string(),
        }
    }

    fn long(prefix: &str) -> String {
        format!("{prefix} {}", "filler text ".repeat(10))
    }

    #[tokio::test]
    async fn empty_input_no_calls() {
        let oracle = MockOracle::new(MockResponse::Echo);
        let out = summarize_chunks(&[], &oracle, &SummarizerConfig::default())
            .await
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn short_chunk_never_calls_oracle() {
        let oracle = MockOracle::new(MockResponse::Summary("should not appear".into()));
        let chunks = vec![chunk(0, &"x".repeat(49))];
        let out = summarize_chunks(&chunks, &oracle, &SummarizerConfig::default())
            .await
            .unwrap();
        assert_eq!(out, vec![RawSummary::TooShort]);
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn fifty_chars_is_long_enough() {
        let oracle = MockOracle::new(MockResponse::Summary("ok".into()));
        let chunks = vec![chunk(0, &"x".repeat(50))];
        let out = summarize_chunks(&chunks, &oracle, &SummarizerConfig::default())
            .await
            .unwrap();
        assert_eq!(out, vec![RawSummary::Text("ok".into())]);
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn input_truncated_to_max_input_chars() {
        let oracle = MockOracle::new(MockResponse::Echo);
        let chunks = chunk_text(&"é".repeat(2500), 2500);
        let out = summarize_chunks(&chunks, &oracle, &SummarizerConfig::default())
            .await
            .unwrap();
        let inputs = oracle.inputs();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].chars().count(), 2000);
        assert_eq!(out[0], RawSummary::Text("é".repeat(2000)));
    }

    #[tokio::test(start_paused = true)]
    async fn order_preserved_when_responses_arrive_reversed() {
        let oracle = MockOracle::new(MockResponse::Echo)
            .with_delay_for("first", Duration::from_secs(3))
            .with_delay_for("second", Duration::from_secs(2))
            .with_delay_for("third", Duration::from_secs(1));
        let chunks = vec![
            chunk(0, &long("first")),
            chunk(1, &long("second")),
            chunk(2, &long("third")),
        ];

        let out = summarize_chunks(&chunks, &oracle, &SummarizerConfig::default())
            .await
            .unwrap();

        assert_eq!(out.len(), 3);
        for (raw, c) in out.iter().zip(&chunks) {
            assert_eq!(raw, &RawSummary::Text(c.text.clone()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn requests_run_concurrently() {
        let oracle = MockOracle::new(MockResponse::Echo).with_delay(Duration::from_secs(10));
        let chunks: Vec<Chunk> = (0..5).map(|i| chunk(i, &long(&i.to_string()))).collect();

        let start = tokio::time::Instant::now();
        let out = summarize_chunks(&chunks, &oracle, &SummarizerConfig::default())
            .await
            .unwrap();

        assert_eq!(out.len(), 5);
        // Sequential dispatch would take 50s of virtual time.
        assert!(start.elapsed() < Duration::from_secs(11));
    }

    #[tokio::test]
    async fn failures_become_sentinels_in_place() {
        let oracle = MockOracle::new(MockResponse::Summary("fine".into()))
            .on_prefix(
                "bad-status",
                MockResponse::Status {
                    status: 500,
                    body: "fail".into(),
                },
            )
            .on_prefix("bad-net", MockResponse::Transport("connection reset".into()));
        let chunks = vec![
            chunk(0, &long("ok")),
            chunk(1, &long("bad-status")),
            chunk(2, "tiny"),
            chunk(3, &long("bad-net")),
            chunk(4, &long("ok again")),
        ];

        let out = summarize_chunks(&chunks, &oracle, &SummarizerConfig::default())
            .await
            .unwrap();

        assert_eq!(
            out,
            vec![
                RawSummary::Text("fine".into()),
                RawSummary::Failed {
                    status: 500,
                    body: "fail".into()
                },
                RawSummary::TooShort,
                RawSummary::Unavailable {
                    reason: "connection reset".into()
                },
                RawSummary::Text("fine".into()),
            ]
        );
        assert_eq!(oracle.call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_only_affects_slow_chunk() {
        let oracle = MockOracle::new(MockResponse::Summary("done".into()))
            .with_delay_for("slow", Duration::from_secs(300))
            .with_delay_for("quick", Duration::from_secs(1));
        let chunks = vec![chunk(0, &long("slow")), chunk(1, &long("quick"))];

        let out = summarize_chunks(&chunks, &oracle, &SummarizerConfig::default())
            .await
            .unwrap();

        match &out[0] {
            RawSummary::Unavailable { reason } => assert!(reason.contains("timed out")),
            other => panic!("expected timeout sentinel, got {:?}", other),
        }
        assert_eq!(out[1], RawSummary::Text("done".into()));
    }

    #[tokio::test]
    async fn malformed_response_is_pipeline_fault() {
        let oracle = MockOracle::new(MockResponse::Summary("fine".into()))
            .on_prefix("broken", MockResponse::Malformed("missing summary_text".into()));
        let chunks = vec![chunk(0, &long("ok")), chunk(1, &long("broken"))];

        let err = summarize_chunks(&chunks, &oracle, &SummarizerConfig::default())
            .await
            .unwrap_err();
        match err {
            PipelineError::MalformedResponse { index, message } => {
                assert_eq!(index, 1);
                assert!(message.contains("summary_text"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // Every request still ran to completion.
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn custom_thresholds_respected() {
        let oracle = MockOracle::new(MockResponse::Echo);
        let config = SummarizerConfig {
            min_chunk_chars: 5,
            max_input_chars: 3,
            ..SummarizerConfig::default()
        };
        let chunks = vec![chunk(0, "four"), chunk(1, "fivers")];
        let out = summarize_chunks(&chunks, &oracle, &config).await.unwrap();
        assert_eq!(
            out,
            vec![RawSummary::TooShort, RawSummary::Text("fiv".into())]
        );
    }
}
