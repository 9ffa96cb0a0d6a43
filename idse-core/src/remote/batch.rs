//! Batch execution for C6: bounded concurrency, per-artifact failure
//! isolation, and adaptive backoff on `RateLimited` (`spec.md` §4.6 Batch
//! semantics, §5 concurrency model).

use std::future::Future;

use futures::stream::{self, StreamExt};

use crate::domain::ArtifactId;
use crate::error::RemoteError;
use crate::Error;

/// Result of one batch push or pull: failures are isolated per artifact and
/// never abort the rest of the batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: Vec<ArtifactId>,
    pub failed: Vec<(ArtifactId, Error)>,
}

const MAX_BACKOFF_ATTEMPTS: u32 = 5;
const BASE_BACKOFF_MS: u64 = 50;
const MAX_BACKOFF_MS: u64 = 2_000;

/// Runs `op` for each of `items` with at most `concurrency` in flight at
/// once, isolating failures into [`BatchSummary`].
pub async fn run_batch<T, F, Fut>(items: Vec<T>, concurrency: usize, op: F) -> BatchSummary
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = (ArtifactId, Result<(), Error>)> + Send,
{
    let concurrency = concurrency.max(1);
    let results: Vec<_> = stream::iter(items)
        .map(|item| {
            let op = op.clone();
            async move { op(item).await }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut summary = BatchSummary::default();
    for (artifact_id, result) in results {
        match result {
            Ok(()) => {
                tracing::debug!(artifact_id = artifact_id.get(), "batch item succeeded");
                summary.succeeded.push(artifact_id);
            }
            Err(err) => {
                tracing::warn!(artifact_id = artifact_id.get(), error = %err, "batch item failed");
                summary.failed.push((artifact_id, err));
            }
        }
    }
    summary
}

/// Retries `op` with exponential, capped, jittered backoff while it returns
/// `RemoteError::RateLimited`. Any other error or a final rate-limit past
/// [`MAX_BACKOFF_ATTEMPTS`] is returned to the caller.
pub async fn with_backoff<T, F, Fut>(mut op: F) -> Result<T, RemoteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RemoteError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(RemoteError::RateLimited { retry_after_ms }) if attempt < MAX_BACKOFF_ATTEMPTS => {
                attempt += 1;
                let backoff = (BASE_BACKOFF_MS * 2u64.pow(attempt)).min(MAX_BACKOFF_MS);
                let floor = backoff.min(retry_after_ms.max(1));
                let jittered = floor + fastrand::u64(0..=floor / 2 + 1);
                tracing::debug!(attempt, backoff_ms = jittered, "rate limited, retrying after backoff");
                tokio::time::sleep(std::time::Duration::from_millis(jittered)).await;
            }
            Err(other) => return Err(other),
        }
    }
}
