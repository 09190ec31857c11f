//! Shared utilities for nodes.
//!
//! Cancellation checking and the typed wrapper around external calls
//! (memory lookup, LLM generation, queue writes).

use crate::use_cases::run_campaign::NodeError;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Outcome of an external call made under a deadline.
///
/// Call sites match on all three arms, so the degraded path is never
/// forgotten.
#[derive(Debug)]
pub enum CallOutcome<T, E> {
    Success(T),
    Timeout(Duration),
    Failed(E),
}

/// Run `future` with a deadline.
pub async fn call_with_timeout<T, E, F>(duration: Duration, future: F) -> CallOutcome<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(duration, future).await {
        Ok(Ok(value)) => CallOutcome::Success(value),
        Ok(Err(error)) => CallOutcome::Failed(error),
        Err(_) => CallOutcome::Timeout(duration),
    }
}

/// Check if cancellation has been requested.
///
/// Returns `Err(NodeError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), NodeError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(NodeError::Cancelled);
    }
    Ok(())
}

/// Await `future` unless the token fires first.
pub(crate) async fn cancellable<F: Future>(
    token: &Option<CancellationToken>,
    future: F,
) -> Result<F::Output, NodeError> {
    match token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(NodeError::Cancelled),
                output = future => Ok(output),
            }
        }
        None => Ok(future.await),
    }
}
