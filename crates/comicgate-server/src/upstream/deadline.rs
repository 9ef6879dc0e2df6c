//! Deadline enforcement for outbound calls
//!
//! A timer task cancels a token when the deadline passes; the guarded future
//! races the token and is dropped (closing its socket) if the token fires first.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Returned when the deadline fires before the guarded future completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineExceeded(pub Duration);

/// A per-call deadline backed by a cancellation token
#[derive(Debug)]
pub struct Deadline {
    limit: Duration,
    token: CancellationToken,
    timer: JoinHandle<()>,
}

impl Deadline {
    /// Arm a deadline that fires `limit` from now
    pub fn start(limit: Duration) -> Self {
        let token = CancellationToken::new();
        let trigger = token.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            trigger.cancel();
        });
        Self { limit, token, timer }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Token that fires at the deadline
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_expired(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `operation` until it completes or the deadline fires.
    /// On expiry the operation is dropped mid-flight.
    pub async fn race<F, T>(&self, operation: F) -> Result<T, DeadlineExceeded>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(DeadlineExceeded(self.limit)),
            output = operation => Ok(output),
        }
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
