//! Retry policy for network operations.

use log::{debug, warn};
use std::future::Future;
use std::time::Duration;

use super::{HttpResponse, TransportError};

/// HTTP 409 Conflict is treated as transient and retried.
pub(crate) const CONFLICT_STATUS: u16 = 409;

/// How many times a failed call is retried and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Retries after the first attempt; `1` means at most two attempts.
    pub max_network_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_network_retries: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Returns true if the outcome of one attempt is worth another try.
///
/// Timeouts, connection failures and 409 responses are retryable. Every
/// other outcome, including other error statuses, is final.
pub(crate) fn is_retryable(result: &Result<HttpResponse, TransportError>) -> bool {
    match result {
        Ok(response) => response.status == CONFLICT_STATUS,
        Err(TransportError::Timeout(_)) | Err(TransportError::Connect(_)) => true,
        Err(TransportError::Request(_)) => false,
    }
}

fn describe(result: &Result<HttpResponse, TransportError>) -> String {
    match result {
        Ok(response) => format!("HTTP {}", response.status),
        Err(e) => e.to_string(),
    }
}

/// Runs `operation` until it yields a final outcome or the policy's retries
/// are used up. The last outcome is returned unchanged.
pub(crate) async fn with_retry<F, Fut>(
    operation_name: &str,
    policy: &RetryPolicy,
    operation: F,
) -> Result<HttpResponse, TransportError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<HttpResponse, TransportError>>,
{
    let mut retries = 0;

    loop {
        let result = operation().await;

        if !is_retryable(&result) {
            return result;
        }

        if retries >= policy.max_network_retries {
            debug!(
                "{}: giving up after {} attempts ({})",
                operation_name,
                retries + 1,
                describe(&result)
            );
            return result;
        }

        retries += 1;
        warn!(
            "{}: attempt {}/{} failed ({}), retrying...",
            operation_name,
            retries,
            policy.max_network_retries + 1,
            describe(&result)
        );

        if !policy.delay.is_zero() {
            tokio::time::sleep(policy.delay).await;
        }
    }
}
