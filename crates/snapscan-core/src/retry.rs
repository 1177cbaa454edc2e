//! Retry and backoff for queue requests.
//!
//! Timeouts, connection failures, throttling and 5xx answers are transient;
//! every other failure (including 404) is returned to the caller at once.

use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::QueueError;

/// High-level classification of a queue failure for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Server asked us to slow down (429).
    Throttled,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    /// 5xx answer.
    Http5xx(u16),
    /// Anything else; never retried.
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Capped exponential backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    /// A base delay that is negative or NaN becomes zero; one that is
    /// infinite or above `max_delay_secs` is clamped to the maximum.
    fn from(cfg: &RetryConfig) -> Self {
        let max_delay = Duration::from_secs(cfg.max_delay_secs);
        let base_delay = match Duration::try_from_secs_f64(cfg.base_delay_secs) {
            Ok(d) => d.min(max_delay),
            Err(_) if cfg.base_delay_secs > 0.0 => max_delay,
            Err(_) => Duration::ZERO,
        };
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// `attempt` is 1-based (1 = first attempt).
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts || kind == ErrorKind::Other {
            return RetryDecision::NoRetry;
        }
        // base * 2^(attempt-1), capped.
        let factor = 1u32 << attempt.saturating_sub(1).min(8);
        let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Other,
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

pub fn classify(e: &QueueError) -> ErrorKind {
    match e {
        QueueError::Http { status, .. } => classify_http_status(*status),
        QueueError::Transport { source, .. } => classify_curl_error(source),
        QueueError::Decode { .. } | QueueError::Url(_) => ErrorKind::Other,
    }
}

/// Runs `f` until it succeeds or the policy says to stop, sleeping between attempts.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, QueueError>
where
    F: FnMut() -> Result<T, QueueError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::warn!(attempt, delay_ms = d.as_millis() as u64, "retrying: {e}");
                    std::thread::sleep(d);
                    attempt += 1;
                }
            },
        }
    }
}
