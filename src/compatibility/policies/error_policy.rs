use std::time::Duration;

/// Base delay before retrying a transient failure
const TRANSIENT_BACKOFF: Duration = Duration::from_millis(200);

/// Base delay before retrying a throttled request
const THROTTLED_BACKOFF: Duration = Duration::from_secs(2);

/// Upper bound for any single retry delay
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Classification of a failure raised by an evidence producer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Timeouts, connection resets, 5xx responses
    Transient,
    /// Missing artifact, malformed archive, 4xx other than 429
    Permanent,
    /// Rate limited by the remote side
    Throttled,
    /// The request itself was invalid for this component
    Validation,
}

/// What the evidence collector does with a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Try again after [`retry_delay`]
    Retry,
    /// Treat the evidence as not attempted without recording anything
    Drop,
    /// Treat the evidence as not attempted and record an error
    Fail,
}

/// Maps a failure kind to the collector's reaction.
pub fn policy(kind: ErrorKind) -> ErrorPolicy {
    match kind {
        ErrorKind::Transient | ErrorKind::Throttled => ErrorPolicy::Retry,
        ErrorKind::Validation => ErrorPolicy::Drop,
        ErrorKind::Permanent => ErrorPolicy::Fail,
    }
}

/// Exponential backoff for the given zero-based `attempt`, capped at 30s.
/// Throttled failures start from a longer base delay.
pub fn retry_delay(kind: ErrorKind, attempt: u32) -> Duration {
    let base = match kind {
        ErrorKind::Throttled => THROTTLED_BACKOFF,
        _ => TRANSIENT_BACKOFF,
    };
    base.saturating_mul(2u32.saturating_pow(attempt.min(16)))
        .min(MAX_BACKOFF)
}
