use std::time::Duration;

pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Limits applied to evidence producers (archive inspection, registry lookups)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceSettings {
    /// Inspections in flight at once
    pub max_concurrency: usize,
    /// Deadline for a single call, retries excluded
    pub timeout: Duration,
    /// Retries after the first attempt for retryable failures
    pub max_retries: u32,
}

impl Default for EvidenceSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}
