/// Result alias used across the crate; engine errors are `AnalysisError`
/// values carried inside `anyhow::Error` so callers can downcast them.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
