/// ProgressReporter port for user-facing feedback during an analysis run
///
/// Everything reported here is meant for a human watching the run
/// (stderr in the CLI). Diagnostic detail goes through `tracing` instead.
pub trait ProgressReporter {
    /// One-line status update ("Loaded 42 components from sbom.json")
    fn report(&self, message: &str);

    /// Advances a bounded task such as evidence collection.
    ///
    /// `message` names the item just finished, usually a component.
    /// Implementations should treat `current >= total` as the end of the task.
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// A recoverable problem: a skipped document, a component without a name
    fn report_error(&self, message: &str);

    fn report_completion(&self, message: &str);
}
