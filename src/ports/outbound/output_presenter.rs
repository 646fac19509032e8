use crate::shared::Result;

/// OutputPresenter port: where a rendered report ends up
pub trait OutputPresenter {
    /// Delivers the rendered report in full.
    ///
    /// File-backed presenters must not leave a partially written report
    /// behind when this returns an error, and must refuse to write through
    /// a symbolic link.
    fn present(&self, content: &str) -> Result<()>;
}
