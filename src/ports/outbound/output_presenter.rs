use crate::shared::Result;

/// OutputPresenter port for delivering the rendered report
///
/// This port abstracts the destination (stdout, a file, ...).
pub trait OutputPresenter {
    /// Writes the rendered report to the destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the destination fails
    /// - The destination is a symbolic link or its directory is missing
    fn present(&self, content: &str) -> Result<()>;
}
