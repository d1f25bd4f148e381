/// ProgressReporter port for feedback while a scan runs
///
/// Messages go to the user (typically stderr), never into the report itself.
pub trait ProgressReporter {
    /// Reports a plain status line
    fn report(&self, message: &str);

    /// Reports how far a counted step has come
    ///
    /// # Arguments
    /// * `current` - Items done so far
    /// * `total` - Items in this step
    /// * `message` - Optional label shown next to the bar
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a problem that does not stop the run
    fn report_error(&self, message: &str);

    /// Reports the end of a step
    fn report_completion(&self, message: &str);
}
