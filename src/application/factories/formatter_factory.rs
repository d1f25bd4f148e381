use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for report formatters
///
/// Maps an [`OutputFormat`] to the adapter rendering it.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use classdeps::application::dto::OutputFormat;
    /// use classdeps::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use classdeps::application::dto::OutputFormat;
    /// use classdeps::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Generating text report...",
            OutputFormat::Json => "📝 Generating JSON report...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_messages() {
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Text),
            "📝 Generating text report..."
        );
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Json),
            "📝 Generating JSON report..."
        );
    }

    #[test]
    fn test_created_formatters_render_their_format() {
        let report = crate::adapters::outbound::formatters::sample_report();
        let json = FormatterFactory::create(OutputFormat::Json)
            .format(&report)
            .unwrap();
        assert!(json.trim_start().starts_with('{'));
        let text = FormatterFactory::create(OutputFormat::Text)
            .format(&report)
            .unwrap();
        assert!(text.starts_with("Dependency report"));
    }
}
