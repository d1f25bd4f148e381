use crate::application::read_models::{
    AnalysisReport, CycleView, LevelMetrics, MissingDependencyView, ViewSummary,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// Rule line under section titles
const RULE: &str = "----------------------------------------";

/// TextFormatter adapter for a plain-text report meant for terminals and logs
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl TextFormatter {
    fn render_header(&self, output: &mut String, report: &AnalysisReport) -> std::fmt::Result {
        writeln!(output, "Dependency report")?;
        writeln!(output, "{}", RULE)?;
        writeln!(
            output,
            "Tool: {} {}",
            report.metadata.tool_name, report.metadata.tool_version
        )?;
        writeln!(output, "Created: {}", report.metadata.timestamp)?;
        writeln!(output, "Inputs: {}", report.metadata.inputs.join(", "))?;
        let scan = &report.scan;
        writeln!(
            output,
            "Units: {} parsed, {} skipped, {} duplicate",
            scan.units_parsed, scan.units_skipped, scan.duplicate_units
        )?;
        writeln!(
            output,
            "References: {} linked, {} unresolved",
            scan.links, scan.missing_references
        )?;
        for input in &scan.skipped_inputs {
            writeln!(output, "Skipped input: {}", input)?;
        }
        writeln!(output)
    }

    fn render_view(&self, output: &mut String, view: &ViewSummary) -> std::fmt::Result {
        writeln!(output, "View: {}", view.level)?;
        writeln!(output, "{}", RULE)?;
        if !view.filters.is_empty() {
            writeln!(output, "Filters: {}", view.filters.join(", "))?;
        }
        writeln!(
            output,
            "{} node(s), {} arc(s), density {:.3}",
            view.nodes.len(),
            view.arc_count,
            view.density
        )?;
        for node in &view.nodes {
            writeln!(output, "  {} ({} unit(s))", node.name, node.units)?;
            for successor in &node.successors {
                writeln!(output, "    -> {}", successor)?;
            }
        }
        writeln!(output)
    }

    fn render_cycles(&self, output: &mut String, cycles: &[CycleView]) -> std::fmt::Result {
        writeln!(output, "Cycles")?;
        writeln!(output, "{}", RULE)?;
        if cycles.is_empty() {
            writeln!(output, "No cycles found.")?;
            return writeln!(output);
        }
        for (number, cycle) in cycles.iter().enumerate() {
            writeln!(
                output,
                "Cycle {} ({} node(s)): {}",
                number + 1,
                cycle.nodes.len(),
                cycle.nodes.join(", ")
            )?;
            for arc in &cycle.arcs {
                writeln!(output, "  {} -> {}", arc.from, arc.to)?;
                for reason in &arc.reasons {
                    writeln!(output, "      {} uses {}", reason.from, reason.to)?;
                }
            }
        }
        writeln!(output)
    }

    fn render_metrics(&self, output: &mut String, metrics: &[LevelMetrics]) -> std::fmt::Result {
        writeln!(output, "Metrics")?;
        writeln!(output, "{}", RULE)?;
        for level in metrics {
            writeln!(
                output,
                "{}: {} node(s), {} arc(s), density {:.3}",
                level.level, level.node_count, level.arc_count, level.density
            )?;
            writeln!(
                output,
                "  CCD {}, ACD {:.2}, RCD {:.2}",
                level.cumulative_dependency, level.average_dependency, level.relative_dependency
            )?;
            for offender in &level.worst_offenders {
                writeln!(
                    output,
                    "  worst: {} (depends on {}, used by {})",
                    offender.name, offender.depends_on, offender.used_by
                )?;
            }
        }
        writeln!(output)
    }

    fn render_missing(
        &self,
        output: &mut String,
        missing: &[MissingDependencyView],
    ) -> std::fmt::Result {
        if missing.is_empty() {
            return Ok(());
        }
        writeln!(output, "Missing dependencies")?;
        writeln!(output, "{}", RULE)?;
        for entry in missing {
            writeln!(output, "{}: {}", entry.unit, entry.missing.join(", "))?;
        }
        Ok(())
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, report)?;
        self.render_view(&mut output, &report.view)?;
        self.render_cycles(&mut output, &report.cycles)?;
        self.render_metrics(&mut output, &report.metrics)?;
        self.render_missing(&mut output, &report.missing_dependencies)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::sample_report;

    #[test]
    fn test_sections() {
        let output = TextFormatter::new().format(&sample_report()).unwrap();
        assert!(output.starts_with("Dependency report\n"));
        assert!(output.contains("Inputs: dir:classes"));
        assert!(output.contains("View: packages"));
        assert!(output.contains("  dir:classes.de.x (2 unit(s))\n    -> dir:classes.de.x.impl\n"));
        assert!(output.contains("Cycle 1 (2 node(s)): dir:classes.de.x, dir:classes.de.x.impl"));
        assert!(output.contains("      A uses B\n"));
        assert!(output.contains("  CCD 4, ACD 2.00, RCD 1.33"));
        assert!(output.contains("de.x.A: org.gone.Thing"));
    }

    #[test]
    fn test_empty_sections() {
        let mut report = sample_report();
        report.cycles.clear();
        report.missing_dependencies.clear();
        let output = TextFormatter::new().format(&report).unwrap();
        assert!(output.contains("No cycles found."));
        assert!(!output.contains("Missing dependencies"));
    }
}
