/// Formatter adapters for the supported report formats
mod json_formatter;
mod text_formatter;

pub use json_formatter::JsonFormatter;
pub use text_formatter::TextFormatter;

/// Small report with one package cycle, used by the formatter tests.
#[cfg(test)]
pub(crate) fn sample_report() -> crate::application::read_models::AnalysisReport {
    use crate::application::read_models::*;

    AnalysisReport {
        metadata: ReportMetadata {
            tool_name: "classdeps".to_string(),
            tool_version: "0.0.0".to_string(),
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            inputs: vec!["dir:classes".to_string()],
        },
        scan: ScanSummary {
            units_parsed: 3,
            units_skipped: 0,
            duplicate_units: 0,
            links: 2,
            missing_references: 1,
            skipped_inputs: vec![],
        },
        view: ViewSummary {
            level: "packages".to_string(),
            filters: vec![],
            nodes: vec![
                NodeView {
                    name: "dir:classes.de.x".to_string(),
                    units: 2,
                    successors: vec!["dir:classes.de.x.impl".to_string()],
                },
                NodeView {
                    name: "dir:classes.de.x.impl".to_string(),
                    units: 1,
                    successors: vec!["dir:classes.de.x".to_string()],
                },
            ],
            arc_count: 2,
            density: 1.0,
        },
        cycles: vec![CycleView {
            nodes: vec![
                "dir:classes.de.x".to_string(),
                "dir:classes.de.x.impl".to_string(),
            ],
            arcs: vec![ArcView {
                from: "dir:classes.de.x".to_string(),
                to: "dir:classes.de.x.impl".to_string(),
                reasons: vec![ReasonView {
                    from: "A".to_string(),
                    to: "B".to_string(),
                }],
            }],
        }],
        metrics: vec![LevelMetrics {
            level: "packages".to_string(),
            node_count: 2,
            arc_count: 2,
            density: 1.0,
            cumulative_dependency: 4,
            average_dependency: 2.0,
            relative_dependency: 4.0 / 3.0,
            worst_offenders: vec![OffenderView {
                name: "dir:classes.de.x".to_string(),
                depends_on: 2,
                used_by: 2,
            }],
        }],
        missing_dependencies: vec![MissingDependencyView {
            unit: "de.x.A".to_string(),
            missing: vec!["org.gone.Thing".to_string()],
        }],
    }
}
