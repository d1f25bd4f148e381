use super::*;
use crate::application::dto::{ScanStatistics, SkippedUnit};
use crate::dependency_analysis::services::Direction;
use std::cell::RefCell;
use std::path::PathBuf;

#[derive(Default)]
struct RecordingReporter {
    errors: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
    fn report_completion(&self, _message: &str) {}
}

/// dir:main with two packages depending on each other and one library jar.
fn scanned_project() -> ScanResponse {
    let mut tree = ProjectTree::new();
    let root = tree.root();
    let a = tree.create_leaf(root, "dir:main.de.x.A").unwrap();
    let b = tree.create_leaf(root, "dir:main.de.x.impl.B").unwrap();
    let c = tree.create_leaf(root, "dir:main.de.x.impl.C").unwrap();
    let lib = tree.create_leaf(root, "jar:lib_jar.org.y.L").unwrap();
    tree.add_successor(a, b).unwrap();
    tree.add_successor(b, a).unwrap();
    tree.add_successor(c, lib).unwrap();
    tree.add_missing_dependency(c, "org.z.Gone").unwrap();
    tree.add_missing_dependency(lib, "org.z.AlsoGone").unwrap();

    ScanResponse {
        tree,
        statistics: ScanStatistics {
            units_found: 5,
            units_parsed: 4,
            duplicate_units: 0,
            links: 3,
            missing_references: 2,
        },
        skipped_units: vec![SkippedUnit {
            origin: PathBuf::from("/work/main/de/x/Bad.class"),
            reason: "broken".to_string(),
        }],
        skipped_inputs: vec![],
        inputs: vec!["dir:main".to_string(), "jar:lib_jar".to_string()],
    }
}

fn analyze(request: AnalysisRequest) -> (AnalysisResponse, Vec<String>) {
    let use_case = AnalyzeProjectUseCase::new(RecordingReporter::default());
    let response = use_case.execute(scanned_project(), request).unwrap();
    let errors = use_case.progress_reporter.errors.borrow().clone();
    (response, errors)
}

#[test]
fn test_class_level_report() {
    let (response, errors) = analyze(AnalysisRequest::new(ListModePreset::Classes));
    assert!(errors.is_empty());
    assert!(response.has_cycles);

    let report = &response.report;
    assert_eq!(report.view.level, "classes");
    assert_eq!(report.view.nodes.len(), 4);
    assert_eq!(report.scan.units_skipped, 1);
    assert_eq!(report.metadata.inputs, vec!["dir:main", "jar:lib_jar"]);

    assert_eq!(report.cycles.len(), 1);
    let mut members = report.cycles[0].nodes.clone();
    members.sort();
    assert_eq!(members, vec!["dir:main.de.x.A", "dir:main.de.x.impl.B"]);
    assert_eq!(report.cycles[0].arcs.len(), 2);
    assert!(report.cycles[0].arcs.iter().all(|arc| arc.reasons.len() == 1));
}

#[test]
fn test_package_level_cycle_reasons() {
    let (response, _) = analyze(AnalysisRequest::new(ListModePreset::Packages));
    let cycle = &response.report.cycles[0];
    let arc = cycle
        .arcs
        .iter()
        .find(|arc| arc.from == "dir:main.de.x")
        .unwrap();
    assert_eq!(arc.to, "dir:main.de.x.impl");
    assert_eq!(
        arc.reasons,
        vec![ReasonView {
            from: "A".to_string(),
            to: "B".to_string()
        }]
    );
}

#[test]
fn test_archive_level_has_no_cycles() {
    let (response, _) = analyze(AnalysisRequest::new(ListModePreset::Archives));
    assert!(!response.has_cycles);
    let names: Vec<&str> = response
        .report
        .view
        .nodes
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["dir:main", "jar:lib_jar"]);
    assert_eq!(response.report.view.nodes[0].successors, vec!["jar:lib_jar"]);
    assert_eq!(response.report.view.nodes[0].units, 3);
}

#[test]
fn test_metrics_for_every_level() {
    let (response, _) = analyze(AnalysisRequest::default());
    let levels: Vec<&str> = response
        .report
        .metrics
        .iter()
        .map(|m| m.level.as_str())
        .collect();
    assert_eq!(levels, vec!["classes", "packages", "archives"]);

    let archives = &response.report.metrics[2];
    assert_eq!(archives.node_count, 2);
    assert_eq!(archives.arc_count, 1);
    assert_eq!(archives.cumulative_dependency, 3);
    assert_eq!(archives.worst_offenders.len(), 1);
}

#[test]
fn test_class_and_package_metrics_only_count_focus() {
    let (response, _) = analyze(AnalysisRequest::default());
    let classes = &response.report.metrics[0];
    assert_eq!(classes.node_count, 3);
    assert_eq!(classes.arc_count, 2);
    // A and B reach each other, C only itself
    assert_eq!(classes.cumulative_dependency, 5);
    assert!(classes
        .worst_offenders
        .iter()
        .all(|offender| offender.name.starts_with("dir:main")));

    let packages = &response.report.metrics[1];
    assert_eq!(packages.node_count, 2);
    assert_eq!(packages.arc_count, 2);

    let (everything, _) = analyze(AnalysisRequest::default().with_focus(vec![]));
    assert_eq!(everything.report.metrics[0].node_count, 4);
    assert_eq!(everything.report.metrics[0].arc_count, 3);
    assert_eq!(everything.report.metrics[2].node_count, 2);
}

#[test]
fn test_missing_dependencies_only_in_focus() {
    let (response, _) = analyze(AnalysisRequest::default());
    assert_eq!(
        response.report.missing_dependencies,
        vec![MissingDependencyView {
            unit: "de.x.impl.C".to_string(),
            missing: vec!["org.z.Gone".to_string()],
        }]
    );

    let (everything, _) = analyze(AnalysisRequest::default().with_focus(vec![]));
    assert_eq!(everything.report.missing_dependencies.len(), 2);
}

#[test]
fn test_reachability_and_cycles_only() {
    let request = AnalysisRequest::new(ListModePreset::Classes)
        .with_reachability("dir:main.de.x.impl.C", Direction::Forward);
    let (response, _) = analyze(request);
    let names: Vec<&str> = response
        .report
        .view
        .nodes
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["dir:main.de.x.impl.C", "jar:lib_jar"]);
    assert_eq!(response.report.view.filters, vec!["required by dir:main.de.x.impl.C"]);

    let (cycles_only, _) =
        analyze(AnalysisRequest::new(ListModePreset::Classes).with_cycles_only(true));
    assert_eq!(cycles_only.report.view.nodes.len(), 2);
    assert_eq!(cycles_only.report.view.filters, vec!["cycles only"]);
}

#[test]
fn test_unknown_reachability_node_is_reported_not_fatal() {
    let request = AnalysisRequest::new(ListModePreset::Classes)
        .with_reachability("dir:main.de.nothing", Direction::Backward);
    let (response, errors) = analyze(request);
    assert_eq!(response.report.view.nodes.len(), 4);
    assert!(response.report.view.filters.is_empty());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Node not found: dir:main.de.nothing"));
}
