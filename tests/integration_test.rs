/// Integration tests for the application layer
mod test_utilities;

use classdeps::prelude::*;
use std::path::PathBuf;
use test_utilities::mocks::*;

fn scan(source: MockUnitSource, paths: &[&str]) -> ScanResponse {
    let use_case = ScanProjectUseCase::new(source, MockProgressReporter::new());
    let request = ScanRequest::new(paths.iter().map(PathBuf::from).collect());
    use_case.execute(request).unwrap()
}

fn analyze(scan: ScanResponse, request: AnalysisRequest) -> (AnalysisResponse, MockProgressReporter) {
    let reporter = MockProgressReporter::new();
    let use_case = AnalyzeProjectUseCase::new(reporter.clone());
    let response = use_case.execute(scan, request).unwrap();
    (response, reporter)
}

/// de.x.A and de.y.B depend on each other; de.y.B also uses de.z.C.
fn layered_project() -> MockUnitSource {
    MockUnitSource::new().with_directory(
        "main",
        &[
            ("de.x.A", &["de.y.B", "java.lang.Object"]),
            ("de.y.B", &["de.x.A", "de.z.C"]),
            ("de.z.C", &["org.slf4j.Logger"]),
        ],
    )
}

/// A suite in de.x runs a test one namespace below; the test uses a helper
/// next to the suite.
fn suite_project(suite_references: &'static [&'static str]) -> MockUnitSource {
    MockUnitSource::new().with_directory(
        "test",
        &[
            ("de.x.AllTests", suite_references),
            ("de.x.Helper", &[]),
            ("de.x.y.FooTest", &["org.junit.Test", "de.x.Helper"]),
        ],
    )
}

#[test]
fn test_scan_links_units_and_records_missing_references() {
    let response = scan(layered_project(), &["main"]);

    assert_eq!(response.statistics.units_found, 3);
    assert_eq!(response.statistics.units_parsed, 3);
    assert_eq!(response.statistics.links, 3);
    assert_eq!(response.statistics.missing_references, 1);
    assert_eq!(response.inputs, vec!["dir:main"]);

    let tree = &response.tree;
    let b = tree.find_by_name("dir:main.de.y.B").unwrap();
    let c = tree.find_by_name("dir:main.de.z.C").unwrap();
    assert!(tree.leaf_successors(b).contains(&c));
    assert_eq!(
        tree.missing_dependencies(c).collect::<Vec<_>>(),
        vec!["org.slf4j.Logger"]
    );
}

#[test]
fn test_class_level_cycle() {
    let (response, _) = analyze(
        scan(layered_project(), &["main"]),
        AnalysisRequest::new(ListModePreset::Classes),
    );

    assert!(response.has_cycles);
    let report = &response.report;
    assert_eq!(report.view.level, "classes");
    assert_eq!(report.view.nodes.len(), 3);
    assert_eq!(report.cycles.len(), 1);

    let mut members = report.cycles[0].nodes.clone();
    members.sort();
    assert_eq!(members, vec!["dir:main.de.x.A", "dir:main.de.y.B"]);
    assert_eq!(report.cycles[0].arcs.len(), 2);
    assert!(report.cycles[0].arcs.iter().all(|arc| !arc.reasons.is_empty()));
}

#[test]
fn test_metrics_cover_every_level() {
    let (response, _) = analyze(
        scan(layered_project(), &["main"]),
        AnalysisRequest::default(),
    );

    let levels: Vec<&str> = response
        .report
        .metrics
        .iter()
        .map(|m| m.level.as_str())
        .collect();
    assert_eq!(levels, vec!["classes", "packages", "archives"]);

    let archives = &response.report.metrics[2];
    assert_eq!(archives.node_count, 1);
    assert_eq!(archives.arc_count, 0);
    assert_eq!(archives.cumulative_dependency, 1);

    let classes = &response.report.metrics[0];
    assert_eq!(classes.node_count, 3);
    // A and B reach all three nodes, C only itself
    assert_eq!(classes.cumulative_dependency, 7);
    assert_eq!(classes.worst_offenders.len(), 1);
}

#[test]
fn test_reachability_limits_the_view() {
    let request = AnalysisRequest::new(ListModePreset::Classes)
        .with_reachability("dir:main.de.z.C", Direction::Backward);
    let (response, reporter) = analyze(scan(layered_project(), &["main"]), request);

    let report = &response.report;
    assert_eq!(report.view.filters, vec!["depending on dir:main.de.z.C"]);
    assert_eq!(report.view.nodes.len(), 3);
    assert!(reporter.errors().is_empty());

    let request = AnalysisRequest::new(ListModePreset::Classes)
        .with_reachability("dir:main.de.z.C", Direction::Forward);
    let (response, _) = analyze(scan(layered_project(), &["main"]), request);
    let names: Vec<&str> = response
        .report
        .view
        .nodes
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["dir:main.de.z.C"]);
    assert!(!response.has_cycles);
}

#[test]
fn test_reachability_from_unknown_node_is_dropped() {
    let request = AnalysisRequest::new(ListModePreset::Classes)
        .with_reachability("dir:main.de.nope", Direction::Forward);
    let (response, reporter) = analyze(scan(layered_project(), &["main"]), request);

    assert!(response.report.view.filters.is_empty());
    assert_eq!(response.report.view.nodes.len(), 3);
    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Node not found: dir:main.de.nope"));
}

#[test]
fn test_package_cycle_closed_by_test_suite_is_excused() {
    let response = scan(
        suite_project(&["org.junit.runner.RunWith", "de.x.y.FooTest"]),
        &["test"],
    );
    let (response, _) = analyze(
        response,
        AnalysisRequest::new(ListModePreset::Packages).with_cycles_only(true),
    );

    let report = &response.report;
    assert!(!response.has_cycles);
    assert!(report.cycles.is_empty());
    assert_eq!(report.view.filters, vec!["cycles only"]);
    assert!(report.view.nodes.is_empty());
}

#[test]
fn test_package_cycle_without_suite_marker_remains() {
    let response = scan(suite_project(&["de.x.y.FooTest"]), &["test"]);
    let (response, _) = analyze(
        response,
        AnalysisRequest::new(ListModePreset::Packages).with_cycles_only(true),
    );

    assert!(response.has_cycles);
    let mut members = response.report.cycles[0].nodes.clone();
    members.sort();
    assert_eq!(members, vec!["dir:test.de.x", "dir:test.de.x.y"]);
    assert_eq!(response.report.view.nodes.len(), 2);
}

#[test]
fn test_inner_unit_cycle_is_excused() {
    let source = MockUnitSource::new().with_directory(
        "main",
        &[
            ("de.x.Outer", &["de.x.Outer$Inner"]),
            ("de.x.Outer$Inner", &["de.x.Outer"]),
        ],
    );
    let (response, _) = analyze(
        scan(source, &["main"]),
        AnalysisRequest::new(ListModePreset::Classes),
    );

    assert!(!response.has_cycles);
    assert_eq!(response.report.view.arc_count, 2);
}

#[test]
fn test_missing_dependencies_are_listed_for_project_units() {
    let response = scan(
        suite_project(&["org.junit.runner.RunWith", "de.x.y.FooTest"]),
        &["test"],
    );
    let (response, _) = analyze(response, AnalysisRequest::default());

    let missing: Vec<(&str, Vec<String>)> = response
        .report
        .missing_dependencies
        .iter()
        .map(|m| (m.unit.as_str(), m.missing.clone()))
        .collect();
    assert_eq!(
        missing,
        vec![
            ("de.x.AllTests", vec!["org.junit.runner.RunWith".to_string()]),
            ("de.x.y.FooTest", vec!["org.junit.Test".to_string()]),
        ]
    );

    let (response, _) = analyze(
        scan(
            suite_project(&["org.junit.runner.RunWith"]),
            &["test"],
        ),
        AnalysisRequest::default().with_focus(vec!["dir:main*".to_string()]),
    );
    assert!(response.report.missing_dependencies.is_empty());
}

#[test]
fn test_first_directory_wins_for_duplicate_units() {
    let source = MockUnitSource::new()
        .with_directory("main", &[("de.x.A", &[]), ("de.x.User", &["de.x.A"])])
        .with_directory("old", &[("de.x.A", &[])]);
    let response = scan(source, &["main", "old"]);

    assert_eq!(response.statistics.duplicate_units, 1);
    let tree = &response.tree;
    let user = tree.find_by_name("dir:main.de.x.User").unwrap();
    let first = tree.find_by_name("dir:main.de.x.A").unwrap();
    assert_eq!(tree.leaf_successors(user), &[first]);
}

#[test]
fn test_archive_input_is_reported_and_skipped() {
    let reporter = MockProgressReporter::new();
    let use_case = ScanProjectUseCase::new(layered_project(), reporter.clone());
    let request = ScanRequest::new(vec![PathBuf::from("main"), PathBuf::from("lib/dep.jar")]);
    let response = use_case.execute(request).unwrap();

    assert_eq!(response.skipped_inputs, vec![PathBuf::from("lib/dep.jar")]);
    assert_eq!(response.statistics.units_parsed, 3);
    assert!(reporter
        .errors()
        .iter()
        .any(|e| e.contains("Archive lib/dep.jar skipped")));
}

#[test]
fn test_report_formats() {
    let (response, _) = analyze(
        scan(layered_project(), &["main"]),
        AnalysisRequest::new(ListModePreset::Packages),
    );

    let text = TextFormatter::new().format(&response.report).unwrap();
    assert!(text.starts_with("Dependency report"));
    assert!(text.contains("dir:main.de.x"));

    let json = JsonFormatter::new().format(&response.report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["view"]["level"], "packages");
    assert_eq!(value["cycles"].as_array().unwrap().len(), 1);
    assert_eq!(value["metadata"]["tool_name"], "classdeps");
}
