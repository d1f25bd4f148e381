use crate::application::dto::{AnalysisRequest, AnalysisResponse, ScanResponse};
use crate::application::read_models::{
    AnalysisReport, ArcView, CycleView, LevelMetrics, MissingDependencyView, NodeView,
    OffenderView, ReasonView, ReportMetadata, ScanSummary, ViewSummary,
};
use crate::dependency_analysis::domain::{DependencyGraph, ProjectTree};
use crate::dependency_analysis::services::{
    CouplingMetrics, CycleFinder, GraphOperations, UnitFilter,
};
use crate::dependency_analysis::views::{
    CyclesOnly, ListModePreset, ReachabilityFrom, ViewFilter, ViewStack,
};
use crate::ports::outbound::ProgressReporter;
use crate::shared::error::DepsError;
use crate::shared::Result;

/// AnalyzeProjectUseCase - turns a scanned tree into an analysis report
///
/// Computes coupling metrics at every granularity, then sets up the
/// requested view, applies the requested filters and reports the cycles
/// that remain once excused references are discounted.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeProjectUseCase<PR> {
    progress_reporter: PR,
}

impl<PR: ProgressReporter> AnalyzeProjectUseCase<PR> {
    pub fn new(progress_reporter: PR) -> Self {
        Self { progress_reporter }
    }

    /// Executes the analysis
    ///
    /// # Errors
    /// Returns an error if a focus pattern is invalid
    pub fn execute(&self, scan: ScanResponse, request: AnalysisRequest) -> Result<AnalysisResponse> {
        let ScanResponse {
            mut tree,
            statistics,
            skipped_units,
            skipped_inputs,
            inputs,
        } = scan;
        let focus = UnitFilter::new(vec![], vec![], request.focus.clone())?;

        // Step 1: Metrics per granularity
        self.progress_reporter
            .report("📊 Computing coupling metrics...");
        let metrics = ListModePreset::ALL
            .iter()
            .map(|preset| level_metrics(&mut tree, *preset, &focus))
            .collect();

        // Step 2: Requested view and filters
        request.view.apply(&mut tree);
        let graph = DependencyGraph::from_tree(&tree);
        let (shown, filters) = self.apply_filters(&tree, &graph, &request);

        // Step 3: Cycles of what is shown
        let cycles = cycle_views(&tree, &shown)?;
        if !cycles.is_empty() {
            tracing::info!(cycles = cycles.len(), view = %request.view, "Cycles found");
        }

        let report = AnalysisReport {
            metadata: ReportMetadata {
                tool_name: env!("CARGO_PKG_NAME").to_string(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                inputs,
            },
            scan: ScanSummary {
                units_parsed: statistics.units_parsed,
                units_skipped: skipped_units.len(),
                duplicate_units: statistics.duplicate_units,
                links: statistics.links,
                missing_references: statistics.missing_references,
                skipped_inputs: skipped_inputs
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            },
            view: ViewSummary {
                level: request.view.to_string(),
                filters,
                nodes: node_views(&tree, &shown),
                arc_count: shown.arc_count(),
                density: GraphOperations::density(&shown),
            },
            cycles,
            metrics,
            missing_dependencies: missing_dependency_views(&tree, &focus),
        };

        self.progress_reporter.report(&format!(
            "✅ Analysis complete: {} node(s), {} cycle(s)",
            report.view.nodes.len(),
            report.cycles.len()
        ));
        Ok(AnalysisResponse::new(report))
    }

    fn apply_filters(
        &self,
        tree: &ProjectTree,
        graph: &DependencyGraph,
        request: &AnalysisRequest,
    ) -> (DependencyGraph, Vec<String>) {
        let mut stack = ViewStack::new();
        if let Some(reachability) = &request.reachability {
            let filter =
                ReachabilityFrom::new(reachability.node_name.clone(), reachability.direction);
            if filter.is_applicable(tree, graph) {
                stack.push(Box::new(filter));
            } else {
                let error = DepsError::Lookup {
                    name: reachability.node_name.clone(),
                };
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: filter '{}' ignored. {}",
                    filter.name(),
                    error
                ));
            }
        }
        if request.cycles_only {
            stack.push(Box::new(CyclesOnly::new()));
        }

        let shown = stack.apply(tree, graph);
        (shown, stack.active_names())
    }
}

/// Metrics of one granularity. Class and package levels only count nodes
/// in focus; the archive level compares every input.
fn level_metrics(tree: &mut ProjectTree, preset: ListModePreset, focus: &UnitFilter) -> LevelMetrics {
    preset.apply(tree);
    let graph = match preset {
        ListModePreset::Archives => DependencyGraph::from_tree(tree),
        ListModePreset::Classes | ListModePreset::Packages => {
            let in_focus: Vec<_> = tree
                .walk_visible(tree.root())
                .into_iter()
                .filter(|node| tree.has_own_content(*node) && focus.is_in_focus(&tree.full_name(*node)))
                .collect();
            DependencyGraph::from_nodes(tree, in_focus)
        }
    };
    let metrics = CouplingMetrics::compute(&graph);
    let worst_offenders = metrics
        .worst_offenders()
        .into_iter()
        .map(|index| OffenderView {
            name: tree.full_name(graph.node(index).node()),
            depends_on: metrics.depends_on()[index],
            used_by: metrics.used_by()[index],
        })
        .collect();
    LevelMetrics {
        level: preset.to_string(),
        node_count: graph.node_count(),
        arc_count: graph.arc_count(),
        density: GraphOperations::density(&graph),
        cumulative_dependency: metrics.cumulative_dependency(),
        average_dependency: metrics.average_dependency(),
        relative_dependency: metrics.relative_dependency(),
        worst_offenders,
    }
}

fn node_views(tree: &ProjectTree, graph: &DependencyGraph) -> Vec<NodeView> {
    graph
        .nodes()
        .iter()
        .map(|entry| NodeView {
            name: tree.full_name(entry.node()),
            units: entry.unit_count(),
            successors: graph
                .successors(entry.index())
                .map(|to| tree.full_name(graph.node(to).node()))
                .collect(),
        })
        .collect()
}

/// Cycles remaining after excused arcs are dropped.
fn cycle_views(tree: &ProjectTree, graph: &DependencyGraph) -> Result<Vec<CycleView>> {
    let cycles = CyclesOnly::new().apply(tree, graph)?;
    let finder = CycleFinder::new(&cycles);
    let views = finder
        .cycles()
        .into_iter()
        .map(|members| {
            let mut arcs = Vec::new();
            for &from in members {
                for to in cycles.successors(from) {
                    if finder.component_of(to) != finder.component_of(from) {
                        continue;
                    }
                    let (from_node, to_node) = (cycles.node(from).node(), cycles.node(to).node());
                    arcs.push(ArcView {
                        from: tree.full_name(from_node),
                        to: tree.full_name(to_node),
                        reasons: tree
                            .explain_dependency(from_node, to_node)
                            .into_iter()
                            .map(|(from, to)| ReasonView { from, to })
                            .collect(),
                    });
                }
            }
            CycleView {
                nodes: members
                    .iter()
                    .map(|index| tree.full_name(cycles.node(*index).node()))
                    .collect(),
                arcs,
            }
        })
        .collect();
    Ok(views)
}

fn missing_dependency_views(tree: &ProjectTree, focus: &UnitFilter) -> Vec<MissingDependencyView> {
    let mut views: Vec<MissingDependencyView> = tree
        .walk_all(tree.root())
        .into_iter()
        .filter(|node| tree.is_leaf(*node) && focus.is_in_focus(&tree.full_name(*node)))
        .filter_map(|leaf| {
            let missing: Vec<String> = tree
                .missing_dependencies(leaf)
                .map(str::to_string)
                .collect();
            (!missing.is_empty()).then(|| MissingDependencyView {
                unit: tree.display_name(leaf),
                missing,
            })
        })
        .collect();
    views.sort_by(|a, b| a.unit.cmp(&b.unit));
    views
}

#[cfg(test)]
mod tests;
