use crate::application::dto::{ScanRequest, ScanResponse, ScanStatistics, SkippedUnit};
use crate::dependency_analysis::domain::{NodeId, ParsedUnit, ProjectTree, SEPARATOR};
use crate::dependency_analysis::services::{UnitFilter, UnitParser};
use crate::ports::outbound::{ProgressReporter, UnitInput, UnitSource};
use crate::shared::error::DepsError;
use crate::shared::Result;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// File extensions of archives. Their content is not expanded.
const ARCHIVE_EXTENSIONS: &[&str] = &["jar", "war", "ear", "zip"];

/// A parsed unit waiting to be placed in the tree.
struct ParsedInput {
    origin: PathBuf,
    source_name: String,
    unit: ParsedUnit,
}

/// Units collected from all inputs, before parsing.
#[derive(Default)]
struct CollectedInputs {
    units: Vec<UnitInput>,
    inputs: Vec<String>,
    skipped_inputs: Vec<PathBuf>,
}

/// ScanProjectUseCase - builds the project tree from compiled units
///
/// Runs in two phases. All units are parsed first, in parallel since they
/// share nothing. Then a single thread places them in the tree and links
/// references by name. When a unit name occurs in several inputs, the
/// first input in request order is the one others link to.
///
/// # Type Parameters
/// * `S` - UnitSource implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanProjectUseCase<S, PR> {
    source: S,
    progress_reporter: PR,
    parser: UnitParser,
}

impl<S, PR> ScanProjectUseCase<S, PR>
where
    S: UnitSource,
    PR: ProgressReporter,
{
    pub fn new(source: S, progress_reporter: PR) -> Self {
        Self {
            source,
            progress_reporter,
            parser: UnitParser::new(),
        }
    }

    /// Replaces the parser, e.g. to accept newer format versions.
    pub fn with_parser(mut self, parser: UnitParser) -> Self {
        self.parser = parser;
        self
    }

    /// Executes the scan
    ///
    /// # Errors
    /// Returns an error if an ignore pattern is invalid, an input path cannot
    /// be read by any source, or a source fails to walk its location.
    /// Units that fail to parse are skipped and listed in the response.
    pub fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        let filter = UnitFilter::new(
            request.ignored_units.clone(),
            request.ignored_sources.clone(),
            vec![],
        )?;

        // Step 1: Collect unit bytes from all inputs
        let collected = self.collect_units(&request.paths, &filter)?;
        let mut statistics = ScanStatistics {
            units_found: collected.units.len(),
            ..ScanStatistics::default()
        };

        // Step 2: Parse every unit independently
        let (parsed, mut skipped_units) = self.parse_units(collected.units);

        // Step 3: Place the units and link them by name
        let tree = self.build_tree(parsed, &filter, &mut statistics, &mut skipped_units)?;

        for pattern in filter.unmatched_ignore_patterns() {
            tracing::debug!(pattern = %pattern, "Ignore pattern matched nothing");
        }

        tracing::info!(
            parsed = statistics.units_parsed,
            skipped = skipped_units.len(),
            links = statistics.links,
            missing = statistics.missing_references,
            "Scan finished"
        );
        self.progress_reporter.report(&format!(
            "✅ Parsed {} unit(s) with {} link(s); {} reference(s) unresolved",
            statistics.units_parsed, statistics.links, statistics.missing_references
        ));

        Ok(ScanResponse {
            tree,
            statistics,
            skipped_units,
            skipped_inputs: collected.skipped_inputs,
            inputs: collected.inputs,
        })
    }

    fn collect_units(&self, paths: &[PathBuf], filter: &UnitFilter) -> Result<CollectedInputs> {
        self.progress_reporter
            .report(&format!("🔍 Scanning {} input(s)...", paths.len()));

        let mut collected = CollectedInputs::default();
        for (position, path) in paths.iter().enumerate() {
            let label = path.display().to_string();
            self.progress_reporter
                .report_progress(position + 1, paths.len(), Some(&label));

            if filter.is_ignored_source(&label) {
                tracing::info!(input = %label, "Input matches an ignored source pattern");
                continue;
            }

            if !self.source.supports(path) {
                if is_archive(path) {
                    tracing::warn!(input = %label, "Archive content is not expanded, input skipped");
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Archive {} skipped (archive content is not analysed)",
                        label
                    ));
                    collected.skipped_inputs.push(path.clone());
                    continue;
                }
                return Err(unsupported_input(path).into());
            }

            let loaded = self.source.load(path)?;
            let source_name = unique_source_name(&collected.inputs, &loaded.source_name);
            if source_name != loaded.source_name {
                tracing::info!(
                    input = %label,
                    taken = %loaded.source_name,
                    source = %source_name,
                    "Source name already used by an earlier input, renamed"
                );
            }
            tracing::debug!(
                input = %label,
                source = %source_name,
                units = loaded.units.len(),
                "Loaded input"
            );
            collected.units.extend(
                loaded
                    .units
                    .into_iter()
                    .filter(|unit| {
                        !filter.is_ignored_source(&unit.origin.display().to_string())
                            && !filter.is_ignored_unit(&unit.expected_name)
                    })
                    .map(|mut unit| {
                        unit.source_name = source_name.clone();
                        unit
                    }),
            );
            collected.inputs.push(source_name);
        }
        Ok(collected)
    }

    fn parse_units(&self, units: Vec<UnitInput>) -> (Vec<ParsedInput>, Vec<SkippedUnit>) {
        let parser = &self.parser;
        let results: Vec<(UnitInput, std::result::Result<ParsedUnit, DepsError>)> = units
            .into_par_iter()
            .map(|input| {
                let result = parser.parse_bytes(&input.bytes, &input.expected_name);
                (input, result)
            })
            .collect();

        let mut parsed = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for (input, result) in results {
            match result {
                Ok(unit) => {
                    tracing::debug!(
                        unit = %unit.name(),
                        dependencies = unit.dependencies().len(),
                        "Parsed unit"
                    );
                    parsed.push(ParsedInput {
                        origin: input.origin,
                        source_name: input.source_name,
                        unit,
                    });
                }
                Err(e) => {
                    tracing::warn!(file = %input.origin.display(), error = %e, "Skipping unit");
                    skipped.push(SkippedUnit {
                        origin: input.origin,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !skipped.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} unit(s) could not be parsed and were skipped",
                skipped.len()
            ));
        }
        (parsed, skipped)
    }

    fn build_tree(
        &self,
        parsed: Vec<ParsedInput>,
        filter: &UnitFilter,
        statistics: &mut ScanStatistics,
        skipped_units: &mut Vec<SkippedUnit>,
    ) -> Result<ProjectTree> {
        let mut tree = ProjectTree::new();
        let root = tree.root();
        let mut by_name: HashMap<String, NodeId> = HashMap::new();
        let mut placed: Vec<(NodeId, BTreeSet<String>)> = Vec::with_capacity(parsed.len());

        for input in parsed {
            let (name, dependencies) = input.unit.into_parts();
            let path = format!("{}{}{}", input.source_name, SEPARATOR, name);
            if tree.find_by_name(&path).is_some_and(|existing| tree.is_leaf(existing)) {
                tracing::debug!(unit = %name, file = %input.origin.display(), "Unit already placed from the same input");
                statistics.duplicate_units += 1;
                continue;
            }
            let leaf = match tree.create_leaf(root, &path) {
                Ok(leaf) => leaf,
                Err(e) => {
                    tracing::warn!(file = %input.origin.display(), error = %e, "Skipping unit");
                    skipped_units.push(SkippedUnit {
                        origin: input.origin,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if by_name.contains_key(&name) {
                tracing::debug!(unit = %name, source = %input.source_name, "Unit shadowed by an earlier input");
                statistics.duplicate_units += 1;
            } else {
                by_name.insert(name, leaf);
            }
            placed.push((leaf, dependencies));
        }
        statistics.units_parsed = placed.len();

        for (leaf, dependencies) in &placed {
            for dependency in dependencies {
                if filter.is_ignored_unit(dependency) {
                    continue;
                }
                match by_name.get(dependency) {
                    Some(&target) => {
                        tree.add_successor(*leaf, target)?;
                        statistics.links += 1;
                    }
                    None => {
                        tree.add_missing_dependency(*leaf, dependency)?;
                        statistics.missing_references += 1;
                    }
                }
            }
        }
        Ok(tree)
    }
}

/// Top-level container name for an input, suffixed with `_2`, `_3`, ...
/// when an earlier input already took it.
fn unique_source_name(taken: &[String], name: &str) -> String {
    if !taken.iter().any(|t| t == name) {
        return name.to_string();
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{}_{}", name, suffix);
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ARCHIVE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn unsupported_input(path: &Path) -> DepsError {
    let reason = if path.exists() {
        "Not a directory of compiled classes"
    } else {
        "Path does not exist"
    };
    DepsError::InvalidInputPath {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
