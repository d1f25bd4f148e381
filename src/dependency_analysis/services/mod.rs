mod coupling_metrics;
mod cycle_finder;
mod graph_operations;
mod unit_filter;
mod unit_parser;

pub use coupling_metrics::{balanced_tree_ccd, CouplingMetrics, MAX_WORST_OFFENDERS};
pub use cycle_finder::CycleFinder;
pub use graph_operations::{Direction, GraphOperations};
pub use unit_filter::{UnitFilter, DEFAULT_FOCUS, DEFAULT_IGNORED_SOURCES, DEFAULT_IGNORED_UNITS};
pub use unit_parser::{UnitParser, DEFAULT_MAX_MAJOR_VERSION, MAGIC};
