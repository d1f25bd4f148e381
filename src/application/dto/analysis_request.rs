use crate::dependency_analysis::services::{Direction, DEFAULT_FOCUS};
use crate::dependency_analysis::views::ListModePreset;

/// Restricts the view to what one node reaches or is reached by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    pub node_name: String,
    pub direction: Direction,
}

/// AnalysisRequest - how to look at a scanned project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Granularity of the main view
    pub view: ListModePreset,
    /// Show only nodes taking part in cycles
    pub cycles_only: bool,
    pub reachability: Option<Reachability>,
    /// Node name patterns counted as the project's own
    pub focus: Vec<String>,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            view: ListModePreset::default(),
            cycles_only: false,
            reachability: None,
            focus: DEFAULT_FOCUS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl AnalysisRequest {
    pub fn new(view: ListModePreset) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    pub fn with_cycles_only(mut self, cycles_only: bool) -> Self {
        self.cycles_only = cycles_only;
        self
    }

    pub fn with_reachability(mut self, node_name: impl Into<String>, direction: Direction) -> Self {
        self.reachability = Some(Reachability {
            node_name: node_name.into(),
            direction,
        });
        self
    }

    pub fn with_focus(mut self, focus: Vec<String>) -> Self {
        self.focus = focus;
        self
    }
}
