use crate::dependency_analysis::domain::{ListMode, NodeId, ProjectTree};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of top-level containers holding the content of an archive.
pub const ARCHIVE_PREFIX: &str = "jar:";

/// Prefix of top-level containers holding a class directory.
pub const DIRECTORY_PREFIX: &str = "dir:";

/// Granularity presets that set the list mode of every container at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListModePreset {
    /// Single units; archives stay closed.
    #[default]
    Classes,
    /// Packages with their units merged; archives stay closed.
    Packages,
    /// One node per input.
    Archives,
}

impl ListModePreset {
    pub const ALL: [ListModePreset; 3] = [
        ListModePreset::Classes,
        ListModePreset::Packages,
        ListModePreset::Archives,
    ];

    fn mode_for(self, tree: &ProjectTree, container: NodeId) -> ListMode {
        let top_level = tree.parent(container) == Some(tree.root());
        let archive = top_level && tree.simple_name(container).starts_with(ARCHIVE_PREFIX);
        match self {
            _ if archive => ListMode::Collapsed,
            ListModePreset::Classes => ListMode::Expanded,
            ListModePreset::Packages => ListMode::LeafsCollapsed,
            ListModePreset::Archives if top_level => ListMode::Collapsed,
            ListModePreset::Archives => ListMode::Expanded,
        }
    }

    /// Sets the list mode of every container. Returns how many changed.
    pub fn apply(self, tree: &mut ProjectTree) -> usize {
        let containers: Vec<NodeId> = tree
            .walk_all(tree.root())
            .into_iter()
            .filter(|node| !tree.is_leaf(*node))
            .collect();
        let mut changed = 0;
        for container in containers {
            let mode = self.mode_for(tree, container);
            if tree.set_list_mode(container, mode) {
                changed += 1;
            }
        }
        changed
    }
}

impl fmt::Display for ListModePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListModePreset::Classes => write!(f, "classes"),
            ListModePreset::Packages => write!(f, "packages"),
            ListModePreset::Archives => write!(f, "archives"),
        }
    }
}

impl std::str::FromStr for ListModePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classes" | "class" => Ok(ListModePreset::Classes),
            "packages" | "package" => Ok(ListModePreset::Packages),
            "archives" | "archive" => Ok(ListModePreset::Archives),
            _ => Err(format!(
                "Invalid view: {}. Please specify 'classes', 'packages' or 'archives'",
                s
            )),
        }
    }
}
