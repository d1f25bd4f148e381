use crate::dependency_analysis::services::{DEFAULT_IGNORED_SOURCES, DEFAULT_IGNORED_UNITS};
use std::path::PathBuf;

/// ScanRequest - what to read and what to leave out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Class directories (or archives) to scan, in classpath order
    pub paths: Vec<PathBuf>,
    /// Unit name patterns never linked, e.g. `java.*`
    pub ignored_units: Vec<String>,
    /// Input location patterns skipped entirely
    pub ignored_sources: Vec<String>,
}

impl ScanRequest {
    /// Request with the default ignore lists.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            ignored_units: to_strings(DEFAULT_IGNORED_UNITS),
            ignored_sources: to_strings(DEFAULT_IGNORED_SOURCES),
        }
    }

    /// Adds unit patterns to the ignore list.
    pub fn with_ignored_units(mut self, patterns: impl IntoIterator<Item = String>) -> Self {
        for pattern in patterns {
            if !self.ignored_units.contains(&pattern) {
                self.ignored_units.push(pattern);
            }
        }
        self
    }

    /// Replaces the source ignore list.
    pub fn with_ignored_sources(mut self, patterns: Vec<String>) -> Self {
        self.ignored_sources = patterns;
        self
    }
}

fn to_strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}
