use super::super::class_bytes::class_file;
use classdeps::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock UnitSource serving in-memory class directories
#[derive(Default)]
pub struct MockUnitSource {
    sources: HashMap<PathBuf, LoadedSource>,
}

impl MockUnitSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory named `dir` holding one unit per `(name, references)`.
    pub fn with_directory(mut self, dir: &str, units: &[(&str, &[&str])]) -> Self {
        let source_name = format!("dir:{}", dir);
        let units = units
            .iter()
            .map(|(name, references)| UnitInput {
                origin: PathBuf::from(format!("/work/{}/{}.class", dir, name.replace('.', "/"))),
                source_name: source_name.clone(),
                expected_name: name.to_string(),
                bytes: class_file(name, references),
            })
            .collect();
        self.sources.insert(
            PathBuf::from(dir),
            LoadedSource {
                source_name,
                units,
            },
        );
        self
    }
}

impl UnitSource for MockUnitSource {
    fn supports(&self, path: &Path) -> bool {
        self.sources.contains_key(path)
    }

    fn load(&self, path: &Path) -> Result<LoadedSource> {
        self.sources
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown input {}", path.display()))
    }
}
