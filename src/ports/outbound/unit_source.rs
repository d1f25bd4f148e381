use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Bytes of one compiled unit together with where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitInput {
    /// File the bytes were read from
    pub origin: PathBuf,
    /// Name of the top-level container, e.g. `dir:classes`
    pub source_name: String,
    /// Dotted unit name implied by the file's position, e.g. `de.x.Foo$Bar`
    pub expected_name: String,
    pub bytes: Vec<u8>,
}

/// Everything one input location yielded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSource {
    pub source_name: String,
    pub units: Vec<UnitInput>,
}

/// UnitSource port for reading compiled units from an input location
///
/// Each implementation handles one kind of location (a class directory, an
/// archive, ...). Ingestion asks every source whether it supports a path and
/// hands the path to the first one that does.
pub trait UnitSource {
    /// True if this source knows how to read the location.
    fn supports(&self, path: &Path) -> bool;

    /// Reads all compiled units below the location.
    ///
    /// # Errors
    /// Returns an error if the location cannot be walked. Single unreadable
    /// files are logged and left out instead.
    fn load(&self, path: &Path) -> Result<LoadedSource>;
}
