use crate::dependency_analysis::views::DIRECTORY_PREFIX;
use crate::ports::outbound::{LoadedSource, UnitInput, UnitSource};
use crate::shared::error::DepsError;
use crate::shared::security::{
    validate_file_size, validate_not_symlink, validate_regular_file, MAX_UNIT_FILE_SIZE,
};
use crate::shared::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Extension of compiled unit files
const CLASS_EXTENSION: &str = "class";

/// Module descriptors are not classes and take no part in the analysis.
const MODULE_DESCRIPTOR: &str = "module-info";

/// ClassDirectorySource adapter reading compiled units from a directory tree
///
/// The unit name of each file follows from its path below the directory,
/// e.g. `de/x/Foo$Bar.class` becomes `de.x.Foo$Bar`. Symbolic links are
/// not followed.
pub struct ClassDirectorySource;

impl ClassDirectorySource {
    pub fn new() -> Self {
        Self
    }

    /// Container name for a directory: `dir:` plus its last path component
    /// with dots replaced, so the name stays one tree segment.
    pub fn source_name(path: &Path) -> String {
        let directory = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .or_else(|| {
                path.canonicalize()
                    .ok()
                    .and_then(|p| p.file_name().map(|name| name.to_string_lossy().into_owned()))
            })
            .unwrap_or_else(|| "classes".to_string());
        format!("{}{}", DIRECTORY_PREFIX, directory.replace('.', "_"))
    }

    /// Dotted unit name of `file` relative to `root`; `None` for files
    /// outside `root`.
    fn unit_name(root: &Path, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(root).ok()?.with_extension("");
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        (!segments.is_empty()).then(|| segments.join("."))
    }

    fn read_unit_file(file: &Path) -> Result<Vec<u8>> {
        validate_regular_file(file, "Compiled unit")?;
        let metadata = fs::metadata(file).map_err(|e| DepsError::FileRead {
            path: file.to_path_buf(),
            details: e.to_string(),
        })?;
        validate_file_size(metadata.len(), file, MAX_UNIT_FILE_SIZE)?;
        fs::read(file).map_err(|e| {
            DepsError::FileRead {
                path: file.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for ClassDirectorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitSource for ClassDirectorySource {
    fn supports(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok_and(|metadata| metadata.is_dir())
    }

    fn load(&self, path: &Path) -> Result<LoadedSource> {
        validate_not_symlink(path, "scan")?;
        if !path.is_dir() {
            return Err(DepsError::InvalidInputPath {
                path: path.to_path_buf(),
                reason: "Not a directory".to_string(),
            }
            .into());
        }

        let source_name = Self::source_name(path);
        let mut units = Vec::new();
        for entry in WalkDir::new(path).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Cannot read directory entry");
                    continue;
                }
            };
            let file = entry.path();
            if !entry.file_type().is_file()
                || file.extension().is_none_or(|ext| ext != CLASS_EXTENSION)
                || file.file_stem().is_some_and(|stem| stem == MODULE_DESCRIPTOR)
            {
                continue;
            }
            let Some(expected_name) = Self::unit_name(path, file) else {
                continue;
            };
            match Self::read_unit_file(file) {
                Ok(bytes) => units.push(UnitInput {
                    origin: file.to_path_buf(),
                    source_name: source_name.clone(),
                    expected_name,
                    bytes,
                }),
                Err(e) => tracing::warn!(file = %file.display(), error = %e, "Skipping unreadable unit file"),
            }
        }

        Ok(LoadedSource { source_name, units })
    }
}
