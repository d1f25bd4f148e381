use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest compiled unit accepted (16 MB).
///
/// The class-file format caps a constant pool at 65535 entries of at most
/// 64 KB each, so anything bigger is not worth reading into memory.
pub const MAX_UNIT_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Rejects symbolic links.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - What is about to happen to the path ("scan", "write"), used in messages
///
/// # Errors
/// Returns an error if the path is a symbolic link or its metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata before {} of {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link; refusing to {} through it.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Checks that a path names a regular file, not a directory, device or link.
///
/// # Errors
/// Returns an error if the path is missing, a symbolic link, or not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} {} is a symbolic link; symbolic links are skipped.",
            file_description,
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Rejects files larger than `max_size` bytes.
///
/// # Errors
/// Returns an error if `file_size` exceeds `max_size`
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes, limit {} bytes).",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_not_symlink_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_not_symlink(temp_dir.path(), "scan").is_ok());
    }

    #[test]
    fn test_validate_not_symlink_nonexistent() {
        let path = PathBuf::from("/nonexistent/classes");
        let err = validate_not_symlink(&path, "scan").unwrap_err();
        assert!(err.to_string().contains("before scan"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_not_symlink_rejects_link() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("classes");
        fs::create_dir(&target).unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = validate_not_symlink(&link, "scan").unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("A.class");
        fs::write(&file_path, [0xCA, 0xFE, 0xBA, 0xBE]).unwrap();

        assert!(validate_regular_file(&file_path, "compiled unit").is_ok());
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "compiled unit");
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_file_size() {
        let path = PathBuf::from("/classes/A.class");
        assert!(validate_file_size(1000, &path, MAX_UNIT_FILE_SIZE).is_ok());
        let err = validate_file_size(MAX_UNIT_FILE_SIZE + 1, &path, MAX_UNIT_FILE_SIZE).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
