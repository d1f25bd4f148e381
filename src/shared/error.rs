use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// CI systems can tell a clean run apart from a run that found
/// dependency cycles and from a run that failed outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Analysis finished; no cycles, or cycles were not asked to fail the run
    Success = 0,
    /// Cycles were found and `--fail-on-cycles` was set
    CyclesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable input, bad config, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::CyclesDetected => write!(f, "Cycles Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while reading compiled units and analysing their dependencies.
///
/// The first five variants are the analysis error kinds; the rest cover
/// the file system around them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DepsError {
    /// Bad magic number, unknown constant tag, truncated stream or a dangling pool index.
    #[error("{unit} is not a valid compiled unit: {reason}")]
    Format { unit: String, reason: String },

    #[error("{unit} has format version {found}, newest supported version is {supported}")]
    Version {
        unit: String,
        found: u16,
        supported: u16,
    },

    #[error("Unit name mismatch: expected {expected} but the file declares {found}\n\n💡 Hint: Check that the file sits in the directory matching its package")]
    NameMismatch { expected: String, found: String },

    /// A path slot is already held by a node of the other kind.
    #[error("Cannot create node at '{path}': {reason}")]
    Structural { path: String, reason: String },

    #[error("Node not found: {name}\n\n💡 Hint: Use the fully qualified node name as shown in the report")]
    Lookup { name: String },

    #[error("Invalid input path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a directory containing compiled classes")]
    InvalidInputPath { path: PathBuf, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileRead { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWrite { path: PathBuf, details: String },
}
