use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::dependency_analysis::services::Direction;
use crate::dependency_analysis::views::ListModePreset;

/// Which way `--from` follows dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TraversalDirection {
    /// Everything the node requires
    #[default]
    Successors,
    /// Everything depending on the node
    Predecessors,
}

impl From<TraversalDirection> for Direction {
    fn from(direction: TraversalDirection) -> Self {
        match direction {
            TraversalDirection::Successors => Direction::Forward,
            TraversalDirection::Predecessors => Direction::Backward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Analyse the dependency structure of compiled Java classes
#[derive(Parser, Debug)]
#[command(name = "classdeps")]
#[command(version)]
#[command(
    about = "Find dependency cycles and coupling hot spots in compiled Java classes",
    long_about = None
)]
pub struct Args {
    /// Class directories to scan, in classpath order
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format: text or json [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Granularity of the view: classes, packages or archives [default: classes]
    #[arg(long)]
    pub view: Option<ListModePreset>,

    /// Show only nodes taking part in dependency cycles
    #[arg(long)]
    pub cycles_only: bool,

    /// Restrict the view to what this node reaches (or what reaches it)
    #[arg(long, value_name = "NODE")]
    pub from: Option<String>,

    /// Direction followed by --from
    #[arg(long, value_enum, default_value_t = TraversalDirection::Successors, requires = "from")]
    pub direction: TraversalDirection,

    /// Ignore units matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -i "org.junit.*" -i "*Test"
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Path to a config file (defaults to ./classdeps.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with code 1 when the view contains dependency cycles
    #[arg(long)]
    pub fail_on_cycles: bool,

    /// Log level; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("classdeps").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_minimal_arguments() {
        let args = parse(&["build/classes"]);
        assert_eq!(args.paths, vec![PathBuf::from("build/classes")]);
        assert!(args.format.is_none());
        assert!(args.view.is_none());
        assert!(!args.cycles_only);
        assert!(!args.fail_on_cycles);
        assert_eq!(args.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "main",
            "test",
            "--format",
            "JSON",
            "-o",
            "report.json",
            "--view",
            "packages",
            "--cycles-only",
            "--from",
            "dir:main.de.x",
            "--direction",
            "predecessors",
            "-i",
            "org.junit.*",
            "--ignore",
            "*Test",
            "--fail-on-cycles",
            "--log-level",
            "debug",
            "-q",
        ]);
        assert_eq!(args.paths.len(), 2);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.output, Some(PathBuf::from("report.json")));
        assert_eq!(args.view, Some(ListModePreset::Packages));
        assert!(args.cycles_only);
        assert_eq!(args.from.as_deref(), Some("dir:main.de.x"));
        assert_eq!(Direction::from(args.direction), Direction::Backward);
        assert_eq!(args.ignore, vec!["org.junit.*", "*Test"]);
        assert!(args.fail_on_cycles);
        assert_eq!(args.log_level.as_filter(), "debug");
        assert!(args.quiet);
    }

    #[test]
    fn test_paths_are_required() {
        assert!(Args::try_parse_from(["classdeps"]).is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Args::try_parse_from(["classdeps", "x", "--format", "xml"]).is_err());
        assert!(Args::try_parse_from(["classdeps", "x", "--view", "modules"]).is_err());
        assert!(Args::try_parse_from(["classdeps", "x", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_direction_requires_from() {
        assert!(Args::try_parse_from(["classdeps", "x", "--direction", "predecessors"]).is_err());
    }

    #[test]
    fn test_default_direction_follows_successors() {
        let args = parse(&["x", "--from", "dir:main.de.x.A"]);
        assert_eq!(Direction::from(args.direction), Direction::Forward);
    }
}
