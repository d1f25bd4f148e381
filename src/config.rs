//! Configuration file support for classdeps.
//!
//! Provides YAML-based configuration through `classdeps.config.yml` files,
//! and the merge of file values with command-line arguments.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::dto::OutputFormat;
use crate::cli::Args;
use crate::dependency_analysis::services::{Direction, DEFAULT_FOCUS};
use crate::dependency_analysis::views::ListModePreset;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "classdeps.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub view: Option<String>,
    /// Unit name patterns added to the ignore list
    pub ignored_classes: Option<Vec<String>>,
    /// Replaces the default source ignore list
    pub ignored_sources: Option<Vec<String>>,
    /// Node name patterns counted as the project's own
    pub focus: Option<Vec<String>>,
    pub fail_on_cycles: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        format
            .parse::<OutputFormat>()
            .map_err(anyhow::Error::msg)
            .context("Invalid config: format")?;
    }
    if let Some(view) = &config.view {
        view.parse::<ListModePreset>()
            .map_err(anyhow::Error::msg)
            .context("Invalid config: view")?;
    }

    let lists = [
        ("ignored_classes", &config.ignored_classes),
        ("ignored_sources", &config.ignored_sources),
        ("focus", &config.focus),
    ];
    for (key, patterns) in lists {
        for (i, pattern) in patterns.iter().flatten().enumerate() {
            if pattern.trim().is_empty() {
                bail!(
                    "Invalid config: {}[{}] must not be empty.\n\n\
                     💡 Hint: Each entry must be a unit or node name pattern (e.g., \"org.junit.*\").",
                    key,
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Settings of one run after merging the config file into the arguments.
/// Command-line values win; ignore lists from both sides are combined.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub view: ListModePreset,
    pub cycles_only: bool,
    pub from: Option<(String, Direction)>,
    pub ignored_units: Vec<String>,
    /// `None` keeps the default source ignore list
    pub ignored_sources: Option<Vec<String>>,
    pub focus: Vec<String>,
    pub fail_on_cycles: bool,
    pub quiet: bool,
}

impl ResolvedOptions {
    pub fn resolve(args: Args, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let format = match (args.format, &config.format) {
            (Some(format), _) => format,
            (None, Some(format)) => format.parse().map_err(anyhow::Error::msg)?,
            (None, None) => OutputFormat::default(),
        };
        let view = match (args.view, &config.view) {
            (Some(view), _) => view,
            (None, Some(view)) => view.parse().map_err(anyhow::Error::msg)?,
            (None, None) => ListModePreset::default(),
        };

        let mut ignored_units = config.ignored_classes.unwrap_or_default();
        for pattern in args.ignore {
            if !ignored_units.contains(&pattern) {
                ignored_units.push(pattern);
            }
        }

        Ok(Self {
            paths: args.paths,
            format,
            output: args.output,
            view,
            cycles_only: args.cycles_only,
            from: args.from.map(|node| (node, args.direction.into())),
            ignored_units,
            ignored_sources: config.ignored_sources,
            focus: config
                .focus
                .unwrap_or_else(|| DEFAULT_FOCUS.iter().map(|p| p.to_string()).collect()),
            fail_on_cycles: args.fail_on_cycles || config.fail_on_cycles.unwrap_or(false),
            quiet: args.quiet,
        })
    }
}
