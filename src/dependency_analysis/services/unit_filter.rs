use crate::shared::Result;
use std::sync::atomic::{AtomicBool, Ordering};

/// Maximum number of patterns per list
const MAX_PATTERNS: usize = 64;

/// Maximum length of a single pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// Units of the platform library; references to them are not worth tracking.
pub const DEFAULT_IGNORED_UNITS: &[&str] = &["java.*"];

/// Inputs belonging to a runtime installation or to build resources.
pub const DEFAULT_IGNORED_SOURCES: &[&str] = &["*/jre/lib/*", "*/build/resources/*"];

/// Only units loaded from class directories count as the project's own.
pub const DEFAULT_FOCUS: &[&str] = &["dir:*"];

/// UnitFilter - decides which units, inputs and nodes take part in an analysis
///
/// All three lists hold wildcard patterns where `*` matches any run of
/// characters. Patterns are case-sensitive and validated against a
/// character whitelist.
#[derive(Debug)]
pub struct UnitFilter {
    ignored_units: Vec<WildcardPattern>,
    ignored_sources: Vec<WildcardPattern>,
    focus: Vec<WildcardPattern>,
}

impl Default for UnitFilter {
    fn default() -> Self {
        let compile_all = |patterns: &[&str]| -> Vec<WildcardPattern> {
            patterns
                .iter()
                .map(|p| WildcardPattern::compile(p.to_string()))
                .collect()
        };
        Self {
            ignored_units: compile_all(DEFAULT_IGNORED_UNITS),
            ignored_sources: compile_all(DEFAULT_IGNORED_SOURCES),
            focus: compile_all(DEFAULT_FOCUS),
        }
    }
}

impl UnitFilter {
    /// Creates a filter from raw pattern strings
    ///
    /// # Arguments
    /// * `ignored_units` - Dotted unit names never linked, e.g. "java.*"
    /// * `ignored_sources` - Input locations skipped entirely, e.g. "*/jre/lib/*"
    /// * `focus` - Node names counted as the project's own, e.g. "dir:*"
    ///
    /// # Errors
    /// - Too many patterns in one list (> MAX_PATTERNS)
    /// - Invalid pattern format (length, characters, wildcards only)
    pub fn new(
        ignored_units: Vec<String>,
        ignored_sources: Vec<String>,
        focus: Vec<String>,
    ) -> Result<Self> {
        Ok(Self {
            ignored_units: compile_list("ignored unit", ignored_units)?,
            ignored_sources: compile_list("ignored source", ignored_sources)?,
            focus: compile_list("focus", focus)?,
        })
    }

    /// True if references to this unit should not be tracked.
    pub fn is_ignored_unit(&self, unit_name: &str) -> bool {
        any_match(&self.ignored_units, unit_name)
    }

    /// True if an input location should be skipped. Path separators are
    /// normalized to `/` before matching.
    pub fn is_ignored_source(&self, location: &str) -> bool {
        any_match(&self.ignored_sources, &location.replace('\\', "/"))
    }

    /// True if a node belongs to the analysed project. Without focus
    /// patterns every node is in focus.
    pub fn is_in_focus(&self, node_name: &str) -> bool {
        self.focus.is_empty() || any_match(&self.focus, node_name)
    }

    /// Ignore patterns (units and sources) that did not match anything so far.
    pub fn unmatched_ignore_patterns(&self) -> Vec<String> {
        self.ignored_units
            .iter()
            .chain(&self.ignored_sources)
            .filter(|p| !p.matched.load(Ordering::Relaxed))
            .map(|p| p.original.clone())
            .collect()
    }
}

fn any_match(patterns: &[WildcardPattern], text: &str) -> bool {
    patterns.iter().any(|p| p.matches(text))
}

fn compile_list(kind: &str, patterns: Vec<String>) -> Result<Vec<WildcardPattern>> {
    if patterns.len() > MAX_PATTERNS {
        anyhow::bail!(
            "Too many {} patterns: {} (maximum: {})",
            kind,
            patterns.len(),
            MAX_PATTERNS
        );
    }
    patterns
        .into_iter()
        .map(|pattern| {
            validate_pattern(kind, &pattern)?;
            Ok(WildcardPattern::compile(pattern))
        })
        .collect()
}

/// One pattern with its compiled matcher
#[derive(Debug)]
struct WildcardPattern {
    original: String,
    matcher: PatternMatcher,
    matched: AtomicBool,
}

impl WildcardPattern {
    fn compile(pattern: String) -> Self {
        let matcher = PatternMatcher::compile(&pattern);
        Self {
            original: pattern,
            matcher,
            matched: AtomicBool::new(false),
        }
    }

    fn matches(&self, text: &str) -> bool {
        let is_match = self.matcher.matches(text);
        if is_match {
            self.matched.store(true, Ordering::Relaxed);
        }
        is_match
    }
}

#[derive(Debug)]
enum PatternMatcher {
    /// "de.x.Foo"
    Exact(String),
    /// "java.*"
    StartsWith(String),
    /// "*Factory"
    EndsWith(String),
    /// "*/jre/lib/*"
    Contains(String),
    /// "de.*.impl.*Test": fixed head and tail, middle parts in order
    Segments {
        head: String,
        middle: Vec<String>,
        tail: String,
    },
}

impl PatternMatcher {
    fn compile(pattern: &str) -> Self {
        let parts: Vec<&str> = pattern.split('*').collect();
        match parts.as_slice() {
            [exact] => PatternMatcher::Exact(exact.to_string()),
            [head, ""] => PatternMatcher::StartsWith(head.to_string()),
            ["", tail] => PatternMatcher::EndsWith(tail.to_string()),
            ["", middle, ""] => PatternMatcher::Contains(middle.to_string()),
            [head, middle @ .., tail] => PatternMatcher::Segments {
                head: head.to_string(),
                middle: middle
                    .iter()
                    .filter(|p| !p.is_empty())
                    .map(|p| p.to_string())
                    .collect(),
                tail: tail.to_string(),
            },
            [] => PatternMatcher::Exact(String::new()),
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => text == s,
            PatternMatcher::StartsWith(head) => text.starts_with(head.as_str()),
            PatternMatcher::EndsWith(tail) => text.ends_with(tail.as_str()),
            PatternMatcher::Contains(middle) => text.contains(middle.as_str()),
            PatternMatcher::Segments { head, middle, tail } => {
                if text.len() < head.len() + tail.len()
                    || !text.starts_with(head.as_str())
                    || !text.ends_with(tail.as_str())
                {
                    return false;
                }
                let mut remaining = &text[head.len()..text.len() - tail.len()];
                for part in middle {
                    match remaining.find(part.as_str()) {
                        Some(pos) => remaining = &remaining[pos + part.len()..],
                        None => return false,
                    }
                }
                true
            }
        }
    }
}

fn validate_pattern(kind: &str, pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("The {} pattern cannot be empty", kind);
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "The {} pattern is too long: '{}' ({} chars). Maximum: {} chars",
            kind,
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "The {} pattern '{}' contains invalid character '{}'. \
             Only alphanumerics and - _ . $ : / * are allowed.",
            kind,
            pattern,
            ch
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "The {} pattern cannot contain only wildcards: '{}'",
            kind,
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '$' | ':' | '/' | '*')
}
