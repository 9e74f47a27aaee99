//! Exclusion patterns for candidate-file enumeration.
//!
//! Combines a fixed default set (version control, build output,
//! dependencies, lockfiles, minified/sourcemap artifacts) with rules read
//! from the ignore file at the project root. Only the root file is honored;
//! nested ignore files are out of scope.

use std::fs;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Ignore file read from the session root.
const IGNORE_FILE: &str = ".gitignore";

/// Always-excluded patterns, applied before any ignore-file rules.
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/.git/**",
    "**/.hg/**",
    "**/.svn/**",
    "**/node_modules/**",
    "**/target/**",
    "**/build/**",
    "**/dist/**",
    "**/out/**",
    "**/vendor/**",
    "**/__pycache__/**",
    "**/.venv/**",
    "**/.cache/**",
    "**/coverage/**",
    "**/*.min.js",
    "**/*.min.css",
    "**/*.map",
    "**/*.lock",
    "**/package-lock.json",
];

/// Immutable combined exclude set for one session root.
///
/// Same root and same ignore-file contents always produce the same spec.
#[derive(Debug)]
pub struct ExcludeSpec {
    patterns: Vec<String>,
    matcher: GlobSet,
}

impl ExcludeSpec {
    /// Builds the combined spec for `root`. Never fails: a missing or
    /// unreadable ignore file yields the default-only spec.
    pub fn build(root: &Path) -> Self {
        let mut patterns: Vec<String> = DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect();

        match fs::read_to_string(root.join(IGNORE_FILE)) {
            Ok(contents) => {
                for line in contents.lines() {
                    if let Some(pattern) = translate_ignore_rule(line) {
                        patterns.push(pattern);
                    }
                }
            }
            Err(error) => {
                log::debug!(
                    "no ignore file at {}: {error}",
                    root.join(IGNORE_FILE).display()
                );
            }
        }

        Self::from_patterns(patterns)
    }

    fn from_patterns(patterns: Vec<String>) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(error) => {
                    log::warn!("skipping unparseable exclude pattern {pattern:?}: {error}");
                }
            }
        }
        let matcher = builder.build().unwrap_or_else(|error| {
            log::warn!("exclude set failed to compile, excluding nothing: {error}");
            GlobSet::empty()
        });
        Self { patterns, matcher }
    }

    /// The combined pattern list, defaults first, ignore-file rules after.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether a root-relative path is excluded.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.matcher.is_match(relative)
    }

    /// Whether a root-relative directory is excluded for traversal.
    ///
    /// Directory rules are wrapped as `**/<name>/**`, which matches the
    /// directory's contents rather than the directory path itself, so the
    /// check probes with a synthetic child entry.
    pub fn is_excluded_dir(&self, relative: &Path) -> bool {
        self.matcher.is_match(relative) || self.matcher.is_match(relative.join("_"))
    }
}

/// Translates one ignore-file line into a glob pattern, or `None` when the
/// line contributes nothing.
///
/// Negated rules (`!`) are unsupported and skipped; a rule without any
/// wildcard is treated as a directory/name rule and wrapped as
/// `**/<rule>/**`; wildcarded rules pass through verbatim.
fn translate_ignore_rule(line: &str) -> Option<String> {
    let rule = line.trim();
    if rule.is_empty() || rule.starts_with('#') || rule.starts_with('!') {
        return None;
    }

    let rule = rule.strip_prefix('/').unwrap_or(rule);
    let rule = rule.strip_suffix('/').unwrap_or(rule);
    if rule.is_empty() {
        return None;
    }

    if rule.contains(['*', '?', '[']) {
        Some(rule.to_string())
    } else {
        Some(format!("**/{rule}/**"))
    }
}
