use std::collections::BTreeSet;
use std::path::PathBuf;

use globset::GlobSet;

/// Directory names that are never descended into.
pub const AUTO_EXCLUDES: [&str; 4] = [".git", ".idea", ".venv", "venv"];

/// Extensions bundled when none are configured.
pub const DEFAULT_EXTS: [&str; 4] = [".txt", ".sh", ".py", ".sql"];

/// Resolved configuration for one run, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub root: PathBuf,
    /// Auto-excludes plus user excludes, matched against directory names.
    pub excludes: BTreeSet<String>,
    /// Raw ignore patterns, kept for reporting.
    pub ignore_globs: BTreeSet<String>,
    /// Compiled form of `ignore_globs`.
    pub ignore_set: GlobSet,
    /// Lowercase, dot-prefixed.
    pub allowed_exts: BTreeSet<String>,
    pub include_names: BTreeSet<String>,
    /// Basenames of the generated outputs.
    pub skip_names: BTreeSet<String>,
    pub tree_output: PathBuf,
    pub bundle_output: PathBuf,
}

impl FilterConfig {
    /// Bundle inclusion rule for a visible file.
    pub fn is_selected(&self, name: &str) -> bool {
        if self.include_names.contains(name) {
            return true;
        }
        match suffix(name) {
            Some(ext) => self.allowed_exts.contains(&ext.to_lowercase()),
            None => false,
        }
    }
}

/// Final dotted extension of a file name. Leading-dot names such as
/// `.bashrc` and names ending in a dot have none.
pub fn suffix(name: &str) -> Option<&str> {
    let idx = name.rfind('.')?;
    if idx == 0 || idx + 1 == name.len() {
        return None;
    }
    Some(&name[idx..])
}

/// What one traversal produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Tree listing, root header first.
    pub lines: Vec<String>,
    /// Root-relative paths of files to bundle, in pre-order.
    pub selected: Vec<PathBuf>,
}
