use crate::app::error::Interrupted;
use crate::app::models::{FilterConfig, ScanOutcome};
use anyhow::Result;
use pathdiff::diff_paths;
use std::fs::{self, DirEntry};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// A directory entry that survived every exclusion check.
struct Visible {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// Depth-first walker producing the tree listing and the bundle selection.
pub struct Scanner<'a> {
    config: &'a FilterConfig,
    interrupt: Arc<AtomicBool>,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a FilterConfig) -> Self {
        Self {
            config,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a flag that stops the walk once set.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = flag;
        self
    }

    pub fn scan(&self) -> Result<ScanOutcome> {
        let root = &self.config.root;
        let header = match root.file_name() {
            Some(name) => format!("{}/", name.to_string_lossy()),
            None => root.to_string_lossy().into_owned(),
        };

        let mut outcome = ScanOutcome::default();
        outcome.lines.push(header);
        self.walk(root, "", &mut outcome)?;
        Ok(outcome)
    }

    fn walk(&self, dir: &Path, prefix: &str, out: &mut ScanOutcome) -> Result<()> {
        if self.interrupt.load(Ordering::SeqCst) {
            return Err(Interrupted.into());
        }

        let listing = match fs::read_dir(dir) {
            Ok(listing) => listing,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                out.lines
                    .push(format!("{}{}[permission denied]", prefix, LAST_BRANCH));
                return Ok(());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Directory vanished before listing: {}", dir.display());
                return Ok(());
            }
            Err(e) => {
                log::warn!("Cannot list {}: {}", dir.display(), e);
                out.lines
                    .push(format!("{}{}[unreadable: {}]", prefix, LAST_BRANCH, e));
                return Ok(());
            }
        };

        let mut visible = Vec::new();
        for entry in listing {
            match entry {
                Ok(entry) => {
                    if let Some(v) = self.classify(entry) {
                        visible.push(v);
                    }
                }
                Err(e) => log::warn!("Error reading entry in {}: {}", dir.display(), e),
            }
        }

        // Directories first, then case-insensitive name; exact name breaks ties.
        visible.sort_by(|a, b| {
            (!a.is_dir, a.name.to_lowercase(), &a.name).cmp(&(
                !b.is_dir,
                b.name.to_lowercase(),
                &b.name,
            ))
        });

        let total = visible.len();
        for (idx, entry) in visible.into_iter().enumerate() {
            let is_last = idx + 1 == total;
            let branch = if is_last { LAST_BRANCH } else { BRANCH };
            let marker = if entry.is_dir { "/" } else { "" };
            out.lines
                .push(format!("{}{}{}{}", prefix, branch, entry.name, marker));

            if entry.is_dir {
                let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
                self.walk(&entry.path, &child_prefix, out)?;
            } else if self.config.is_selected(&entry.name) {
                if let Some(rel) = diff_paths(&entry.path, &self.config.root) {
                    out.selected.push(rel);
                }
            }
        }

        Ok(())
    }

    /// Applies the exclusion rules to one entry. `None` means hidden.
    fn classify(&self, entry: DirEntry) -> Option<Visible> {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                log::debug!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };

        if file_type.is_symlink() {
            log::trace!("Skipping symlink {}", path.display());
            return None;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = file_type.is_dir();

        if is_dir && self.config.excludes.contains(&name) {
            log::trace!("Excluded directory {}", path.display());
            return None;
        }
        if !is_dir && self.config.skip_names.contains(&name) {
            log::trace!("Skipping output file {}", path.display());
            return None;
        }
        if self.is_ignored(&path, &name) {
            log::trace!("Ignored by pattern {}", path.display());
            return None;
        }

        Some(Visible { path, name, is_dir })
    }

    fn is_ignored(&self, path: &Path, name: &str) -> bool {
        let set = &self.config.ignore_set;
        if set.is_empty() {
            return false;
        }
        if set.is_match(name) {
            return true;
        }
        diff_paths(path, &self.config.root)
            .map(|rel| set.is_match(to_slash(&rel)))
            .unwrap_or(false)
    }
}

/// Renders a relative path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
