use crate::app::cli::Cli;
use crate::app::models::{FilterConfig, AUTO_EXCLUDES, DEFAULT_EXTS};
use anyhow::{bail, Context, Result};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub(crate) struct PresetConfig {
    exclude: Option<Vec<String>>,
    ignore: Option<Vec<String>>,
    exts: Option<Vec<String>>,
    include_names: Option<Vec<String>>,
}

fn presets_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(
        home.join(".config")
            .join("tree_bundle")
            .join("presets.toml"),
    )
}

fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read presets at {}", path.display()))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(parsed.presets)
}

/// Splits a comma-separated list, trimming items and dropping blanks.
pub fn parse_csv_set(csv: &str) -> BTreeSet<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Lowercases and dot-prefixes every extension. An empty result falls back
/// to the defaults.
pub fn normalize_extensions<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let exts: BTreeSet<String> = items
        .into_iter()
        .map(|e| e.as_ref().trim().to_lowercase())
        .filter(|e| !e.is_empty() && e != ".")
        .map(|e| if e.starts_with('.') { e } else { format!(".{}", e) })
        .collect();

    if exts.is_empty() {
        DEFAULT_EXTS.iter().map(|e| e.to_string()).collect()
    } else {
        exts
    }
}

fn merge_sets(preset_vec: Option<Vec<String>>, cli_set: BTreeSet<String>) -> BTreeSet<String> {
    let mut combined: BTreeSet<String> = preset_vec
        .unwrap_or_default()
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    combined.extend(cli_set);
    combined
}

/// Compiles ignore patterns with fnmatch-like rules: `*` also crosses `/`
/// and matching is case-sensitive. An unclosed `[` is literal; any other
/// pattern that does not parse is matched as literal text.
pub fn build_globset<'a, I>(patterns: I) -> Result<GlobSet>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let parsed = GlobBuilder::new(pat)
            .literal_separator(false)
            .backslash_escape(false)
            .allow_unclosed_class(true)
            .build();
        match parsed {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                log::warn!("Treating ignore pattern {:?} as literal text: {}", pat, e);
                match Glob::new(&globset::escape(pat)) {
                    Ok(glob) => {
                        builder.add(glob);
                    }
                    Err(e) => log::warn!("Dropping ignore pattern {:?}: {}", pat, e),
                }
            }
        }
    }
    builder.build().context("Failed to compile ignore patterns")
}

fn output_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Resolves CLI arguments against the user's presets file.
pub fn resolve_config(cli: Cli) -> Result<FilterConfig> {
    let presets = match presets_path() {
        Some(path) => load_presets_file(&path)?,
        None => {
            log::debug!("No home directory, skipping presets");
            HashMap::new()
        }
    };
    resolve_config_with(cli, &presets)
}

pub(crate) fn resolve_config_with(
    cli: Cli,
    presets: &HashMap<String, PresetConfig>,
) -> Result<FilterConfig> {
    if !cli.root.is_dir() {
        bail!("Root is not a directory: {}", cli.root.display());
    }
    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("Failed to resolve root {}", cli.root.display()))?;

    // Preset: CLI flag > root directory name > none
    let root_name = root.file_name().and_then(|n| n.to_str());
    let preset = match cli.preset.as_deref() {
        Some(name) => presets.get(name).cloned().unwrap_or_else(|| {
            log::warn!("Preset '{}' not found, continuing without it", name);
            PresetConfig::default()
        }),
        None => root_name
            .and_then(|name| presets.get(name))
            .cloned()
            .unwrap_or_default(),
    };

    let mut excludes: BTreeSet<String> = AUTO_EXCLUDES.iter().map(|s| s.to_string()).collect();
    excludes.extend(merge_sets(preset.exclude, parse_csv_set(&cli.exclude)));

    let ignore_globs = merge_sets(preset.ignore, parse_csv_set(&cli.ignore));
    let ignore_set = build_globset(&ignore_globs)?;

    let raw_exts = merge_sets(
        preset.exts,
        cli.exts.as_deref().map(parse_csv_set).unwrap_or_default(),
    );
    let allowed_exts = normalize_extensions(&raw_exts);

    let include_names = merge_sets(preset.include_names, parse_csv_set(&cli.include_names));

    let skip_names = [&cli.tree_out, &cli.bundle_out]
        .into_iter()
        .filter_map(|p| output_name(p))
        .collect();

    Ok(FilterConfig {
        root,
        excludes,
        ignore_globs,
        ignore_set,
        allowed_exts,
        include_names,
        skip_names,
        tree_output: cli.tree_out,
        bundle_output: cli.bundle_out,
    })
}
