//! Path utilities: expand ~, resolve names against the config dir, compare files.

use std::fs;
use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Absolute paths (after `~` expansion) are kept, bare names land in `base`.
pub fn resolve_in(base: &Path, name: &str) -> PathBuf {
    let p = expand_tilde(name);
    if p.is_absolute() { p } else { base.join(p) }
}

/// Both names point at the same file. Existing files are compared by their
/// canonical path, so `./x.csv` and `/abs/x.csv` match.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => a == b,
    }
}
