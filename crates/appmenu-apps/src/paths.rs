//! Search-root resolution for .desktop files.

use std::env;
use std::path::PathBuf;

/// Get all directories to scan for .desktop files, in precedence order.
///
/// `XDG_DATA_DIRS` (colon-separated) takes priority when set and non-empty,
/// each segment suffixed with `applications`. Otherwise the system-wide
/// locations are used, followed by the user's own.
pub fn entry_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(data_dirs) = env::var("XDG_DATA_DIRS") {
        if !data_dirs.is_empty() {
            for data_dir in data_dirs.split(':') {
                if !data_dir.is_empty() {
                    roots.push(PathBuf::from(data_dir).join("applications"));
                }
            }
            return roots;
        }
    }

    let home = env::var("HOME").unwrap_or_default();
    roots.push(PathBuf::from("/usr/local/share/applications"));
    roots.push(PathBuf::from("/usr/share/applications"));
    roots.push(PathBuf::from(&home).join(".local/share/applications"));
    roots.push(PathBuf::from(&home).join(".data/applications"));
    roots
}
