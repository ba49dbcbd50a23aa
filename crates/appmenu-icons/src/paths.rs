//! Search-root resolution for icon themes.

use std::env;
use std::path::PathBuf;

/// Get all base directories that may contain icon-theme trees, in
/// precedence order.
///
/// `$HOME/.icons` always comes first. `XDG_DATA_DIRS` segments (suffixed
/// `icons`) follow when the variable is set and non-empty; otherwise the
/// system-wide locations and the user's own are used.
pub fn icon_roots() -> Vec<PathBuf> {
    let home = env::var("HOME").unwrap_or_default();
    let mut roots = vec![PathBuf::from(&home).join(".icons")];

    if let Ok(data_dirs) = env::var("XDG_DATA_DIRS") {
        if !data_dirs.is_empty() {
            for data_dir in data_dirs.split(':') {
                if !data_dir.is_empty() {
                    roots.push(PathBuf::from(data_dir).join("icons"));
                }
            }
            return roots;
        }
    }

    roots.push(PathBuf::from("/usr/local/share/icons"));
    roots.push(PathBuf::from("/usr/share/icons"));
    roots.push(PathBuf::from(&home).join(".local/share/icons"));
    roots.push(PathBuf::from(&home).join(".data/icons"));
    roots
}
