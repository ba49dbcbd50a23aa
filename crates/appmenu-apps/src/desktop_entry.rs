//! Desktop entry parsing.

use std::fs;
use std::path::{Path, PathBuf};

/// One launchable application, parsed from a .desktop file.
///
/// Identity is the `id` alone; two entries with the same id are the same
/// application regardless of which search root they came from.
#[derive(Clone, Debug)]
pub struct DesktopEntry {
    pub id: String,
    pub name: String,
    /// Raw exec template, may contain %-field codes.
    pub exec: String,
    /// Logical icon name, not a path. Empty when the entry declares none.
    pub icon: String,
    pub terminal: bool,
    pub hidden: bool,
    pub path: PathBuf,
}

impl PartialEq for DesktopEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DesktopEntry {}

/// Derive an entry id from a descriptor path relative to its search root.
///
/// Path segments are joined with `-`, the final segment kept as-is:
/// `sub/app.desktop` under root `/usr/share/applications` becomes
/// `sub-app.desktop`.
pub fn path_to_id(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let mut id = String::new();
    let mut segments = relative.components().peekable();
    while let Some(segment) = segments.next() {
        id.push_str(&segment.as_os_str().to_string_lossy());
        if segments.peek().is_some() {
            id.push('-');
        }
    }
    id
}

/// Parse a .desktop file into a DesktopEntry bound to its search root.
///
/// Only the `[Desktop Entry]` section is consulted; a file without that
/// section is invalid and yields `None`, as does an unreadable file.
pub fn parse_desktop_file(base: &Path, path: &Path) -> Option<DesktopEntry> {
    let content = fs::read_to_string(path).ok()?;

    let mut in_desktop_entry = false;
    let mut seen_desktop_entry = false;

    let mut name = String::new();
    let mut exec = String::new();
    let mut icon = String::new();
    let mut terminal = false;
    let mut hidden = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            in_desktop_entry = line == "[Desktop Entry]";
            seen_desktop_entry |= in_desktop_entry;
            continue;
        }

        if in_desktop_entry {
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim();
                match key.trim() {
                    "Name" => name = value.to_string(),
                    "Icon" => icon = value.to_string(),
                    "Exec" => exec = value.to_string(),
                    "Terminal" => terminal = value == "true",
                    "NoDisplay" | "Hidden" => hidden |= value == "true",
                    _ => {}
                }
            }
        }
    }

    if !seen_desktop_entry {
        return None;
    }

    Some(DesktopEntry {
        id: path_to_id(base, path),
        name,
        exec,
        icon,
        terminal,
        hidden,
        path: path.to_path_buf(),
    })
}
