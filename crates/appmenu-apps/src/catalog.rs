//! Application catalog built from .desktop search roots.

use crate::desktop_entry::{DesktopEntry, parse_desktop_file};
use log::debug;

use std::collections::HashSet;
use std::path::PathBuf;

/// An ordered, deduplicated collection of visible desktop entries.
///
/// Entries are sorted by display name; no two entries share an id, and
/// hidden entries are never stored.
pub struct Catalog {
    entries: Vec<DesktopEntry>,
}

impl Catalog {
    /// Scan the given search roots for .desktop files.
    ///
    /// Roots are visited in order, so the first occurrence of an id wins.
    /// Missing roots are skipped silently.
    pub fn discover(roots: &[PathBuf]) -> Self {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for root in roots {
            if !root.exists() {
                continue;
            }

            let walker = walkdir::WalkDir::new(root).follow_links(true);
            for file in walker.into_iter().filter_map(|e| e.ok()) {
                if !file.file_type().is_file() {
                    continue;
                }
                let path = file.path();
                if path.extension().and_then(|e| e.to_str()) != Some("desktop") {
                    continue;
                }

                let Some(entry) = parse_desktop_file(root, path) else {
                    debug!("skipping invalid desktop file {}", path.display());
                    continue;
                };
                if entry.hidden || seen.contains(&entry.id) {
                    continue;
                }
                seen.insert(entry.id.clone());
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("catalog holds {} entries", entries.len());

        Catalog { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DesktopEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DesktopEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
