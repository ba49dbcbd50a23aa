//! Icon theme indexing and per-theme queries.

use log::debug;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

/// One resolved icon candidate.
#[derive(Clone, Debug)]
pub struct Icon {
    pub name: String,
    /// Declared pixel size of the folder the file was found in.
    pub size: u32,
    pub path: PathBuf,
}

/// A named icon theme with a lazily-built size-to-folder index.
///
/// The index merges the theme's index.theme from every search root where
/// the theme exists, and is built at most once.
pub struct IconTheme {
    id: String,
    folders: OnceLock<Vec<(u32, String)>>,
}

impl IconTheme {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            folders: OnceLock::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Find all candidates named `name` in this theme's indexed folders.
    ///
    /// Each registered folder is scanned in every search root where it
    /// exists; a match is a regular PNG file whose stem equals `name`,
    /// tagged with the folder's declared size.
    pub fn query(&self, name: &str, roots: &[PathBuf]) -> Vec<Icon> {
        let folders = self
            .folders
            .get_or_init(|| read_index(&self.id, roots));

        let mut found = Vec::new();
        for root in roots {
            for (size, folder) in folders {
                let dir = root.join(&self.id).join(folder);
                let Ok(files) = fs::read_dir(&dir) else {
                    continue;
                };
                for file in files.flatten() {
                    if !file.file_type().map(|t| t.is_file()).unwrap_or(false) {
                        continue;
                    }
                    let path = file.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("png") {
                        continue;
                    }
                    if path.file_stem().and_then(|s| s.to_str()) == Some(name) {
                        found.push(Icon {
                            name: name.to_string(),
                            size: *size,
                            path,
                        });
                    }
                }
            }
        }
        found
    }
}

impl PartialEq for IconTheme {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for IconTheme {}

/// Per-folder keys collected while scanning an index.theme section.
#[derive(Default)]
struct FolderSpec {
    size: Option<u32>,
    rejected: bool,
}

impl FolderSpec {
    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "Size" => self.size = value.parse().ok(),
            "Type" => {
                if value == "Scalable" {
                    self.rejected = true;
                }
            }
            "Scale" => {
                if value.parse::<u32>() != Ok(1) {
                    self.rejected = true;
                }
            }
            "Context" => {
                if value != "Applications" {
                    self.rejected = true;
                }
            }
            _ => {}
        }
    }

    fn accept(&self, section: &str, folders: &mut Vec<(u32, String)>) {
        if section.is_empty() || self.rejected {
            return;
        }
        if let Some(size) = self.size {
            folders.push((size, section.to_string()));
        }
    }
}

/// Read a theme's index.theme from every root and collect the usable
/// size-tagged folders.
fn read_index(id: &str, roots: &[PathBuf]) -> Vec<(u32, String)> {
    let mut folders = Vec::new();

    for root in roots {
        let index_path = root.join(id).join("index.theme");
        let Ok(content) = fs::read_to_string(&index_path) else {
            continue;
        };

        let mut section = String::new();
        let mut spec = FolderSpec::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                spec.accept(&section, &mut folders);
                section = rest.strip_suffix(']').unwrap_or(rest).to_string();
                spec = FolderSpec::default();
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                spec.apply(key.trim(), value.trim());
            }
        }
        spec.accept(&section, &mut folders);
    }

    debug!("theme {} indexed {} folders", id, folders.len());
    folders
}
