//! Icon resolution across themes with best-size selection.

use crate::paths::icon_roots;
use crate::theme::{Icon, IconTheme};
use log::debug;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// The theme consulted when the preferred theme yields nothing.
pub const FALLBACK_THEME: &str = "hicolor";

/// All discovered icon themes plus the ordered list of search roots.
pub struct Icons {
    roots: Vec<PathBuf>,
    themes: HashMap<String, IconTheme>,
    pixmap_dir: PathBuf,
}

impl Icons {
    /// Discover themes under the XDG icon search roots.
    pub fn new() -> Self {
        Self::with_roots(icon_roots(), PathBuf::from("/usr/share/pixmaps"))
    }

    /// Discover themes under explicit roots, with an explicit ungrouped
    /// pixmap directory.
    pub fn with_roots(roots: Vec<PathBuf>, pixmap_dir: PathBuf) -> Self {
        let themes = discover_themes(&roots);
        debug!("found {} icon themes in {} roots", themes.len(), roots.len());
        Self {
            roots,
            themes,
            pixmap_dir,
        }
    }

    /// Resolve `name` to the candidate whose size best matches `desired`.
    ///
    /// The preferred theme is consulted first, then hicolor, then the
    /// pixmap directory. A missing icon is a normal outcome, not an error.
    pub fn resolve(&self, name: &str, desired: u32, preferred: Option<&str>) -> Option<Icon> {
        let candidates = self.query(name, preferred);
        select_best(candidates, desired)
    }

    fn query(&self, name: &str, preferred: Option<&str>) -> Vec<Icon> {
        if let Some(theme) = preferred.and_then(|id| self.themes.get(id)) {
            let found = theme.query(name, &self.roots);
            if !found.is_empty() {
                return found;
            }
        }

        if let Some(theme) = self.themes.get(FALLBACK_THEME) {
            let found = theme.query(name, &self.roots);
            if !found.is_empty() {
                return found;
            }
        }

        self.scan_pixmaps(name)
    }

    /// Direct scan of the ungrouped pixmap directory: a same-named square
    /// PNG matches, its width standing in for a declared size.
    fn scan_pixmaps(&self, name: &str) -> Vec<Icon> {
        let mut found = Vec::new();
        let Ok(files) = fs::read_dir(&self.pixmap_dir) else {
            return found;
        };
        for file in files.flatten() {
            let path = file.path();
            if path.file_stem().and_then(|s| s.to_str()) != Some(name) {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            let Ok((width, height)) = image::image_dimensions(&path) else {
                continue;
            };
            if width != height {
                continue;
            }
            found.push(Icon {
                name: name.to_string(),
                size: width,
                path,
            });
        }
        found
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_themes(roots: &[PathBuf]) -> HashMap<String, IconTheme> {
    let mut themes = HashMap::new();
    for root in roots {
        let Ok(dirs) = fs::read_dir(root) else {
            continue;
        };
        for dir in dirs.flatten() {
            if !dir.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let id = dir.file_name().to_string_lossy().to_string();
            themes
                .entry(id.clone())
                .or_insert_with(|| IconTheme::new(id));
        }
    }
    themes
}

/// Score how well an available size fits the desired one.
///
/// Ranking, best to worst: exact match, clean downscale (smaller multiple
/// preferred), any downscale, clean upscale, far-too-small.
pub fn score(desired: u32, actual: u32) -> i32 {
    if actual == desired {
        1_000_000
    } else if actual % desired == 0 {
        1_000_000 - (actual / desired) as i32
    } else if desired % actual == 0 {
        -((desired / actual) as i32)
    } else if actual > desired {
        (actual - desired) as i32
    } else {
        -1_000_000 + (desired - actual) as i32
    }
}

/// Pick the maximum-scored candidate; ties keep the first one encountered.
fn select_best(candidates: Vec<Icon>, desired: u32) -> Option<Icon> {
    let mut best: Option<(i32, Icon)> = None;
    for icon in candidates {
        let s = score(desired, icon.size);
        match &best {
            Some((top, _)) if *top >= s => {}
            _ => best = Some((s, icon)),
        }
    }
    best.map(|(_, icon)| icon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_theme(root: &Path, id: &str, folders: &[(&str, u32)]) {
        let theme_dir = root.join(id);
        fs::create_dir_all(&theme_dir).unwrap();
        let mut index = String::new();
        for (folder, size) in folders {
            index.push_str(&format!(
                "[{}]\nSize={}\nContext=Applications\n\n",
                folder, size
            ));
        }
        fs::write(theme_dir.join("index.theme"), index).unwrap();
    }

    fn add_icon(root: &Path, id: &str, folder: &str, name: &str) {
        let dir = root.join(id).join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.png", name)), b"png").unwrap();
    }

    fn icons_at(root: &Path) -> Icons {
        Icons::with_roots(vec![root.to_path_buf()], root.join("pixmaps"))
    }

    #[test]
    fn test_score_exact_is_maximal() {
        assert_eq!(score(48, 48), 1_000_000);
        for actual in [1, 16, 24, 47, 49, 96, 480] {
            if actual != 48 {
                assert!(score(48, actual) < score(48, 48), "actual={}", actual);
            }
        }
    }

    #[test]
    fn test_score_prefers_clean_downscale() {
        // 48 is a clean multiple of 16; 17 is merely slightly bigger.
        assert!(score(16, 48) > score(16, 17));
        // Smaller multiples beat bigger ones.
        assert!(score(16, 32) > score(16, 48));
    }

    #[test]
    fn test_score_penalizes_upscaling() {
        assert!(score(48, 16) < 0);
        assert!(score(16, 20) > 0);
        assert!(score(48, 16) < score(16, 20));
        // A far-too-small icon with no clean relationship is worst.
        assert!(score(48, 15) < score(48, 16));
    }

    #[test]
    fn test_select_best_first_wins_on_tie() {
        let icons = vec![
            Icon {
                name: "x".into(),
                size: 32,
                path: PathBuf::from("/first"),
            },
            Icon {
                name: "x".into(),
                size: 32,
                path: PathBuf::from("/second"),
            },
        ];
        let best = select_best(icons, 16).unwrap();
        assert_eq!(best.path, PathBuf::from("/first"));
    }

    #[test]
    fn test_resolve_picks_closest_size() {
        let dir = tempfile::tempdir().unwrap();
        write_theme(
            dir.path(),
            "hicolor",
            &[("16x16/apps", 16), ("48x48/apps", 48)],
        );
        add_icon(dir.path(), "hicolor", "16x16/apps", "editor");
        add_icon(dir.path(), "hicolor", "48x48/apps", "editor");

        let icons = icons_at(dir.path());
        let best = icons.resolve("editor", 48, None).unwrap();
        assert_eq!(best.size, 48);
    }

    #[test]
    fn test_resolve_prefers_given_theme() {
        let dir = tempfile::tempdir().unwrap();
        write_theme(dir.path(), "mytheme", &[("16x16/apps", 16)]);
        write_theme(dir.path(), "hicolor", &[("16x16/apps", 16)]);
        add_icon(dir.path(), "mytheme", "16x16/apps", "editor");
        add_icon(dir.path(), "hicolor", "16x16/apps", "editor");

        let icons = icons_at(dir.path());
        let best = icons.resolve("editor", 16, Some("mytheme")).unwrap();
        assert!(best.path.starts_with(dir.path().join("mytheme")));
    }

    #[test]
    fn test_resolve_falls_back_to_hicolor() {
        let dir = tempfile::tempdir().unwrap();
        write_theme(dir.path(), "mytheme", &[("16x16/apps", 16)]);
        write_theme(dir.path(), "hicolor", &[("16x16/apps", 16)]);
        add_icon(dir.path(), "hicolor", "16x16/apps", "editor");

        let icons = icons_at(dir.path());
        let best = icons.resolve("editor", 16, Some("mytheme")).unwrap();
        assert!(best.path.starts_with(dir.path().join("hicolor")));
    }

    #[test]
    fn test_resolve_unknown_theme_still_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write_theme(dir.path(), "hicolor", &[("16x16/apps", 16)]);
        add_icon(dir.path(), "hicolor", "16x16/apps", "editor");

        let icons = icons_at(dir.path());
        assert!(icons.resolve("editor", 16, Some("nope")).is_some());
    }

    #[test]
    fn test_resolve_pixmap_fallback_square_only() {
        let dir = tempfile::tempdir().unwrap();
        let pixmaps = dir.path().join("pixmaps");
        fs::create_dir_all(&pixmaps).unwrap();
        image::RgbaImage::new(24, 24)
            .save(pixmaps.join("square.png"))
            .unwrap();
        image::RgbaImage::new(24, 30)
            .save(pixmaps.join("tall.png"))
            .unwrap();

        let icons = icons_at(dir.path());
        let found = icons.resolve("square", 16, None).unwrap();
        assert_eq!(found.size, 24);
        assert!(icons.resolve("tall", 16, None).is_none());
    }

    #[test]
    fn test_resolve_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let icons = icons_at(dir.path());
        assert!(icons.resolve("ghost", 16, None).is_none());
    }
}
