//! Launcher configuration.
//!
//! One immutable value built at startup. Defaults match the classic
//! dmenu setup; a JSON file under the user's config directory overrides
//! individual fields.

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Picker program, receives the entry stream on stdin.
    pub picker: String,
    pub picker_args: Vec<String>,
    /// Shell that runs non-terminal exec commands.
    pub shell: String,
    pub shell_args: Vec<String>,
    /// Terminal that runs entries requesting one.
    pub terminal: String,
    pub terminal_args: Vec<String>,
    /// Pixel size requested for inline menu icons.
    pub icon_size: u32,
    /// Preferred icon theme; hicolor remains the fallback.
    pub theme: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            picker: "dmenu".to_string(),
            picker_args: vec![
                "-I".to_string(),
                "-n".to_string(),
                "-i".to_string(),
                "-c".to_string(),
                "-l".to_string(),
                "20".to_string(),
            ],
            shell: "sh".to_string(),
            shell_args: vec!["-c".to_string()],
            terminal: "kitty".to_string(),
            terminal_args: vec!["sh".to_string(), "-c".to_string()],
            icon_size: 16,
            theme: None,
        }
    }
}

impl Config {
    /// Load the user's config, falling back to defaults when absent.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::from_file(&path),
            None => Self::default(),
        }
    }

    /// Load from a specific file. A missing file yields defaults; a
    /// malformed one is reported and yields defaults.
    pub fn from_file(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("appmenu").join("config.json"))
}
