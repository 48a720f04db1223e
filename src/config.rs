use serde::{Serialize, Deserialize};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// Default configuration
pub const DEFAULT_EDIT_PREVIEW_LEN: usize = 20;

/// User-tunable behavior. Everything defaults to on; fields absent from an
/// older settings file fall back to their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Keep deleted messages in the store with the banner
    #[serde(default = "default_true")]
    pub keep_deleted: bool,
    /// Record edit history when message content changes
    #[serde(default = "default_true")]
    pub track_edits: bool,
    /// Characters of prior content shown per edit-history note
    #[serde(default = "default_preview_len")]
    pub edit_preview_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keep_deleted: true,
            track_edits: true,
            edit_preview_len: DEFAULT_EDIT_PREVIEW_LEN,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_preview_len() -> usize {
    DEFAULT_EDIT_PREVIEW_LEN
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("io", "msgkeep", "msgkeep") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    read_settings(&settings_path()?)
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        write_settings(&path, settings)?;
    }
    Ok(())
}

pub fn read_settings(path: &Path) -> Option<Settings> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn write_settings(path: &Path, settings: &Settings) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    let data = serde_json::to_string_pretty(settings).unwrap();
    file.write_all(data.as_bytes())
}
