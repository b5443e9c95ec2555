use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::crop::DEFAULT_CROP;
use crate::geometry::CropRect;

const APP_DIR: &str = "cropshare";
const APP_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://cropshare.local/";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_crop")]
    pub default_crop: CropRect,
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_crop: default_crop(),
            share_base_url: default_share_base_url(),
            output_dir: None,
        }
    }
}

fn default_crop() -> CropRect {
    DEFAULT_CROP
}

fn default_share_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

pub fn load_app_config() -> AppConfig {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    match config_file_path(xdg_config_home, home) {
        Some(path) => load_app_config_from(&path),
        None => {
            tracing::debug!("neither XDG_CONFIG_HOME nor HOME is set; using default config");
            AppConfig::default()
        }
    }
}

pub fn load_app_config_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

/// `$XDG_CONFIG_HOME/cropshare/config.json`, else `~/.config/cropshare/config.json`.
/// An empty `XDG_CONFIG_HOME` counts as unset.
fn config_file_path(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let root = match xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home?.join(".config"),
    };
    Some(root.join(APP_DIR).join(APP_CONFIG_FILE))
}
