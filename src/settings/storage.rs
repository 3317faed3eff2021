//! Settings persistence
//!
//! Settings live in the plugin data file inside the vault, so the CLI and
//! the Obsidian plugin share one configuration.

use std::fs;
use std::path::{Path, PathBuf};

use super::models::Settings;

/// Error type for settings operations
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File link not found: {}", .0 + 1)]
    LinkNotFound(usize),
}

/// Plugin folder name inside `.obsidian/plugins`
pub const PLUGIN_ID: &str = "import-crawler";

/// Loads and saves settings
pub struct SettingsStorage {
    path: PathBuf,
}

impl SettingsStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Storage at the plugin data file of a vault
    pub fn for_vault(vault_root: &Path) -> Self {
        Self::new(Self::default_path(vault_root))
    }

    /// `<vault>/.obsidian/plugins/import-crawler/data.json`
    pub fn default_path(vault_root: &Path) -> PathBuf {
        vault_root
            .join(".obsidian")
            .join("plugins")
            .join(PLUGIN_ID)
            .join("data.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when no file exists yet
    pub fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            log::debug!("No settings at {:?}, using defaults", self.path);
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;

        log::info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}
