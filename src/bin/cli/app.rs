use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use import_crawler_lib::settings::{Settings, SettingsStorage};
use import_crawler_lib::vault::FileVault;

/// Shared application state for CLI commands
pub struct App {
    pub vault: FileVault,
    pub settings_storage: SettingsStorage,
    pub settings: Settings,
}

impl App {
    /// Open a vault and load its settings
    pub fn new(vault_dir: &Path, settings_path: Option<PathBuf>) -> Result<Self> {
        if !vault_dir.is_dir() {
            bail!("Vault directory {:?} does not exist", vault_dir);
        }
        // Watcher events carry absolute paths
        let vault_dir = vault_dir
            .canonicalize()
            .with_context(|| format!("Failed to open vault {:?}", vault_dir))?;

        let settings_storage = match settings_path {
            Some(path) => SettingsStorage::new(path),
            None => SettingsStorage::for_vault(&vault_dir),
        };
        let settings = settings_storage
            .load()
            .with_context(|| format!("Failed to load settings from {:?}", settings_storage.path()))?;

        let vault = FileVault::new(vault_dir, settings.extension.clone());

        Ok(Self {
            vault,
            settings_storage,
            settings,
        })
    }

    /// Persist the current settings
    pub fn save_settings(&self) -> Result<()> {
        self.settings_storage
            .save(&self.settings)
            .with_context(|| format!("Failed to save settings to {:?}", self.settings_storage.path()))
    }

    /// Convert a 1-based link number into an index
    pub fn link_index(&self, number: usize) -> Result<usize> {
        if number == 0 || number > self.settings.linked_files.len() {
            bail!(
                "No file link {}. There are {} file links.",
                number,
                self.settings.linked_files.len()
            );
        }
        Ok(number - 1)
    }
}
