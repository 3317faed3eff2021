use std::fs;
use std::path::{Path, PathBuf};

use super::reference;
use super::{Result, Vault, VaultError};

/// Vault backed by a directory on disk
pub struct FileVault {
    base_path: PathBuf,
    extension: String,
}

impl FileVault {
    pub fn new(base_path: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            base_path,
            extension: extension.into(),
        }
    }

    /// Vault root directory
    pub fn root(&self) -> &Path {
        &self.base_path
    }

    /// Document extension (without the dot)
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Map a reference onto the filesystem
    pub fn path_for(&self, reference: &str) -> PathBuf {
        let cleaned = reference::clean(reference);
        let mut path = self.base_path.clone();
        for segment in cleaned.split(reference::SEPARATOR).filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }

    /// Map a filesystem path back to a reference, if it lies inside the vault
    pub fn reference_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.base_path).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();

        if segments.is_empty() {
            return None;
        }
        Some(segments.join("/"))
    }
}

impl Vault for FileVault {
    fn read_text(&self, reference: &str) -> Result<String> {
        let path = self.path_for(reference);

        if !path.exists() {
            return Err(VaultError::NotFound(reference.to_string()));
        }
        if path.is_dir() {
            return Err(VaultError::NotADocument(reference.to_string()));
        }

        Ok(fs::read_to_string(&path)?)
    }

    fn exists(&self, reference: &str) -> bool {
        self.path_for(reference).exists()
    }

    fn is_document(&self, reference: &str) -> bool {
        reference::has_extension(reference, &self.extension) && self.path_for(reference).is_file()
    }

    fn write_text(&self, reference: &str, text: &str) -> Result<()> {
        let cleaned = reference::clean(reference);
        if cleaned.is_empty() {
            return Err(VaultError::InvalidReference(reference.to_string()));
        }

        let path = self.path_for(&cleaned);
        if path.is_dir() {
            return Err(VaultError::NotADocument(cleaned));
        }

        // Targets are written in place; missing folders are not created
        let parent = reference::parent_of(&cleaned);
        if !self.path_for(&parent).is_dir() {
            return Err(VaultError::NotFound(parent));
        }

        fs::write(&path, text)?;
        Ok(())
    }
}
