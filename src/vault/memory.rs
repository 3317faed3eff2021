use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::{PoisonError, RwLock};

use super::reference;
use super::{Result, Vault, VaultError};

/// Vault held entirely in memory.
///
/// Directories are implied by the entries stored under them. Entries without
/// the document extension behave like assets: they exist but are not documents.
pub struct MemoryVault {
    entries: RwLock<BTreeMap<String, String>>,
    unreadable: BTreeSet<String>,
    extension: String,
}

impl MemoryVault {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            unreadable: BTreeSet::new(),
            extension: extension.into(),
        }
    }

    /// Build a `md` vault from (reference, content) pairs
    pub fn with_documents<I, K, V>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let vault = Self::new("md");
        for (reference, content) in documents {
            vault.insert(reference.as_ref(), content);
        }
        vault
    }

    /// Add or replace an entry
    pub fn insert(&self, reference: &str, content: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(reference::clean(reference), content.into());
    }

    /// Make reads of an entry fail with a permission error
    pub fn mark_unreadable(mut self, reference: &str) -> Self {
        self.unreadable.insert(reference::clean(reference));
        self
    }

    /// Current content of an entry
    pub fn get(&self, reference: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&reference::clean(reference))
            .cloned()
    }

    fn is_directory(&self, cleaned: &str) -> bool {
        if cleaned.is_empty() {
            return true;
        }
        let prefix = format!("{}/", cleaned);
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .any(|key| key.starts_with(&prefix))
    }
}

impl Vault for MemoryVault {
    fn read_text(&self, reference: &str) -> Result<String> {
        let cleaned = reference::clean(reference);

        if self.unreadable.contains(&cleaned) {
            return Err(VaultError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )));
        }

        match self.get(&cleaned) {
            Some(content) => Ok(content),
            None if self.is_directory(&cleaned) => Err(VaultError::NotADocument(cleaned)),
            None => Err(VaultError::NotFound(cleaned)),
        }
    }

    fn exists(&self, reference: &str) -> bool {
        let cleaned = reference::clean(reference);
        self.get(&cleaned).is_some() || self.is_directory(&cleaned)
    }

    fn is_document(&self, reference: &str) -> bool {
        reference::has_extension(reference, &self.extension) && self.get(reference).is_some()
    }

    fn write_text(&self, reference: &str, text: &str) -> Result<()> {
        let cleaned = reference::clean(reference);
        if cleaned.is_empty() {
            return Err(VaultError::InvalidReference(reference.to_string()));
        }
        if self.is_directory(&cleaned) {
            return Err(VaultError::NotADocument(cleaned));
        }

        self.insert(&cleaned, text);
        Ok(())
    }
}
