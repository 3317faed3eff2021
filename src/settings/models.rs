//! Settings data models
//!
//! The JSON layout is compatible with the Obsidian plugin's `data.json`:
//! `linkedFiles` is a list of `[source, target]` pairs.

use serde::{Deserialize, Serialize};

use crate::crawler::{ResolveOptions, DEFAULT_EXTENSION, DEFAULT_MAX_DEPTH};
use crate::vault::reference;

use super::storage::SettingsError;

/// A configured source to target link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Link {
    /// Document to flatten
    pub source: String,
    /// Document the flattened text is written to
    pub target: String,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Both ends are filled in
    pub fn is_complete(&self) -> bool {
        !self.source.is_empty() && !self.target.is_empty()
    }

    /// Copy of the link with the document extension added where missing
    pub fn with_extension(&self, extension: &str) -> Self {
        Self {
            source: reference::with_extension(&self.source, extension),
            target: reference::with_extension(&self.target, extension),
        }
    }
}

impl From<Vec<String>> for Link {
    fn from(pair: Vec<String>) -> Self {
        let mut parts = pair.into_iter();
        Self {
            source: parts.next().unwrap_or_default(),
            target: parts.next().unwrap_or_default(),
        }
    }
}

impl From<Link> for Vec<String> {
    fn from(link: Link) -> Self {
        vec![link.source, link.target]
    }
}

/// Crawler settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Configured links, crawled in order
    pub linked_files: Vec<Link>,
    /// Report a successful crawl
    pub notice: bool,
    /// Document extension (without the dot)
    pub extension: String,
    /// Imports nested deeper than this are left unexpanded
    pub max_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            linked_files: vec![Link::new("Main.md", "Result.md")],
            notice: true,
            extension: DEFAULT_EXTENSION.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Settings {
    /// Append an empty or prefilled link slot
    pub fn add_link(&mut self, link: Link) -> usize {
        self.linked_files.push(link);
        self.linked_files.len() - 1
    }

    /// Update one or both ends of a link
    pub fn set_link(
        &mut self,
        index: usize,
        source: Option<String>,
        target: Option<String>,
    ) -> Result<&Link, SettingsError> {
        let link = self
            .linked_files
            .get_mut(index)
            .ok_or(SettingsError::LinkNotFound(index))?;

        if let Some(s) = source {
            link.source = s;
        }
        if let Some(t) = target {
            link.target = t;
        }
        Ok(link)
    }

    pub fn remove_link(&mut self, index: usize) -> Result<Link, SettingsError> {
        if index >= self.linked_files.len() {
            return Err(SettingsError::LinkNotFound(index));
        }
        Ok(self.linked_files.remove(index))
    }

    /// Resolver options derived from these settings
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            extension: self.extension.clone(),
            max_depth: self.max_depth,
        }
    }

    /// Targets of all complete links, with the extension applied
    pub fn target_references(&self) -> Vec<String> {
        self.linked_files
            .iter()
            .filter(|link| link.is_complete())
            .map(|link| reference::clean(&link.with_extension(&self.extension).target))
            .collect()
    }
}
