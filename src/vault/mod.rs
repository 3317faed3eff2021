//! Vault module
//!
//! A vault is the hierarchical namespace documents live in. References are
//! `/`-separated paths relative to the vault root.
//! Provides:
//! - The `Vault` storage trait used by the resolver and the crawler
//! - `FileVault` backed by a directory on disk
//! - `MemoryVault` backed by an in-memory map

mod file_vault;
mod memory;
pub mod reference;

pub use file_vault::FileVault;
pub use memory::MemoryVault;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a document: {0}")]
    NotADocument(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;

/// Storage capability the resolver and crawler operate on
pub trait Vault {
    /// Read the full text of a document
    fn read_text(&self, reference: &str) -> Result<String>;

    /// Whether anything (document, directory, asset) exists at the reference
    fn exists(&self, reference: &str) -> bool;

    /// Whether the reference names an existing, readable document
    fn is_document(&self, reference: &str) -> bool;

    /// Create or replace a document
    fn write_text(&self, reference: &str, text: &str) -> Result<()>;

    /// Containing directory of a reference (`""` for the vault root)
    fn parent_dir(&self, reference: &str) -> String {
        reference::parent_of(reference)
    }
}
