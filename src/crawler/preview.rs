//! Vault preview
//!
//! Scans a vault without writing anything and reports how its documents
//! import each other.

use std::collections::BTreeSet;

use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::vault::{reference, FileVault, Result, Vault, VaultError};

use super::directive::{parse_directive, split_lines};
use super::path::locate;
use super::resolver::{Diagnostic, DiagnosticKind, ResolveOptions, Resolver};

/// Preview metadata for a vault
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultPreview {
    /// Number of documents found
    pub document_count: usize,
    /// Number of import directive lines across all documents
    pub directive_count: usize,
    /// Directives whose target is not a document
    pub unresolved: Vec<Diagnostic>,
    /// Documents whose resolution runs into an import cycle
    pub cycles: Vec<String>,
    /// Documents that could not be read
    pub unreadable: Vec<String>,
    /// Documents with imports that nothing else imports
    pub roots: Vec<String>,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// All document references in a vault, sorted, skipping hidden folders
pub fn list_documents(vault: &FileVault) -> Vec<String> {
    WalkDir::new(vault.root())
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| vault.reference_for(e.path()))
        .filter(|r| reference::has_extension(r, vault.extension()))
        .collect()
}

/// Preview a vault without writing
pub fn preview_vault(vault: &FileVault, options: &ResolveOptions) -> Result<VaultPreview> {
    if !vault.root().is_dir() {
        return Err(VaultError::NotFound(vault.root().to_string_lossy().to_string()));
    }

    let resolver = Resolver::new(vault, options.clone());
    let documents = list_documents(vault);

    let mut preview = VaultPreview {
        document_count: documents.len(),
        ..VaultPreview::default()
    };
    let mut importers: BTreeSet<String> = BTreeSet::new();
    let mut imported: BTreeSet<String> = BTreeSet::new();

    for document in &documents {
        let content = match vault.read_text(document) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping {} in preview: {}", document, e);
                preview.unreadable.push(document.clone());
                continue;
            }
        };

        for line in split_lines(&content) {
            if let Some(directive) = parse_directive(line.body) {
                preview.directive_count += 1;
                importers.insert(document.clone());

                let target = locate(vault, document, directive.target, &options.extension);
                if vault.is_document(&target) {
                    imported.insert(target);
                }
            }
        }

        if !importers.contains(document) {
            continue;
        }

        let resolution = match resolver.resolve(document) {
            Ok(resolution) => resolution,
            Err(e) => {
                log::warn!("Skipping {} in preview: {}", document, e);
                preview.unreadable.push(document.clone());
                continue;
            }
        };

        if resolution.has(DiagnosticKind::CycleDetected) {
            preview.cycles.push(document.clone());
        }

        // Nested documents report their own unresolved imports
        preview.unresolved.extend(
            resolution
                .diagnostics
                .into_iter()
                .filter(|d| d.kind == DiagnosticKind::UnresolvedImport && &d.document == document),
        );
    }

    preview.roots = importers.difference(&imported).cloned().collect();

    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, reference: &str, content: &str) {
        let path = dir.path().join(reference);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_list_documents_skips_hidden() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "Main.md", "");
        write(&temp_dir, "Notes/Sub.md", "");
        write(&temp_dir, "Notes/diagram.png", "");
        write(&temp_dir, ".obsidian/plugins/import-crawler/data.json", "{}");
        write(&temp_dir, ".trash/Old.md", "");

        let vault = FileVault::new(temp_dir.path().to_path_buf(), "md");
        assert_eq!(list_documents(&vault), vec!["Main.md", "Notes/Sub.md"]);
    }

    #[test]
    fn test_preview_vault() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "Book.md", "# Book\n![](Chapters/One)\n![](Chapters/Missing)\n");
        write(&temp_dir, "Chapters/One.md", "One\n![](Two)\n![img](figure.png)\n");
        write(&temp_dir, "Chapters/Two.md", "Two\n![](One)\n");
        write(&temp_dir, "Loose.md", "Nothing to import\n");

        let vault = FileVault::new(temp_dir.path().to_path_buf(), "md");
        let preview = preview_vault(&vault, &ResolveOptions::default()).unwrap();

        assert_eq!(preview.document_count, 4);
        assert_eq!(preview.directive_count, 5);
        assert_eq!(preview.roots, vec!["Book.md"]);
        assert_eq!(preview.cycles, vec!["Book.md", "Chapters/One.md", "Chapters/Two.md"]);

        let unresolved: Vec<(&str, &str)> = preview
            .unresolved
            .iter()
            .map(|d| (d.document.as_str(), d.reference.as_str()))
            .collect();
        assert_eq!(
            unresolved,
            vec![
                ("Book.md", "Chapters/Missing.md"),
                ("Chapters/One.md", "Chapters/figure.png.md"),
            ]
        );
    }

    #[test]
    fn test_preview_missing_vault() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileVault::new(temp_dir.path().join("nope"), "md");

        assert!(preview_vault(&vault, &ResolveOptions::default()).is_err());
    }
}
