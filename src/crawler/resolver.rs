//! Recursive import resolution
//!
//! Flattens a document by replacing every import directive with the
//! flattened content of the document it names. Directives that cannot be
//! expanded stay in the output as written; unreadable imports are replaced by
//! an inline error marker. Only a failure to read the root document is
//! returned as an error.

use std::collections::HashSet;

use serde::Serialize;

use crate::vault::{reference, Result, Vault};

use super::directive::{parse_directive, split_lines, Line};
use super::path::locate;

/// Default document extension
pub const DEFAULT_EXTENSION: &str = "md";

/// Default limit on nested imports
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Extension appended to import targets (without the dot)
    pub extension: String,
    /// Imports nested deeper than this are left unexpanded
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Why a directive was not expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Target is not an existing document
    UnresolvedImport,
    /// Target is already being resolved further up the chain
    CycleDetected,
    /// Nesting limit reached
    DepthExceeded,
    /// Target exists but could not be read
    ReadFailed,
}

/// A directive that was left unexpanded or replaced by an error marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Document holding the directive
    pub document: String,
    /// 1-based line number of the directive
    pub line: usize,
    /// Reference the target resolved to
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Flattened text plus everything that did not expand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }
}

/// What a single line contributes to the output
enum LineOutcome {
    /// The line as written
    Passthrough,
    /// The flattened content of an imported document
    Expanded(String),
    /// An inline error marker
    Marker(String),
}

/// Inline marker substituted for an import that could not be read
pub fn read_error_marker(reference: &str, error: &dyn std::fmt::Display) -> String {
    format!(
        "<p style='color: red'>Unable to read file {}: {}</p>",
        reference, error
    )
}

/// Resolves imports against a vault
pub struct Resolver<'a, V: Vault + ?Sized> {
    vault: &'a V,
    options: ResolveOptions,
}

impl<'a, V: Vault + ?Sized> Resolver<'a, V> {
    pub fn new(vault: &'a V, options: ResolveOptions) -> Self {
        Self { vault, options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Flatten a document.
    ///
    /// Fails only when the root document itself cannot be read.
    pub fn resolve(&self, root: &str) -> Result<Resolution> {
        let root = reference::clean(root);
        let content = self.vault.read_text(&root)?;

        let mut active = HashSet::new();
        active.insert(root.clone());

        let mut diagnostics = Vec::new();
        let text = self.expand(&root, &content, &mut active, 0, &mut diagnostics);

        Ok(Resolution { text, diagnostics })
    }

    fn expand(
        &self,
        document: &str,
        content: &str,
        active: &mut HashSet<String>,
        depth: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> String {
        let mut text = String::with_capacity(content.len());

        for (index, line) in split_lines(content).enumerate() {
            let outcome = self.process_line(document, index + 1, line, active, depth, diagnostics);
            append(&mut text, line, outcome);
        }

        text
    }

    fn process_line(
        &self,
        document: &str,
        line_number: usize,
        line: Line<'_>,
        active: &mut HashSet<String>,
        depth: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> LineOutcome {
        let Some(directive) = parse_directive(line.body) else {
            return LineOutcome::Passthrough;
        };

        let target = locate(self.vault, document, directive.target, &self.options.extension);
        let diagnostic = |kind: DiagnosticKind, message: Option<String>| Diagnostic {
            kind,
            document: document.to_string(),
            line: line_number,
            reference: target.clone(),
            message,
        };

        if active.contains(&target) {
            log::warn!("Import cycle: {} line {} re-imports {}", document, line_number, target);
            diagnostics.push(diagnostic(DiagnosticKind::CycleDetected, None));
            return LineOutcome::Passthrough;
        }

        if !self.vault.is_document(&target) {
            log::debug!("Leaving {:?} in {} as is: {} is not a document", line.body, document, target);
            diagnostics.push(diagnostic(DiagnosticKind::UnresolvedImport, None));
            return LineOutcome::Passthrough;
        }

        if depth >= self.options.max_depth {
            log::warn!(
                "Import depth limit {} reached at {} line {}",
                self.options.max_depth,
                document,
                line_number
            );
            diagnostics.push(diagnostic(DiagnosticKind::DepthExceeded, None));
            return LineOutcome::Passthrough;
        }

        match self.vault.read_text(&target) {
            Ok(content) => {
                log::debug!("Expanding {} into {}", target, document);
                active.insert(target.clone());
                let expanded = self.expand(&target, &content, active, depth + 1, diagnostics);
                active.remove(&target);
                LineOutcome::Expanded(expanded)
            }
            Err(e) => {
                log::warn!("Unable to read file {}: {}", target, e);
                diagnostics.push(diagnostic(DiagnosticKind::ReadFailed, Some(e.to_string())));
                LineOutcome::Marker(read_error_marker(&target, &e))
            }
        }
    }
}

fn append(text: &mut String, line: Line<'_>, outcome: LineOutcome) {
    match outcome {
        LineOutcome::Passthrough => {
            text.push_str(line.body);
            text.push_str(line.terminator);
        }
        LineOutcome::Expanded(expanded) => {
            text.push_str(&expanded);
            // Keep the next line on its own line when the import has no final newline
            if !expanded.is_empty() && !expanded.ends_with('\n') {
                text.push_str(line.terminator);
            }
        }
        LineOutcome::Marker(marker) => {
            text.push_str(&marker);
            text.push_str(line.terminator);
        }
    }
}

/// Flatten a document with default options
pub fn resolve<V: Vault + ?Sized>(vault: &V, root: &str) -> Result<Resolution> {
    Resolver::new(vault, ResolveOptions::default()).resolve(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::{MemoryVault, VaultError};

    #[test]
    fn test_flattens_sibling_import() {
        let vault = MemoryVault::with_documents([
            ("Main.md", "Intro\n![x](Sub)\nOutro\n"),
            ("Sub.md", "Body\n"),
        ]);

        let resolution = resolve(&vault, "Main.md").unwrap();
        assert_eq!(resolution.text, "Intro\nBody\nOutro\n");
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_identity_without_directives() {
        let content = "# Title\r\n\nSome [link](Other) and ![inline](img.png) text.\n\nNo final newline";
        let vault = MemoryVault::with_documents([("Plain.md", content)]);

        assert_eq!(resolve(&vault, "Plain.md").unwrap().text, content);
    }

    #[test]
    fn test_angle_brackets_resolve_like_plain_target() {
        let plain = MemoryVault::with_documents([("Main.md", "![x](Sub)\n"), ("Sub.md", "Body\n")]);
        let wrapped = MemoryVault::with_documents([("Main.md", "![x](<Sub>)\n"), ("Sub.md", "Body\n")]);

        assert_eq!(
            resolve(&plain, "Main.md").unwrap().text,
            resolve(&wrapped, "Main.md").unwrap().text
        );
    }

    #[test]
    fn test_nested_imports_relative_to_importer() {
        let vault = MemoryVault::with_documents([
            ("Book.md", "# Book\n![](Chapters/One)\n![](Chapters/Two)\n"),
            ("Chapters/One.md", "One\n![](Parts/A)\n"),
            ("Chapters/Two.md", "Two\n"),
            ("Chapters/Parts/A.md", "Part A\n"),
        ]);

        let resolution = resolve(&vault, "Book.md").unwrap();
        assert_eq!(resolution.text, "# Book\nOne\nPart A\nTwo\n");
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_target_left_verbatim() {
        let vault = MemoryVault::with_documents([("Main.md", "Intro\n![x](Missing)\nOutro\n")]);

        let resolution = resolve(&vault, "Main.md").unwrap();
        assert_eq!(resolution.text, "Intro\n![x](Missing)\nOutro\n");
        assert_eq!(resolution.diagnostics.len(), 1);
        assert_eq!(resolution.diagnostics[0].kind, DiagnosticKind::UnresolvedImport);
        assert_eq!(resolution.diagnostics[0].reference, "Missing.md");
        assert_eq!(resolution.diagnostics[0].line, 2);
    }

    #[test]
    fn test_image_embed_left_verbatim() {
        let vault = MemoryVault::with_documents([
            ("Main.md", "![diagram](diagram.png)\n![folder](Chapters)\n"),
            ("diagram.png", "binary"),
            ("Chapters/One.md", "One\n"),
        ]);

        let resolution = resolve(&vault, "Main.md").unwrap();
        assert_eq!(resolution.text, "![diagram](diagram.png)\n![folder](Chapters)\n");
        assert!(resolution.diagnostics.iter().all(|d| d.kind == DiagnosticKind::UnresolvedImport));
    }

    #[test]
    fn test_cycle_terminates() {
        let vault = MemoryVault::with_documents([
            ("A.md", "A start\n![](B)\nA end\n"),
            ("B.md", "B start\n![](A)\nB end\n"),
        ]);

        let resolution = resolve(&vault, "A.md").unwrap();
        assert_eq!(resolution.text, "A start\nB start\n![](A)\nB end\nA end\n");
        assert!(resolution.has(DiagnosticKind::CycleDetected));
    }

    #[test]
    fn test_self_import_terminates() {
        let vault = MemoryVault::with_documents([("Loop.md", "Before\n![me](Loop)\nAfter\n")]);

        let resolution = resolve(&vault, "Loop.md").unwrap();
        assert_eq!(resolution.text, "Before\n![me](Loop)\nAfter\n");
        assert!(resolution.has(DiagnosticKind::CycleDetected));
    }

    #[test]
    fn test_repeated_import_is_not_a_cycle() {
        let vault = MemoryVault::with_documents([
            ("Main.md", "![](Sig)\n---\n![](Sig)\n"),
            ("Sig.md", "Regards\n"),
        ]);

        let resolution = resolve(&vault, "Main.md").unwrap();
        assert_eq!(resolution.text, "Regards\n---\nRegards\n");
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_depth_limit() {
        let vault = MemoryVault::with_documents([
            ("A.md", "A\n![](B)\n"),
            ("B.md", "B\n![](C)\n"),
            ("C.md", "C\n![](D)\n"),
            ("D.md", "D\n"),
        ]);
        let options = ResolveOptions {
            max_depth: 2,
            ..ResolveOptions::default()
        };

        let resolution = Resolver::new(&vault, options).resolve("A.md").unwrap();
        assert_eq!(resolution.text, "A\nB\nC\n![](D)\n");
        assert!(resolution.has(DiagnosticKind::DepthExceeded));
    }

    #[test]
    fn test_read_failure_marker() {
        let vault = MemoryVault::with_documents([
            ("Main.md", "Intro\n![x](Locked)\nOutro\n"),
            ("Locked.md", "secret"),
        ])
        .mark_unreadable("Locked.md");

        let resolution = resolve(&vault, "Main.md").unwrap();
        assert!(resolution.text.starts_with("Intro\n<p style='color: red'>Unable to read file Locked.md: "));
        assert!(resolution.text.ends_with("</p>\nOutro\n"));
        assert_eq!(resolution.diagnostics[0].kind, DiagnosticKind::ReadFailed);
        assert!(resolution.diagnostics[0].message.is_some());
    }

    #[test]
    fn test_root_read_failure_is_an_error() {
        let vault = MemoryVault::with_documents([("Other.md", "")]);

        assert!(matches!(resolve(&vault, "Main.md"), Err(VaultError::NotFound(_))));
    }

    #[test]
    fn test_import_without_final_newline() {
        let vault = MemoryVault::with_documents([
            ("Main.md", "Intro\n![x](Sub)\nOutro"),
            ("Sub.md", "Body"),
            ("Empty.md", ""),
            ("Last.md", "![x](Sub)"),
            ("Blank.md", "a\n![](Empty)\nb\n"),
        ]);

        assert_eq!(resolve(&vault, "Main.md").unwrap().text, "Intro\nBody\nOutro");
        assert_eq!(resolve(&vault, "Last.md").unwrap().text, "Body");
        assert_eq!(resolve(&vault, "Blank.md").unwrap().text, "a\nb\n");
    }

    #[test]
    fn test_custom_extension() {
        let vault = MemoryVault::new("txt");
        vault.insert("Main.txt", "![](Sub)\n");
        vault.insert("Sub.txt", "Body\n");
        let options = ResolveOptions {
            extension: "txt".to_string(),
            ..ResolveOptions::default()
        };

        let resolution = Resolver::new(&vault, options).resolve("Main.txt").unwrap();
        assert_eq!(resolution.text, "Body\n");
    }

    #[test]
    fn test_deterministic() {
        let vault = MemoryVault::with_documents([
            ("Main.md", "![](A)\n![](B)\n![](Missing)\n"),
            ("A.md", "a\n![](B)\n"),
            ("B.md", "b\n"),
        ]);

        let first = resolve(&vault, "Main.md").unwrap();
        let second = resolve(&vault, "Main.md").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.text, "a\nb\nb\n![](Missing)\n");
    }
}
