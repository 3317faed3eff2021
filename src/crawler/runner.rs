//! Crawl orchestration
//!
//! Flattens the source of every configured link and writes the result to
//! its target. Links run one after another in configured order; a failing
//! link is reported and the crawl moves on to the next one.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::notice::{Notice, Notifier};
use crate::settings::{Link, Settings};
use crate::vault::{reference, Vault, VaultError};

use super::resolver::{Diagnostic, Resolver};

/// What happened to a single link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum LinkStatus {
    /// Source or target left empty
    Skipped,
    /// Target written
    Written { bytes: usize },
    /// Source missing or unreadable
    SourceUnreadable { error: String },
    /// Target could not be written
    TargetUnwritable { error: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    /// 1-based position in the settings
    pub index: usize,
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub status: LinkStatus,
    pub diagnostics: Vec<Diagnostic>,
}

impl LinkReport {
    pub fn is_failure(&self) -> bool {
        matches!(
            self.status,
            LinkStatus::SourceUnreadable { .. } | LinkStatus::TargetUnwritable { .. }
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub links: Vec<LinkReport>,
}

impl CrawlReport {
    /// No link failed
    pub fn succeeded(&self) -> bool {
        !self.links.iter().any(LinkReport::is_failure)
    }

    pub fn failures(&self) -> impl Iterator<Item = &LinkReport> {
        self.links.iter().filter(|l| l.is_failure())
    }

    pub fn written_count(&self) -> usize {
        self.links
            .iter()
            .filter(|l| matches!(l.status, LinkStatus::Written { .. }))
            .count()
    }
}

/// Runs the configured links against a vault
pub struct Crawler<'a, V: Vault + ?Sized, N: Notifier + ?Sized> {
    vault: &'a V,
    notifier: &'a N,
    settings: Settings,
}

impl<'a, V: Vault + ?Sized, N: Notifier + ?Sized> Crawler<'a, V, N> {
    pub fn new(vault: &'a V, notifier: &'a N, settings: Settings) -> Self {
        Self {
            vault,
            notifier,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Crawl every link.
    ///
    /// Each failing link produces one failure notice. A single success notice
    /// follows when nothing failed and notices are enabled.
    pub fn run(&self) -> CrawlReport {
        let started_at = Utc::now();
        let resolver = Resolver::new(self.vault, self.settings.resolve_options());

        let mut links = Vec::with_capacity(self.settings.linked_files.len());
        for (index, link) in self.settings.linked_files.iter().enumerate() {
            let report = self.run_link(&resolver, index + 1, link);

            match &report.status {
                LinkStatus::SourceUnreadable { error } => {
                    log::warn!("File link {}: unable to read {}: {}", report.index, report.source, error);
                    self.notifier.notify(&Notice::SourceUnreadable(report.source.clone()));
                }
                LinkStatus::TargetUnwritable { error } => {
                    log::warn!("File link {}: unable to write {}: {}", report.index, report.target, error);
                    self.notifier.notify(&Notice::TargetUnwritable(report.target.clone()));
                }
                LinkStatus::Written { bytes } => {
                    log::info!("File link {}: wrote {} bytes to {}", report.index, bytes, report.target);
                }
                LinkStatus::Skipped => {
                    log::debug!("File link {} is incomplete, skipping", report.index);
                }
            }

            links.push(report);
        }

        let report = CrawlReport {
            started_at,
            finished_at: Utc::now(),
            links,
        };

        if report.succeeded() && self.settings.notice {
            self.notifier.notify(&Notice::Updated);
        }

        report
    }

    /// Flatten one link's source into its target
    pub fn run_link(&self, resolver: &Resolver<'_, V>, index: usize, link: &Link) -> LinkReport {
        let report = |link: &Link, status: LinkStatus, diagnostics: Vec<Diagnostic>| LinkReport {
            index,
            source: link.source.clone(),
            target: link.target.clone(),
            status,
            diagnostics,
        };

        if !link.is_complete() {
            return report(link, LinkStatus::Skipped, Vec::new());
        }

        let link = link.with_extension(&self.settings.extension);
        let source = reference::clean(&link.source);
        let target = reference::clean(&link.target);

        if !self.vault.is_document(&source) {
            let error = VaultError::NotFound(source).to_string();
            return report(&link, LinkStatus::SourceUnreadable { error }, Vec::new());
        }

        let resolution = match resolver.resolve(&source) {
            Ok(resolution) => resolution,
            Err(e) => {
                let error = e.to_string();
                return report(&link, LinkStatus::SourceUnreadable { error }, Vec::new());
            }
        };

        // Written only after the whole source has been flattened
        match self.vault.write_text(&target, &resolution.text) {
            Ok(()) => {
                let bytes = resolution.text.len();
                report(&link, LinkStatus::Written { bytes }, resolution.diagnostics)
            }
            Err(e) => {
                let error = e.to_string();
                report(&link, LinkStatus::TargetUnwritable { error }, resolution.diagnostics)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::RecordingNotifier;
    use crate::vault::MemoryVault;

    fn settings_with(links: Vec<Link>) -> Settings {
        Settings {
            linked_files: links,
            ..Settings::default()
        }
    }

    #[test]
    fn test_default_link() {
        let vault = MemoryVault::with_documents([
            ("Main.md", "Intro\n![x](Sub)\nOutro\n"),
            ("Sub.md", "Body\n"),
        ]);
        let notifier = RecordingNotifier::new();

        let report = Crawler::new(&vault, &notifier, Settings::default()).run();

        assert!(report.succeeded());
        assert_eq!(report.written_count(), 1);
        assert_eq!(vault.get("Result.md").as_deref(), Some("Intro\nBody\nOutro\n"));
        assert_eq!(notifier.notices(), vec![Notice::Updated]);
    }

    #[test]
    fn test_extension_suffix_and_skipped_links() {
        let vault = MemoryVault::with_documents([("Book.md", "Text\n")]);
        let notifier = RecordingNotifier::new();
        let settings = settings_with(vec![
            Link::new("", "Nowhere"),
            Link::new("Book", "Flat"),
            Link::new("Book", ""),
        ]);

        let report = Crawler::new(&vault, &notifier, settings.clone()).run();

        assert_eq!(report.links[0].status, LinkStatus::Skipped);
        assert_eq!(report.links[1].source, "Book.md");
        assert_eq!(report.links[1].target, "Flat.md");
        assert_eq!(report.links[2].status, LinkStatus::Skipped);
        assert_eq!(vault.get("Flat.md").as_deref(), Some("Text\n"));
        assert!(vault.get("Nowhere.md").is_none());
        assert_eq!(notifier.notices(), vec![Notice::Updated]);

        // Settings themselves are left as configured
        assert_eq!(settings.linked_files[1], Link::new("Book", "Flat"));
    }

    #[test]
    fn test_failures_do_not_stop_other_links() {
        let vault = MemoryVault::with_documents([
            ("Good.md", "Good\n"),
            ("Dir.md/Inner.md", ""),
            ("Locked.md", "secret"),
        ])
        .mark_unreadable("Locked.md");
        let notifier = RecordingNotifier::new();
        let settings = settings_with(vec![
            Link::new("Missing", "Out1"),
            Link::new("Good", "Dir"),
            Link::new("Locked", "Out3"),
            Link::new("Good", "Out4"),
        ]);

        let report = Crawler::new(&vault, &notifier, settings).run();

        assert!(!report.succeeded());
        assert_eq!(report.failures().count(), 3);
        assert!(matches!(report.links[0].status, LinkStatus::SourceUnreadable { .. }));
        assert!(matches!(report.links[1].status, LinkStatus::TargetUnwritable { .. }));
        assert!(matches!(report.links[2].status, LinkStatus::SourceUnreadable { .. }));
        assert_eq!(vault.get("Out4.md").as_deref(), Some("Good\n"));
        assert_eq!(
            notifier.notices(),
            vec![
                Notice::SourceUnreadable("Missing.md".to_string()),
                Notice::TargetUnwritable("Dir.md".to_string()),
                Notice::SourceUnreadable("Locked.md".to_string()),
            ]
        );
    }

    #[test]
    fn test_unwritable_target() {
        let vault = MemoryVault::with_documents([("Main.md", "Main\n"), ("Out.md/nested.md", "")]);
        let notifier = RecordingNotifier::new();
        let settings = settings_with(vec![Link::new("Main", "Out")]);

        let report = Crawler::new(&vault, &notifier, settings).run();

        assert!(matches!(report.links[0].status, LinkStatus::TargetUnwritable { .. }));
        assert_eq!(
            notifier.notices(),
            vec![Notice::TargetUnwritable("Out.md".to_string())]
        );
    }

    #[test]
    fn test_notice_disabled() {
        let vault = MemoryVault::with_documents([("Main.md", "Main\n")]);
        let notifier = RecordingNotifier::new();
        let settings = Settings {
            notice: false,
            ..Settings::default()
        };

        let report = Crawler::new(&vault, &notifier, settings).run();

        assert!(report.succeeded());
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_report_carries_diagnostics() {
        let vault = MemoryVault::with_documents([("Main.md", "![](A)\n"), ("A.md", "![](Main)\n")]);
        let notifier = RecordingNotifier::new();

        let report = Crawler::new(&vault, &notifier, Settings::default()).run();

        assert!(report.succeeded());
        assert_eq!(report.links[0].diagnostics.len(), 1);
        assert_eq!(vault.get("Result.md").as_deref(), Some("![](Main)\n"));
    }
}
