use anyhow::{Context, Result};

use import_crawler_lib::watcher::{should_crawl, VaultWatcher, DEBOUNCE_WINDOW};

use crate::app::App;
use crate::commands::run::{crawl, print_report};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let targets = app.settings.target_references();
    let watcher = VaultWatcher::new(app.vault.root())
        .with_context(|| format!("Failed to watch {:?}", app.vault.root()))?;

    // Bring targets up to date before waiting for edits
    print_report(&crawl(app), format, use_color)?;

    loop {
        let batch = watcher.next_batch(DEBOUNCE_WINDOW)?;
        let changed: Vec<String> = batch
            .iter()
            .filter_map(|path| app.vault.reference_for(path))
            .collect();

        if !should_crawl(&changed, &targets, &app.settings.extension) {
            log::debug!("Ignoring changes: {:?}", changed);
            continue;
        }

        log::info!("Changes detected: {:?}", changed);
        print_report(&crawl(app), format, use_color)?;
    }
}
