use anyhow::{bail, Result};

use import_crawler_lib::crawler::{CrawlReport, Crawler};
use import_crawler_lib::notice::ConsoleNotifier;

use crate::app::App;
use crate::render::terminal::{paint, render_diagnostic, status_label, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let report = crawl(app);
    print_report(&report, format, use_color)?;

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{} of {} file links failed", failed, report.links.len());
    }

    Ok(())
}

/// Crawl all configured links, reporting notices on stderr
pub fn crawl(app: &App) -> CrawlReport {
    let notifier = ConsoleNotifier;
    Crawler::new(&app.vault, &notifier, app.settings.clone()).run()
}

pub fn print_report(report: &CrawlReport, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Plain => {
            if report.links.is_empty() {
                println!("No file links configured. Add one with `links add <source> <target>`.");
                return Ok(());
            }

            for link in &report.links {
                println!(
                    "{}. {} \u{2192} {}  {}",
                    link.index,
                    paint(&link.source, Color::BOLD, use_color),
                    link.target,
                    status_label(&link.status, use_color)
                );
                for diagnostic in &link.diagnostics {
                    println!("   {}", render_diagnostic(diagnostic, use_color));
                }
            }

            let elapsed = report.finished_at - report.started_at;
            println!(
                "\n{} of {} file links written in {} ms",
                report.written_count(),
                report.links.len(),
                elapsed.num_milliseconds()
            );
        }
    }

    Ok(())
}
