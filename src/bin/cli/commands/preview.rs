use anyhow::{Context, Result};

use import_crawler_lib::crawler::preview_vault;

use crate::app::App;
use crate::render::terminal::{paint, render_diagnostic, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let preview = preview_vault(&app.vault, &app.settings.resolve_options())
        .with_context(|| format!("Failed to scan vault {:?}", app.vault.root()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} documents, {} import lines",
                preview.document_count, preview.directive_count
            );

            if !preview.roots.is_empty() {
                println!("\n{}", paint("Top-level documents", Color::BOLD, use_color));
                for root in &preview.roots {
                    println!("  {}", root);
                }
            }

            if !preview.unresolved.is_empty() {
                println!("\n{}", paint("Unresolved imports", Color::BOLD, use_color));
                for diagnostic in &preview.unresolved {
                    println!("  {}", render_diagnostic(diagnostic, use_color));
                }
            }

            if !preview.cycles.is_empty() {
                println!("\n{}", paint("Import cycles", Color::BOLD, use_color));
                for document in &preview.cycles {
                    println!("  {}", paint(document, Color::YELLOW, use_color));
                }
            }

            if !preview.unreadable.is_empty() {
                println!("\n{}", paint("Unreadable documents", Color::BOLD, use_color));
                for document in &preview.unreadable {
                    println!("  {}", paint(document, Color::RED, use_color));
                }
            }
        }
    }

    Ok(())
}
