use anyhow::Result;

use import_crawler_lib::settings::Link;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

fn print_link(number: usize, link: &Link, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "index": number,
                "source": link.source,
                "target": link.target,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("File link {}: {} \u{2192} {}", number, display(&link.source), display(&link.target));
        }
    }
    Ok(())
}

fn display(reference: &str) -> &str {
    if reference.is_empty() {
        "(empty)"
    } else {
        reference
    }
}

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let links = &app.settings.linked_files;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = links
                .iter()
                .enumerate()
                .map(|(i, link)| {
                    serde_json::json!({
                        "index": i + 1,
                        "source": link.source,
                        "target": link.target,
                        "complete": link.is_complete(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if links.is_empty() {
                println!("No file links configured.");
                return Ok(());
            }

            let source_width = links
                .iter()
                .map(|l| display(&l.source).len())
                .max()
                .unwrap_or(6)
                .clamp(6, 50);

            println!("{:<4} {:<sw$} Target", "#", "Source", sw = source_width);
            println!(
                "{} {} {}",
                "\u{2500}".repeat(4),
                "\u{2500}".repeat(source_width),
                "\u{2500}".repeat(6)
            );

            for (i, link) in links.iter().enumerate() {
                let row = format!(
                    "{:<4} {:<sw$} {}",
                    i + 1,
                    display(&link.source),
                    display(&link.target),
                    sw = source_width
                );
                if link.is_complete() {
                    println!("{}", row);
                } else {
                    println!("{}", paint(&row, Color::GRAY, use_color));
                }
            }

            println!(
                "\nNotifications: {}",
                if app.settings.notice { "on" } else { "off" }
            );
        }
    }

    Ok(())
}

pub fn run_add(
    app: &mut App,
    source: Option<String>,
    target: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let link = Link::new(source.unwrap_or_default(), target.unwrap_or_default());
    let index = app.settings.add_link(link);
    app.save_settings()?;

    print_link(index + 1, &app.settings.linked_files[index], format)
}

pub fn run_set(
    app: &mut App,
    number: usize,
    source: Option<String>,
    target: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let index = app.link_index(number)?;
    let link = app.settings.set_link(index, source, target)?.clone();
    app.save_settings()?;

    print_link(number, &link, format)
}

pub fn run_remove(app: &mut App, number: usize, format: &OutputFormat) -> Result<()> {
    let index = app.link_index(number)?;
    let removed = app.settings.remove_link(index)?;
    app.save_settings()?;

    match format {
        OutputFormat::Json => print_link(number, &removed, format),
        OutputFormat::Plain => {
            println!(
                "Removed file link {}: {} \u{2192} {}",
                number,
                display(&removed.source),
                display(&removed.target)
            );
            Ok(())
        }
    }
}
