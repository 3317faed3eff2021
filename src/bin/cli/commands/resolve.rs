use anyhow::{Context, Result};

use import_crawler_lib::crawler::Resolver;
use import_crawler_lib::vault::{reference, Vault};

use crate::app::App;
use crate::render::terminal::render_diagnostic;
use crate::OutputFormat;

pub fn run(
    app: &App,
    source: &str,
    output: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let source = reference::with_extension(source, &app.settings.extension);
    let resolver = Resolver::new(&app.vault, app.settings.resolve_options());
    let resolution = resolver
        .resolve(&source)
        .with_context(|| format!("Unable to open source filepath {}", source))?;

    if let Some(target) = output {
        let target = reference::with_extension(target, &app.settings.extension);
        app.vault
            .write_text(&target, &resolution.text)
            .with_context(|| format!("Unable to open target filepath {}", target))?;
        log::info!("Wrote {} bytes to {}", resolution.text.len(), target);
    }

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "source": source,
                "target": output,
                "text": resolution.text,
                "diagnostics": resolution.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if output.is_none() {
                print!("{}", resolution.text);
            }
            for diagnostic in &resolution.diagnostics {
                eprintln!("{}", render_diagnostic(diagnostic, use_color));
            }
        }
    }

    Ok(())
}
