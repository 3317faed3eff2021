use anyhow::Result;

use crate::app::App;
use crate::{OutputFormat, Toggle};

pub fn run(app: &mut App, state: Toggle, format: &OutputFormat) -> Result<()> {
    app.settings.notice = matches!(state, Toggle::On);
    app.save_settings()?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "notice": app.settings.notice });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Notifications {}",
                if app.settings.notice { "on" } else { "off" }
            );
        }
    }

    Ok(())
}
