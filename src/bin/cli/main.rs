mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "import-crawler",
    about = "Flatten Markdown documents by inlining their ![](imports)",
    version
)]
struct Cli {
    /// Vault root directory
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    /// Settings file (default: <vault>/.obsidian/plugins/import-crawler/data.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
enum Command {
    /// Flatten every configured file link (default)
    Run,

    /// Flatten a single document and print the result
    Resolve {
        /// Source document reference, relative to the vault root
        source: String,
        /// Write to this vault reference instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// Manage source/target file links
    #[command(subcommand)]
    Links(LinksCommand),

    /// Turn the success notification on or off
    Notice {
        state: Toggle,
    },

    /// Report documents, imports, unresolved imports and cycles
    Preview,

    /// Rerun the crawl whenever a document changes
    Watch,
}

#[derive(Subcommand)]
enum LinksCommand {
    /// List configured file links
    List,

    /// Add a file link (empty slots are allowed and skipped by the crawl)
    Add {
        /// Source document
        source: Option<String>,
        /// Target document
        target: Option<String>,
    },

    /// Change the source or target of a file link
    Set {
        /// File link number as shown by `links list`
        index: usize,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        target: Option<String>,
    },

    /// Remove a file link
    Remove {
        /// File link number as shown by `links list`
        index: usize,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_color = !cli.no_color && atty_check();
    let mut app = app::App::new(&cli.vault, cli.settings.clone())?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            commands::run::run(&app, &cli.format, use_color)?;
        }
        Command::Resolve { source, output } => {
            commands::resolve::run(&app, &source, output.as_deref(), &cli.format, use_color)?;
        }
        Command::Links(subcmd) => match subcmd {
            LinksCommand::List => {
                commands::links::run_list(&app, &cli.format, use_color)?;
            }
            LinksCommand::Add { source, target } => {
                commands::links::run_add(&mut app, source, target, &cli.format)?;
            }
            LinksCommand::Set { index, source, target } => {
                commands::links::run_set(&mut app, index, source, target, &cli.format)?;
            }
            LinksCommand::Remove { index } => {
                commands::links::run_remove(&mut app, index, &cli.format)?;
            }
        },
        Command::Notice { state } => {
            commands::notice::run(&mut app, state, &cli.format)?;
        }
        Command::Preview => {
            commands::preview::run(&app, &cli.format, use_color)?;
        }
        Command::Watch => {
            commands::watch::run(&app, &cli.format, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
