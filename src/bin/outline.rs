//! outline CLI tool
//!
//! Command-line interface for printing the comment outline of a source file.
//!
//! ## Commands
//!
//! - `parse <file>`: Print the outline once (indented text, or JSON with `--json`)
//! - `watch <file>`: Reprint the outline every time the file is saved (feature `service`)

use clap::{Parser, Subcommand};
use comment_outline::{config::OutlineConfig, provider::OutlineProvider, source::TextDocument};
#[cfg(feature = "service")]
use comment_outline::{event::Event, watch::WatchService};
use std::path::PathBuf;
#[cfg(feature = "service")]
use std::sync::mpsc::channel;

#[derive(Parser)]
#[command(name = "outline")]
#[command(author, version, about = "Print the `#--` comment outline of a source file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file once and print its outline
    Parse {
        /// Path to the source file
        path: PathBuf,

        /// Emit the forest as JSON instead of an indented tree
        #[arg(long)]
        json: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Watch a file and reprint its outline on every save
    #[cfg(feature = "service")]
    Watch {
        /// Path to the source file
        path: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { path, json, config } => {
            let config = OutlineConfig::load_or_default(config.as_deref())?;
            let document = TextDocument::from_path(&path)?;
            let provider = OutlineProvider::with_config(document, &config)?;
            let forest = provider.snapshot();
            if json {
                println!("{}", forest.to_json()?);
            } else if forest.is_empty() {
                eprintln!("No annotations found in {}", path.display());
            } else {
                print!("{forest}");
            }
        }
        #[cfg(feature = "service")]
        Commands::Watch { path, config } => {
            let config = OutlineConfig::load_or_default(config.as_deref())?;
            let (tx, rx) = channel::<Event>();
            let service = WatchService::new(path, &config, tx)?;
            print!("{}", service.snapshot());

            tracing::info!("Watching {:?}, press Ctrl+C to stop", service.path());
            for event in rx {
                if event == Event::ForestChanged {
                    println!("---");
                    print!("{}", service.snapshot());
                }
            }
        }
    }

    Ok(())
}
