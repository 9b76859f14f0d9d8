//! orgdrive - provisions organization folder structures in Google Drive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod client;
mod config;
mod error;
mod event;
mod provision;
mod sanitize;
mod server;

use error::Result;

#[derive(Parser)]
#[command(name = "orgdrive", version, about)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Listen port (overrides the PORT environment variable)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Handle a single JSON event and print the response envelope
    Invoke {
        /// Event JSON (reads stdin when neither this nor --file is given)
        event: Option<String>,

        /// Read the event from a file instead
        #[arg(long, conflicts_with = "event")]
        file: Option<PathBuf>,
    },
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or_else(config::port_from_env);
            server::serve(port).await
        }
        Commands::Invoke { event, file } => {
            let raw = match (event, file) {
                (Some(inline), _) => inline,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => std::io::read_to_string(std::io::stdin())?,
            };

            let event: serde_json::Value = serde_json::from_str(&raw)?;
            let response = event::handle_event(event).await;
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Commands::Version => {
            println!("orgdrive version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
