//! psyche CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use psyche_core::model::Axis;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "psyche", version, about = "Twelve-question personality quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP quiz server
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Take the quiz in the terminal
    Take {
        /// Base URL of a running psyche server (default: run in-process)
        #[arg(long)]
        server: Option<String>,

        /// Twelve comma-separated ratings instead of interactive input
        #[arg(long)]
        answers: Option<String>,
    },

    /// Score twelve ratings without running a session
    Score {
        /// Twelve comma-separated ratings, 1 to 5
        #[arg(long)]
        answers: String,

        /// Print the profile and narrative as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the question bank
    Questions {
        /// Only show questions for this axis
        #[arg(long)]
        axis: Option<Axis>,
    },

    /// Create a starter psyche.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("psyche=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config, port, bind } => {
            commands::serve::execute(config, port, bind).await
        }
        Commands::Take { server, answers } => commands::take::execute(server, answers).await,
        Commands::Score { answers, json } => commands::score::execute(&answers, json),
        Commands::Questions { axis } => commands::questions::execute(axis),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
