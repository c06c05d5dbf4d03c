//! gramcheck CLI — the user-facing command-line interface.
//!
//! Running with no subcommand starts the interactive quiz session; the
//! session itself is entirely line-based prompts on stdin/stdout.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gramcheck", version, about = "Interactive command-line grammar quiz")]
struct Cli {
    /// Directory holding questions.json, manifest.json, curriculum
    /// files, and scores.json
    #[arg(long, default_value = ".", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the data files without starting a session
    Validate,
    /// Show recorded last/best scores per set
    Scores,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => commands::play::execute(cli.data_dir),
        Some(Commands::Validate) => commands::validate::execute(cli.data_dir),
        Some(Commands::Scores) => commands::scores::execute(cli.data_dir),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
