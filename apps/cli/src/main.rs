mod commands;
mod script;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "lexoral", about = "Correct transcripts against their alternatives")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank candidate words as completions of a typed prefix
    Rank {
        typed: String,
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Print each candidate's alignment against the typed text to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Load a transcript, replay an editing session and print the result
    Replay {
        #[arg(long)]
        transcript: PathBuf,

        #[arg(long)]
        patches: Option<PathBuf>,

        #[arg(long)]
        script: Option<PathBuf>,

        #[arg(long, env = "LEXORAL_CONFIG")]
        config: Option<PathBuf>,

        /// Print the document frame and exported patches instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Rank {
            typed,
            candidates,
            verbose,
        } => commands::rank::run(&typed, &candidates, verbose),
        Command::Replay {
            transcript,
            patches,
            script,
            config,
            json,
        } => commands::replay::run(commands::replay::Args {
            transcript,
            patches,
            script,
            config,
            json,
        }),
    }
}
