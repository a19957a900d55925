use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod exec;

use commands::{run, shell};

#[derive(Parser)]
#[command(name = "twig")]
#[command(version, about = "In-memory branching and history sandbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an interactive shell against a fresh repository
    Shell {
        /// Repository name
        #[arg(short, long, default_value = "sandbox")]
        repo: String,
    },

    /// Execute a command script against a fresh repository
    Run {
        /// Script file, one command per line
        script: PathBuf,

        /// Repository name
        #[arg(short, long, default_value = "sandbox")]
        repo: String,

        /// Print the final repository state as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Shell { repo } => {
            shell::run(repo)?;
        }
        Commands::Run { script, repo, json } => {
            run::run(script, repo, json)?;
        }
    }

    Ok(())
}
