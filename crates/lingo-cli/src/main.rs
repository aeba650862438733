//! lingo CLI: browse, quiz, and ask about slang from the terminal.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "lingo", version, about = "Learn Gen Z slang: browse, quiz, ask")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Term store JSON file (overrides the configured path)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all terms, or show one term
    Learn {
        /// Term to look up
        term: Option<String>,

        /// Ask the AI assistant for more detail
        #[arg(long)]
        explain: bool,
    },

    /// Multiple-choice quiz: pick the term that matches a definition
    Quiz {
        /// Stop after this many answered rounds
        #[arg(long)]
        rounds: Option<u32>,

        /// Seed for a reproducible quiz
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Add a term to the dictionary
    Add {
        /// The slang term
        term: String,

        /// Definition (leave out to have the AI assistant define it)
        #[arg(long)]
        definition: Option<String>,
    },

    /// Ask the AI assistant about slang (interactive without a question)
    Ask {
        /// One-shot question
        question: Option<String>,
    },

    /// Create a starter config and term file
    Init,
}

#[tokio::main]
async fn main() {
    // RUST_LOG replaces the default directive entirely when set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lingo=info")),
        )
        .init();

    let cli = Cli::parse();
    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let context = || AppContext::load(cli.config.as_deref(), cli.store.clone());

    match cli.command {
        Commands::Learn { term, explain } => {
            commands::learn::execute(&context()?, term, explain).await
        }
        Commands::Quiz { rounds, seed } => commands::quiz::execute(&context()?, rounds, seed),
        Commands::Add { term, definition } => {
            commands::add::execute(&context()?, term, definition).await
        }
        Commands::Ask { question } => commands::ask::execute(&context()?, question).await,
        Commands::Init => commands::init::execute(cli.store.clone()),
    }
}
