//! The `lingo init` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use lingo_core::store::{JsonTermFile, DEFAULT_STORE_FILE};
use lingo_core::traits::TermRepository;
use lingo_core::TermStore;

pub fn execute(store_path: Option<PathBuf>) -> Result<()> {
    if Path::new("lingo.toml").exists() {
        println!("lingo.toml already exists, skipping.");
    } else {
        std::fs::write("lingo.toml", SAMPLE_CONFIG)?;
        println!("Created lingo.toml");
    }

    let store_path = store_path.unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));
    if store_path.exists() {
        println!("{} already exists, skipping.", store_path.display());
    } else {
        JsonTermFile::new(&store_path).save(&TermStore::with_defaults())?;
        println!("Created {}", store_path.display());
    }

    println!("\nNext steps:");
    println!("  1. Export OPENAI_API_KEY (or edit lingo.toml) to unlock AI features");
    println!("  2. Run: lingo learn");
    println!("  3. Run: lingo quiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lingo configuration

store_path = "slang.json"

[assistant]
type = "openai"
api_key = "${OPENAI_API_KEY}"
model = "gpt-4o-mini"

[quiz]
distractors = 3
"#;
