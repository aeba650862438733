//! Subcommand implementations.

pub mod add;
pub mod ask;
pub mod init;
pub mod learn;
pub mod quiz;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lingo_core::store::JsonTermFile;
use lingo_core::traits::Assistant;
use lingo_core::TermStore;
use lingo_providers::config::load_config_from;
use lingo_providers::{create_assistant, LingoConfig};

/// Everything a command needs: configuration, the term file, and the
/// (possibly disabled) assistant.
pub struct AppContext {
    pub config: LingoConfig,
    pub store_file: JsonTermFile,
    pub assistant: Box<dyn Assistant>,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>, store_override: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let store_path = store_override.unwrap_or_else(|| config.store_path.clone());
        let assistant = create_assistant(&config.assistant);
        Ok(Self {
            store_file: JsonTermFile::new(store_path),
            assistant,
            config,
        })
    }

    /// The saved dictionary, or the built-in one if nothing is saved yet.
    pub fn load_store(&self) -> Result<TermStore> {
        self.store_file
            .load_or_default()
            .with_context(|| format!("could not load terms from {}", self.store_file.path().display()))
    }
}

/// "rizz" -> "Rizz"
pub(crate) fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
