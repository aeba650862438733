//! The `lingo add` command.

use anyhow::{Context, Result};

use lingo_core::normalize_term;
use lingo_core::traits::{Assistant, TermRepository};

use super::AppContext;

/// Stored when neither the user nor the assistant supplied a definition.
pub const PLACEHOLDER_DEFINITION: &str = "No definition yet.";

pub async fn execute(ctx: &AppContext, term: String, definition: Option<String>) -> Result<()> {
    let key = normalize_term(&term);
    anyhow::ensure!(!key.is_empty(), "term must not be empty");

    let mut store = ctx.load_store()?;
    let definition = resolve_definition(ctx.assistant.as_ref(), &key, definition).await;
    store.insert(&key, &definition)?;
    ctx.store_file
        .save(&store)
        .with_context(|| format!("could not save {key}"))?;

    println!("Added {key}!");
    Ok(())
}

/// The manual definition if given, else one from the assistant, else a
/// placeholder. Assistant failures are reported but never abort the add.
async fn resolve_definition(
    assistant: &dyn Assistant,
    term: &str,
    manual: Option<String>,
) -> String {
    if let Some(definition) = manual.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()) {
        return definition;
    }

    match assistant.define(term).await {
        Ok(definition) => definition,
        Err(e) => {
            tracing::warn!(term, error = %e, "definition lookup failed");
            eprintln!("Warning: {e}. Saved '{term}' without a definition.");
            PLACEHOLDER_DEFINITION.to_string()
        }
    }
}
