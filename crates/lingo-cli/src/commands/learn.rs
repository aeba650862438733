//! The `lingo learn` command.

use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table};

use lingo_core::{normalize_term, TermStore};

use super::{capitalize, AppContext};

pub async fn execute(ctx: &AppContext, term: Option<String>, explain: bool) -> Result<()> {
    let store = ctx.load_store()?;

    let Some(term) = term else {
        println!("{}", term_table(&store));
        return Ok(());
    };

    let key = normalize_term(&term);
    let Some(definition) = store.get(&key) else {
        anyhow::bail!("unknown term '{key}'. Add it with `lingo add \"{key}\"`");
    };

    println!("{}", capitalize(&key));
    println!("  {definition}");

    if explain {
        if !ctx.assistant.capability().is_enabled() {
            eprintln!("Warning: AI assistant not configured; set OPENAI_API_KEY to unlock explanations.");
            return Ok(());
        }
        match ctx.assistant.define(&key).await {
            Ok(extra) => println!("\n{extra}"),
            Err(e) => eprintln!("Warning: could not fetch more detail: {e}"),
        }
    }

    Ok(())
}

fn term_table(store: &TermStore) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Term", "Definition"]);
    for (term, definition) in store.iter() {
        table.add_row(vec![Cell::new(term), Cell::new(definition)]);
    }
    table
}
