//! The `lingo ask` command: streamed chat with the AI assistant.

use std::io::Write;

use anyhow::Result;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};

use lingo_core::chat::Transcript;
use lingo_core::error::ProviderError;
use lingo_core::traits::Assistant;

use super::AppContext;

pub async fn execute(ctx: &AppContext, question: Option<String>) -> Result<()> {
    let assistant = ctx.assistant.as_ref();
    if !assistant.capability().is_enabled() {
        eprintln!("AI helper unavailable: {}", ProviderError::Unavailable);
        return Ok(());
    }

    let mut transcript = Transcript::default();
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();

    if let Some(question) = question {
        exchange(assistant, &mut transcript, &question, &mut out, &mut err).await?;
        return Ok(());
    }

    println!("Ask anything about slang ('q' to stop).");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("q") || question.eq_ignore_ascii_case("quit") {
            break;
        }
        exchange(assistant, &mut transcript, question, &mut out, &mut err).await?;
    }

    Ok(())
}

/// Ask one question, streaming the reply into `out` as it arrives.
///
/// Assistant failures are written to `err` and leave the transcript
/// untouched; only I/O errors on the writers are returned. Yields whether
/// the exchange completed.
pub async fn exchange<O, E>(
    assistant: &dyn Assistant,
    transcript: &mut Transcript,
    question: &str,
    out: &mut O,
    err: &mut E,
) -> Result<bool>
where
    O: Write,
    E: Write,
{
    let history = transcript.pending(question);

    let mut stream = match assistant.ask(&history).await {
        Ok(stream) => stream,
        Err(e) => {
            report(err, &e)?;
            return Ok(false);
        }
    };

    let mut reply = String::new();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(text) => {
                write!(out, "{text}")?;
                out.flush()?;
                reply.push_str(&text);
            }
            Err(e) => {
                writeln!(out)?;
                report(err, &e)?;
                return Ok(false);
            }
        }
    }
    writeln!(out)?;

    transcript.commit(question, &reply);
    Ok(true)
}

fn report<E: Write>(err: &mut E, error: &ProviderError) -> std::io::Result<()> {
    tracing::warn!(error = %error, "assistant request failed");
    if error.is_authentication() {
        writeln!(err, "AI helper error: {error}. Check OPENAI_API_KEY.")
    } else {
        writeln!(err, "AI helper error: {error}")
    }
}
