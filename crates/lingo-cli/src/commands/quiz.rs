//! The `lingo quiz` command: a line-oriented presenter for the quiz engine.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use lingo_core::{QuizEngine, QuizError, QuizSession, TermStore};

use super::AppContext;

pub fn execute(ctx: &AppContext, rounds: Option<u32>, seed: Option<u64>) -> Result<()> {
    let store = ctx.load_store()?;
    let engine = QuizEngine::with_distractors(ctx.config.quiz.distractors);
    let mut rng = match seed.or(ctx.config.quiz.seed) {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut session = QuizSession::new();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_quiz(
        &engine,
        &store,
        &mut session,
        &mut rng,
        rounds,
        stdin.lock(),
        &mut stdout,
    )
}

/// Drive rounds until `rounds` answers are in, the user quits, or input ends.
///
/// Answers are an option number or the term itself. Input that is neither
/// re-displays the same round without scoring it.
pub fn run_quiz<R, I, O>(
    engine: &QuizEngine,
    store: &TermStore,
    session: &mut QuizSession,
    rng: &mut R,
    rounds: Option<u32>,
    mut input: I,
    out: &mut O,
) -> Result<()>
where
    R: Rng + ?Sized,
    I: BufRead,
    O: Write,
{
    writeln!(out, "Quiz time! Answer with a number or the term, 'q' to stop.")?;

    loop {
        if rounds.is_some_and(|max| session.attempts() >= max) {
            break;
        }

        if !session.has_active_round() {
            engine
                .start_round(store, session, rng)
                .map_err(|e| match e {
                    QuizError::InsufficientTerms { .. } => {
                        anyhow::anyhow!("{e}. Add more with `lingo add`")
                    }
                    other => other.into(),
                })?;
        }

        let prompt = engine.current_prompt(session)?;
        let options = prompt.options.to_vec();
        writeln!(out, "\nDefinition: {}", prompt.definition)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(out, "  {}) {option}", i + 1)?;
        }
        write!(out, "Which term matches? ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read answer")? == 0 {
            writeln!(out)?;
            break;
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
            break;
        }

        let Some(choice) = pick_option(&options, answer) else {
            writeln!(
                out,
                "Pick a number from 1 to {} or type one of the terms.",
                options.len()
            )?;
            continue;
        };

        let verdict = engine.submit_answer(session, &choice)?;
        if verdict.correct {
            writeln!(out, "Correct! 🎉")?;
        } else {
            writeln!(out, "Nope. It was {}.", verdict.correct_term)?;
        }
        writeln!(out, "Score: {} / {}", session.score(), session.attempts())?;
    }

    writeln!(
        out,
        "Final score: {} / {} ({:.0}%)",
        session.score(),
        session.attempts(),
        session.accuracy() * 100.0
    )?;
    Ok(())
}

/// Map raw input onto one of the displayed options.
///
/// A typed term wins over an option number, so numeric terms stay answerable.
fn pick_option(options: &[String], answer: &str) -> Option<String> {
    if answer.is_empty() {
        return None;
    }
    if let Some(option) = options.iter().find(|o| o.eq_ignore_ascii_case(answer)) {
        return Some(option.clone());
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .cloned()
}
