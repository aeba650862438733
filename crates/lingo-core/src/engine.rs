//! Quiz round generation and scoring.
//!
//! A round shows one definition and asks the user to pick the matching term
//! among the correct term and up to three distractors. The engine itself is
//! stateless apart from its configuration: the caller owns the
//! [`QuizSession`] and the random source, and passes both in explicitly.
//!
//! Lifecycle: `NoRound --start_round--> RoundActive --submit_answer--> NoRound`.
//! Starting a new round while one is active discards the old round without
//! touching the score; abandoning a question is not penalized.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::QuizError;
use crate::model::{normalize_term, TermStore};

/// Default number of wrong options shown alongside the correct term.
pub const DEFAULT_DISTRACTORS: usize = 3;

/// One question awaiting exactly one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRound {
    correct_term: String,
    definition: String,
    distractors: Vec<String>,
    options: Vec<String>,
}

impl QuizRound {
    pub fn correct_term(&self) -> &str {
        &self.correct_term
    }

    /// Definition of the correct term, captured when the round started.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn distractors(&self) -> &[String] {
        &self.distractors
    }

    /// All options in presentation order.
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// Cumulative score for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    score: u32,
    attempts: u32,
    current_round: Option<QuizRound>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn current_round(&self) -> Option<&QuizRound> {
        self.current_round.as_ref()
    }

    pub fn has_active_round(&self) -> bool {
        self.current_round.is_some()
    }

    /// Fraction of correct answers, `0.0` before the first attempt.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.attempts)
        }
    }

    /// Back to zero counters and no active round.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    /// Always populated so wrong answers can be corrected.
    pub correct_term: String,
}

/// What a presenter needs to render the active round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt<'a> {
    pub definition: &'a str,
    pub options: &'a [String],
}

/// Generates rounds from a [`TermStore`] and scores answers.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    max_distractors: usize,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self {
            max_distractors: DEFAULT_DISTRACTORS,
        }
    }
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use up to `max_distractors` wrong options per round (at least one).
    pub fn with_distractors(max_distractors: usize) -> Self {
        Self {
            max_distractors: max_distractors.max(1),
        }
    }

    pub fn max_distractors(&self) -> usize {
        self.max_distractors
    }

    /// Generate a new round and make it the session's active round.
    ///
    /// The correct term is drawn uniformly from the store, the distractors
    /// uniformly without replacement from the remaining terms, and the
    /// combined options are shuffled. Score and attempts are untouched.
    pub fn start_round<'s, R>(
        &self,
        store: &TermStore,
        session: &'s mut QuizSession,
        rng: &mut R,
    ) -> Result<&'s QuizRound, QuizError>
    where
        R: Rng + ?Sized,
    {
        if store.len() < 2 {
            return Err(QuizError::InsufficientTerms {
                available: store.len(),
            });
        }

        let terms: Vec<&str> = store.terms().collect();
        let correct_idx = rng.gen_range(0..terms.len());
        let correct_term = terms[correct_idx];

        let others: Vec<&str> = terms
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != correct_idx)
            .map(|(_, t)| *t)
            .collect();
        let k = self.max_distractors.min(others.len());
        let distractors: Vec<String> = others
            .choose_multiple(rng, k)
            .map(|t| t.to_string())
            .collect();

        let mut options = distractors.clone();
        options.push(correct_term.to_string());
        options.shuffle(rng);

        let definition = store.get(correct_term).unwrap_or_default().to_string();

        if session.current_round.is_some() {
            debug!("discarding unanswered round");
        }
        debug!(options = options.len(), "started quiz round");

        Ok(session.current_round.insert(QuizRound {
            correct_term: correct_term.to_string(),
            definition,
            distractors,
            options,
        }))
    }

    /// Score `chosen` against the active round and clear it.
    ///
    /// Scoring is exactly-once: a second call without an intervening
    /// [`start_round`](Self::start_round) fails with
    /// [`QuizError::NoActiveRound`].
    pub fn submit_answer(
        &self,
        session: &mut QuizSession,
        chosen: &str,
    ) -> Result<Verdict, QuizError> {
        let round = session
            .current_round
            .take()
            .ok_or(QuizError::NoActiveRound)?;

        let correct = normalize_term(chosen) == round.correct_term;
        session.attempts += 1;
        if correct {
            session.score += 1;
        }
        debug!(
            correct,
            score = session.score,
            attempts = session.attempts,
            "answer submitted"
        );

        Ok(Verdict {
            correct,
            correct_term: round.correct_term,
        })
    }

    /// The active round's definition and options, in their stored order.
    pub fn current_prompt<'s>(&self, session: &'s QuizSession) -> Result<Prompt<'s>, QuizError> {
        let round = session
            .current_round
            .as_ref()
            .ok_or(QuizError::NoActiveRound)?;
        Ok(Prompt {
            definition: &round.definition,
            options: &round.options,
        })
    }
}
