//! Core data model types for lingo.
//!
//! A `TermStore` is a flat term → definition mapping. Keys are
//! case-normalized so "Rizz", " rizz " and "rizz" name the same entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Normalize a user-supplied term into its store key.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// A single term and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Case-normalized term.
    pub term: String,
    /// Human-readable definition.
    pub definition: String,
}

/// Mapping from term to definition.
///
/// Backed by an ordered map so that iteration order, and therefore every
/// seeded quiz sequence, is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct TermStore {
    entries: BTreeMap<String, String>,
}

impl TermStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in starter dictionary.
    pub fn with_defaults() -> Self {
        let entries = DEFAULT_TERMS
            .iter()
            .map(|(term, definition)| (term.to_string(), definition.to_string()))
            .collect();
        Self { entries }
    }

    /// Insert or replace a term. Returns the normalized key.
    pub fn insert(&mut self, term: &str, definition: &str) -> Result<String, StoreError> {
        let key = normalize_term(term);
        if key.is_empty() {
            return Err(StoreError::InvalidTerm(term.to_string()));
        }
        self.entries.insert(key.clone(), definition.trim().to_string());
        Ok(key)
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.entries.get(&normalize_term(term)).map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(&normalize_term(term))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All terms in key order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All `(term, definition)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(t, d)| (t.as_str(), d.as_str()))
    }

    /// Owned entries, in key order.
    pub fn entries(&self) -> Vec<TermEntry> {
        self.iter()
            .map(|(term, definition)| TermEntry {
                term: term.to_string(),
                definition: definition.to_string(),
            })
            .collect()
    }
}

impl TryFrom<BTreeMap<String, String>> for TermStore {
    type Error = StoreError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut store = TermStore::new();
        for (term, definition) in &raw {
            store.insert(term, definition)?;
        }
        Ok(store)
    }
}

impl From<TermStore> for BTreeMap<String, String> {
    fn from(store: TermStore) -> Self {
        store.entries
    }
}

impl FromIterator<(String, String)> for TermStore {
    /// Collects pairs, silently skipping terms that normalize to nothing.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .filter_map(|(term, definition)| {
                let key = normalize_term(&term);
                (!key.is_empty()).then(|| (key, definition.trim().to_string()))
            })
            .collect();
        Self { entries }
    }
}

const DEFAULT_TERMS: &[(&str, &str)] = &[
    ("rizz", "Charisma or charm, especially when flirting."),
    ("delulu", "Delusional; having an unrealistic belief."),
    (
        "cap",
        "Lie or falsehood. Saying 'no cap' means you're truthful.",
    ),
    ("bet", "Agreement / confirmation, similar to 'OK'."),
    ("yeet", "To throw something with force; also an exclamation."),
    ("slaps", "Extremely good or enjoyable (music, food)."),
    ("lowkey", "Somewhat; quietly; not wanting attention."),
    ("sigma", "Independent and non-conforming person."),
    ("mid", "Mediocre; neither good nor bad."),
    ("sus", "Suspicious or questionable."),
];
