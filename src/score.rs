//! Score record and the pure operations on it.
//!
//! A record maps a question key (`"<book id>:<question index>"`) to either a
//! number or a boolean. Every operation here returns a full replacement record;
//! committing and persisting it is the shell's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::{Book, BookId};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Flag(bool),
    Points(f64),
}

/// Largest integer an f64 holds exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

impl ScoreValue {
    /// A boolean is an answer; so is any positive point count.
    pub fn is_answered(self) -> bool {
        match self {
            ScoreValue::Flag(_) => true,
            ScoreValue::Points(p) => p > 0.0,
        }
    }

    /// JSON has no encoding for NaN or infinities.
    pub fn is_finite(self) -> bool {
        match self {
            ScoreValue::Flag(_) => true,
            ScoreValue::Points(p) => p.is_finite(),
        }
    }

    pub fn is_correct(self) -> bool {
        match self {
            ScoreValue::Flag(b) => b,
            ScoreValue::Points(p) => p > 0.0,
        }
    }
}

impl Serialize for ScoreValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            ScoreValue::Flag(b) => serializer.serialize_bool(b),
            ScoreValue::Points(p) if p.fract() == 0.0 && p.abs() <= MAX_EXACT_INT => {
                serializer.serialize_i64(p as i64)
            }
            ScoreValue::Points(p) => serializer.serialize_f64(p),
        }
    }
}

impl Default for ScoreValue {
    fn default() -> Self {
        ScoreValue::Points(0.0)
    }
}

impl From<bool> for ScoreValue {
    fn from(b: bool) -> Self {
        ScoreValue::Flag(b)
    }
}

impl From<f64> for ScoreValue {
    fn from(p: f64) -> Self {
        ScoreValue::Points(p)
    }
}

pub fn question_key(book: BookId, question: usize) -> String {
    format!("{}:{}", book.index(), question)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreRecord(BTreeMap<String, ScoreValue>);

impl ScoreRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<ScoreValue> {
        self.0.get(key).copied()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ScoreValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ScoreValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Returns a copy of this record with `key` set to the outcome of an answer.
    pub fn record_answer(&self, key: &str, correct: bool) -> ScoreRecord {
        let mut next = self.clone();
        next.insert(key, correct);
        next
    }

    pub fn progress_for(&self, book: &Book) -> BookProgress {
        let mut progress = BookProgress {
            total: book.questions.len(),
            ..BookProgress::default()
        };
        for index in 0..book.questions.len() {
            let Some(value) = self.get(&question_key(book.id, index)) else {
                continue;
            };
            if value.is_answered() {
                progress.answered += 1;
            }
            if value.is_correct() {
                progress.correct += 1;
            }
        }
        progress
    }
}

impl<K: Into<String>, V: Into<ScoreValue>> FromIterator<(K, V)> for ScoreRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Merges a persisted record over the freshly built default.
///
/// Keys from both sides survive; the persisted value wins on conflict.
pub fn reconcile(persisted: Option<&ScoreRecord>, default: &ScoreRecord) -> ScoreRecord {
    let mut merged = default.clone();
    if let Some(persisted) = persisted {
        for (key, value) in &persisted.0 {
            merged.0.insert(key.clone(), *value);
        }
    }
    merged
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookProgress {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
}

impl BookProgress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.answered >= self.total
    }
}
