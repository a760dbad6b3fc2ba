//! Book catalog.
//!
//! Identifiers are assigned from catalog position exactly once, when the
//! catalog is loaded. A `Catalog` is read-only afterwards.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::score::{question_key, ScoreRecord, ScoreValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(usize);

impl BookId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer: usize,
}

impl Question {
    pub fn new(prompt: &str, choices: &[&str], answer: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            answer,
        }
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }
}

/// A catalog entry as authored, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub summary: String,
    /// Markdown body.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub url: String,
    pub summary: String,
    pub content: String,
    pub questions: Vec<Question>,
}

impl Book {
    pub fn question_key(&self, index: usize) -> String {
        question_key(self.id, index)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<BookEntry> = serde_json::from_str(raw)?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<BookEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut books = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let url = normalize_url(&entry.url);
            if !url.starts_with('/') || url == "/" {
                return Err(CatalogError::InvalidUrl {
                    title: entry.title,
                    url: entry.url,
                });
            }
            if !seen.insert(url.clone()) {
                return Err(CatalogError::DuplicateUrl { url });
            }
            for (q, question) in entry.questions.iter().enumerate() {
                if question.answer >= question.choices.len() {
                    return Err(CatalogError::AnswerOutOfRange {
                        title: entry.title,
                        question: q,
                        answer: question.answer,
                        choices: question.choices.len(),
                    });
                }
            }

            books.push(Book {
                id: BookId(index),
                title: entry.title,
                url,
                summary: entry.summary,
                content: entry.content,
                questions: entry.questions,
            });
        }

        debug!(books = books.len(), "catalog loaded");
        Ok(Self { books })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// A zeroed entry for every question of every book.
    pub fn default_score(&self) -> ScoreRecord {
        self.books
            .iter()
            .flat_map(|book| {
                (0..book.questions.len()).map(move |q| (book.question_key(q), ScoreValue::default()))
            })
            .collect()
    }
}

fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.len() > 1 {
        trimmed.trim_end_matches('/').to_string()
    } else {
        trimmed.to_string()
    }
}
