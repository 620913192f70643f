//! Question document access.
//!
//! The store reads a JSON document on every call and tolerates malformed
//! input: anything unreadable loads as an empty list, and malformed items
//! degrade field-by-field instead of failing the load.


use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// A question with its reference answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    /// Question id (`null` when the document omits or mangles it).
    pub id: Option<i64>,
    /// Question text shown to the student.
    pub question: String,
    /// Reference answer the student answer is compared against.
    pub model_answer: String,
}

/// Reads questions from a JSON document.
///
/// Accepts either a top-level array of question objects or an object with a
/// `questions` array. The document is re-read on every call; the store holds
/// no state beyond the path.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    /// Creates a store backed by the document at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all questions. Unreadable or malformed documents load as empty.
    pub fn load(&self) -> Vec<Question> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Question document unreadable");
                return Vec::new();
            }
        };

        let raw = raw.trim();
        if raw.is_empty() {
            return Vec::new();
        }

        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Question document is not valid JSON");
                return Vec::new();
            }
        };

        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("questions") {
                Some(Value::Array(items)) => items,
                _ => {
                    warn!(
                        path = %self.path.display(),
                        "Question document object has no `questions` array"
                    );
                    return Vec::new();
                }
            },
            _ => {
                warn!(path = %self.path.display(), "Question document is not an array or object");
                return Vec::new();
            }
        };

        items.iter().filter_map(parse_question).collect()
    }

    /// Returns the first question whose id matches, or `None`.
    pub fn lookup(&self, id: i64) -> Option<Question> {
        self.load().into_iter().find(|q| q.id == Some(id))
    }

    /// Writes a one-question sample document when the path does not exist.
    ///
    /// Returns `Ok(true)` when the sample was written, `Ok(false)` when a
    /// document was already present.
    pub fn seed_sample(&self) -> std::io::Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        let sample = serde_json::json!({
            "questions": [
                {
                    "id": 1,
                    "question": "What is Machine Learning?",
                    "model_answer": "Machine Learning is a subset of Artificial Intelligence \
                                     that enables systems to learn from data.",
                }
            ]
        });

        // to_string_pretty on a json! literal cannot fail
        let body = serde_json::to_string_pretty(&sample).unwrap_or_default();
        fs::write(&self.path, body)?;

        debug!(path = %self.path.display(), "Wrote sample question document");
        Ok(true)
    }
}

/// Coerces one document item into a [`Question`]. Non-objects are skipped.
fn parse_question(item: &Value) -> Option<Question> {
    let obj = item.as_object()?;

    let id = obj
        .get("id")
        .or_else(|| obj.get("question_id"))
        .and_then(coerce_id);

    Some(Question {
        id,
        question: coerce_string(obj.get("question")),
        model_answer: coerce_string(obj.get("model_answer")),
    })
}

fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
