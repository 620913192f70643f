use serde::{Deserialize, Serialize};

use crate::questions::Question;

/// Pass/fail verdict of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvaluationStatus {
    /// Similarity score reached the threshold.
    Pass,
    /// Similarity score fell short of the threshold.
    Fail,
}

impl EvaluationStatus {
    /// Returns `true` for [`EvaluationStatus::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, EvaluationStatus::Pass)
    }
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationStatus::Pass => write!(f, "PASS"),
            EvaluationStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Scored comparison of a student answer against a reference answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Cosine similarity rounded to 4 decimals.
    pub similarity_score: f64,
    /// `similarity_score * 100` rounded to 2 decimals.
    pub similarity_percentage: f64,
    /// Verdict against the threshold.
    pub status: EvaluationStatus,
    /// Question id echoed from the request (`null` for direct evaluations).
    pub question_id: Option<i64>,
}

/// An [`Evaluation`] resolved through the question store, carrying the
/// question it was scored against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionEvaluation {
    /// The scored comparison.
    #[serde(flatten)]
    pub evaluation: Evaluation,
    /// Text of the resolved question.
    pub question_text: String,
    /// Reference answer the student answer was compared against.
    pub model_answer: String,
}

impl QuestionEvaluation {
    /// Attaches the resolved question to an evaluation.
    pub fn new(mut evaluation: Evaluation, question: Question) -> Self {
        evaluation.question_id = question.id;
        Self {
            evaluation,
            question_text: question.question,
            model_answer: question.model_answer,
        }
    }
}
