use serde::{Deserialize, Serialize};

use grader::evaluator::{Evaluation, QuestionEvaluation};
use grader::questions::Question;

/// Body of `POST /evaluate`.
///
/// When `question_id` is present the stored reference answer is
/// authoritative and `model_answer` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    pub question_id: Option<i64>,

    /// Reference answer for direct evaluations. Missing is treated as
    /// empty text; the score is then whatever the embedder makes of it.
    #[serde(default)]
    pub model_answer: String,

    pub student_answer: String,

    /// Overrides the server default (0.70). Must be within `[0, 1]`.
    pub pass_threshold: Option<f64>,
}

/// Body of a successful `POST /evaluate` response.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateResponse {
    #[serde(flatten)]
    pub evaluation: Evaluation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_answer: Option<String>,
}

impl EvaluateResponse {
    /// Response for a direct (inline reference answer) evaluation.
    pub fn direct(evaluation: Evaluation) -> Self {
        Self {
            evaluation,
            question_text: None,
            model_answer: None,
        }
    }

    /// Response for an evaluation resolved through the question store.
    pub fn resolved(resolved: QuestionEvaluation) -> Self {
        Self {
            evaluation: resolved.evaluation,
            question_text: Some(resolved.question_text),
            model_answer: Some(resolved.model_answer),
        }
    }
}

/// Body of `GET /questions`.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}
