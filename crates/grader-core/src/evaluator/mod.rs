//! Answer scoring via embedding similarity.
//!
//! Both texts are normalized with [`normalize`], embedded through a
//! [`TextEmbedder`], and compared with [`cosine_similarity`]; the score is
//! classified against a caller-supplied threshold. There are no partial
//! results: an evaluation either succeeds with a complete [`Evaluation`]
//! or fails with an [`EvaluatorError`].

pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::EvaluatorError;
pub use types::{Evaluation, EvaluationStatus, QuestionEvaluation};

use tracing::debug;

use crate::embedding::TextEmbedder;
use crate::questions::QuestionStore;

/// Threshold applied when the caller does not supply one.
pub const DEFAULT_PASS_THRESHOLD: f64 = 0.70;

/// Canonicalizes answer text before embedding: lowercase, then collapse
/// every whitespace run to a single space (which also trims the ends).
/// Idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cosine similarity between two vectors, clamped to `[-1, 1]`.
///
/// Mismatched lengths, empty vectors, and zero-norm vectors score `0.0`.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (av, bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

/// Scores student answers against reference answers.
pub struct AnswerEvaluator<E> {
    embedder: E,
}

impl<E: std::fmt::Debug> std::fmt::Debug for AnswerEvaluator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerEvaluator")
            .field("embedder", &self.embedder)
            .finish()
    }
}

impl<E: TextEmbedder> AnswerEvaluator<E> {
    /// Creates an evaluator scoring through `embedder`.
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    /// Returns the embedder.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Scores `student_answer` against `model_answer`.
    ///
    /// The threshold is not validated here; an out-of-range value yields a
    /// valid but degenerate always-pass or always-fail verdict.
    pub fn evaluate(
        &self,
        model_answer: &str,
        student_answer: &str,
        threshold: f64,
    ) -> Result<Evaluation, EvaluatorError> {
        let reference = normalize(model_answer);
        let candidate = normalize(student_answer);

        let reference_embedding = self.embedder.embed(&reference)?;
        let candidate_embedding = self.embedder.embed(&candidate)?;

        let score = f64::from(cosine_similarity(&reference_embedding, &candidate_embedding));

        let similarity_score = round_dp(score, 4);
        let similarity_percentage = round_dp(score * 100.0, 2);

        let status = if similarity_score >= threshold {
            EvaluationStatus::Pass
        } else {
            EvaluationStatus::Fail
        };

        debug!(
            score = similarity_score,
            threshold = threshold,
            status = %status,
            "Answer scored"
        );

        Ok(Evaluation {
            similarity_score,
            similarity_percentage,
            status,
            question_id: None,
        })
    }

    /// Resolves the reference answer through `store` and scores against it.
    ///
    /// An absent id fails with [`EvaluatorError::QuestionNotFound`] before
    /// any embedding work happens.
    pub fn evaluate_by_id(
        &self,
        store: &QuestionStore,
        question_id: i64,
        student_answer: &str,
        threshold: f64,
    ) -> Result<QuestionEvaluation, EvaluatorError> {
        let question = store
            .lookup(question_id)
            .ok_or(EvaluatorError::QuestionNotFound { id: question_id })?;

        let evaluation = self.evaluate(&question.model_answer, student_answer, threshold)?;

        Ok(QuestionEvaluation::new(evaluation, question))
    }
}

fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
