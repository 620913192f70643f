use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("question not found: {id}")]
    QuestionNotFound { id: i64 },

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}
