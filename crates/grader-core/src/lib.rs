//! Grader library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Question`], [`QuestionStore`] - Question document access
//! - [`AnswerEvaluator`], [`Evaluation`], [`EvaluationStatus`] - Similarity scoring
//!
//! ## Embedding
//! - [`TextEmbedder`] - Capability interface for text-to-vector encoding
//! - [`MiniLmEmbedder`], [`MiniLmConfig`] - all-MiniLM-L6-v2 embedder (supports stub mode)

pub mod config;
pub mod embedding;
pub mod evaluator;
pub mod questions;

pub use config::{Config, ConfigError};
pub use embedding::{
    EmbeddingError, MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder,
    TextEmbedder,
};
pub use evaluator::{
    AnswerEvaluator, DEFAULT_PASS_THRESHOLD, Evaluation, EvaluationStatus, EvaluatorError,
    QuestionEvaluation, cosine_similarity, normalize,
};
pub use questions::{Question, QuestionStore};
