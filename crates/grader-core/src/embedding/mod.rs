//! Embedding + model utilities.
//!
//! - [`TextEmbedder`] is the capability seam the evaluator scores through.
//! - [`minilm`] provides the all-MiniLM-L6-v2 implementation.

mod error;
/// MiniLM sentence embedder.
pub mod minilm;

pub use error::EmbeddingError;
pub use minilm::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder};

/// Maps text to a fixed-length dense vector.
///
/// Implementations must be deterministic and safe for concurrent read-only
/// inference; the evaluator embeds both sides of a comparison through the
/// same instance.
pub trait TextEmbedder {
    /// Encodes `text` into a vector of [`Self::embedding_dim`] floats.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Output dimensionality of [`Self::embed`].
    fn embedding_dim(&self) -> usize;
}

impl<E: TextEmbedder + ?Sized> TextEmbedder for std::sync::Arc<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }
}

impl<E: TextEmbedder + ?Sized> TextEmbedder for &E {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }
}
