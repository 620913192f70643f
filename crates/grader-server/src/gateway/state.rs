use std::sync::Arc;

use tokio::sync::OnceCell;
use tokio::task;
use tracing::info;

use grader::embedding::{EmbeddingError, MiniLmConfig, MiniLmEmbedder};
use grader::questions::QuestionStore;

/// Lazily-loaded process-wide embedder.
///
/// The model is constructed exactly once on first use: concurrent first
/// callers all await the same initialization instead of racing to load the
/// model twice. The blocking weight load runs off the async runtime.
pub struct SharedEmbedder {
    config: MiniLmConfig,
    cell: OnceCell<Arc<MiniLmEmbedder>>,
}

impl SharedEmbedder {
    pub fn new(config: MiniLmConfig) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    /// Returns the embedder, loading it on first call.
    pub async fn get(&self) -> Result<Arc<MiniLmEmbedder>, EmbeddingError> {
        self.cell
            .get_or_try_init(|| async {
                let config = self.config.clone();
                info!("Loading embedding model (first evaluation request)");

                let embedder = task::spawn_blocking(move || MiniLmEmbedder::load(config))
                    .await
                    .map_err(|e| EmbeddingError::ModelLoadFailed {
                        reason: format!("model load task failed: {e}"),
                    })??;

                Ok(Arc::new(embedder))
            })
            .await
            .cloned()
    }

    /// Returns `true` once the model has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Returns `true` if this embedder runs (or would run) in stub mode.
    pub fn is_stub(&self) -> bool {
        match self.cell.get() {
            Some(embedder) => embedder.is_stub(),
            None => self.config.testing_stub,
        }
    }
}

impl std::fmt::Debug for SharedEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEmbedder")
            .field("loaded", &self.is_loaded())
            .field("stub", &self.config.testing_stub)
            .finish()
    }
}

#[derive(Clone)]
pub struct HandlerState {
    pub questions: Arc<QuestionStore>,

    pub embedder: Arc<SharedEmbedder>,

    pub default_threshold: f64,
}

impl HandlerState {
    pub fn new(questions: QuestionStore, embedder_config: MiniLmConfig) -> Self {
        Self {
            questions: Arc::new(questions),
            embedder: Arc::new(SharedEmbedder::new(embedder_config)),
            default_threshold: grader::evaluator::DEFAULT_PASS_THRESHOLD,
        }
    }

    pub fn with_default_threshold(mut self, threshold: f64) -> Self {
        self.default_threshold = threshold;
        self
    }
}
