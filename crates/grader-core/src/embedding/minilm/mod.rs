//! MiniLM sentence embedder (BERT safetensors + tokenizer).
//!
//! Use [`MiniLmConfig::stub`] for tests/examples without model files.

/// MiniLM configuration.
pub mod config;


pub use config::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tracing::{debug, info, warn};

use crate::embedding::TextEmbedder;
use crate::embedding::error::EmbeddingError;

enum EmbedderBackend {
    Model {
        model: BertModel,
        tokenizer: Box<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Sentence embedder for answer comparison (supports stub mode).
pub struct MiniLmEmbedder {
    backend: EmbedderBackend,
    config: MiniLmConfig,
}

impl std::fmt::Debug for MiniLmEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl MiniLmEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: MiniLmConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("MiniLM embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let device = select_device();

        if !config.model_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_dir.clone(),
            });
        }

        let (model, tokenizer) = Self::load_model(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "MiniLM model loaded successfully"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model,
                tokenizer: Box::new(tokenizer),
                device,
            },
            config,
        })
    }

    fn load_model(
        config: &MiniLmConfig,
        device: &Device,
    ) -> Result<(BertModel, tokenizers::Tokenizer), EmbeddingError> {
        let config_content = std::fs::read_to_string(config.config_path())?;
        let bert_config: BertConfig = serde_json::from_str(&config_content).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("failed to parse model config: {e}"),
            }
        })?;

        if config.embedding_dim > bert_config.hidden_size {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) exceeds model hidden_size ({})",
                    config.embedding_dim, bert_config.hidden_size
                ),
            });
        }

        // SAFETY: the weights file is mmapped read-only and outlives the VarBuilder.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[config.weights_path()], DType::F32, device)?
        };

        // Sentence-transformers checkpoints store tensors unprefixed; HF
        // classifier exports nest them under "bert".
        let model = if vb.contains_tensor("embeddings.word_embeddings.weight") {
            BertModel::load(vb, &bert_config)
        } else {
            BertModel::load(vb.pp("bert"), &bert_config)
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to load BERT weights: {e}"),
        })?;

        let tokenizer = tokenizers::Tokenizer::from_file(config.tokenizer_path()).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("failed to load tokenizer: {e}"),
            }
        })?;

        Ok((model, tokenizer))
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertModel,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        if tokens.len() > self.config.max_seq_len {
            tokens.truncate(self.config.max_seq_len);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating embedding (encoder forward pass)"
        );

        // Input tensors: [1, seq_len]
        let input_ids = Tensor::new(&tokens[..], device)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("failed to create input tensor: {e}"),
            })?
            .unsqueeze(0)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("failed to unsqueeze input: {e}"),
            })?;
        let token_type_ids =
            Tensor::zeros((1, tokens.len()), DType::U32, device).map_err(|e| {
                EmbeddingError::InferenceFailed {
                    reason: format!("failed to create token type tensor: {e}"),
                }
            })?;

        // hidden_states shape: [1, seq_len, hidden_size]
        let hidden_states = model
            .forward(&input_ids, &token_type_ids, None)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("encoder forward pass failed: {e}"),
            })?;

        // Mean pooling over the sequence dimension.
        let mut pooled = hidden_states
            .mean(1)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("failed to pool hidden states: {e}"),
            })?;

        pooled.truncate(self.config.embedding_dim);
        Ok(l2_normalize(pooled))
    }

    // Token-frequency hashing keeps identical texts identical and disjoint
    // texts near-orthogonal, which is enough for tests without model files.
    fn embed_stub(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let mut embedding = vec![0.0f32; self.config.embedding_dim];

        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hash: u64 = 0xcbf29ce484222325;
            for byte in token.as_bytes() {
                hash ^= u64::from(*byte);
                hash = hash.wrapping_mul(0x100000001b3);
            }
            let index = (hash as usize) % self.config.embedding_dim;
            embedding[index] += 1.0;
        }

        Ok(l2_normalize(embedding))
    }

    /// Returns the configured output embedding dimension.
    pub fn output_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Model { .. })
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }
}

impl TextEmbedder for MiniLmEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EmbedderBackend::Stub => self.embed_stub(text),
        }
    }

    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }
}

/// Picks the inference device for the enabled backend features, falling
/// back to CPU when no GPU is usable. CPU always succeeds.
fn select_device() -> Device {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Running MiniLM inference on Metal");
            return device;
        }
        Err(e) => warn!(error = %e, "Metal unavailable for MiniLM inference"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Running MiniLM inference on CUDA");
            return device;
        }
        Err(e) => warn!(error = %e, "CUDA unavailable for MiniLM inference"),
    }

    debug!("Running MiniLM inference on CPU");
    Device::Cpu
}

fn l2_normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
