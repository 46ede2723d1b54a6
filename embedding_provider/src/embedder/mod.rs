use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies the backing implementation that powers an embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// In-process feature-hashing embedder.
    Hashed,
}

/// Static metadata describing a particular embedder instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedderInfo {
    pub provider: ProviderKind,
    pub embedding_model_id: String,
    pub dimension: usize,
    pub text_repr_version: String,
}

/// Errors that can be produced by embedder operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmbedderError {
    #[error("invalid embedder configuration: {message}")]
    InvalidConfiguration { message: String },
    #[error("input text exceeds max length of {max_length} characters, actual length: {actual_length}")]
    InputTooLong {
        max_length: usize,
        actual_length: usize,
    },
    #[error("provider failure: {message}")]
    ProviderFailure { message: String },
}

/// Core interface for all embedder implementations.
///
/// `embed_batch` must return exactly one vector per input, in input order.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError>;
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError>;
    fn info(&self) -> &EmbedderInfo;
}

/// Configuration for the in-process hashing embedder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedEmbedderConfig {
    pub dimension: usize,
    /// Maximum input length in characters.
    pub max_input_length: usize,
    pub embedding_model_id: String,
    pub text_repr_version: String,
}

/// Deterministic bag-of-words embedder based on signed feature hashing.
///
/// Each lower-cased alphanumeric word is hashed into one of `dimension`
/// buckets with a hashed sign; the result is L2-normalised. Texts sharing
/// vocabulary land close together, identical texts always map to identical
/// vectors. Texts without any word map to the zero vector.
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    info: EmbedderInfo,
    max_input_length: usize,
    base_seed: u64,
}

impl HashedEmbedder {
    pub fn new(config: HashedEmbedderConfig) -> Result<Self, EmbedderError> {
        if config.dimension == 0 {
            return Err(EmbedderError::InvalidConfiguration {
                message: "dimension must be greater than zero".into(),
            });
        }

        if config.max_input_length == 0 {
            return Err(EmbedderError::InvalidConfiguration {
                message: "max_input_length must be greater than zero".into(),
            });
        }

        let base_seed = compute_seed(&config.embedding_model_id, &config.text_repr_version);
        let info = EmbedderInfo {
            provider: ProviderKind::Hashed,
            embedding_model_id: config.embedding_model_id,
            dimension: config.dimension,
            text_repr_version: config.text_repr_version,
        };

        Ok(Self {
            info,
            max_input_length: config.max_input_length,
            base_seed,
        })
    }

    fn validate_length(&self, text: &str) -> Result<(), EmbedderError> {
        let actual_length = text.chars().count();
        if actual_length > self.max_input_length {
            return Err(EmbedderError::InputTooLong {
                max_length: self.max_input_length,
                actual_length,
            });
        }
        Ok(())
    }

    fn generate_embedding(&self, text: &str) -> Vec<f32> {
        let dimension = self.info.dimension;
        let mut output = vec![0f32; dimension];

        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let hash = self.hash_word(&word.to_lowercase());
            let bucket = (hash % dimension as u64) as usize;
            // top bit picks the sign so collisions tend to cancel out
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            output[bucket] += sign;
        }

        let norm = output.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in output.iter_mut() {
                *v /= norm;
            }
        }
        output
    }

    fn hash_word(&self, word: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.base_seed.hash(&mut hasher);
        word.hash(&mut hasher);
        hasher.finish()
    }
}

impl Embedder for HashedEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
        self.validate_length(text)?;
        Ok(self.generate_embedding(text))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        texts
            .iter()
            .map(|text| self.embed(text))
            .collect::<Result<Vec<_>, _>>()
    }

    fn info(&self) -> &EmbedderInfo {
        &self.info
    }
}

fn compute_seed(embedding_model_id: &str, text_repr_version: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    ProviderKind::Hashed.hash(&mut hasher);
    embedding_model_id.hash(&mut hasher);
    text_repr_version.hash(&mut hasher);
    hasher.finish()
}
