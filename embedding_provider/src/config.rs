use crate::embedder::HashedEmbedderConfig;

/// Default settings for the in-process hashing embedder.
#[derive(Debug, Clone, Copy)]
pub struct HashedDefaults {
    pub embedding_dimension: usize,
    pub max_input_chars: usize,
    pub embedding_model_id: &'static str,
    pub text_repr_version: &'static str,
}

/// Shared defaults so CLI and tests can stay in sync.
pub const HASHED_DEFAULTS: HashedDefaults = HashedDefaults {
    embedding_dimension: 384,
    max_input_chars: 8192,
    embedding_model_id: "hashed-minilm",
    text_repr_version: "v1",
};

/// Convenience helper to build a [`HashedEmbedderConfig`] from the shared defaults.
pub fn default_hashed_config() -> HashedEmbedderConfig {
    HashedEmbedderConfig {
        dimension: HASHED_DEFAULTS.embedding_dimension,
        max_input_length: HASHED_DEFAULTS.max_input_chars,
        embedding_model_id: HASHED_DEFAULTS.embedding_model_id.into(),
        text_repr_version: HASHED_DEFAULTS.text_repr_version.into(),
    }
}
