use content_model::ContentIndex;
use embedding_provider::embedder::EmbedderError;

use crate::describer::DescriberError;
use crate::summarizer::SummarizerError;

#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error("malformed content item {content_index}: {message}")]
    MalformedInput { content_index: ContentIndex, message: String },
    #[error("could not parse contents: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("summarizer error: {0}")]
    Summarizer(#[from] SummarizerError),
    #[error("image describer error: {0}")]
    Describer(#[from] DescriberError),
    #[error("embedder error: {0}")]
    Embedder(#[from] EmbedderError),
    #[error("{collaborator} returned {actual} results for a batch of {expected}")]
    ContractViolation {
        collaborator: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("config error: {0}")]
    Config(String),
}

impl PreprocessError {
    pub(crate) fn malformed(content_index: ContentIndex, message: impl Into<String>) -> Self {
        Self::MalformedInput { content_index, message: message.into() }
    }
}

/// Fails with a [`PreprocessError::ContractViolation`] unless a collaborator
/// answered a batch with exactly one result per request.
pub(crate) fn ensure_batch_len(
    collaborator: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), PreprocessError> {
    if expected != actual {
        return Err(PreprocessError::ContractViolation { collaborator, expected, actual });
    }
    Ok(())
}
