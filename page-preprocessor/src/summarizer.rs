//! Summarizer seam and the adapter that feeds it the page text.

use content_model::TextContent;
use serde::{Deserialize, Serialize};

use crate::error::PreprocessError;
use crate::text_segmenter::{alphanumeric_tokens, SentenceTokenizer, UnicodeTokenizer};

/// Quality/speed trade-off requested from the summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPriority {
    #[default]
    Accuracy,
    Speed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummarizerError {
    #[error("summarizer failure: {message}")]
    Failure { message: String },
}

/// Reduces a text blob to a shorter one.
///
/// Implementations must accept empty input and return empty output for it.
/// Alignment assumes the summary keeps source sentences verbatim and in
/// source order; paraphrased or reordered sentences are dropped later on.
pub trait TextSummarizer: Send + Sync {
    fn summarize(&self, text: &str, priority: SummaryPriority) -> Result<String, SummarizerError>;
}

/// Returns a preset summary regardless of input.
#[derive(Debug, Clone, Default)]
pub struct FixedSummarizer {
    summary: String,
}

impl FixedSummarizer {
    pub fn new(summary: impl Into<String>) -> Self {
        Self { summary: summary.into() }
    }
}

impl TextSummarizer for FixedSummarizer {
    fn summarize(
        &self,
        _text: &str,
        _priority: SummaryPriority,
    ) -> Result<String, SummarizerError> {
        Ok(self.summary.clone())
    }
}

/// Extractive summarizer keeping the leading share of sentences, in order.
///
/// With [`SummaryPriority::Accuracy`] sentences without any word are
/// discarded before counting, so stray punctuation never fills the quota.
#[derive(Debug, Clone)]
pub struct LeadSummarizer {
    ratio: f32,
    tokenizer: UnicodeTokenizer,
}

impl LeadSummarizer {
    pub fn new(ratio: f32) -> Self {
        Self { ratio, tokenizer: UnicodeTokenizer }
    }
}

impl TextSummarizer for LeadSummarizer {
    fn summarize(&self, text: &str, priority: SummaryPriority) -> Result<String, SummarizerError> {
        if !(self.ratio > 0.0 && self.ratio <= 1.0) {
            return Err(SummarizerError::Failure {
                message: format!("lead ratio must be in (0, 1], got {}", self.ratio),
            });
        }

        let mut sentences = self.tokenizer.sentence_split(text);
        if priority == SummaryPriority::Accuracy {
            sentences.retain(|s| !alphanumeric_tokens(&self.tokenizer.word_split(s)).is_empty());
        }
        let keep = (sentences.len() as f32 * self.ratio).ceil() as usize;
        sentences.truncate(keep);
        Ok(sentences.join(" "))
    }
}

/// Summary sentences plus the counts later stages bound their cursors with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryOutput {
    pub sentences: Vec<String>,
    pub count_of_normal_text: usize,
}

impl SummaryOutput {
    pub fn count_of_summary_sentences(&self) -> usize {
        self.sentences.len()
    }
}

/// `!` and `?` close a sentence as well as `.` does; no period is added after them.
fn ends_sentence(text: &str) -> bool {
    matches!(text.chars().last(), Some('.' | '!' | '?'))
}

/// Joins the blocks into one document, closing every block with a period
/// so the summarizer sees a sentence boundary between blocks. Blank blocks
/// contribute nothing.
pub fn concatenate_blocks(blocks: &[TextContent]) -> String {
    let mut webpage_text = String::new();
    for block in blocks {
        let text = block.text_string.trim_end();
        if text.trim_start().is_empty() {
            continue;
        }
        webpage_text.push_str(text);
        if !ends_sentence(text) {
            webpage_text.push('.');
        }
        webpage_text.push(' ');
    }
    webpage_text
}

/// Summarizes the normal-text blocks and splits the summary into sentences.
pub fn summarize_blocks(
    blocks: &[TextContent],
    summarizer: &dyn TextSummarizer,
    tokenizer: &dyn SentenceTokenizer,
    priority: SummaryPriority,
) -> Result<SummaryOutput, PreprocessError> {
    let webpage_text = concatenate_blocks(blocks);
    let summary = summarizer.summarize(&webpage_text, priority)?;
    let sentences = tokenizer.sentence_split(&summary);
    tracing::debug!(
        blocks = blocks.len(),
        input_chars = webpage_text.chars().count(),
        summary_sentences = sentences.len(),
        "summarized page text"
    );
    Ok(SummaryOutput { sentences, count_of_normal_text: blocks.len() })
}
