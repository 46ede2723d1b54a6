//! Maps summary sentences back to the text blocks they were extracted from.
//!
//! Nothing about block membership survives summarization, so the walk
//! recovers it by comparing token keys. Two cursors move forward only: one
//! over the normal-text blocks, one over the summary sentences. A summary
//! sentence that appears (as an exact key) in the current block is emitted
//! and the summary cursor moves on; otherwise the block cursor moves on.
//!
//! Precondition: the summarizer keeps source sentences verbatim and in
//! source order. Sentences violating it are not misattributed; they exhaust
//! the remaining blocks and everything from that point is dropped.

use content_model::{ContentIndex, FontStyle, SentenceWithAttributes, TextContent};

use crate::error::{ensure_batch_len, PreprocessError};
use crate::text_segmenter::{block_keys, sentence_key, SentenceTokenizer};

/// Per-block cache built when the block cursor reaches a block.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBlock {
    pub content_index: ContentIndex,
    pub font_style: Option<FontStyle>,
    /// One key per sentence of the block.
    pub keys: Vec<Vec<String>>,
    /// `1 / keys.len()`, absent for blocks without sentences.
    pub step: Option<f32>,
}

impl PreparedBlock {
    pub fn new(tokenizer: &dyn SentenceTokenizer, block: &TextContent) -> Self {
        let keys = block_keys(tokenizer, &block.text_string);
        Self {
            content_index: block.content_index,
            font_style: block.font_style,
            step: step_size(keys.len()),
            keys,
        }
    }

    pub fn contains(&self, summary_key: &[String]) -> bool {
        self.keys.iter().any(|key| key.as_slice() == summary_key)
    }
}

/// Weight increment between consecutive sentences of a block.
pub fn step_size(sentence_count: usize) -> Option<f32> {
    (sentence_count > 0).then(|| 1.0 / sentence_count as f32)
}

/// Positions of the two cursors plus the in-block ordinal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursors {
    pub block: usize,
    pub summary: usize,
    pub ordinal: usize,
}

/// Outcome of comparing one summary sentence against the current block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Emit the sentence at `weight`, then advance the summary cursor.
    Matched { weight: f32 },
    /// Move on to the next block.
    NextBlock,
}

/// Decides the next move for the walk.
///
/// A block stops accepting sentences once it has handed out as many as it
/// holds, which keeps every weight strictly below 1 even when a summary
/// repeats a sentence.
pub fn step(cursors: Cursors, block: &PreparedBlock, summary_key: &[String]) -> Step {
    match block.step {
        Some(step) if cursors.ordinal < block.keys.len() && block.contains(summary_key) => {
            Step::Matched { weight: cursors.ordinal as f32 * step }
        }
        _ => Step::NextBlock,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentOutcome {
    pub sentences: Vec<SentenceWithAttributes>,
    /// Summary sentences that found no block before the blocks ran out.
    pub dropped: usize,
}

/// Aligns every summary sentence to its source block.
///
/// `embeddings[j]` is the precomputed vector of `summary[j]`.
pub fn align_summary(
    blocks: &[TextContent],
    summary: &[String],
    mut embeddings: Vec<Vec<f32>>,
    tokenizer: &dyn SentenceTokenizer,
) -> Result<AlignmentOutcome, PreprocessError> {
    ensure_batch_len("embedder", summary.len(), embeddings.len())?;

    let mut outcome = AlignmentOutcome::default();
    let mut cursors = Cursors::default();
    if blocks.is_empty() || summary.is_empty() {
        outcome.dropped = summary.len();
        return Ok(outcome);
    }

    let mut block = PreparedBlock::new(tokenizer, &blocks[0]);
    let mut summary_key = sentence_key(tokenizer, &summary[0]);

    while cursors.block < blocks.len() && cursors.summary < summary.len() {
        match step(cursors, &block, &summary_key) {
            Step::Matched { weight } => {
                outcome.sentences.push(SentenceWithAttributes::new(
                    summary[cursors.summary].clone(),
                    block.content_index,
                    cursors.ordinal,
                    weight,
                    block.font_style,
                    std::mem::take(&mut embeddings[cursors.summary]),
                ));
                cursors.summary += 1;
                cursors.ordinal += 1;
                if let Some(next) = summary.get(cursors.summary) {
                    summary_key = sentence_key(tokenizer, next);
                }
            }
            Step::NextBlock => {
                cursors.block += 1;
                cursors.ordinal = 0;
                if let Some(next) = blocks.get(cursors.block) {
                    block = PreparedBlock::new(tokenizer, next);
                }
            }
        }
    }

    for (ordinal, sentence) in summary.iter().enumerate().skip(cursors.summary) {
        tracing::debug!(
            summary_ordinal = ordinal,
            sentence = %sentence,
            "summary sentence not aligned; dropped"
        );
    }
    outcome.dropped = summary.len() - cursors.summary;
    Ok(outcome)
}
