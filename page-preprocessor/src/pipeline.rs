use std::sync::Arc;

use content_model::{Contents, PreprocessedContents};
use embedding_provider::embedder::Embedder;

use crate::alignment::align_summary;
use crate::assembler::assemble;
use crate::classifier::split_content;
use crate::config::PreprocessorConfig;
use crate::describer::ImageDescriber;
use crate::enricher::{embed_all, enrich_media, enrich_quotes, title_sentences};
use crate::error::PreprocessError;
use crate::summarizer::{summarize_blocks, TextSummarizer};
use crate::text_segmenter::{SentenceTokenizer, UnicodeTokenizer};
use crate::title::normalize_titles;

/// Counters describing one run, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessReport {
    pub normal_text_blocks: usize,
    pub summary_sentences: usize,
    pub aligned_sentences: usize,
    /// Summary sentences no block could claim.
    pub dropped_sentences: usize,
}

/// Turns extractor output into [`PreprocessedContents`].
///
/// Holds no per-page state: every call classifies, summarizes, aligns and
/// enriches its own input. Collaborators are shared through `Arc`, so several
/// instances (or threads) can reuse the same models.
pub struct PagePreprocessor {
    cfg: PreprocessorConfig,
    summarizer: Arc<dyn TextSummarizer>,
    embedder: Arc<dyn Embedder>,
    describer: Arc<dyn ImageDescriber>,
    tokenizer: Arc<dyn SentenceTokenizer>,
}

impl PagePreprocessor {
    pub fn new(
        cfg: PreprocessorConfig,
        summarizer: Arc<dyn TextSummarizer>,
        embedder: Arc<dyn Embedder>,
        describer: Arc<dyn ImageDescriber>,
    ) -> Result<Self, PreprocessError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            summarizer,
            embedder,
            describer,
            tokenizer: Arc::new(UnicodeTokenizer),
        })
    }

    /// Replaces the built-in UAX #29 tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn SentenceTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.cfg
    }

    pub fn preprocess(&self, contents: &Contents) -> Result<PreprocessedContents, PreprocessError> {
        self.preprocess_with_report(contents).map(|(out, _)| out)
    }

    /// Parses a JSON [`Contents`] document and preprocesses it.
    pub fn preprocess_json(&self, json: &str) -> Result<PreprocessedContents, PreprocessError> {
        let contents = Contents::from_json(json)?;
        self.preprocess(&contents)
    }

    pub fn preprocess_with_report(
        &self,
        contents: &Contents,
    ) -> Result<(PreprocessedContents, PreprocessReport), PreprocessError> {
        let classified = split_content(
            contents.content_list.iter().cloned(),
            self.cfg.max_title_length,
        )?;
        let titles = normalize_titles(classified.title_text);

        let summary = summarize_blocks(
            &classified.normal_text,
            self.summarizer.as_ref(),
            self.tokenizer.as_ref(),
            self.cfg.summary_priority,
        )?;

        // one batched call for every summary sentence, before the walk
        let summary_refs: Vec<&str> = summary.sentences.iter().map(String::as_str).collect();
        let summary_embeddings = embed_all(self.embedder.as_ref(), &summary_refs)?;
        let alignment = align_summary(
            &classified.normal_text,
            &summary.sentences,
            summary_embeddings,
            self.tokenizer.as_ref(),
        )?;

        let media = enrich_media(
            classified.media,
            self.describer.as_ref(),
            self.embedder.as_ref(),
        )?;
        let title_text = title_sentences(&titles, self.embedder.as_ref())?;
        let quoted = enrich_quotes(classified.quoted, self.embedder.as_ref())?;

        let report = PreprocessReport {
            normal_text_blocks: summary.count_of_normal_text,
            summary_sentences: summary.count_of_summary_sentences(),
            aligned_sentences: alignment.sentences.len(),
            dropped_sentences: alignment.dropped,
        };
        tracing::info!(
            titles = title_text.len(),
            normal_blocks = report.normal_text_blocks,
            summary_sentences = report.summary_sentences,
            aligned = report.aligned_sentences,
            dropped = report.dropped_sentences,
            media = media.len(),
            embedded = classified.embedded.len(),
            quoted = quoted.len(),
            "preprocessed page"
        );

        let out = assemble(title_text, alignment.sentences, media, classified.embedded, quoted);
        Ok((out, report))
    }
}
