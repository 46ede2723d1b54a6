use content_model::{
    EmbeddedContent, EnrichedImage, EnrichedQuote, PreprocessedContents, SentenceWithAttributes,
};

/// Packages the enriched collections into the output document.
pub fn assemble(
    title_text: Vec<SentenceWithAttributes>,
    normal_text: Vec<SentenceWithAttributes>,
    media: Vec<EnrichedImage>,
    embedded_content: Vec<EmbeddedContent>,
    quoted_content: Vec<EnrichedQuote>,
) -> PreprocessedContents {
    PreprocessedContents {
        title_text,
        normal_text,
        media,
        embedded_content,
        quoted_content,
    }
}
