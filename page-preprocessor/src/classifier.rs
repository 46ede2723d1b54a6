use content_model::{ContentItem, EmbeddedContent, ImageContent, QuoteContent, TextContent};

use crate::error::PreprocessError;

/// Content items partitioned by category, each list in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedContents {
    pub title_text: Vec<TextContent>,
    pub normal_text: Vec<TextContent>,
    pub media: Vec<ImageContent>,
    pub embedded: Vec<EmbeddedContent>,
    pub quoted: Vec<QuoteContent>,
}

impl ClassifiedContents {
    /// Total number of items across all categories.
    pub fn len(&self) -> usize {
        self.title_text.len()
            + self.normal_text.len()
            + self.media.len()
            + self.embedded.len()
            + self.quoted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Important text shorter than `max_title_length` characters.
pub fn is_title_candidate(text: &TextContent, max_title_length: usize) -> bool {
    text.is_important_text() && text.text_string.chars().count() < max_title_length
}

/// Rejects items lacking a field their category cannot work without.
pub fn validate_item(item: &ContentItem) -> Result<(), PreprocessError> {
    match item {
        ContentItem::Text(_) => Ok(()),
        ContentItem::Image(image) if image.img_url.trim().is_empty() => {
            Err(PreprocessError::malformed(image.content_index, "image without img_url"))
        }
        ContentItem::Quote(quote) if quote.q_content.trim().is_empty() => {
            Err(PreprocessError::malformed(quote.content_index, "quote without q_content"))
        }
        ContentItem::Embedded(embedded) if embedded.url.trim().is_empty() => {
            Err(PreprocessError::malformed(embedded.content_index, "embedded content without url"))
        }
        _ => Ok(()),
    }
}

/// Partitions items into the five categories. Every item lands in exactly one list.
pub fn split_content<I>(
    items: I,
    max_title_length: usize,
) -> Result<ClassifiedContents, PreprocessError>
where
    I: IntoIterator<Item = ContentItem>,
{
    let mut out = ClassifiedContents::default();
    for item in items {
        validate_item(&item)?;
        match item {
            ContentItem::Text(text) => {
                if is_title_candidate(&text, max_title_length) {
                    out.title_text.push(text);
                } else {
                    out.normal_text.push(text);
                }
            }
            ContentItem::Image(image) => out.media.push(image),
            ContentItem::Quote(quote) => out.quoted.push(quote),
            ContentItem::Embedded(embedded) => out.embedded.push(embedded),
        }
    }
    tracing::debug!(
        titles = out.title_text.len(),
        normal = out.normal_text.len(),
        media = out.media.len(),
        embedded = out.embedded.len(),
        quoted = out.quoted.len(),
        "classified content"
    );
    Ok(out)
}
