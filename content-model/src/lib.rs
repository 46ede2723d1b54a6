//! Shared models used across crates

use serde::{Deserialize, Serialize};

/// Position of an item in the original extraction order.
pub type ContentIndex = usize;

/// Formatting hints carried by a text block from the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    /// `Some(n)` when the block was rendered as an `<hN>` heading.
    pub heading_level: Option<u8>,
}

impl FontStyle {
    pub fn is_heading_like(&self) -> bool {
        self.heading_level.is_some()
    }
}

/// A block of text extracted from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content_index: ContentIndex,
    pub text_string: String,
    /// Extractor-side signal that the block looks like a heading.
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub font_style: Option<FontStyle>,
}

impl TextContent {
    pub fn new(content_index: ContentIndex, text_string: impl Into<String>) -> Self {
        Self {
            content_index,
            text_string: text_string.into(),
            is_important: false,
            font_style: None,
        }
    }

    pub fn important(mut self) -> Self {
        self.is_important = true;
        self
    }

    pub fn with_font_style(mut self, font_style: FontStyle) -> Self {
        self.font_style = Some(font_style);
        self
    }

    /// True when either the extractor flagged the block or its style is heading-like.
    pub fn is_important_text(&self) -> bool {
        self.is_important || self.font_style.is_some_and(|s| s.is_heading_like())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    pub content_index: ContentIndex,
    pub img_url: String,
    #[serde(default)]
    pub img_caption: Option<String>,
}

impl ImageContent {
    pub fn new(content_index: ContentIndex, img_url: impl Into<String>) -> Self {
        Self { content_index, img_url: img_url.into(), img_caption: None }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.img_caption = Some(caption.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteContent {
    pub content_index: ContentIndex,
    pub q_content: String,
}

impl QuoteContent {
    pub fn new(content_index: ContentIndex, q_content: impl Into<String>) -> Self {
        Self { content_index, q_content: q_content.into() }
    }
}

/// Third-party widget kinds recognised by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedKind {
    Tweet,
    Instagram,
    Video,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedContent {
    pub content_index: ContentIndex,
    pub kind: EmbeddedKind,
    pub url: String,
    #[serde(default)]
    pub html: Option<String>,
}

impl EmbeddedContent {
    pub fn new(content_index: ContentIndex, kind: EmbeddedKind, url: impl Into<String>) -> Self {
        Self { content_index, kind, url: url.into(), html: None }
    }
}

/// One extracted element of a webpage, tagged by `content_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum ContentItem {
    Text(TextContent),
    Image(ImageContent),
    Quote(QuoteContent),
    Embedded(EmbeddedContent),
}

impl ContentItem {
    pub fn content_index(&self) -> ContentIndex {
        match self {
            ContentItem::Text(t) => t.content_index,
            ContentItem::Image(i) => i.content_index,
            ContentItem::Quote(q) => q.content_index,
            ContentItem::Embedded(e) => e.content_index,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ContentItem::Text(_) => "text",
            ContentItem::Image(_) => "image",
            ContentItem::Quote(_) => "quote",
            ContentItem::Embedded(_) => "embedded",
        }
    }
}

impl From<TextContent> for ContentItem {
    fn from(value: TextContent) -> Self {
        ContentItem::Text(value)
    }
}

impl From<ImageContent> for ContentItem {
    fn from(value: ImageContent) -> Self {
        ContentItem::Image(value)
    }
}

impl From<QuoteContent> for ContentItem {
    fn from(value: QuoteContent) -> Self {
        ContentItem::Quote(value)
    }
}

impl From<EmbeddedContent> for ContentItem {
    fn from(value: EmbeddedContent) -> Self {
        ContentItem::Embedded(value)
    }
}

/// Extractor output for a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contents {
    pub content_list: Vec<ContentItem>,
}

impl Contents {
    pub fn new(content_list: Vec<ContentItem>) -> Self {
        Self { content_list }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Dominant color reported by the image describer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub pixel_fraction: f32,
}

/// A sentence tied back to the block it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceWithAttributes {
    pub text: String,
    /// `content_index` of the owning text block.
    pub source_content_index: ContentIndex,
    /// Ordinal of the sentence inside its block; 0 for titles.
    pub position_in_paragraph: usize,
    /// Fractional position within the block, in `[0, 1)`; 0 for titles.
    pub weight: f32,
    pub font_style: Option<FontStyle>,
    pub embedding: Vec<f32>,
}

impl SentenceWithAttributes {
    pub fn new(
        text: impl Into<String>,
        source_content_index: ContentIndex,
        position_in_paragraph: usize,
        weight: f32,
        font_style: Option<FontStyle>,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            text: text.into(),
            source_content_index,
            position_in_paragraph,
            weight,
            font_style,
            embedding,
        }
    }

    /// Titles always sit at position 0 with no weight and no style.
    pub fn title(
        text: impl Into<String>,
        source_content_index: ContentIndex,
        embedding: Vec<f32>,
    ) -> Self {
        Self::new(text, source_content_index, 0, 0.0, None, embedding)
    }
}

/// Fields computed for an image during enrichment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageEnrichment {
    pub img_description_embedding: Vec<f32>,
    pub img_attribute_embedding: Vec<f32>,
    pub has_text_on_image: bool,
    pub image_colors: Vec<ImageColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedImage {
    #[serde(flatten)]
    pub image: ImageContent,
    pub img_description_embedding: Vec<f32>,
    pub img_attribute_embedding: Vec<f32>,
    pub has_text_on_image: bool,
    pub image_colors: Vec<ImageColor>,
}

impl EnrichedImage {
    pub fn new(image: ImageContent, enrichment: ImageEnrichment) -> Self {
        Self {
            image,
            img_description_embedding: enrichment.img_description_embedding,
            img_attribute_embedding: enrichment.img_attribute_embedding,
            has_text_on_image: enrichment.has_text_on_image,
            image_colors: enrichment.image_colors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedQuote {
    #[serde(flatten)]
    pub quote: QuoteContent,
    pub embedding: Vec<f32>,
}

impl EnrichedQuote {
    pub fn new(quote: QuoteContent, embedding: Vec<f32>) -> Self {
        Self { quote, embedding }
    }
}

/// Final per-page output handed to the summarization stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreprocessedContents {
    pub title_text: Vec<SentenceWithAttributes>,
    pub normal_text: Vec<SentenceWithAttributes>,
    pub media: Vec<EnrichedImage>,
    pub embedded_content: Vec<EmbeddedContent>,
    pub quoted_content: Vec<EnrichedQuote>,
}
