//! Attaches embeddings and image metadata, one batched collaborator call per category.

use content_model::{
    EnrichedImage, EnrichedQuote, ImageContent, ImageEnrichment, QuoteContent,
    SentenceWithAttributes, TextContent,
};
use embedding_provider::embedder::Embedder;

use crate::describer::ImageDescriber;
use crate::error::{ensure_batch_len, PreprocessError};

/// Embeds `texts` in a single call and checks one vector came back per text.
pub fn embed_all(
    embedder: &dyn Embedder,
    texts: &[&str],
) -> Result<Vec<Vec<f32>>, PreprocessError> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }
    let vectors = embedder.embed_batch(texts)?;
    ensure_batch_len("embedder", texts.len(), vectors.len())?;
    Ok(vectors)
}

/// Builds the title sentence records: position 0, weight 0, no style.
pub fn title_sentences(
    titles: &[TextContent],
    embedder: &dyn Embedder,
) -> Result<Vec<SentenceWithAttributes>, PreprocessError> {
    let texts: Vec<&str> = titles.iter().map(|t| t.text_string.as_str()).collect();
    let embeddings = embed_all(embedder, &texts)?;
    Ok(titles
        .iter()
        .zip(embeddings)
        .map(|(title, embedding)| {
            SentenceWithAttributes::title(title.text_string.clone(), title.content_index, embedding)
        })
        .collect())
}

/// Caption text, or an empty string for uncaptioned images.
pub fn condensed_image_attributes(image: &ImageContent) -> &str {
    image.img_caption.as_deref().unwrap_or("")
}

/// Describes and embeds every image. Either all images are enriched or an
/// error is returned; nothing is half-filled.
pub fn enrich_media(
    media: Vec<ImageContent>,
    describer: &dyn ImageDescriber,
    embedder: &dyn Embedder,
) -> Result<Vec<EnrichedImage>, PreprocessError> {
    if media.is_empty() {
        return Ok(Vec::new());
    }

    let urls: Vec<&str> = media.iter().map(|m| m.img_url.as_str()).collect();
    let descriptions = describer.describe(&urls)?;
    ensure_batch_len("image describer", media.len(), descriptions.len())?;

    let condensed: Vec<String> = descriptions.iter().map(|d| d.condensed()).collect();
    let condensed_refs: Vec<&str> = condensed.iter().map(String::as_str).collect();
    let description_embeddings = embed_all(embedder, &condensed_refs)?;

    let attributes: Vec<&str> = media.iter().map(condensed_image_attributes).collect();
    let attribute_embeddings = embed_all(embedder, &attributes)?;

    tracing::debug!(images = media.len(), "enriched media");
    Ok(media
        .into_iter()
        .zip(descriptions)
        .zip(description_embeddings.into_iter().zip(attribute_embeddings))
        .map(|((image, description), (img_description_embedding, img_attribute_embedding))| {
            EnrichedImage::new(
                image,
                ImageEnrichment {
                    img_description_embedding,
                    img_attribute_embedding,
                    has_text_on_image: description.has_caption,
                    image_colors: description.image_colors,
                },
            )
        })
        .collect())
}

pub fn enrich_quotes(
    quotes: Vec<QuoteContent>,
    embedder: &dyn Embedder,
) -> Result<Vec<EnrichedQuote>, PreprocessError> {
    let texts: Vec<&str> = quotes.iter().map(|q| q.q_content.as_str()).collect();
    let embeddings = embed_all(embedder, &texts)?;
    Ok(quotes
        .into_iter()
        .zip(embeddings)
        .map(|(quote, embedding)| EnrichedQuote::new(quote, embedding))
        .collect())
}
