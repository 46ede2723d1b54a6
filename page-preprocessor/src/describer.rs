use std::collections::HashMap;

use content_model::ImageColor;
use serde::{Deserialize, Serialize};

/// What an image-description service reports about one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDescription {
    pub label: String,
    pub entities: Vec<String>,
    /// The service found text rendered inside the image.
    pub has_caption: bool,
    pub image_colors: Vec<ImageColor>,
}

impl ImageDescription {
    /// Label followed by the entities, space separated.
    pub fn condensed(&self) -> String {
        std::iter::once(self.label.as_str())
            .chain(self.entities.iter().map(String::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriberError {
    #[error("image describer failure: {message}")]
    Failure { message: String },
}

/// Describes a batch of images; one description per URL, in input order.
pub trait ImageDescriber: Send + Sync {
    fn describe(&self, img_urls: &[&str]) -> Result<Vec<ImageDescription>, DescriberError>;
}

/// Answers from a URL-keyed table. Unknown URLs get an empty description.
#[derive(Debug, Clone, Default)]
pub struct StaticImageDescriber {
    table: HashMap<String, ImageDescription>,
}

impl StaticImageDescriber {
    pub fn new(table: HashMap<String, ImageDescription>) -> Self {
        Self { table }
    }

    /// Parses a JSON object mapping image URL to description.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn insert(&mut self, img_url: impl Into<String>, description: ImageDescription) {
        self.table.insert(img_url.into(), description);
    }
}

impl ImageDescriber for StaticImageDescriber {
    fn describe(&self, img_urls: &[&str]) -> Result<Vec<ImageDescription>, DescriberError> {
        Ok(img_urls
            .iter()
            .map(|url| self.table.get(*url).cloned().unwrap_or_default())
            .collect())
    }
}
