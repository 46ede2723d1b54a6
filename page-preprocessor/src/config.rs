use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PreprocessError;
use crate::summarizer::SummaryPriority;

/// Default pipeline settings.
#[derive(Debug, Clone, Copy)]
pub struct PreprocessorDefaults {
    pub max_title_length: usize,
    pub summary_priority: SummaryPriority,
    pub lead_ratio: f32,
}

/// Shared defaults so CLI and tests can stay in sync.
///
/// Titles are limited to 100 characters so they render on a single line
/// without crowding out other content.
pub const PREPROCESSOR_DEFAULTS: PreprocessorDefaults = PreprocessorDefaults {
    max_title_length: 100,
    summary_priority: SummaryPriority::Accuracy,
    lead_ratio: 0.5,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    /// Important text shorter than this many characters is treated as a title.
    pub max_title_length: usize,
    pub summary_priority: SummaryPriority,
    /// Share of sentences kept by the built-in lead summarizer.
    pub lead_ratio: f32,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            max_title_length: PREPROCESSOR_DEFAULTS.max_title_length,
            summary_priority: PREPROCESSOR_DEFAULTS.summary_priority,
            lead_ratio: PREPROCESSOR_DEFAULTS.lead_ratio,
        }
    }
}

impl PreprocessorConfig {
    /// Load overrides from a JSON file; keys that are absent keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PreprocessError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| PreprocessError::Config(format!("read `{}`: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| PreprocessError::Config(format!("parse `{}`: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PreprocessError> {
        if self.max_title_length == 0 {
            return Err(PreprocessError::Config(
                "max_title_length must be greater than zero".into(),
            ));
        }
        if !self.lead_ratio.is_finite() || self.lead_ratio <= 0.0 || self.lead_ratio > 1.0 {
            return Err(PreprocessError::Config(format!(
                "lead_ratio must be in (0, 1], got {}",
                self.lead_ratio
            )));
        }
        Ok(())
    }
}
