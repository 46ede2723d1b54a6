//! Turns extracted webpage elements into a summarized, embedded document.
//!
//! Stages run in order on one page at a time: [`classifier`], [`title`],
//! [`summarizer`], [`alignment`], [`enricher`], [`assembler`]. The
//! [`pipeline::PagePreprocessor`] wires them to the external collaborators.

pub mod alignment;
pub mod assembler;
pub mod classifier;
pub mod config;
pub mod describer;
pub mod enricher;
pub mod error;
pub mod pipeline;
pub mod summarizer;
pub mod text_segmenter;
pub mod title;

pub use config::{PreprocessorConfig, PREPROCESSOR_DEFAULTS};
pub use error::PreprocessError;
pub use pipeline::{PagePreprocessor, PreprocessReport};
