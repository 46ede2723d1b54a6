pub mod config;
pub mod embedder;
