//! Text processing and analysis module

pub mod analyzer;
pub mod document;
#[cfg(feature = "embeddings")]
pub mod embeddings;
pub mod extract;
pub mod lexicon;
pub mod nlp;
pub mod relevance;
pub mod segmenter;
pub mod skill_matcher;

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
