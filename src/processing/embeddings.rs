//! Embedding-backed similarity using Model2Vec static embeddings
//!
//! Enabled with the `embeddings` cargo feature. Tokenization and tagging stay
//! lexical; only document similarity comes from the model.

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::nlp::{LexicalAdapter, NlpAdapter, Token};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

pub struct EmbeddingAdapter {
    model: StaticModel,
    tagger: LexicalAdapter,
    model_name: String,
}

impl EmbeddingAdapter {
    /// Load from a local model directory or a Hugging Face repo id
    pub fn from_pretrained(repo_or_path: &str) -> Result<Self> {
        let start_time = Instant::now();
        log::info!("Loading Model2Vec embedding model from: {}", repo_or_path);

        let model = StaticModel::from_pretrained(Path::new(repo_or_path), None, None, None)
            .map_err(|e| ResumeAnalyzerError::Adapter(format!("Failed to load model: {}", e)))?;

        log::info!("Model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            tagger: LexicalAdapter::new(),
            model_name: repo_or_path.to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Cosine similarity; zero for empty, mismatched or zero-norm vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

impl NlpAdapter for EmbeddingAdapter {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        self.tagger.tokenize(text)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        if a.trim().is_empty() || b.trim().is_empty() {
            return Ok(0.0);
        }

        let embedding_a = self.model.encode_single(a);
        let embedding_b = self.model.encode_single(b);
        if embedding_a.len() != embedding_b.len() {
            return Err(ResumeAnalyzerError::Adapter(format!(
                "Embedding dimensions don't match: {} vs {}",
                embedding_a.len(),
                embedding_b.len()
            )));
        }

        Ok(cosine_similarity(&embedding_a, &embedding_b).clamp(0.0, 1.0))
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
