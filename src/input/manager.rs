//! Input manager for loading resumes and job descriptions from disk

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::document::{Document, DocumentType};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(cached_text) = self.cache.get(path) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        let file_type = FileType::from_path(path).ok_or_else(|| {
            ResumeAnalyzerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        if !file_type.is_supported() {
            return Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                "{} (convert {:?} files to plain text first)",
                path.display(),
                file_type
            )));
        }

        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match file_type {
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            _ => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
        };

        self.cache.insert(path.to_path_buf(), text.clone());

        Ok(text)
    }

    pub async fn load_document(&mut self, path: &Path, document_type: DocumentType) -> Result<Document> {
        let text = self.extract_text(path).await?;
        let document = Document::new(text, document_type).with_source(path.display().to_string());
        info!(
            "Loaded {} with {} words from {}",
            document_type,
            document.word_count(),
            path.display()
        );
        Ok(document)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
