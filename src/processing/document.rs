//! Document and section structures

use serde::{Deserialize, Serialize};

/// Immutable input text with its type tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    content: String,
    document_type: DocumentType,
    source: Option<String>,
    word_count: usize,
    character_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Resume,
    JobDescription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionLabel {
    Education,
    Experience,
    Skills,
    Projects,
    Contact,
    /// Text before the first recognized header
    Unlabeled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub label: SectionLabel,
    pub text: String,
}

impl Document {
    pub fn new(content: impl Into<String>, document_type: DocumentType) -> Self {
        let content = content.into();
        let word_count = content.split_whitespace().count();
        let character_count = content.chars().count();

        Self {
            content,
            document_type,
            source: None,
            word_count,
            character_count,
        }
    }

    pub fn resume(content: impl Into<String>) -> Self {
        Self::new(content, DocumentType::Resume)
    }

    pub fn job_description(content: impl Into<String>) -> Self {
        Self::new(content, DocumentType::JobDescription)
    }

    /// Record where the text came from (a file path, usually)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl SectionLabel {
    /// Header-matching priority. A line that matches several lexicons takes the first.
    pub const PRIORITY: [SectionLabel; 5] = [
        SectionLabel::Education,
        SectionLabel::Experience,
        SectionLabel::Skills,
        SectionLabel::Projects,
        SectionLabel::Contact,
    ];
}

impl std::fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionLabel::Education => write!(f, "Education"),
            SectionLabel::Experience => write!(f, "Experience"),
            SectionLabel::Skills => write!(f, "Skills"),
            SectionLabel::Projects => write!(f, "Projects"),
            SectionLabel::Contact => write!(f, "Contact"),
            SectionLabel::Unlabeled => write!(f, "Unlabeled"),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Resume => write!(f, "resume"),
            DocumentType::JobDescription => write!(f, "job_description"),
        }
    }
}
