//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::ReportKind;
use crate::processing::document::SectionLabel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lexicon: LexiconConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

/// Raw lexicon data. Compiled and validated by
/// [`Lexicon::from_config`](crate::processing::lexicon::Lexicon::from_config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub headers: HeaderLexicon,
    pub technical_skills: Vec<String>,
    pub experience_levels: LevelKeywords,
    /// Words that mark a segment of an experience entry as the job title
    pub role_keywords: Vec<String>,
    /// Experience lines containing any of these are not description lines
    pub noise_terms: Vec<String>,
    /// Nouns too common to count as skills
    pub generic_terms: Vec<String>,
    /// Must capture the number of years in group 1. Applied to lowercased text.
    pub years_pattern: String,
    /// Start of an experience block for relevance scoring
    pub experience_block_pattern: String,
}

/// Header phrases per section label. Ties are broken by [`SectionLabel::PRIORITY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLexicon {
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub contact: Vec<String>,
}

impl HeaderLexicon {
    /// Phrases configured for `label`; none for unlabeled text
    pub fn phrases(&self, label: SectionLabel) -> &[String] {
        match label {
            SectionLabel::Education => &self.education,
            SectionLabel::Experience => &self.experience,
            SectionLabel::Skills => &self.skills,
            SectionLabel::Projects => &self.projects,
            SectionLabel::Contact => &self.contact,
            SectionLabel::Unlabeled => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelKeywords {
    pub entry: Vec<String>,
    pub mid: Vec<String>,
    pub senior: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Relevance fraction above which experience counts as recent and relevant
    pub relevance_threshold: f64,
    /// Similarity fraction below which the resume needs significant adjustment
    pub adjustment_threshold: f64,
    pub max_missing_in_suggestion: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub report: ReportKind,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for HeaderLexicon {
    fn default() -> Self {
        Self {
            education: strings(&[
                "education",
                "academic background",
                "academic history",
                "academic qualification",
            ]),
            experience: strings(&[
                "experience",
                "work experience",
                "employment history",
                "work history",
                "professional experience",
            ]),
            skills: strings(&["skills", "technical skills", "core competencies", "competencies"]),
            projects: strings(&["projects", "personal projects", "professional projects"]),
            contact: strings(&["contact", "contact information", "personal information"]),
        }
    }
}

impl Default for LevelKeywords {
    fn default() -> Self {
        Self {
            entry: strings(&["intern", "junior", "entry level", "associate"]),
            mid: strings(&["mid level", "intermediate", "regular"]),
            senior: strings(&["senior", "lead", "principal", "architect", "manager"]),
        }
    }
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            headers: HeaderLexicon::default(),
            technical_skills: strings(&[
                // Languages
                "python", "java", "javascript", "typescript", "rust", "golang", "c++", "c#",
                "ruby", "php", "swift", "kotlin", "scala", "sql", "html", "css",
                // Frameworks
                "react", "angular", "vue", "node", "node.js", "django", "flask", "spring boot",
                // Infrastructure
                "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible", "jenkins",
                "git", "linux", "cloud", "devops", "ci/cd", "microservices", "rest api",
                "graphql", "grpc",
                // Data
                "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "kafka", "spark",
                "hadoop", "airflow", "machine learning", "deep learning", "data science", "ai",
                "tensorflow", "pytorch", "pandas", "numpy",
                // Process
                "agile", "scrum",
            ]),
            experience_levels: LevelKeywords::default(),
            role_keywords: strings(&[
                "engineer", "developer", "manager", "director", "analyst", "designer",
                "scientist", "architect", "consultant", "intern", "specialist", "administrator",
            ]),
            noise_terms: strings(&["company", "position", "present"]),
            generic_terms: strings(&[
                "experience", "experiences", "year", "years", "yrs", "work", "team", "teams",
                "project", "projects", "skills", "skill", "software", "engineer", "engineers",
                "engineering", "developer", "developers", "role", "candidate", "candidates",
                "ability", "knowledge", "understanding", "requirements", "responsibilities",
                "job", "company", "position", "senior", "junior", "lead", "level",
            ]),
            years_pattern: r"(\d+)[+\s]*(?:years?|yrs?)(?:\s+of)?\s+experience".to_string(),
            experience_block_pattern: r"(?i)(?:work experience|experience|employment)".to_string(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: 0.6,
            adjustment_threshold: 0.6,
            max_missing_in_suggestion: 5,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            report: ReportKind::Detailed,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing the defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.scoring.relevance_threshold = 0.75;
        config.lexicon.technical_skills.push("haskell".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring]\nrelevance_threshold = 0.5\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scoring.relevance_threshold, 0.5);
        assert_eq!(loaded.scoring.max_missing_in_suggestion, 5);
        assert_eq!(loaded.lexicon, LexiconConfig::default());
        assert_eq!(loaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring\nrelevance_threshold = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ResumeAnalyzerError::Configuration(_)));
    }
}
