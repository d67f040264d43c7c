//! Main analysis engine combining skill matching, experience relevance and
//! document similarity into one match result

use crate::config::{Config, ScoringConfig};
use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::document::{Document, DocumentType};
use crate::processing::extract::{self, ParsedResume};
use crate::processing::lexicon::{Lexicon, SharedLexicon};
use crate::processing::nlp::{LexicalAdapter, NlpAdapter};
use crate::processing::relevance::{ExperienceRelevance, RelevanceScorer};
use crate::processing::round2;
use crate::processing::segmenter::{self, Segmentation};
use crate::processing::skill_matcher::{SkillMatcher, SkillsComparison};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub const MISSING_SKILLS_PREFIX: &str = "Consider adding these key skills: ";
pub const HIGHLIGHT_EXPERIENCE: &str =
    "Highlight more relevant work experiences that align with the job requirements";
pub const SIGNIFICANT_ADJUSTMENT: &str =
    "Your resume might need significant adjustments to better match this role";

/// Seniority inferred from resume text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::Entry => write!(f, "entry"),
            ExperienceLevel::Mid => write!(f, "mid"),
            ExperienceLevel::Senior => write!(f, "senior"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Overall document similarity, 0-100 with two decimals
    pub match_score: f64,
    pub experience_level: ExperienceLevel,
    pub skills_match: SkillsComparison,
    pub experience_relevance: ExperienceRelevance,
    pub improvement_suggestions: Vec<String>,
    pub analysis_timestamp: DateTime<Utc>,
}

/// Main analysis engine. Cheap to share across threads; every call works on
/// its own lexicon snapshot.
pub struct AnalysisEngine {
    adapter: Arc<dyn NlpAdapter>,
    lexicon: SharedLexicon,
}

impl AnalysisEngine {
    pub fn new(adapter: Arc<dyn NlpAdapter>, lexicon: SharedLexicon) -> Self {
        Self { adapter, lexicon }
    }

    /// Compile the configured lexicon and pair it with `adapter`
    pub fn from_config(config: &Config, adapter: Arc<dyn NlpAdapter>) -> Result<Self> {
        let lexicon = Lexicon::from_config(config)?;
        log::debug!(
            "Analysis engine using '{}' adapter with {} lexicon skills",
            adapter.name(),
            lexicon.skill_count()
        );
        Ok(Self::new(adapter, SharedLexicon::new(lexicon)))
    }

    /// Engine backed by the built-in lexical adapter
    pub fn lexical(config: &Config) -> Result<Self> {
        Self::from_config(config, Arc::new(LexicalAdapter::new()))
    }

    pub fn lexicon(&self) -> &SharedLexicon {
        &self.lexicon
    }

    pub fn adapter_name(&self) -> &str {
        self.adapter.name()
    }

    pub fn segment(&self, resume_text: &str) -> Segmentation {
        segmenter::segment(resume_text, &self.lexicon.snapshot())
    }

    pub fn parse_sections(&self, resume_text: &str) -> ParsedResume {
        extract::parse_sections(resume_text, &self.lexicon.snapshot())
    }

    pub fn analyze(&self, resume_text: &str, job_description: &str) -> Result<MatchResult> {
        self.analyze_at(resume_text, job_description, Utc::now())
    }

    /// Same as [`analyze`](Self::analyze) with the timestamp supplied by the
    /// caller, so identical inputs give identical results
    pub fn analyze_at(
        &self,
        resume_text: &str,
        job_description: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<MatchResult> {
        let start_time = Instant::now();
        let lexicon = self.lexicon.snapshot();
        let adapter = self.adapter.as_ref();

        // 1. Whole-document similarity
        let similarity = if resume_text.trim().is_empty() || job_description.trim().is_empty() {
            0.0
        } else {
            f64::from(adapter.similarity(resume_text, job_description)?).clamp(0.0, 1.0)
        };

        // 2. Skill gap
        let skills_match = SkillMatcher::new(adapter, &lexicon).compare(resume_text, job_description)?;

        // 3. Experience relevance
        let experience_relevance =
            RelevanceScorer::new(adapter, &lexicon).score(resume_text, job_description)?;

        // 4. Level and suggestions
        let experience_level = classify_experience_level(resume_text, &lexicon);
        let improvement_suggestions = generate_suggestions(
            &skills_match,
            &experience_relevance,
            similarity,
            lexicon.scoring(),
        );

        let result = MatchResult {
            match_score: round2(similarity * 100.0),
            experience_level,
            skills_match,
            experience_relevance,
            improvement_suggestions,
            analysis_timestamp: timestamp,
        };

        log::info!(
            "Analysis completed in {:.2?}: match score {:.2}, skills {:.2}%, level {}",
            start_time.elapsed(),
            result.match_score,
            result.skills_match.match_percentage,
            result.experience_level
        );

        Ok(result)
    }

    /// Analyze loaded documents, checking that each has the expected role
    pub fn analyze_documents(&self, resume: &Document, job: &Document) -> Result<MatchResult> {
        for (document, expected) in [
            (resume, DocumentType::Resume),
            (job, DocumentType::JobDescription),
        ] {
            if document.document_type() != expected {
                return Err(ResumeAnalyzerError::InvalidInput(format!(
                    "Expected a {} but got a {}",
                    expected,
                    document.document_type()
                )));
            }
            if document.is_blank() {
                log::warn!(
                    "{} {} is empty; scores will be zero",
                    expected,
                    document.source().unwrap_or("<inline>")
                );
            }
        }

        self.analyze(resume.content(), job.content())
    }
}

/// Senior when more than 8 years or any senior keyword, mid when more than 3
/// years or any mid keyword, entry otherwise
pub fn classify_experience_level(resume_text: &str, lexicon: &Lexicon) -> ExperienceLevel {
    let years = lexicon.max_years(resume_text);
    let hits = lexicon.level_hits(resume_text);

    if years > 8 || hits.senior > 0 {
        ExperienceLevel::Senior
    } else if years > 3 || hits.mid > 0 {
        ExperienceLevel::Mid
    } else {
        ExperienceLevel::Entry
    }
}

/// Ordered suggestions; each rule contributes at most one entry
pub fn generate_suggestions(
    skills: &SkillsComparison,
    relevance: &ExperienceRelevance,
    similarity: f64,
    scoring: &ScoringConfig,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !skills.missing_skills.is_empty() {
        let named: Vec<&str> = skills
            .missing_skills
            .iter()
            .take(scoring.max_missing_in_suggestion)
            .map(String::as_str)
            .collect();
        suggestions.push(format!("{}{}", MISSING_SKILLS_PREFIX, named.join(", ")));
    }

    if relevance.overall_relevance < scoring.relevance_threshold * 100.0 {
        suggestions.push(HIGHLIGHT_EXPERIENCE.to_string());
    }

    if similarity < scoring.adjustment_threshold {
        suggestions.push(SIGNIFICANT_ADJUSTMENT.to_string());
    }

    suggestions
}
