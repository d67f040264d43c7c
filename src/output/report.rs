//! Report structures built from a match result

use crate::processing::analyzer::{ExperienceLevel, MatchResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Missing skills listed in a simple report
const SIMPLE_MISSING_SKILLS: usize = 5;
/// Suggestions listed in a simple report
const SIMPLE_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Simple,
    #[default]
    Detailed,
}

impl ReportKind {
    pub fn build(self, result: &MatchResult) -> Report {
        match self {
            ReportKind::Simple => Report::Simple(SimpleReport::from_result(result)),
            ReportKind::Detailed => Report::Detailed(DetailedReport::from_result(result)),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Simple => write!(f, "simple"),
            ReportKind::Detailed => write!(f, "detailed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "report_type", rename_all = "lowercase")]
pub enum Report {
    Simple(SimpleReport),
    Detailed(DetailedReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Simple(_) => ReportKind::Simple,
            Report::Detailed(_) => ReportKind::Detailed,
        }
    }

    pub fn match_score(&self) -> f64 {
        match self {
            Report::Simple(r) => r.match_score,
            Report::Detailed(r) => r.summary.overall_match_score,
        }
    }
}

/// Score, top missing skills and top suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleReport {
    pub generated_at: DateTime<Utc>,
    pub match_score: f64,
    pub key_missing_skills: Vec<String>,
    pub key_suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub skills_analysis: SkillsAnalysis,
    pub experience_analysis: ExperienceAnalysis,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub overall_match_score: f64,
    pub experience_level: ExperienceLevel,
    pub skills_match_percentage: f64,
    pub verdict: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsAnalysis {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAnalysis {
    pub relevance_score: f64,
    pub relevant_experience_count: usize,
    pub has_recent_relevant_experience: bool,
}

impl SimpleReport {
    pub fn from_result(result: &MatchResult) -> Self {
        Self {
            generated_at: result.analysis_timestamp,
            match_score: result.match_score,
            key_missing_skills: result
                .skills_match
                .missing_skills
                .iter()
                .take(SIMPLE_MISSING_SKILLS)
                .cloned()
                .collect(),
            key_suggestions: result
                .improvement_suggestions
                .iter()
                .take(SIMPLE_SUGGESTIONS)
                .cloned()
                .collect(),
        }
    }
}

impl DetailedReport {
    pub fn from_result(result: &MatchResult) -> Self {
        let skills = &result.skills_match;
        let relevance = &result.experience_relevance;

        Self {
            generated_at: result.analysis_timestamp,
            summary: ReportSummary {
                overall_match_score: result.match_score,
                experience_level: result.experience_level,
                skills_match_percentage: skills.match_percentage,
                verdict: verdict(result.match_score).to_string(),
            },
            skills_analysis: SkillsAnalysis {
                matching_skills: skills.matching_skills.iter().cloned().collect(),
                missing_skills: skills.missing_skills.iter().cloned().collect(),
                extra_skills: skills.extra_skills.iter().cloned().collect(),
            },
            experience_analysis: ExperienceAnalysis {
                relevance_score: relevance.overall_relevance,
                relevant_experience_count: relevance.relevant_experience_count,
                has_recent_relevant_experience: relevance.has_recent_relevant_experience,
            },
            suggestions: result.improvement_suggestions.clone(),
        }
    }
}

/// One-line verdict for a 0-100 match score
pub fn verdict(score: f64) -> &'static str {
    match score {
        s if s >= 80.0 => "Excellent match - ready to apply",
        s if s >= 60.0 => "Good match - minor tailoring recommended",
        s if s >= 40.0 => "Partial match - targeted improvements needed",
        _ => "Weak match - significant changes needed",
    }
}
