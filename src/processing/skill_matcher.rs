//! Skill extraction and resume-vs-job skill gap computation

use crate::error::Result;
use crate::processing::lexicon::Lexicon;
use crate::processing::nlp::NlpAdapter;
use crate::processing::round2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Shortest token kept as a free-form skill
const MIN_TOKEN_CHARS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsComparison {
    pub matching_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub extra_skills: BTreeSet<String>,
    /// Share of job skills present in the resume, 0-100
    pub match_percentage: f64,
}

impl SkillsComparison {
    /// Overlap of two already case-folded skill sets. An empty job set gives 0%.
    pub fn between(resume_skills: &BTreeSet<String>, job_skills: &BTreeSet<String>) -> Self {
        let matching_skills: BTreeSet<String> =
            resume_skills.intersection(job_skills).cloned().collect();
        let missing_skills = job_skills.difference(resume_skills).cloned().collect();
        let extra_skills = resume_skills.difference(job_skills).cloned().collect();

        let match_percentage = if job_skills.is_empty() {
            0.0
        } else {
            round2(matching_skills.len() as f64 / job_skills.len() as f64 * 100.0)
        };

        Self {
            matching_skills,
            missing_skills,
            extra_skills,
            match_percentage,
        }
    }

    /// Every skill the job asked for, matched or not
    pub fn job_skills(&self) -> BTreeSet<String> {
        self.matching_skills.union(&self.missing_skills).cloned().collect()
    }
}

/// Skill matching over one lexicon snapshot and one NLP adapter
pub struct SkillMatcher<'a> {
    adapter: &'a dyn NlpAdapter,
    lexicon: &'a Lexicon,
}

impl<'a> SkillMatcher<'a> {
    pub fn new(adapter: &'a dyn NlpAdapter, lexicon: &'a Lexicon) -> Self {
        Self { adapter, lexicon }
    }

    /// Nouns and proper nouns from the adapter plus lexicon phrase hits
    pub fn extract_skills(&self, text: &str) -> Result<BTreeSet<String>> {
        if text.trim().is_empty() {
            return Ok(BTreeSet::new());
        }

        let mut skills: BTreeSet<String> = self
            .adapter
            .tokenize(text)?
            .into_iter()
            .filter(|token| token.is_nominal() && !token.is_stop)
            .map(|token| token.surface.to_lowercase())
            .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS && !self.lexicon.is_generic(word))
            .collect();

        skills.extend(self.lexicon.find_skills(text));
        Ok(skills)
    }

    pub fn compare(&self, resume_text: &str, job_text: &str) -> Result<SkillsComparison> {
        let resume_skills = self.extract_skills(resume_text)?;
        let job_skills = self.extract_skills(job_text)?;

        log::debug!(
            "Extracted {} resume skills and {} job skills",
            resume_skills.len(),
            job_skills.len()
        );

        Ok(SkillsComparison::between(&resume_skills, &job_skills))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumeAnalyzerError;
    use crate::processing::nlp::{LexicalAdapter, Token};

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct FailingAdapter;

    impl NlpAdapter for FailingAdapter {
        fn tokenize(&self, _text: &str) -> Result<Vec<Token>> {
            Err(ResumeAnalyzerError::Adapter("model not loaded".to_string()))
        }

        fn similarity(&self, _a: &str, _b: &str) -> Result<f32> {
            Err(ResumeAnalyzerError::Adapter("model not loaded".to_string()))
        }
    }

    #[test]
    fn test_job_skill_extraction() {
        let adapter = LexicalAdapter::new();
        let lexicon = Lexicon::default();
        let matcher = SkillMatcher::new(&adapter, &lexicon);

        let skills = matcher
            .extract_skills("Looking for a Software Engineer with Python, AWS, SQL experience")
            .unwrap();
        assert_eq!(skills, set(&["aws", "python", "sql"]));
    }

    #[test]
    fn test_compare_scenario() {
        let adapter = LexicalAdapter::new();
        let lexicon = Lexicon::default();
        let matcher = SkillMatcher::new(&adapter, &lexicon);

        let comparison = matcher
            .compare(
                "5 years of experience as a Senior Software Engineer... Skills: Python, SQL",
                "Looking for a Software Engineer with Python, AWS, SQL experience",
            )
            .unwrap();

        assert_eq!(comparison.matching_skills, set(&["python", "sql"]));
        assert_eq!(comparison.missing_skills, set(&["aws"]));
        assert!(comparison.extra_skills.is_empty());
        assert_eq!(comparison.match_percentage, 66.67);
    }

    #[test]
    fn test_partition_invariants() {
        let resume = set(&["docker", "python", "rust"]);
        let job = set(&["aws", "python", "sql"]);
        let comparison = SkillsComparison::between(&resume, &job);

        assert_eq!(comparison.job_skills(), job);
        assert!(comparison
            .matching_skills
            .intersection(&comparison.missing_skills)
            .next()
            .is_none());
        assert_eq!(comparison.extra_skills, set(&["docker", "rust"]));
        assert_eq!(comparison.match_percentage, 33.33);
    }

    #[test]
    fn test_empty_job_set_is_zero_percent() {
        let comparison = SkillsComparison::between(&set(&["python"]), &BTreeSet::new());
        assert_eq!(comparison.match_percentage, 0.0);
        assert!(comparison.missing_skills.is_empty());
    }

    #[test]
    fn test_empty_text_skips_adapter() {
        let lexicon = Lexicon::default();
        let matcher = SkillMatcher::new(&FailingAdapter, &lexicon);
        assert!(matcher.extract_skills("   ").unwrap().is_empty());
    }

    #[test]
    fn test_adapter_failure_propagates() {
        let lexicon = Lexicon::default();
        let matcher = SkillMatcher::new(&FailingAdapter, &lexicon);
        let err = matcher.extract_skills("Python developer").unwrap_err();
        assert!(err.is_retryable());
    }
}
