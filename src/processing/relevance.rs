//! Experience relevance: how closely experience blocks resemble the job

use crate::error::Result;
use crate::processing::lexicon::Lexicon;
use crate::processing::nlp::NlpAdapter;
use crate::processing::round2;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRelevance {
    /// Mean block similarity, 0-100
    pub overall_relevance: f64,
    /// Number of experience blocks scored
    pub relevant_experience_count: usize,
    pub has_recent_relevant_experience: bool,
}

/// End of the block starting at `from`: the next blank line followed by an
/// uppercase letter, or the end of the text
fn block_end(text: &str, from: usize) -> usize {
    let mut search = from;
    while let Some(offset) = text[search..].find("\n\n") {
        let gap = search + offset;
        let after = text[gap..].trim_start_matches('\n');
        if after.chars().next().map_or(false, char::is_uppercase) {
            return gap;
        }
        search = gap + 2;
    }
    text.len()
}

/// Blocks that open with an experience header, in document order
pub fn experience_blocks<'t>(text: &'t str, header: &Regex) -> Vec<&'t str> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(found) = header.find_at(text, pos) else {
            break;
        };
        let end = block_end(text, found.end());
        if end > found.start() {
            blocks.push(&text[found.start()..end]);
        }

        let next = end.max(found.end());
        pos = if next > pos {
            next
        } else {
            // Empty match with nothing after it: step over one char
            pos + text[pos..].chars().next().map_or(1, char::len_utf8)
        };
    }

    blocks
}

pub struct RelevanceScorer<'a> {
    adapter: &'a dyn NlpAdapter,
    lexicon: &'a Lexicon,
}

impl<'a> RelevanceScorer<'a> {
    pub fn new(adapter: &'a dyn NlpAdapter, lexicon: &'a Lexicon) -> Self {
        Self { adapter, lexicon }
    }

    pub fn score(&self, resume_text: &str, job_text: &str) -> Result<ExperienceRelevance> {
        let blocks = experience_blocks(resume_text, self.lexicon.experience_block_regex());
        if blocks.is_empty() || job_text.trim().is_empty() {
            return Ok(ExperienceRelevance {
                relevant_experience_count: blocks.len(),
                ..ExperienceRelevance::default()
            });
        }

        let mut total = 0.0_f64;
        for block in &blocks {
            total += f64::from(self.adapter.similarity(block, job_text)?);
        }
        let mean = total / blocks.len() as f64;

        log::debug!("Scored {} experience blocks, mean similarity {:.3}", blocks.len(), mean);

        Ok(ExperienceRelevance {
            overall_relevance: round2(mean * 100.0),
            relevant_experience_count: blocks.len(),
            has_recent_relevant_experience: mean > self.lexicon.scoring().relevance_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::nlp::{LexicalAdapter, Token};

    /// Similarity fixed at a constant, for exercising the threshold
    struct ConstantAdapter(f32);

    impl NlpAdapter for ConstantAdapter {
        fn tokenize(&self, _text: &str) -> Result<Vec<Token>> {
            Ok(Vec::new())
        }

        fn similarity(&self, _a: &str, _b: &str) -> Result<f32> {
            Ok(self.0)
        }
    }

    const RESUME: &str = "Jane Roe\n\nWORK EXPERIENCE\nAcme Inc. | Engineer\n\n- built services\n\nEDUCATION\nState College\n\nEmployment\nGlobex - Analyst";

    #[test]
    fn test_blocks_end_at_capitalized_paragraph() {
        let lexicon = Lexicon::default();
        let blocks = experience_blocks(RESUME, lexicon.experience_block_regex());

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "WORK EXPERIENCE\nAcme Inc. | Engineer\n\n- built services");
        assert_eq!(blocks[1], "Employment\nGlobex - Analyst");
    }

    #[test]
    fn test_empty_header_matches_still_terminate() {
        let header = Regex::new("(?i)(?:experience)?").unwrap();
        let blocks = experience_blocks("Jane\n\nEXPERIENCE\nAcme", &header);

        assert!(blocks.iter().all(|b| !b.is_empty()));
        assert!(blocks.iter().any(|b| b.contains("EXPERIENCE\nAcme")));
        assert!(experience_blocks("", &header).is_empty());
    }

    #[test]
    fn test_no_blocks_means_zero() {
        let lexicon = Lexicon::default();
        let scorer = RelevanceScorer::new(&ConstantAdapter(0.9), &lexicon);
        let relevance = scorer.score("Education\nState College", "Rust engineer").unwrap();

        assert_eq!(relevance, ExperienceRelevance::default());
    }

    #[test]
    fn test_mean_and_threshold() {
        let lexicon = Lexicon::default();

        let high = RelevanceScorer::new(&ConstantAdapter(0.75), &lexicon)
            .score(RESUME, "Engineer")
            .unwrap();
        assert_eq!(high.overall_relevance, 75.0);
        assert_eq!(high.relevant_experience_count, 2);
        assert!(high.has_recent_relevant_experience);

        let at_threshold = RelevanceScorer::new(&ConstantAdapter(0.5), &lexicon)
            .score(RESUME, "Engineer")
            .unwrap();
        assert!(!at_threshold.has_recent_relevant_experience);
    }

    #[test]
    fn test_lexical_similarity_is_bounded() {
        let lexicon = Lexicon::default();
        let adapter = LexicalAdapter::new();
        let relevance = RelevanceScorer::new(&adapter, &lexicon)
            .score(RESUME, "Engineer to build services")
            .unwrap();

        assert!(relevance.overall_relevance > 0.0);
        assert!(relevance.overall_relevance <= 100.0);
    }
}
