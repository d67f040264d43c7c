//! Compiled lexicons shared by every analysis component
//!
//! A [`Lexicon`] is built once from [`Config`] data and never mutated. Reloads
//! go through [`SharedLexicon::replace`], which swaps the whole `Arc`; analyses
//! already running keep the snapshot they started with.

use crate::config::{Config, LevelKeywords, ScoringConfig};
use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::document::SectionLabel;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, RwLock};

#[derive(Debug)]
pub struct Lexicon {
    headers: Vec<(SectionLabel, Vec<String>)>,
    skill_matcher: AhoCorasick,
    skill_phrases: Vec<String>,
    skill_set: HashSet<String>,
    levels: LevelKeywords,
    role_keywords: Vec<String>,
    noise_terms: Vec<String>,
    generic_terms: HashSet<String>,
    years_regex: Regex,
    experience_block_regex: Regex,
    scoring: ScoringConfig,
}

/// Keyword hits per experience level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelHits {
    pub entry: usize,
    pub mid: usize,
    pub senior: usize,
}

fn normalize_terms(terms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    out.dedup();
    out
}

fn parse_years(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

impl Lexicon {
    pub fn from_config(config: &Config) -> Result<Self> {
        let lexicon = &config.lexicon;

        let mut headers = Vec::with_capacity(SectionLabel::PRIORITY.len());
        for label in SectionLabel::PRIORITY {
            let phrases = normalize_terms(lexicon.headers.phrases(label));
            if phrases.is_empty() {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "Header lexicon for {} has no phrases",
                    label
                )));
            }
            headers.push((label, phrases));
        }

        let mut skill_phrases = normalize_terms(&lexicon.technical_skills);
        skill_phrases.sort();
        skill_phrases.dedup();
        let skill_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&skill_phrases)
            .map_err(|e| {
                ResumeAnalyzerError::Configuration(format!("Failed to build skill matcher: {}", e))
            })?;
        let skill_set = skill_phrases.iter().cloned().collect();

        let years_regex = Regex::new(&lexicon.years_pattern).map_err(|e| {
            ResumeAnalyzerError::Configuration(format!("Invalid years pattern: {}", e))
        })?;
        if years_regex.captures_len() < 2 {
            return Err(ResumeAnalyzerError::Configuration(
                "Years pattern must capture the number of years in group 1".to_string(),
            ));
        }

        let experience_block_regex = Regex::new(&lexicon.experience_block_pattern).map_err(|e| {
            ResumeAnalyzerError::Configuration(format!("Invalid experience block pattern: {}", e))
        })?;
        if experience_block_regex.is_match("") {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "Experience block pattern must not match empty text: {}",
                lexicon.experience_block_pattern
            )));
        }

        for (name, value) in [
            ("relevance_threshold", config.scoring.relevance_threshold),
            ("adjustment_threshold", config.scoring.adjustment_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            headers,
            skill_matcher,
            skill_phrases,
            skill_set,
            levels: LevelKeywords {
                entry: normalize_terms(&lexicon.experience_levels.entry),
                mid: normalize_terms(&lexicon.experience_levels.mid),
                senior: normalize_terms(&lexicon.experience_levels.senior),
            },
            role_keywords: normalize_terms(&lexicon.role_keywords),
            noise_terms: normalize_terms(&lexicon.noise_terms),
            generic_terms: normalize_terms(&lexicon.generic_terms).into_iter().collect(),
            years_regex,
            experience_block_regex,
            scoring: config.scoring.clone(),
        })
    }

    /// First label, in priority order, whose header phrases occur in `line`
    pub fn match_header(&self, line: &str) -> Option<SectionLabel> {
        let lower = line.to_lowercase();
        self.headers
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|p| lower.contains(p.as_str())))
            .map(|(label, _)| *label)
    }

    /// All skill-lexicon phrases occurring as whole words in `text`, lowercased
    pub fn find_skills(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();

        for mat in self.skill_matcher.find_iter(text) {
            let before = text[..mat.start()].chars().next_back();
            let after = text[mat.end()..].chars().next();
            if before.map_or(false, is_word_char) || after.map_or(false, is_word_char) {
                continue;
            }
            found.insert(self.skill_phrases[mat.pattern().as_usize()].clone());
        }

        found
    }

    pub fn is_skill(&self, token: &str) -> bool {
        self.skill_set.contains(&token.to_lowercase())
    }

    pub fn is_generic(&self, token: &str) -> bool {
        self.generic_terms.contains(token)
    }

    pub fn is_noise(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.noise_terms.iter().any(|t| lower.contains(t.as_str()))
    }

    pub fn role_keywords(&self) -> &[String] {
        &self.role_keywords
    }

    /// Largest "N years of experience" mention, 0 when there is none.
    /// Figures too large for a `u32` saturate.
    pub fn max_years(&self, text: &str) -> u32 {
        let lower = text.to_lowercase();
        self.years_regex
            .captures_iter(&lower)
            .filter_map(|cap| cap.get(1))
            .filter_map(|m| parse_years(m.as_str()))
            .max()
            .unwrap_or(0)
    }

    /// Number of distinct level terms present in `text`
    pub fn level_hits(&self, text: &str) -> LevelHits {
        let lower = text.to_lowercase();
        let count = |terms: &[String]| terms.iter().filter(|t| lower.contains(t.as_str())).count();

        LevelHits {
            entry: count(&self.levels.entry),
            mid: count(&self.levels.mid),
            senior: count(&self.levels.senior),
        }
    }

    pub fn experience_block_regex(&self) -> &Regex {
        &self.experience_block_regex
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn skill_count(&self) -> usize {
        self.skill_phrases.len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::from_config(&Config::default()).expect("Default lexicon must be valid")
    }
}

/// Shared handle with atomic whole-lexicon replacement
#[derive(Debug, Clone)]
pub struct SharedLexicon {
    current: Arc<RwLock<Arc<Lexicon>>>,
}

impl SharedLexicon {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(lexicon))),
        }
    }

    /// The lexicon in effect right now. Hold it for the duration of one analysis.
    pub fn snapshot(&self) -> Arc<Lexicon> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a new lexicon, returning the previous one
    pub fn replace(&self, lexicon: Lexicon) -> Arc<Lexicon> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, Arc::new(lexicon))
    }

    /// Rebuild from config and swap. On error the current lexicon stays in place.
    pub fn reload(&self, config: &Config) -> Result<()> {
        let lexicon = Lexicon::from_config(config)?;
        self.replace(lexicon);
        log::info!("Lexicon reloaded");
        Ok(())
    }
}

impl Default for SharedLexicon {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}
