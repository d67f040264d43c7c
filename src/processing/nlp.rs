//! Tokenization, coarse part-of-speech tagging and document similarity
//!
//! [`NlpAdapter`] is the seam to whatever NLP capability backs the analysis.
//! [`LexicalAdapter`] is the built-in implementation: Unicode word
//! segmentation, a stop-word list, suffix/capitalization tagging and
//! term-frequency cosine similarity.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosClass {
    Noun,
    Propn,
    Verb,
    Adj,
    Adv,
    Num,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,
    pub pos: PosClass,
    pub is_stop: bool,
}

impl Token {
    pub fn is_nominal(&self) -> bool {
        matches!(self.pos, PosClass::Noun | PosClass::Propn)
    }
}

/// Tokenization and similarity capability consumed by the analysis core.
///
/// Implementations must return empty/zero results for empty input and keep
/// `similarity` within `[0, 1]`. An `Err` means the capability itself failed
/// and is surfaced to the caller as a retryable adapter error.
pub trait NlpAdapter: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;

    fn similarity(&self, a: &str, b: &str) -> Result<f32>;

    fn name(&self) -> &str {
        "unnamed"
    }
}

pub struct LexicalAdapter {
    stop_words: HashSet<&'static str>,
}

impl Default for LexicalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalAdapter {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    pub fn is_stop_word(&self, lower: &str) -> bool {
        self.stop_words.contains(lower)
    }

    /// Map typographic punctuation to ASCII
    pub fn normalize(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                '\u{2026}' => '.',
                '\u{00A0}' => ' ',
                _ => c,
            })
            .collect()
    }

    fn tag(&self, word: &str, lower: &str, sentence_initial: bool) -> PosClass {
        if word.chars().any(|c| c.is_numeric())
            && word.chars().all(|c| c.is_numeric() || c == '.' || c == ',')
        {
            return PosClass::Num;
        }
        if self.is_stop_word(lower) {
            return PosClass::Other;
        }

        let mut chars = word.chars();
        let capitalized = chars.next().map_or(false, char::is_uppercase);
        let inner_upper_or_digit = chars.any(|c| c.is_uppercase() || c.is_numeric());

        // Capitalized mid-sentence or mixed-case forms are names: "Python", "AWS", "GraphQL"
        if inner_upper_or_digit || (capitalized && !sentence_initial) {
            return PosClass::Propn;
        }

        let len = lower.chars().count();
        if len > 4 && (lower.ends_with("ing") || lower.ends_with("ed")) {
            return PosClass::Verb;
        }
        if len > 4 && lower.ends_with("ly") {
            return PosClass::Adv;
        }
        if len > 5 && ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return PosClass::Adj;
        }

        if capitalized {
            PosClass::Propn
        } else {
            PosClass::Noun
        }
    }

    /// Lowercased content-word frequencies
    fn term_frequencies(&self, text: &str) -> HashMap<String, f32> {
        let mut tf = HashMap::new();
        for word in Self::normalize(text).unicode_words() {
            let lower = word.to_lowercase();
            if lower.chars().count() > 1 && !self.is_stop_word(&lower) {
                *tf.entry(lower).or_insert(0.0) += 1.0;
            }
        }
        tf
    }
}

/// Whether the text before a word ends a sentence or line
fn starts_sentence(preceding: &str) -> bool {
    match preceding.trim_end_matches([' ', '\t']).chars().next_back() {
        None => true,
        Some(c) => matches!(c, '.' | '!' | '?' | ':' | ';' | '\n' | '\r' | '•' | '-' | '*'),
    }
}

impl NlpAdapter for LexicalAdapter {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let normalized = Self::normalize(text);
        let tokens = normalized
            .unicode_word_indices()
            .map(|(offset, word)| {
                let lower = word.to_lowercase();
                let pos = self.tag(word, &lower, starts_sentence(&normalized[..offset]));
                Token {
                    surface: word.to_string(),
                    pos,
                    is_stop: self.is_stop_word(&lower),
                }
            })
            .collect();

        Ok(tokens)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        let tf_a = self.term_frequencies(a);
        let tf_b = self.term_frequencies(b);
        if tf_a.is_empty() || tf_b.is_empty() {
            return Ok(0.0);
        }

        let dot: f32 = tf_a
            .iter()
            .filter_map(|(term, wa)| tf_b.get(term).map(|wb| wa * wb))
            .sum();
        let norm_a = tf_a.values().map(|w| w * w).sum::<f32>().sqrt();
        let norm_b = tf_b.values().map(|w| w * w).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            Ok(0.0)
        } else {
            Ok((dot / (norm_a * norm_b)).clamp(0.0, 1.0))
        }
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

const ADJ_SUFFIXES: [&str; 6] = ["ous", "ful", "ive", "able", "ible", "ical"];

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
    "each", "etc", "few", "for", "from", "further", "had", "has", "have", "having", "he",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "may", "me", "might", "more", "most", "must", "my",
    "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
    "our", "ours", "ourselves", "out", "over", "own", "per", "same", "shall", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "within", "without",
    "would", "you", "your", "yours", "yourself", "yourselves",
];
