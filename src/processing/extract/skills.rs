use crate::processing::lexicon::Lexicon;
use std::collections::BTreeSet;

/// List separators removed before tokenizing a skills section
const SEPARATORS: [char; 7] = ['•', '●', '■', '|', ',', ';', '\n'];

/// Lexicon skills named in a skills section.
///
/// Single tokens are checked against the lexicon after trimming stray
/// punctuation, then multi-word phrases such as "machine learning" are picked
/// up from the cleaned text.
pub fn extract(text: &str, lexicon: &Lexicon) -> BTreeSet<String> {
    let cleaned: String = text
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();

    let mut skills: BTreeSet<String> = cleaned
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']' | ':' | '.' | '-' | '*')))
        .filter(|token| !token.is_empty() && lexicon.is_skill(token))
        .map(str::to_lowercase)
        .collect();

    skills.extend(lexicon.find_skills(&cleaned));
    skills
}
