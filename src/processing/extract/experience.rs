use super::{split_entries, strip_bullet, MONTH, SEGMENT_SPLIT};
use crate::processing::lexicon::Lexicon;
use crate::processing::nlp::LexicalAdapter;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_START: &str = "Unknown";
pub const PRESENT: &str = "Present";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Vec<String>,
    pub skills: BTreeSet<String>,
}

/// Company-style heading: capitalized, carrying a legal suffix or a field separator
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][^\n]*?(?:\bInc\b\.?|\bLLC\b|\bLtd\b\.?|\bCorp\b\.?|\||\s-\s)")
        .expect("Invalid heading regex")
});

static DATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{}\s+)?(?:19|20)\d{{2}}\b", MONTH)).expect("Invalid date line regex")
});

static MONTH_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({m}\s+\d{{4}})(?:\s*(?:-|to|until)\s*(present|current|now|{m}\s+\d{{4}}))?",
        m = MONTH
    ))
    .expect("Invalid date range regex")
});

static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b((?:19|20)\d{2})\s*(?:-|to|until)\s*(present|current|now|(?:19|20)\d{2})\b")
        .expect("Invalid year range regex")
});

fn is_heading(line: &str) -> bool {
    HEADING.is_match(line) && !DATE_LINE.is_match(line)
}

fn segments(line: &str) -> impl Iterator<Item = &str> {
    SEGMENT_SPLIT
        .split(line)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn mentions_role(segment: &str, lexicon: &Lexicon) -> bool {
    segment
        .split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .any(|word| {
            lexicon
                .role_keywords()
                .iter()
                .any(|kw| word == *kw || word.strip_suffix('s') == Some(kw.as_str()))
        })
}

fn normalize_end(end: &str) -> String {
    match end.to_lowercase().as_str() {
        "present" | "current" | "now" => PRESENT.to_string(),
        _ => end.to_string(),
    }
}

/// Start and end of the first date range in the entry
fn date_range(entry: &str) -> (String, String) {
    let captures = MONTH_RANGE
        .captures(entry)
        .or_else(|| YEAR_RANGE.captures(entry));

    match captures {
        Some(cap) => {
            let start = cap.get(1).map_or(UNKNOWN_START, |m| m.as_str());
            let end = cap
                .get(2)
                .map_or_else(|| PRESENT.to_string(), |m| normalize_end(m.as_str()));
            (start.to_string(), end)
        }
        None => (UNKNOWN_START.to_string(), PRESENT.to_string()),
    }
}

/// True when nothing but a date range and separators remain on the line
fn is_date_only(line: &str) -> bool {
    let stripped = MONTH_RANGE.replace_all(line, "");
    let stripped = YEAR_RANGE.replace_all(&stripped, "");
    stripped
        .chars()
        .all(|c| c.is_whitespace() || matches!(c, '-' | '|' | ',' | '(' | ')'))
}

fn parse_entry(lines: &[&str], lexicon: &Lexicon) -> ExperienceRecord {
    let heading = lines.first().map_or("", |l| strip_bullet(l));

    let company = segments(heading)
        .next()
        .unwrap_or(UNKNOWN_COMPANY)
        .to_string();

    // Prefer a role segment other than the company field, then the company field itself
    let title = lines
        .iter()
        .enumerate()
        .flat_map(|(i, line)| {
            segments(strip_bullet(line))
                .enumerate()
                .filter(move |(j, _)| !(i == 0 && *j == 0))
                .map(|(_, segment)| segment)
        })
        .chain(segments(heading).take(1))
        .find(|segment| !is_date_only(segment) && mentions_role(segment, lexicon))
        .unwrap_or(UNKNOWN_TITLE)
        .to_string();

    let (start_date, end_date) = date_range(&lines.join("\n"));

    let mut description = Vec::new();
    let mut skills = BTreeSet::new();
    // The heading and date lines are description too; only noise is dropped
    for line in lines {
        let line = strip_bullet(line);
        if line.is_empty() || lexicon.is_noise(line) {
            continue;
        }
        skills.extend(lexicon.find_skills(line));
        description.push(line.to_string());
    }

    ExperienceRecord {
        company,
        title,
        start_date,
        end_date,
        description,
        skills,
    }
}

/// Experience entries start at company-style headings; date lines never start one
pub fn extract(text: &str, lexicon: &Lexicon) -> Vec<ExperienceRecord> {
    let text = LexicalAdapter::normalize(text);

    split_entries(&text, is_heading)
        .iter()
        .map(|lines| parse_entry(lines, lexicon))
        .collect()
}
