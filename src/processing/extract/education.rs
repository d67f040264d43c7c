use super::{split_entries, starts_uppercase, MONTH};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const UNKNOWN_DEGREE: &str = "Unknown Degree";
pub const UNKNOWN_SCHOOL: &str = "Unknown School";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub degree: String,
    pub school: String,
    pub graduation_date: Option<String>,
    pub gpa: Option<f32>,
}

static DEGREE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:Bachelor'?s?|Master'?s?|Ph\.?D\.?|B\.S\.|M\.S\.|B\.A\.|M\.A\.|B\.Sc\.?|M\.Sc\.?|MBA)(?:\s+(?:of|in))?\s+[^,\n]+",
        r"(?i)[^,\n]+?\s+Degree\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid degree regex"))
    .collect()
});

static SCHOOL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:University|College|Institute|School)\s+of\s+[^,\n]+",
        r"(?:[A-Z][\w.&'-]*\s+)+(?:University|College|Institute|School)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid school regex"))
    .collect()
});

static GRADUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:{}|Spring|Summer|Fall|Autumn|Winter)\s+\d{{4}}\b",
        MONTH
    ))
    .expect("Invalid graduation date regex")
});

static GPA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bGPA\s*:?\s*(\d+(?:\.\d+)?)").expect("Invalid GPA regex")
});

fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
}

struct Fields {
    degree: Option<String>,
    school: Option<String>,
    graduation_date: Option<String>,
    gpa: Option<f32>,
}

impl Fields {
    fn scan(entry: &str) -> Self {
        Self {
            degree: first_match(&DEGREE_PATTERNS, entry),
            school: first_match(&SCHOOL_PATTERNS, entry),
            graduation_date: GRADUATION.find(entry).map(|m| m.as_str().to_string()),
            gpa: GPA
                .captures(entry)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok()),
        }
    }

    fn into_record(self) -> EducationRecord {
        EducationRecord {
            degree: self.degree.unwrap_or_else(|| UNKNOWN_DEGREE.to_string()),
            school: self.school.unwrap_or_else(|| UNKNOWN_SCHOOL.to_string()),
            graduation_date: self.graduation_date,
            gpa: self.gpa,
        }
    }

    fn fill_into(self, record: &mut EducationRecord) {
        if record.graduation_date.is_none() {
            record.graduation_date = self.graduation_date;
        }
        if record.gpa.is_none() {
            record.gpa = self.gpa;
        }
    }
}

/// Education entries start at lines beginning with an uppercase letter.
///
/// Entries are not judged one at a time. An entry with neither a degree nor a
/// school never becomes a record, but its date and GPA are merged into the
/// previous record when that one lacks them; with no previous record it is
/// discarded. An entry with only a school fills in the previous record when
/// that record's school is unknown (a degree line followed by a school line),
/// and otherwise becomes a record of its own with an unknown degree.
pub fn extract(text: &str) -> Vec<EducationRecord> {
    let mut records: Vec<EducationRecord> = Vec::new();

    for entry in split_entries(text, starts_uppercase) {
        let entry = entry.join("\n");
        let fields = Fields::scan(&entry);

        if fields.degree.is_some() {
            records.push(fields.into_record());
            continue;
        }

        let Some(school) = fields.school.clone() else {
            if let Some(last) = records.last_mut() {
                fields.fill_into(last);
            }
            continue;
        };

        match records.last_mut() {
            Some(last) if last.school == UNKNOWN_SCHOOL => {
                last.school = school;
                fields.fill_into(last);
            }
            _ => records.push(fields.into_record()),
        }
    }

    records
}
