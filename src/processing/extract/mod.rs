//! Per-section structured extraction
//!
//! Every extractor is total: empty or missing section text yields an empty
//! result, and heuristic misses produce placeholder values rather than errors.
//! Pattern lists inside each extractor are tried in declared order and the
//! first hit wins.

pub mod contact;
pub mod education;
pub mod experience;
pub mod projects;
pub mod skills;

pub use contact::ContactInfo;
pub use education::EducationRecord;
pub use experience::ExperienceRecord;
pub use projects::ProjectRecord;

use crate::processing::document::SectionLabel;
use crate::processing::lexicon::Lexicon;
use crate::processing::segmenter::{segment, Segmentation};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Month names and abbreviations, longest alternatives first
pub(crate) const MONTH: &str = r"(?:January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec)\.?";

/// Splits a line into fields at `|`, `,`, `•`, tabs or a spaced dash
pub(crate) static SEGMENT_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:[|,•\t]|\s-\s)\s*").expect("Invalid segment regex")
});

pub(crate) static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s,|]+").expect("Invalid URL regex"));

/// Structured view of a resume, one field per extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub education: Vec<EducationRecord>,
    pub work_experience: Vec<ExperienceRecord>,
    pub skills: BTreeSet<String>,
    pub contact: ContactInfo,
    pub projects: Vec<ProjectRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    Education,
    Experience,
    Skills,
    Contact,
    Projects,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Education(Vec<EducationRecord>),
    Experience(Vec<ExperienceRecord>),
    Skills(BTreeSet<String>),
    Contact(ContactInfo),
    Projects(Vec<ProjectRecord>),
}

impl ExtractorKind {
    pub const ALL: [ExtractorKind; 5] = [
        ExtractorKind::Education,
        ExtractorKind::Experience,
        ExtractorKind::Skills,
        ExtractorKind::Contact,
        ExtractorKind::Projects,
    ];

    /// Section this extractor reads
    pub fn label(self) -> SectionLabel {
        match self {
            ExtractorKind::Education => SectionLabel::Education,
            ExtractorKind::Experience => SectionLabel::Experience,
            ExtractorKind::Skills => SectionLabel::Skills,
            ExtractorKind::Contact => SectionLabel::Contact,
            ExtractorKind::Projects => SectionLabel::Projects,
        }
    }

    pub fn extract(self, text: &str, lexicon: &Lexicon) -> Extracted {
        match self {
            ExtractorKind::Education => Extracted::Education(education::extract(text)),
            ExtractorKind::Experience => {
                Extracted::Experience(experience::extract(text, lexicon))
            }
            ExtractorKind::Skills => Extracted::Skills(skills::extract(text, lexicon)),
            ExtractorKind::Contact => Extracted::Contact(contact::extract(text)),
            ExtractorKind::Projects => Extracted::Projects(projects::extract(text, lexicon)),
        }
    }

    /// Section text for this extractor. Contact details usually sit in the
    /// header block, so contact falls back to the unlabeled lead-in.
    fn source_text(self, segmentation: &Segmentation) -> String {
        let text = segmentation.text_for(self.label());
        if self == ExtractorKind::Contact && text.is_empty() {
            segmentation.text_for(SectionLabel::Unlabeled)
        } else {
            text
        }
    }
}

pub fn parse_sections(text: &str, lexicon: &Lexicon) -> ParsedResume {
    parse_segmentation(&segment(text, lexicon), lexicon)
}

pub fn parse_segmentation(segmentation: &Segmentation, lexicon: &Lexicon) -> ParsedResume {
    let mut parsed = ParsedResume::default();

    for kind in ExtractorKind::ALL {
        let text = kind.source_text(segmentation);
        match kind.extract(&text, lexicon) {
            Extracted::Education(records) => parsed.education = records,
            Extracted::Experience(records) => parsed.work_experience = records,
            Extracted::Skills(skills) => parsed.skills = skills,
            Extracted::Contact(contact) => parsed.contact = contact,
            Extracted::Projects(projects) => parsed.projects = projects,
        }
    }

    log::debug!(
        "Parsed {} education, {} experience, {} skills, {} projects",
        parsed.education.len(),
        parsed.work_experience.len(),
        parsed.skills.len(),
        parsed.projects.len()
    );

    parsed
}

pub(crate) fn starts_uppercase(line: &str) -> bool {
    line.chars().next().map_or(false, char::is_uppercase)
}

/// Drop list markers from the start of a line
pub(crate) fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•', '●', '■', '◦', '▪', '>'])
        .trim_start()
}

/// Group non-empty lines into entries; a line for which `is_start` holds opens a new one
pub(crate) fn split_entries<'a>(text: &'a str, is_start: impl Fn(&str) -> bool) -> Vec<Vec<&'a str>> {
    let mut entries: Vec<Vec<&'a str>> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match entries.last_mut() {
            Some(entry) if !is_start(line) => entry.push(line),
            _ => entries.push(vec![line]),
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
Jane Roe
jane.roe@example.com | (555) 123-4567 | linkedin.com/in/janeroe

Education
Bachelor of Science in Computer Science, University of Example, May 2020, GPA: 3.8

Professional Experience
Acme Inc. | Senior Software Engineer
Jan 2021 - Present
- Built REST API services in Python and Docker
- Mentored four engineers

Skills
Python, SQL, Docker, Machine Learning

Projects
Resume Parser | https://github.com/janeroe/parser
- Rust command line tool using Kubernetes jobs
";

    #[test]
    fn test_parse_sections_end_to_end() {
        let lexicon = Lexicon::default();
        let parsed = parse_sections(RESUME, &lexicon);

        assert_eq!(parsed.education.len(), 1);
        assert!(parsed.education[0].degree.contains("Bachelor of Science"));
        assert_eq!(parsed.education[0].gpa, Some(3.8));

        assert_eq!(parsed.work_experience.len(), 1);
        let job = &parsed.work_experience[0];
        assert_eq!(job.company, "Acme Inc.");
        assert_eq!(job.title, "Senior Software Engineer");
        assert_eq!(job.start_date, "Jan 2021");
        assert_eq!(job.end_date, "Present");
        assert!(job.skills.contains("python"));
        assert!(job.skills.contains("docker"));

        let expected: BTreeSet<String> = ["docker", "machine learning", "python", "sql"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(parsed.skills, expected);

        assert_eq!(parsed.contact.email.as_deref(), Some("jane.roe@example.com"));
        assert!(parsed.contact.linkedin.is_some());

        assert_eq!(parsed.projects.len(), 1);
        assert_eq!(parsed.projects[0].name, "Resume Parser");
        assert!(parsed.projects[0].technologies.contains("kubernetes"));
    }

    #[test]
    fn test_parse_sections_on_empty_text() {
        let lexicon = Lexicon::default();
        assert_eq!(parse_sections("", &lexicon), ParsedResume::default());
    }

    #[test]
    fn test_each_kind_reads_its_own_section() {
        for kind in ExtractorKind::ALL {
            assert_ne!(kind.label(), SectionLabel::Unlabeled);
        }
        let lexicon = Lexicon::default();
        assert_eq!(
            ExtractorKind::Skills.extract("", &lexicon),
            Extracted::Skills(BTreeSet::new())
        );
    }

    #[test]
    fn test_split_entries() {
        let entries = split_entries("First\n  more\n\nSecond\nthird", starts_uppercase);
        assert_eq!(entries, vec![vec!["First", "more"], vec!["Second", "third"]]);
        assert!(split_entries("", starts_uppercase).is_empty());
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("  • Led migration"), "Led migration");
        assert_eq!(strip_bullet("- Built things"), "Built things");
        assert_eq!(strip_bullet("Plain"), "Plain");
    }
}
