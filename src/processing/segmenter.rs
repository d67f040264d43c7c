//! Splitting resume text into labeled sections

use crate::processing::document::{Section, SectionLabel};
use crate::processing::lexicon::Lexicon;
use serde::{Deserialize, Serialize};

/// Sections in document order. Text before the first header is kept as
/// [`SectionLabel::Unlabeled`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmentation {
    sections: Vec<Section>,
}

impl Segmentation {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All text filed under `label`, newline-joined in document order
    pub fn text_for(&self, label: SectionLabel) -> String {
        self.sections
            .iter()
            .filter(|s| s.label == label && !s.text.is_empty())
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, label: SectionLabel) -> bool {
        self.sections.iter().any(|s| s.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Text after the first ':' of a header line, e.g. "Skills: Rust, Go"
fn inline_remainder(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once(':')?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

fn flush(sections: &mut Vec<Section>, current: Option<SectionLabel>, content: &mut Vec<&str>) {
    match current {
        Some(label) => sections.push(Section {
            label,
            text: content.join("\n"),
        }),
        None if !content.is_empty() => sections.push(Section {
            label: SectionLabel::Unlabeled,
            text: content.join("\n"),
        }),
        None => {}
    }
    content.clear();
}

pub fn segment(text: &str, lexicon: &Lexicon) -> Segmentation {
    let mut sections = Vec::new();
    let mut current: Option<SectionLabel> = None;
    let mut content: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(label) = lexicon.match_header(line) {
            flush(&mut sections, current, &mut content);
            current = Some(label);
            if let Some(rest) = inline_remainder(line) {
                content.push(rest);
            }
        } else {
            content.push(line);
        }
    }
    flush(&mut sections, current, &mut content);

    log::debug!(
        "Segmented {} lines into {} sections",
        text.lines().count(),
        sections.len()
    );

    Segmentation { sections }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Roe\njane@example.com\n\nEDUCATION\nBachelor of Science in Computer Science, University of Example, May 2020\n\nWork Experience\nAcme Inc. | Software Engineer\nJan 2021 - Present\n- Built APIs in Python\n\nTechnical Skills\nPython, SQL, Docker\n";

    #[test]
    fn test_sections_in_document_order() {
        let lexicon = Lexicon::default();
        let seg = segment(RESUME, &lexicon);

        let labels: Vec<SectionLabel> = seg.sections().iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                SectionLabel::Unlabeled,
                SectionLabel::Education,
                SectionLabel::Experience,
                SectionLabel::Skills,
            ]
        );
        assert_eq!(seg.text_for(SectionLabel::Unlabeled), "Jane Roe\njane@example.com");
        assert_eq!(
            seg.text_for(SectionLabel::Experience),
            "Acme Inc. | Software Engineer\nJan 2021 - Present\n- Built APIs in Python"
        );
        assert_eq!(seg.text_for(SectionLabel::Skills), "Python, SQL, Docker");
        assert_eq!(seg.text_for(SectionLabel::Projects), "");
    }

    #[test]
    fn test_no_headers_keeps_everything_unlabeled() {
        let lexicon = Lexicon::default();
        let seg = segment("line one\n\n  line two  \nline three", &lexicon);

        assert_eq!(seg.sections().len(), 1);
        assert_eq!(seg.text_for(SectionLabel::Unlabeled), "line one\nline two\nline three");
    }

    #[test]
    fn test_every_content_line_accounted_once() {
        let lexicon = Lexicon::default();
        let text = "Intro line\nSkills\nRust\nGo\nEducation\nMIT\nSkills\nKubernetes\n\n\nOutro";
        let seg = segment(text, &lexicon);

        let joined: Vec<&str> = seg
            .sections()
            .iter()
            .flat_map(|s| s.text.lines())
            .collect();
        for line in ["Intro line", "Rust", "Go", "MIT", "Kubernetes", "Outro"] {
            assert_eq!(joined.iter().filter(|l| **l == line).count(), 1, "{}", line);
        }
        assert_eq!(joined.len(), 6);
        assert_eq!(seg.text_for(SectionLabel::Skills), "Rust\nGo\nKubernetes\nOutro");
    }

    #[test]
    fn test_inline_header_content_is_kept() {
        let lexicon = Lexicon::default();
        let seg = segment("Skills: Python, SQL\nDocker", &lexicon);
        assert_eq!(seg.text_for(SectionLabel::Skills), "Python, SQL\nDocker");
    }

    #[test]
    fn test_header_without_content_is_present_but_empty() {
        let lexicon = Lexicon::default();
        let seg = segment("Projects\nEducation\nState College", &lexicon);
        assert!(seg.contains(SectionLabel::Projects));
        assert_eq!(seg.text_for(SectionLabel::Projects), "");
        assert_eq!(seg.text_for(SectionLabel::Education), "State College");
    }

    #[test]
    fn test_empty_text() {
        let lexicon = Lexicon::default();
        assert!(segment("", &lexicon).is_empty());
    }
}
