use super::{split_entries, starts_uppercase, strip_bullet, SEGMENT_SPLIT, URL};
use crate::processing::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const UNNAMED_PROJECT: &str = "Unnamed Project";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub url: Option<String>,
    pub description: Vec<String>,
    pub technologies: BTreeSet<String>,
}

/// A project starts at a capitalized line that does not read as a sentence
fn is_project_start(line: &str) -> bool {
    starts_uppercase(line) && !line.ends_with('.')
}

fn parse_entry(lines: &[&str], lexicon: &Lexicon) -> ProjectRecord {
    let first = lines.first().copied().unwrap_or_default();
    let url = URL.find(first).or_else(|| lines.iter().find_map(|l| URL.find(l)));
    let url = url.map(|m| m.as_str().to_string());

    let heading = URL.replace_all(first, "");
    let (name, rest) = match heading.split_once(':') {
        Some((name, rest)) => (name.trim().to_string(), rest.trim().to_string()),
        None => {
            let mut fields = SEGMENT_SPLIT.split(&heading).map(str::trim).filter(|s| !s.is_empty());
            let name = fields.next().unwrap_or(UNNAMED_PROJECT).to_string();
            (name, fields.collect::<Vec<_>>().join(", "))
        }
    };

    let mut description = Vec::new();
    if !rest.is_empty() {
        description.push(rest);
    }
    description.extend(
        lines
            .iter()
            .skip(1)
            .map(|l| URL.replace_all(l, ""))
            .map(|l| strip_bullet(&l).to_string())
            .filter(|l| !l.is_empty()),
    );

    let technologies = lines
        .iter()
        .flat_map(|l| lexicon.find_skills(&URL.replace_all(l, "")))
        .collect();

    ProjectRecord {
        name,
        url,
        description,
        technologies,
    }
}

pub fn extract(text: &str, lexicon: &Lexicon) -> Vec<ProjectRecord> {
    split_entries(text, is_project_start)
        .iter()
        .map(|lines| parse_entry(lines, lexicon))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_url_and_technologies() {
        let lexicon = Lexicon::default();
        let projects = extract(
            "Resume Parser | https://github.com/janeroe/parser\n- Command line tool written in Rust\n- Runs batch jobs on Kubernetes",
            &lexicon,
        );

        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.name, "Resume Parser");
        assert_eq!(project.url.as_deref(), Some("https://github.com/janeroe/parser"));
        assert_eq!(
            project.description,
            vec!["Command line tool written in Rust", "Runs batch jobs on Kubernetes"]
        );
        let expected: BTreeSet<String> = ["kubernetes", "rust"].iter().map(|s| s.to_string()).collect();
        assert_eq!(project.technologies, expected);
    }

    #[test]
    fn test_sentences_continue_the_current_project() {
        let lexicon = Lexicon::default();
        let projects = extract(
            "Inventory Tracker: Flask and PostgreSQL web app\nBuilt for a local bakery.\nChess Engine\nWritten in C++.",
            &lexicon,
        );

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Inventory Tracker");
        assert_eq!(projects[0].description[0], "Flask and PostgreSQL web app");
        assert_eq!(projects[0].description[1], "Built for a local bakery.");
        assert!(projects[0].technologies.contains("postgresql"));
        assert_eq!(projects[1].name, "Chess Engine");
        assert!(projects[1].technologies.contains("c++"));
        assert_eq!(projects[1].url, None);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract("", &Lexicon::default()).is_empty());
    }
}
