//! Text extraction from supported file formats

use crate::error::Result;
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content.replace("\r\n", "\n"))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Plain text of a Markdown document. Headings and list items land on their
/// own lines and blocks stay separated by one blank line, so section headers
/// and paragraph boundaries survive.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::Start(Tag::Item) => text.push_str("- "),
            Event::End(Tag::Item) => text.push('\n'),
            Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::CodeBlock(_) | Tag::List(_)) => {
                text.push_str("\n\n")
            }
            Event::Rule => text.push_str("\n\n"),
            _ => {}
        }
    }

    collapse_blank_lines(&text)
}

fn collapse_blank_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# Jane Roe\n\n## Skills\n\n* **Python**\n* `SQL`\n\n## Experience\n\nAcme Inc. | Engineer\nJan 2020 - Present";
        let text = markdown_to_text(markdown);

        assert_eq!(
            text,
            "Jane Roe\n\nSkills\n\n- Python\n- SQL\n\nExperience\n\nAcme Inc. | Engineer\nJan 2020 - Present"
        );
    }

    #[test]
    fn test_empty_markdown() {
        assert_eq!(markdown_to_text(""), "");
    }
}
