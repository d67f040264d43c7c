//! Output formatters: colored console text and JSON

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::{DetailedReport, Report, SimpleReport};
use crate::processing::extract::ParsedResume;
use colored::{Color, Colorize};
use std::path::Path;

/// Renders reports and parsed resumes in one output format
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn format_parsed(&self, parsed: &ParsedResume) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 90.0 => ("EXCELLENT", Color::Green),
            s if s >= 80.0 => ("VERY GOOD", Color::BrightGreen),
            s if s >= 70.0 => ("GOOD", Color::Yellow),
            s if s >= 60.0 => ("FAIR", Color::BrightYellow),
            s if s >= 50.0 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_list(&self, items: &[String], color: Color) -> String {
        if items.is_empty() {
            return "  (none)\n".to_string();
        }
        items
            .iter()
            .map(|item| format!("  • {}\n", self.colorize(item, color)))
            .collect()
    }

    fn format_simple(&self, report: &SimpleReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH SUMMARY", 1));
        output.push_str(&format!(
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!(
            "Match Score: {:.2}% {}\n",
            report.match_score,
            self.format_score_badge(report.match_score)
        ));

        output.push_str(&self.format_header("Key Missing Skills", 2));
        output.push_str(&self.format_list(&report.key_missing_skills, Color::Red));

        output.push_str(&self.format_header("Key Suggestions", 2));
        output.push_str(&self.format_numbered(&report.key_suggestions));

        output
    }

    fn format_detailed(&self, report: &DetailedReport) -> String {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str(&self.format_header("RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Match: {:.2}% {}\n",
            summary.overall_match_score,
            self.format_score_badge(summary.overall_match_score)
        ));
        output.push_str(&format!("Skills Match: {:.2}%\n", summary.skills_match_percentage));
        output.push_str(&format!("Experience Level: {}\n", summary.experience_level));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&summary.verdict, Color::Cyan)));

        let skills = &report.skills_analysis;
        output.push_str(&self.format_header("Skills", 2));
        output.push_str(&self.format_header("Matching", 3));
        output.push_str(&self.format_list(&skills.matching_skills, Color::Green));
        output.push_str(&self.format_header("Missing", 3));
        output.push_str(&self.format_list(&skills.missing_skills, Color::Red));
        output.push_str(&self.format_header("Additional", 3));
        output.push_str(&self.format_list(&skills.extra_skills, Color::White));

        let experience = &report.experience_analysis;
        output.push_str(&self.format_header("Experience", 2));
        output.push_str(&format!("Relevance: {:.2}%\n", experience.relevance_score));
        output.push_str(&format!(
            "Experience blocks: {}\n",
            experience.relevant_experience_count
        ));
        let recent = if experience.has_recent_relevant_experience {
            self.colorize("yes", Color::Green)
        } else {
            self.colorize("no", Color::Yellow)
        };
        output.push_str(&format!("Recent relevant experience: {}\n", recent));

        output.push_str(&self.format_header("Suggestions", 2));
        output.push_str(&self.format_numbered(&report.suggestions));

        output
    }

    fn format_numbered(&self, items: &[String]) -> String {
        if items.is_empty() {
            return self.colorize("No suggestions - strong match!\n", Color::Green);
        }
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}\n", i + 1, item))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Simple(simple) => self.format_simple(simple),
            Report::Detailed(detailed) => self.format_detailed(detailed),
        })
    }

    fn format_parsed(&self, parsed: &ParsedResume) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("PARSED RESUME", 1));

        output.push_str(&self.format_header("Contact", 2));
        let contact = &parsed.contact;
        for (label, value) in [
            ("Email", &contact.email),
            ("Phone", &contact.phone),
            ("LinkedIn", &contact.linkedin),
            ("GitHub", &contact.github),
            ("Website", &contact.website),
        ] {
            if let Some(value) = value {
                output.push_str(&format!("{}: {}\n", label, value));
            }
        }

        output.push_str(&self.format_header("Education", 2));
        for record in &parsed.education {
            output.push_str(&format!(
                "{} - {}\n",
                self.colorize(&record.degree, Color::Cyan),
                record.school
            ));
            if let Some(date) = &record.graduation_date {
                output.push_str(&format!("  Graduated: {}\n", date));
            }
            if let Some(gpa) = record.gpa {
                output.push_str(&format!("  GPA: {:.2}\n", gpa));
            }
        }

        output.push_str(&self.format_header("Work Experience", 2));
        for record in &parsed.work_experience {
            output.push_str(&format!(
                "{} at {} ({} - {})\n",
                self.colorize(&record.title, Color::Cyan),
                record.company,
                record.start_date,
                record.end_date
            ));
            for line in &record.description {
                output.push_str(&format!("  • {}\n", line));
            }
        }

        output.push_str(&self.format_header("Skills", 2));
        let skills: Vec<String> = parsed.skills.iter().cloned().collect();
        output.push_str(&self.format_list(&skills, Color::Green));

        output.push_str(&self.format_header("Projects", 2));
        for project in &parsed.projects {
            output.push_str(&format!("{}\n", self.colorize(&project.name, Color::Cyan)));
            if let Some(url) = &project.url {
                output.push_str(&format!("  {}\n", url));
            }
            if !project.technologies.is_empty() {
                let tech: Vec<&str> = project.technologies.iter().map(String::as_str).collect();
                output.push_str(&format!("  Technologies: {}\n", tech.join(", ")));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        self.to_json(report)
    }

    fn format_parsed(&self, parsed: &ParsedResume) -> Result<String> {
        self.to_json(parsed)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::with_options(output.color_output, output.pretty_json)
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
        }
    }

    pub fn generate_report(&self, report: &Report, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_parsed(&self, parsed: &ParsedResume, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_parsed(parsed)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_analysis{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_analysis{}.json", base_name, timestamp_suffix),
    }
}
