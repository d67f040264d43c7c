//! Integration tests for the resume analyzer

use resume_analyzer::config::OutputFormat;
use resume_analyzer::input::InputManager;
use resume_analyzer::output::{ReportGenerator, ReportKind};
use resume_analyzer::processing::document::{Document, DocumentType};
use resume_analyzer::{AnalysisEngine, Config, ExperienceLevel, ResumeAnalyzerError};
use std::path::Path;

fn engine() -> AnalysisEngine {
    AnalysisEngine::lexical(&Config::default()).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("Jane Roe"));
    assert!(text.contains("Senior Software Engineer"));
    assert!(text.contains("Machine Learning"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Jane Roe"));
    assert!(text.contains("Acme Inc. | Senior Software Engineer"));
    assert!(text.contains("Python"));
    // Markup is stripped
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('`'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 2);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_load_document_records_role_and_source() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_job.txt");

    let document = manager.load_document(path, DocumentType::JobDescription).await.unwrap();
    assert_eq!(document.document_type(), DocumentType::JobDescription);
    assert_eq!(document.source(), Some("tests/fixtures/sample_job.txt"));
    assert!(document.word_count() > 10);
}

#[tokio::test]
async fn test_parse_resume_from_file() {
    let mut manager = InputManager::new();
    let resume = manager
        .load_document(Path::new("tests/fixtures/sample_resume.txt"), DocumentType::Resume)
        .await
        .unwrap();

    let parsed = engine().parse_sections(resume.content());

    assert_eq!(parsed.education.len(), 1);
    assert_eq!(parsed.education[0].graduation_date.as_deref(), Some("May 2020"));
    assert_eq!(parsed.work_experience.len(), 1);
    assert_eq!(parsed.work_experience[0].company, "Acme Inc.");
    assert!(parsed.skills.contains("machine learning"));
    assert_eq!(parsed.contact.email.as_deref(), Some("jane.roe@example.com"));
    assert_eq!(parsed.projects.len(), 1);
}

#[tokio::test]
async fn test_parse_markdown_resume() {
    let mut manager = InputManager::new();
    let resume = manager
        .load_document(Path::new("tests/fixtures/sample_resume.md"), DocumentType::Resume)
        .await
        .unwrap();

    let parsed = engine().parse_sections(resume.content());

    assert!(parsed.skills.contains("python"));
    assert!(parsed.skills.contains("sql"));
    assert_eq!(parsed.contact.email.as_deref(), Some("jane.roe@example.com"));
    assert!(parsed.projects.is_empty());
}

#[tokio::test]
async fn test_analyze_files_end_to_end() {
    let mut manager = InputManager::new();
    let resume = manager
        .load_document(Path::new("tests/fixtures/sample_resume.txt"), DocumentType::Resume)
        .await
        .unwrap();
    let job = manager
        .load_document(Path::new("tests/fixtures/sample_job.txt"), DocumentType::JobDescription)
        .await
        .unwrap();

    let result = engine().analyze_documents(&resume, &job).unwrap();

    assert!(result.match_score > 0.0 && result.match_score <= 100.0);
    assert_eq!(result.experience_level, ExperienceLevel::Senior);
    for skill in ["python", "sql", "docker"] {
        assert!(result.skills_match.matching_skills.contains(skill));
    }
    assert!(result.skills_match.missing_skills.contains("aws"));
    assert!(result.improvement_suggestions[0].contains("aws"));

    let report = ReportKind::Detailed.build(&result);
    let json = ReportGenerator::with_options(false, false)
        .generate_report(&report, OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["report_type"], "detailed");
    assert_eq!(value["summary"]["experience_level"], "senior");
}

#[test]
fn test_swapped_documents_are_rejected() {
    let resume = Document::resume("Python developer");
    let job = Document::job_description("Looking for Python");

    let result = engine().analyze_documents(&job, &resume);
    assert!(matches!(result, Err(ResumeAnalyzerError::InvalidInput(_))));
}

#[test]
fn test_simple_report_renders_on_console() {
    let result = engine()
        .analyze(
            "5 years of experience as a Senior Software Engineer... Skills: Python, SQL",
            "Looking for a Software Engineer with Python, AWS, SQL experience",
        )
        .unwrap();

    let report = ReportKind::Simple.build(&result);
    let text = ReportGenerator::with_options(false, true)
        .generate_report(&report, OutputFormat::Console)
        .unwrap();

    assert!(text.contains("aws"));
    assert!(!text.contains("\u{1b}["));
}
