//! Resume analyzer: section parsing and resume-vs-job match scoring

use clap::Parser;
use log::{error, info, warn};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_analyzer::config::OutputFormat;
use resume_analyzer::input::InputManager;
use resume_analyzer::output::formatter::{save_report_to_file, suggest_filename};
use resume_analyzer::output::ReportGenerator;
use resume_analyzer::processing::document::DocumentType;
use resume_analyzer::{AnalysisEngine, Config, Result, ResumeAnalyzerError};
use std::path::{Path, PathBuf};
use std::process;

const INPUT_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::load_from(path)
        }
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            report,
            save,
            model,
        } => {
            validate_input(&resume, "Resume file")?;
            validate_input(&job, "Job description file")?;

            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(ResumeAnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            let report_kind = match report {
                Some(report) => cli::parse_report_kind(&report).map_err(ResumeAnalyzerError::InvalidInput)?,
                None => config.output.report,
            };

            let mut input_manager = InputManager::new();
            let resume_doc = input_manager.load_document(&resume, DocumentType::Resume).await?;
            let job_doc = input_manager.load_document(&job, DocumentType::JobDescription).await?;

            let engine = build_engine(&config, model.as_deref())?;
            info!("Analyzing with the '{}' adapter", engine.adapter_name());

            let result = engine.analyze_documents(&resume_doc, &job_doc)?;
            let report = report_kind.build(&result);
            info!("Match score: {:.2}", report.match_score());

            let generator = ReportGenerator::from_config(&config.output);
            println!("{}", generator.generate_report(&report, format)?);

            if let Some(save) = save {
                let plain = ReportGenerator::with_options(false, config.output.pretty_json);
                let content = plain.generate_report(&report, format)?;
                let target = save_target(save, format, &resume);
                save_report_to_file(&content, &target)?;
                println!("Report saved to {}", target.display());
            }
        }

        Commands::Parse { resume, output, save } => {
            validate_input(&resume, "Resume file")?;

            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(ResumeAnalyzerError::InvalidInput)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::new();
            let resume_doc = input_manager.load_document(&resume, DocumentType::Resume).await?;
            if resume_doc.is_blank() {
                warn!("{} contains no text", resume.display());
            }

            let engine = AnalysisEngine::lexical(&config)?;
            let parsed = engine.parse_sections(resume_doc.content());

            let generator = ReportGenerator::from_config(&config.output);
            println!("{}", generator.generate_parsed(&parsed, format)?);

            if let Some(save) = save {
                let plain = ReportGenerator::with_options(false, config.output.pretty_json);
                let content = plain.generate_parsed(&parsed, format)?;
                let target = save_target(save, format, &resume);
                save_report_to_file(&content, &target)?;
                println!("Parsed resume saved to {}", target.display());
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}", path.display());
                    println!("{}", content);
                }
                ConfigAction::Reset => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults at {}", path.display());
                }
                ConfigAction::Path => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn validate_input(path: &Path, what: &str) -> Result<()> {
    cli::validate_file_extension(path, INPUT_EXTENSIONS)
        .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("{}: {}", what, e)))
}

/// A directory target gets a generated file name
fn save_target(save: PathBuf, format: OutputFormat, resume: &Path) -> PathBuf {
    if save.is_dir() {
        save.join(suggest_filename(format, &resume.to_string_lossy(), true))
    } else {
        save
    }
}

#[cfg(feature = "embeddings")]
fn build_engine(config: &Config, model: Option<&str>) -> Result<AnalysisEngine> {
    use resume_analyzer::processing::embeddings::EmbeddingAdapter;
    use std::sync::Arc;

    match model {
        Some(model) => {
            let adapter = EmbeddingAdapter::from_pretrained(model)?;
            AnalysisEngine::from_config(config, Arc::new(adapter))
        }
        None => AnalysisEngine::lexical(config),
    }
}

#[cfg(not(feature = "embeddings"))]
fn build_engine(config: &Config, model: Option<&str>) -> Result<AnalysisEngine> {
    if let Some(model) = model {
        warn!(
            "Ignoring model '{}': built without the `embeddings` feature, using lexical similarity",
            model
        );
    }
    AnalysisEngine::lexical(config)
}
