//! Resume section parsing and resume-vs-job match scoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeAnalyzerError};
pub use processing::analyzer::{AnalysisEngine, ExperienceLevel, MatchResult};
pub use processing::extract::ParsedResume;
pub use processing::nlp::{LexicalAdapter, NlpAdapter};
