pub mod analyzer;
pub mod batch;
pub mod browser;
pub mod config;
pub mod console;
pub mod error;
pub mod profile;
pub mod summarizer;
pub mod utils;
pub mod web;

pub use analyzer::{analyze_profile, BrowserProfileSource, ProfileSource};
pub use batch::{BatchReport, BatchRunner};
pub use config::AppConfig;
pub use error::AnalyzerError;
pub use profile::{AnalysisKind, AnalysisResult, ProfileFields};
pub use summarizer::{GeminiSummarizer, Summarize};
pub use web::start_web_server;
