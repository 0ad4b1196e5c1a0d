pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod i18n;
pub mod llm;
pub mod lookup;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, ExtractionFailure, LookupError};
pub use generator::context::AnalysisContext;
pub use generator::workflow::AnalysisWorkflow;
pub use types::{AnalysisKind, AnalysisReport, IntentRecord};
