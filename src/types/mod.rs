pub mod analysis;
pub mod combined;
pub mod intent;
pub mod report;

pub use analysis::{AnalysisKind, AnalysisOutcome, AnalysisReport};
pub use combined::{CombinedResult, EXECUTIVE_SUMMARY_POINTS, SynthesisOutcome};
pub use intent::IntentRecord;
pub use report::{CompetitiveReport, FinancialReport, MarketReport, Section, SectionReport};
