//! Pipeline orchestration
//!
//! Single external contract: `analyze(source) -> AnalysisResult`.

mod config;
mod orchestrator;

pub use config::AnalysisConfig;
pub use orchestrator::{analyze, AnalysisPipeline};
