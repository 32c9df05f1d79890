// Merger Analysis - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod ratios;
pub mod classification;
pub mod financials;
pub mod calculator;
pub mod report;
pub mod scenarios;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{AnalysisResult, MergerError};
pub use ratios::{de_ratio, eps, pe_ratio, roe};
pub use classification::{classify_leverage, classify_merger, LeverageRisk, MergerType};
pub use financials::{Company, CompanyFinancials, MergerInputs};
pub use calculator::{analyze_merger, DealStructure, MergerResult};
pub use report::{
    AnalysisEnvelope, Commentary, ComparisonRow, MergerReport, MetricDisplay, StakeSlice,
};
pub use scenarios::{
    analyze_scenarios, load_scenarios, read_scenarios, NamedScenario, ScenarioOutcome,
};
pub use config::{ConfigError, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
