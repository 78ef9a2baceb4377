//! Application services shared across the pipeline

pub mod scoring;

pub use scoring::{
    HistoricalRiskFinding, ProcessedSite, RiskSignal, ScoredTask, ScoringEngine,
    WeatherRiskFinding, WeatherRiskKind,
};
