//! Domain model for the risk assessment pipeline

pub mod assessment;
pub mod history;
pub mod report;
pub mod site;

pub use assessment::{Risk, RiskAssessment, RiskLevel, Severity, StoredAssessmentRecord};
pub use history::{AnalysisHistoryEntry, AnalysisKind};
pub use report::{ReportAnalysis, SafetyReport};
pub use site::{IncidentRecord, SiteLocation, SiteSnapshot, Task, TaskStatus, WeatherReading};
