pub mod templates;

pub use templates::{ASSESSMENT_PROMPT, PromptBuilder, REPORT_ANALYSIS_PROMPT};
