pub mod google_ai;
pub mod resilient;

pub use google_ai::GoogleAiProvider;
pub use resilient::{BackoffPolicy, GenerationSettings, MIN_API_KEY_LEN, ResilientModelClient};
