#[path = "../common/mod.rs"]
mod common;

mod test_google_ai_provider;
