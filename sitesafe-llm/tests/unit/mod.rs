#[path = "../common/mod.rs"]
mod common;

mod test_prompts;
mod test_resilient_client;
mod test_response_parser;
