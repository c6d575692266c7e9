mod client;
mod prompt;
mod types;

pub use client::{GeminiClient, LlmClient};
pub use prompt::{PromptMode, build_prompt};
pub use types::*;
