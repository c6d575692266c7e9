use crate::{ErrorKind, llm::PromptMode};
use serde::{Deserialize, Serialize};

pub const DISCLAIMER: &str =
    "This is not a diagnosis. Always consult a licensed medical professional.";

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub request_id: String,
    pub mode: PromptMode,
    pub output: String,
    pub disclaimer: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub kind: ErrorKind,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
