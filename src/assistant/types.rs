use crate::llm::{Attachment, PromptMode};
use serde::Serialize;

/// One interaction from the front end. Not retained after the call returns.
#[derive(Debug, Clone, Default)]
pub struct AssistantRequest {
    pub user_text: String,
    pub attachment: Option<Attachment>,
}

impl AssistantRequest {
    pub fn text(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            attachment: None,
        }
    }

    pub fn image(user_text: impl Into<String>, attachment: Attachment) -> Self {
        Self {
            user_text: user_text.into(),
            attachment: Some(attachment),
        }
    }

    pub fn mode(&self) -> PromptMode {
        if self.attachment.is_some() {
            PromptMode::Image
        } else {
            PromptMode::Text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantResponse {
    pub mode: PromptMode,
    pub text: String,
}
