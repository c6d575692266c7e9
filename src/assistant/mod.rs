mod types;

pub use types::*;

use crate::{
    Error, Result,
    config::GeminiConfig,
    llm::{Attachment, GeminiClient, GenerationRequest, LlmClient, PromptMode, build_prompt},
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Stateless front for the hosted model. Every call is a single
/// request/response with no history carried between calls.
#[derive(Clone)]
pub struct MedicalAssistant {
    client: Arc<dyn LlmClient>,
}

impl MedicalAssistant {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        let client = GeminiClient::new(config)?;
        info!(
            "Medical assistant using model {} via {}",
            client.model(),
            if config.use_vertex {
                "Vertex AI"
            } else {
                "Generative Language API"
            }
        );
        Ok(Self::new(Arc::new(client)))
    }

    pub async fn respond_to_image(
        &self,
        user_text: Option<&str>,
        attachment: &Attachment,
    ) -> Result<String> {
        info!("Generating response to image input: {}", attachment.file_name);

        let request = GenerationRequest {
            system_instruction: build_prompt(PromptMode::Image).to_string(),
            user_text: user_text.unwrap_or_default().to_string(),
            attachment: Some(attachment.clone()),
        };

        self.generate(PromptMode::Image, request).await
    }

    pub async fn respond_to_text(&self, user_text: Option<&str>) -> Result<String> {
        info!("Generating response to text input");

        let user_text = user_text.unwrap_or_default();
        if user_text.trim().is_empty() {
            let e = Error::unsupported("no question or description was provided");
            error!("Text response failed: {}", e);
            return Err(e);
        }

        let request = GenerationRequest {
            system_instruction: build_prompt(PromptMode::Text).to_string(),
            user_text: user_text.to_string(),
            attachment: None,
        };

        self.generate(PromptMode::Text, request).await
    }

    /// Picks image or text mode depending on whether a file was attached.
    pub async fn respond(&self, request: AssistantRequest) -> Result<AssistantResponse> {
        let mode = request.mode();
        let text = match request.attachment {
            Some(ref attachment) => {
                self.respond_to_image(Some(&request.user_text), attachment)
                    .await?
            }
            None => self.respond_to_text(Some(&request.user_text)).await?,
        };
        Ok(AssistantResponse { mode, text })
    }

    async fn generate(&self, mode: PromptMode, request: GenerationRequest) -> Result<String> {
        match self.client.generate_content(request).await {
            Ok(response) => {
                if let Some(usage) = response.usage {
                    debug!(
                        "{} response used {} prompt / {} output tokens",
                        mode, usage.prompt_token_count, usage.candidates_token_count
                    );
                }
                Ok(response.text)
            }
            Err(e) => {
                error!("{} response failed: {}", mode, e);
                Err(e)
            }
        }
    }
}
