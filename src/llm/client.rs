use super::types::*;
use crate::{Error, Result, config::GeminiConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const GENERATIVE_LANGUAGE_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(&self, request: GenerationRequest) -> Result<GenerationResponse>;
}

#[derive(Debug, Clone)]
enum Auth {
    ApiKey(String),
    Bearer(String),
}

/// Calls `generateContent` on either the Generative Language API or Vertex AI.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    auth: Auth,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let endpoint = Self::endpoint_for(config)?;

        let auth = if config.use_vertex {
            match (&config.access_token, &config.api_key) {
                (Some(token), _) if !token.is_empty() => Auth::Bearer(token.clone()),
                (_, Some(key)) if !key.is_empty() => Auth::ApiKey(key.clone()),
                _ => {
                    return Err(Error::config(
                        "Vertex AI requires an access token or an API key",
                    ));
                }
            }
        } else {
            match &config.api_key {
                Some(key) if !key.is_empty() => Auth::ApiKey(key.clone()),
                _ => return Err(Error::config("Gemini API key is not configured")),
            }
        };

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint,
            auth,
            model: config.model.clone(),
        })
    }

    fn endpoint_for(config: &GeminiConfig) -> Result<String> {
        if config.use_vertex {
            let project = config
                .project
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| Error::config("Vertex AI requires a project"))?;
            let base_url = config
                .base_url
                .clone()
                .unwrap_or_else(|| format!("https://{}-aiplatform.googleapis.com", config.location));
            Ok(format!(
                "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                project,
                config.location,
                config.model
            ))
        } else {
            let base_url = config
                .base_url
                .as_deref()
                .unwrap_or(GENERATIVE_LANGUAGE_BASE_URL);
            Ok(format!(
                "{}/v1beta/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                config.model
            ))
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        debug!(
            "Calling {} (attachment: {})",
            self.model,
            request
                .attachment
                .as_ref()
                .map(|a| a.mime_type())
                .unwrap_or("none")
        );

        let body = GenerateContentRequest::from_generation(&request);

        let mut req_builder = self.client.post(&self.endpoint).json(&body);
        req_builder = match &self.auth {
            Auth::ApiKey(key) => req_builder.header("x-goog-api-key", key),
            Auth::Bearer(token) => req_builder.bearer_auth(token),
        };

        let response = req_builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| match b.error.status {
                    Some(s) => format!("{}: {}", s, b.error.message),
                    None => b.error.message,
                })
                .unwrap_or(body);
            return Err(Error::remote(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;
        let payload: GenerateContentResponse = serde_json::from_slice(&bytes)?;

        let text = match payload.text() {
            Some(text) => text,
            None => {
                let reason = payload
                    .block_reason()
                    .map(|r| format!("prompt blocked: {}", r))
                    .or_else(|| {
                        payload
                            .finish_reason()
                            .map(|r| format!("no text returned (finish reason: {})", r))
                    })
                    .unwrap_or_else(|| "no candidates returned".to_string());
                return Err(Error::remote(status.as_u16(), reason));
            }
        };

        debug!(
            "Received {} characters from {} (finish reason: {:?})",
            text.len(),
            self.model,
            payload.finish_reason()
        );

        Ok(GenerationResponse {
            text,
            finish_reason: payload.finish_reason(),
            usage: payload.usage_metadata,
        })
    }
}
