use super::page::index_html;
use super::types::{AnalyzeResponse, AskRequest, DISCLAIMER, ErrorResponse, HealthResponse};
use crate::{
    Error, ErrorKind,
    assistant::{AssistantRequest, MedicalAssistant},
    llm::{Attachment, PromptMode},
    storage::{UploadSidecar, UploadSource},
};
use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<MedicalAssistant>,
    /// Present only when uploads are archived to object storage.
    pub sidecar: Option<Arc<UploadSidecar>>,
    pub max_upload_bytes: usize,
}

pub async fn index() -> Html<&'static str> {
    Html(index_html())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    let request = match read_form(multipart).await {
        Ok(Ok(request)) => request,
        Ok(Err(e)) => return Err(api_error(&request_id, &e)),
        Err(e) => {
            warn!("Rejected malformed form for request {}: {}", request_id, e);
            let status = e.status();
            let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
                format!(
                    "Upload is larger than the {}-byte limit. Please choose a smaller image.",
                    state.max_upload_bytes
                )
            } else {
                e.body_text()
            };
            return Err((
                status,
                Json(ErrorResponse {
                    request_id,
                    kind: ErrorKind::UnsupportedInput,
                    error,
                }),
            ));
        }
    };

    if request.attachment.is_none() && request.user_text.trim().is_empty() {
        return Err(api_error(
            &request_id,
            &Error::unsupported("Please upload an image or describe your symptoms to begin."),
        ));
    }

    info!(
        "Received {} analysis request {}",
        request.mode(),
        request_id
    );

    // Archived beside inference; `store` logs its own outcome.
    if let (Some(sidecar), Some(attachment)) = (&state.sidecar, &request.attachment) {
        let sidecar = Arc::clone(sidecar);
        let source = UploadSource::Bytes {
            data: attachment.data.clone(),
            content_type: attachment.mime_type().to_string(),
        };
        tokio::spawn(async move {
            sidecar.store(source).await;
        });
    }

    match state.assistant.respond(request).await {
        Ok(response) => {
            info!("Successfully processed request {}", request_id);
            Ok(Json(AnalyzeResponse {
                request_id,
                mode: response.mode,
                output: response.text,
                disclaimer: DISCLAIMER,
            }))
        }
        Err(e) => Err(api_error(&request_id, &e)),
    }
}

pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    info!("Received text request {}", request_id);

    match state
        .assistant
        .respond_to_text(request.input.as_deref())
        .await
    {
        Ok(output) => {
            info!("Successfully processed request {}", request_id);
            Ok(Json(AnalyzeResponse {
                request_id,
                mode: PromptMode::Text,
                output,
                disclaimer: DISCLAIMER,
            }))
        }
        Err(e) => Err(api_error(&request_id, &e)),
    }
}

/// Reads `user_text` and an optional `file` part. The outer error is a
/// transport-level multipart failure, the inner one a rejected upload.
async fn read_form(
    mut multipart: Multipart,
) -> Result<crate::Result<AssistantRequest>, MultipartError> {
    let mut user_text = String::new();
    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_text" => {
                user_text = field.text().await?;
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?.to_vec();
                // Browsers send an empty part when no file was chosen.
                if !(file_name.is_empty() && data.is_empty()) {
                    upload = Some((file_name, content_type, data));
                }
            }
            _ => {}
        }
    }

    let attachment = match upload {
        Some((file_name, content_type, data)) => {
            match Attachment::new(file_name, content_type.as_deref(), data) {
                Ok(attachment) => Some(attachment),
                Err(e) => return Ok(Err(e)),
            }
        }
        None => None,
    };

    Ok(Ok(AssistantRequest {
        user_text,
        attachment,
    }))
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::UnsupportedInput => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Network | ErrorKind::RemoteService => StatusCode::BAD_GATEWAY,
        ErrorKind::Configuration | ErrorKind::Storage | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn api_error(request_id: &str, e: &Error) -> ApiError {
    let kind = e.kind();
    warn!("Request {} failed ({:?}): {}", request_id, kind, e);
    (
        status_for(kind),
        Json(ErrorResponse {
            request_id: request_id.to_string(),
            kind,
            error: e.to_string(),
        }),
    )
}
