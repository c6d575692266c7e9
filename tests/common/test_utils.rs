use medassist::{
    assistant::MedicalAssistant,
    config::{Config, GeminiConfig, ServerConfig, StorageConfig},
    llm::Attachment,
    server::{self, handlers::AppState},
    storage::{ObjectStore, UploadSidecar},
};
use std::sync::Arc;

use super::MockLlmClient;

pub const BOUNDARY: &str = "medassist-test-boundary";

/// Smallest payload that passes for a PNG by extension.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        gemini: GeminiConfig {
            api_key: Some("test-api-key".to_string()),
            ..GeminiConfig::default()
        },
        storage: Some(StorageConfig {
            bucket: "test-bucket".to_string(),
            object_name: "latest-upload".to_string(),
            ..StorageConfig::default()
        }),
        server: ServerConfig::default(),
    }
}

pub fn png_attachment() -> Attachment {
    Attachment::new("scan.png", Some("image/png"), PNG_BYTES.to_vec()).unwrap()
}

pub fn create_test_app(
    llm: MockLlmClient,
    store: Option<Arc<dyn ObjectStore>>,
) -> axum::Router {
    let sidecar = store.map(|store| UploadSidecar::new(store, "test-bucket", "latest-upload"));
    create_test_app_with(llm, sidecar, ServerConfig::default().max_upload_bytes)
}

pub fn create_test_app_with(
    llm: MockLlmClient,
    sidecar: Option<UploadSidecar>,
    max_upload_bytes: usize,
) -> axum::Router {
    let state = AppState {
        assistant: Arc::new(MedicalAssistant::new(Arc::new(llm))),
        sidecar: sidecar.map(Arc::new),
        max_upload_bytes,
    };
    server::router(state)
}

/// Part of a hand-built multipart body.
pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
