use super::{ObjectStore, StoredObject};
use crate::{Error, Result, config::StorageConfig};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const GCS_BASE_URL: &str = "https://storage.googleapis.com";

/// Single-request media uploads through the Cloud Storage JSON API.
pub struct GcsObjectStore {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
    project_id: Option<String>,
    overwrite: bool,
}

#[derive(Debug, Deserialize)]
struct ObjectResource {
    #[serde(default)]
    generation: Option<String>,
}

impl GcsObjectStore {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| GCS_BASE_URL.to_string()),
            access_token: config.access_token.clone(),
            project_id: config.project_id.clone(),
            overwrite: config.overwrite,
        })
    }
}

#[async_trait]
impl ObjectStore for GcsObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        object_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject> {
        let url = format!(
            "{}/upload/storage/v1/b/{}/o",
            self.base_url.trim_end_matches('/'),
            bucket
        );
        let size = data.len() as u64;

        debug!(
            "Uploading {} bytes to gs://{}/{}",
            size, bucket, object_name
        );

        let mut query = vec![("uploadType", "media"), ("name", object_name)];
        if !self.overwrite {
            query.push(("ifGenerationMatch", "0"));
        }

        let mut req_builder = self
            .client
            .post(&url)
            .query(&query)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data);

        if let Some(ref token) = self.access_token {
            req_builder = req_builder.bearer_auth(token);
        }
        if let Some(ref project_id) = self.project_id {
            req_builder = req_builder.header("x-goog-user-project", project_id);
        }

        let response = req_builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::PRECONDITION_FAILED {
            return Err(Error::ObjectExists {
                bucket: bucket.to_string(),
                object: object_name.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "upload to gs://{}/{} failed with {}: {}",
                bucket, object_name, status, body
            )));
        }

        let resource: ObjectResource = response.json().await.map_err(|e| {
            Error::storage(format!("Failed to parse upload response: {}", e))
        })?;

        Ok(StoredObject {
            bucket: bucket.to_string(),
            object_name: object_name.to_string(),
            size,
            generation: resource.generation,
            uploaded_at: Utc::now(),
        })
    }
}
