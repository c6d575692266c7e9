mod gcs;

pub use gcs::GcsObjectStore;

use crate::{Error, Result, config::StorageConfig, llm::ImageFormat};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        object_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredObject {
    pub bucket: String,
    pub object_name: String,
    pub size: u64,
    pub generation: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// What to upload: an in-memory upload or a file on disk.
#[derive(Debug, Clone)]
pub enum UploadSource {
    Bytes { data: Vec<u8>, content_type: String },
    Path(PathBuf),
}

impl UploadSource {
    async fn into_payload(self) -> Result<(Vec<u8>, String)> {
        match self {
            Self::Bytes { data, content_type } => Ok((data, content_type)),
            Self::Path(path) => {
                let data = match tokio::fs::read(&path).await {
                    Ok(data) => data,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return Err(Error::FileNotFound { path });
                    }
                    Err(e) => return Err(e.into()),
                };
                let content_type = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .and_then(ImageFormat::from_file_name)
                    .map(|format| format.mime_type())
                    .unwrap_or("application/octet-stream")
                    .to_string();
                Ok((data, content_type))
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Bytes { data, .. } => format!("{} uploaded bytes", data.len()),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

/// Best-effort copy of uploads into a fixed bucket object. The object name is
/// static, so every call replaces the previous upload.
#[derive(Clone)]
pub struct UploadSidecar {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    object_name: String,
}

impl UploadSidecar {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        object_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            object_name: object_name.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let store = GcsObjectStore::new(config)?;
        Ok(Self::new(
            Arc::new(store),
            config.bucket.clone(),
            config.object_name.clone(),
        ))
    }

    pub fn destination(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.object_name)
    }

    pub async fn try_store(&self, source: UploadSource) -> Result<StoredObject> {
        let (data, content_type) = source.into_payload().await?;
        self.store
            .put_object(&self.bucket, &self.object_name, data, &content_type)
            .await
    }

    /// Returns `false` on any failure after logging it; never errors.
    pub async fn store(&self, source: UploadSource) -> bool {
        info!("Storing user input file into {}", self.destination());
        let description = source.describe();

        match self.try_store(source).await {
            Ok(stored) => {
                info!(
                    "File uploaded to cloud storage: {} ({} bytes to {})",
                    description,
                    stored.size,
                    self.destination()
                );
                true
            }
            Err(e) => {
                error!("Upload to {} failed: {}", self.destination(), e);
                false
            }
        }
    }
}
