use async_trait::async_trait;
use chrono::Utc;
use medassist::{
    Error, Result,
    llm::{GenerationRequest, GenerationResponse, LlmClient},
    storage::{ObjectStore, StoredObject},
};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// Mock LLM client for testing
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<String>>>,
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(text.to_string());
        self
    }

    /// Fails every call with a remote service error.
    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_content(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::remote(503, error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::remote(500, "No more mock responses available"));
        }

        Ok(GenerationResponse {
            text: responses.remove(0),
            finish_reason: Some("STOP".to_string()),
            usage: None,
        })
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPut {
    pub bucket: String,
    pub object_name: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

/// In-memory object store that records every upload.
#[derive(Debug, Clone, Default)]
pub struct RecordingObjectStore {
    pub puts: Arc<Mutex<Vec<RecordedPut>>>,
    pub attempts: Arc<AtomicUsize>,
    pub reject_existing: bool,
}

impl RecordingObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Behaves like a bucket with `ifGenerationMatch=0`: a second write to
    /// the same object is refused.
    pub fn rejecting_existing() -> Self {
        Self {
            reject_existing: true,
            ..Self::default()
        }
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }

    /// Upload calls seen so far, accepted or refused.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Archive uploads run on a spawned task, so tests wait for them.
    pub async fn wait_for_attempts(&self, expected: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.attempts() < expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("archive upload never reached the store");
    }
}

#[async_trait]
impl ObjectStore for RecordingObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        object_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject> {
        let mut puts = self.puts.lock().unwrap();
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.reject_existing
            && puts
                .iter()
                .any(|p| p.bucket == bucket && p.object_name == object_name)
        {
            return Err(Error::ObjectExists {
                bucket: bucket.to_string(),
                object: object_name.to_string(),
            });
        }

        let size = data.len() as u64;
        puts.push(RecordedPut {
            bucket: bucket.to_string(),
            object_name: object_name.to_string(),
            data,
            content_type: content_type.to_string(),
        });

        Ok(StoredObject {
            bucket: bucket.to_string(),
            object_name: object_name.to_string(),
            size,
            generation: Some(puts.len().to_string()),
            uploaded_at: Utc::now(),
        })
    }
}
