use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub use_vertex: bool,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub object_name: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_true")]
    pub overwrite: bool,
    /// Upper bound on a single upload. `None` disables the timeout.
    #[serde(default = "default_storage_timeout_secs")]
    pub request_timeout_secs: Option<u64>,
    /// Copy every uploaded image to the bucket alongside inference.
    #[serde(default)]
    pub archive_uploads: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Multipart body limit for `/api/analyze`.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            use_vertex: false,
            project: None,
            location: default_location(),
            access_token: None,
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            bucket: String::new(),
            object_name: String::new(),
            access_token: None,
            base_url: None,
            overwrite: true,
            request_timeout_secs: default_storage_timeout_secs(),
            archive_uploads: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_location() -> String {
    "us-central1".to_string()
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(120)
}

fn default_storage_timeout_secs() -> Option<u64> {
    Some(30)
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

// Gemini caps the whole request at 20 MB and base64 grows the image by 4/3.
fn default_max_upload_bytes() -> usize {
    14 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}
