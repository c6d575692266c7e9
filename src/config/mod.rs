mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH` (or `config.yaml`), layers the
/// `GOOGLE_*` environment variables on top and validates the result.
pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    load_from(explicit_path.as_deref(), |key| env::var(key).ok()).await
}

pub async fn load_from<F>(path: Option<&str>, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            debug!("Loading configuration from: {}", path);
            let config_str = tokio::fs::read_to_string(path).await?;
            serde_yaml::from_str(&config_str)?
        }
        None => match tokio::fs::read_to_string(DEFAULT_CONFIG_PATH).await {
            Ok(config_str) => {
                debug!("Loading configuration from: {}", DEFAULT_CONFIG_PATH);
                serde_yaml::from_str(&config_str)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
                Config::default()
            }
            Err(e) => return Err(e.into()),
        },
    };

    config.apply_env_overrides(lookup);
    config.validate()?;

    Ok(config)
}

impl Config {
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini = &mut self.gemini;
        if let Some(api_key) = lookup("GOOGLE_GEMINI_MODEL_API_KEY") {
            gemini.api_key = Some(api_key);
        }
        if let Some(model) = lookup("GOOGLE_GEMINI_MODEL") {
            gemini.model = model;
        }
        if let Some(flag) = lookup("GOOGLE_GEN_AI_USE_VERTEX") {
            gemini.use_vertex = parse_flag(&flag);
        }
        if let Some(project) = lookup("GOOGLE_CLOUD_PROJECT") {
            gemini.project = Some(project);
        }
        if let Some(location) = lookup("GOOGLE_CLOUD_LOCATION") {
            gemini.location = location;
        }

        let access_token = lookup("GOOGLE_CLOUD_ACCESS_TOKEN");
        if let Some(ref token) = access_token {
            gemini.access_token = Some(token.clone());
        }

        let bucket = lookup("GOOGLE_CLOUD_BUCKET");
        let object_name = lookup("GOOGLE_CLOUD_BLOB_NAME");
        let project_id = lookup("GOOGLE_CLOUD_PROJECT_ID");

        if self.storage.is_none() && (bucket.is_some() || object_name.is_some()) {
            self.storage = Some(StorageConfig::default());
        }

        if let Some(storage) = self.storage.as_mut() {
            if let Some(bucket) = bucket {
                storage.bucket = bucket;
            }
            if let Some(object_name) = object_name {
                storage.object_name = object_name;
            }
            if let Some(project_id) = project_id {
                storage.project_id = Some(project_id);
            }
            if let Some(token) = access_token {
                storage.access_token = Some(token);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let gemini = &self.gemini;

        if gemini.model.trim().is_empty() {
            return Err(Error::config("gemini.model must not be empty"));
        }

        if gemini.use_vertex {
            if is_blank(&gemini.project) {
                return Err(Error::config(
                    "gemini.project (GOOGLE_CLOUD_PROJECT) is required when use_vertex is enabled",
                ));
            }
            if gemini.location.trim().is_empty() {
                return Err(Error::config("gemini.location must not be empty"));
            }
            if is_blank(&gemini.access_token) && is_blank(&gemini.api_key) {
                return Err(Error::config(
                    "gemini.access_token or gemini.api_key is required when use_vertex is enabled",
                ));
            }
        } else if is_blank(&gemini.api_key) {
            return Err(Error::config(
                "gemini.api_key (GOOGLE_GEMINI_MODEL_API_KEY) is required",
            ));
        }

        if let Some(storage) = &self.storage {
            if storage.bucket.trim().is_empty() {
                return Err(Error::config(
                    "storage.bucket (GOOGLE_CLOUD_BUCKET) must not be empty",
                ));
            }
            if storage.object_name.trim().is_empty() {
                return Err(Error::config(
                    "storage.object_name (GOOGLE_CLOUD_BLOB_NAME) must not be empty",
                ));
            }
        }

        if self.server.max_upload_bytes == 0 {
            return Err(Error::config("server.max_upload_bytes must be positive"));
        }

        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.location, "us-central1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_upload_bytes, 14 * 1024 * 1024);
        assert_eq!(config.server.logs.level, "info");
        assert!(config.storage.is_none());
    }

    #[test]
    fn test_storage_defaults_bound_uploads() {
        let storage = StorageConfig::default();
        assert!(storage.overwrite);
        assert!(!storage.archive_uploads);
        assert_eq!(storage.request_timeout_secs, Some(30));
    }

    #[test]
    fn test_env_overrides_gemini() {
        let mut config = Config::default();
        config.apply_env_overrides(lookup_from(&[
            ("GOOGLE_GEMINI_MODEL_API_KEY", "key-123"),
            ("GOOGLE_GEN_AI_USE_VERTEX", "True"),
            ("GOOGLE_CLOUD_PROJECT", "demo-project"),
        ]));

        assert_eq!(config.gemini.api_key.as_deref(), Some("key-123"));
        assert!(config.gemini.use_vertex);
        assert_eq!(config.gemini.project.as_deref(), Some("demo-project"));
        assert!(config.storage.is_none());
    }

    #[test]
    fn test_env_overrides_create_storage_section() {
        let mut config = Config::default();
        config.apply_env_overrides(lookup_from(&[
            ("GOOGLE_CLOUD_BUCKET", "uploads"),
            ("GOOGLE_CLOUD_BLOB_NAME", "latest-upload"),
            ("GOOGLE_CLOUD_PROJECT_ID", "demo-project"),
        ]));

        let storage = config.storage.expect("storage section");
        assert_eq!(storage.bucket, "uploads");
        assert_eq!(storage.object_name, "latest-upload");
        assert_eq!(storage.project_id.as_deref(), Some("demo-project"));
        assert!(storage.overwrite);
        assert!(!storage.archive_uploads);
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn test_validate_vertex_requires_project() {
        let mut config = Config::default();
        config.gemini.use_vertex = true;
        config.gemini.access_token = Some("token".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gemini.project"));

        config.gemini.project = Some("p".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_storage_requires_object_name() {
        let mut config = Config::default();
        config.gemini.api_key = Some("key".to_string());
        config.storage = Some(StorageConfig {
            bucket: "uploads".to_string(),
            ..StorageConfig::default()
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("object_name"));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
