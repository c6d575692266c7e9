use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Remote service error ({status}): {message}")]
    RemoteService { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Object already exists: gs://{bucket}/{object}")]
    ObjectExists { bucket: String, object: String },

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse failure category surfaced to front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Network,
    RemoteService,
    UnsupportedInput,
    Storage,
    Internal,
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn remote(status: u16, msg: impl Into<String>) -> Self {
        Self::RemoteService {
            status,
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedInput(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Yaml(_) => ErrorKind::Configuration,
            Self::Network(_) => ErrorKind::Network,
            Self::RemoteService { .. } | Self::Serialization(_) => ErrorKind::RemoteService,
            Self::UnsupportedInput(_) => ErrorKind::UnsupportedInput,
            Self::Storage(_) | Self::ObjectExists { .. } | Self::FileNotFound { .. } => {
                ErrorKind::Storage
            }
            Self::Io(_) | Self::AddrParse(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}
