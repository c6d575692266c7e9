pub mod assistant;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod storage;

pub use error::{Error, ErrorKind, Result};
