//! Configuration: TOML file schema and multi-source loader

pub mod file_config;
pub mod loader;

pub use file_config::{FileApiConfig, FileAssistantConfig, FileConfig, FileLoggingConfig};
pub use loader::ConfigLoader;
