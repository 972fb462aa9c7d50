//! Configuration management for restgen

mod settings;

pub use settings::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, GeneratorSettings, ToolSettings};
