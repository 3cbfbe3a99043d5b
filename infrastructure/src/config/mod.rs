//! Configuration loading for parallel-scout
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SCOUT_*` and well-known environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./scout.toml` or `./.scout.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/parallel-scout/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileBrowserConfig, FileChatConfig, FileConfig,
    FileExplorationConfig, FileLlmConfig, FileOutputConfig, FileOutputFormat,
};
pub use loader::{ConfigLoader, env_alias};
