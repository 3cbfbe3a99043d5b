//! `[output]` section: how results leave the process.

use scout_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use scout_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Console rendering; `brief` when unset.
    pub format: Option<OutputFormat>,
    pub color: bool,
    /// JSONL record of every exploration run.
    pub event_log: Option<PathBuf>,
    /// File that also receives the rendered result.
    pub save_to: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            event_log: None,
            save_to: None,
        }
    }
}

impl FileOutputConfig {
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Target and format for `save_to`. A `.json` target gets JSON
    /// whatever the console format is.
    pub fn save_format(&self) -> Option<(&PathBuf, OutputFormat)> {
        let path = self.save_to.as_ref()?;
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => self.format(),
        };
        Some((path, format))
    }
}
