//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished exploration is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the brief (default)
    #[default]
    Brief,
    /// Brief plus every task with its outcome and live-view link
    Full,
    /// The whole exploration as JSON
    Json,
}
