//! Exploration record as JSON lines.
//!
//! Every line is a [`LogRecord`]. `seq` orders the whole file, while
//! `task_seq` counts the entries of one task, so a reader can replay a
//! single task by filtering on `task` and checking for gaps in `task_seq`.

use scout_application::ports::exploration_logger::{ExplorationLogEvent, ExplorationLogger};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// One line of the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub seq: u64,
    pub timestamp: String,
    pub exploration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_seq: Option<u64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
}

struct LogState {
    writer: BufWriter<File>,
    next_seq: u64,
    task_seqs: HashMap<String, u64>,
}

impl LogState {
    fn record(&mut self, event: ExplorationLogEvent) -> LogRecord {
        let seq = self.next_seq;
        self.next_seq += 1;
        let task_seq = event.task_id.as_ref().map(|task| {
            let counter = self.task_seqs.entry(task.clone()).or_insert(0);
            *counter += 1;
            *counter
        });

        LogRecord {
            seq,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            exploration: event.exploration_id,
            task: event.task_id,
            task_seq,
            kind: event.kind.to_string(),
            data: event.data,
        }
    }

    fn write(&mut self, record: &LogRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Appends the exploration record to a file, one [`LogRecord`] per line.
pub struct JsonlExplorationLogger {
    state: Mutex<LogState>,
    path: PathBuf,
}

impl JsonlExplorationLogger {
    /// Create (or truncate) the log file, creating parent directories.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;

        Ok(Self {
            state: Mutex::new(LogState {
                writer: BufWriter::new(file),
                next_seq: 1,
                task_seqs: HashMap::new(),
            }),
            path: path.to_path_buf(),
        })
    }
}

impl ExplorationLogger for JsonlExplorationLogger {
    fn log(&self, event: ExplorationLogEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let record = state.record(event);

        if let Err(e) = state.write(&record) {
            warn!(seq = record.seq, "Could not write event log {}: {}", self.path.display(), e);
        }
    }
}
