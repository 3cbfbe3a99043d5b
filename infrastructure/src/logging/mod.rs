//! Structured exploration logging.
//!
//! [`JsonlExplorationLogger`] persists the
//! [`ExplorationLogger`](scout_application::ExplorationLogger) record as
//! [`LogRecord`] lines.

mod jsonl_logger;

pub use jsonl_logger::{JsonlExplorationLogger, LogRecord};
