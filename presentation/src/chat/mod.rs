//! Interactive chat module
//!
//! Provides a readline-based follow-up chat about a finished exploration.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
