//! Rendering of finished explorations

pub mod console;
