//! Progress display for running explorations

pub mod reporter;
