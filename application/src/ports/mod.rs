//! Ports - interfaces implemented by the infrastructure and presentation
//! layers.

pub mod browser_automation;
pub mod exploration_logger;
pub mod progress;
pub mod service;
