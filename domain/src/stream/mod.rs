//! Server-sent-event frames from the browser-automation service.

pub mod frame;
