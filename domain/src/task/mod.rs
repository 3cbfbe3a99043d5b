//! Browsing tasks and the events observed while running them.

pub mod entities;
pub mod event;
pub mod failure;
pub mod live_view;
