//! Async keyboard, resize and paste input backed by `crossterm::EventStream`.
//!
//! When stdin is a pipe (the usual case for a menu fed by a producer),
//! crossterm reads from the controlling terminal instead, so the item list
//! and the keyboard never compete for the same descriptor.

mod async_service;
mod key_map;

pub use async_service::AsyncInputShutdown;

use async_service::spawn_async_event_task;
use core_events::Event;
use tokio::task::JoinHandle;

/// Spawn the async input service.
///
/// Returns the `JoinHandle` for the background task alongside a shutdown handle
/// that can be used to request immediate termination.
pub fn spawn_async_input(
    sender: tokio::sync::mpsc::Sender<Event>,
) -> (JoinHandle<()>, AsyncInputShutdown) {
    spawn_async_event_task(sender)
}
