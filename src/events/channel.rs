//! Event channel implementation using crossbeam-channel.
//!
//! Carries pipeline events to the CLI's progress display, which runs
//! on its own thread.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Sends events from the pipeline.
///
/// A detached sender (see [`null_sender`]) drops every event.
#[derive(Clone)]
pub struct EventSender {
    inner: Option<Sender<Event>>,
}

impl EventSender {
    /// Send an event, discarding it if nobody is listening.
    pub fn send(&self, event: Event) {
        if let Some(inner) = &self.inner {
            let _ = inner.send(event);
        }
    }

    /// Whether events from this sender can reach a receiver
    pub fn is_attached(&self) -> bool {
        self.inner.is_some()
    }
}

/// Receives events from the pipeline.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Iterate until every sender has been dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Factory for connected sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// Create a new unbounded event channel.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender {
                inner: Some(sender),
            },
            EventReceiver { inner: receiver },
        )
    }
}

/// A sender that goes nowhere, for runs without a progress display.
pub fn null_sender() -> EventSender {
    EventSender { inner: None }
}
