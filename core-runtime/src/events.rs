//! # Event Bus System
//!
//! Event-driven communication between core modules over
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! - **Event Types**: strongly-typed enum hierarchies per domain
//! - **EventBus**: central broadcast channel for publishing events
//! - **Subscription Management**: any number of independent subscribers
//!
//! Emitting is best-effort: producers call `emit(event).ok()` and carry on
//! when nobody is listening. Subscribers that fall behind receive
//! `RecvError::Lagged(n)` and can keep consuming; `RecvError::Closed`
//! signals shutdown.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, TrackerEvent};
//!
//! let event_bus = EventBus::new(100);
//! let _subscriber = event_bus.subscribe();
//!
//! event_bus
//!     .emit(CoreEvent::Tracker(TrackerEvent::RefreshStarted {
//!         series_id: "series-1".to_string(),
//!         generation: 1,
//!     }))
//!     .ok();
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Subscribers that fall behind by more than this receive
/// `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Library-related events
    Library(LibraryEvent),
    /// Tracker synchronization events
    Tracker(TrackerEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Library(e) => e.description(),
            CoreEvent::Tracker(e) => e.description(),
        }
    }
}

/// Events related to the local library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum LibraryEvent {
    /// A series' tracker links changed; dependent views should reload.
    SeriesContentInvalidated {
        /// The affected series.
        series_id: String,
    },
}

impl LibraryEvent {
    fn description(&self) -> &str {
        match self {
            LibraryEvent::SeriesContentInvalidated { .. } => "Series content invalidated",
        }
    }
}

/// Events related to tracker synchronization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum TrackerEvent {
    /// A refresh fan-out began for a series.
    RefreshStarted {
        /// The series being refreshed.
        series_id: String,
        /// Monotonic refresh generation.
        generation: u64,
    },
    /// A refresh settled and its results were published.
    RefreshCompleted {
        series_id: String,
        generation: u64,
        /// Number of trackers that produced a view.
        trackers: usize,
    },
    /// A refresh settled after a newer one was issued; results discarded.
    RefreshSuperseded {
        series_id: String,
        generation: u64,
    },
    /// A local entry edit was pushed to the tracker.
    EntryPushed {
        /// Tracker identifier (e.g., "anilist").
        tracker: String,
        /// The tracker's series key.
        series_key: String,
    },
    /// A push failed; local state is kept, no retry is scheduled.
    PushFailed {
        tracker: String,
        series_key: String,
        /// Human-readable failure message.
        message: String,
    },
    /// A series was linked to or unlinked from a tracker.
    LinkChanged {
        tracker: String,
        series_id: String,
        /// `false` means the link was cleared.
        linked: bool,
    },
}

impl TrackerEvent {
    fn description(&self) -> &str {
        match self {
            TrackerEvent::RefreshStarted { .. } => "Tracker refresh started",
            TrackerEvent::RefreshCompleted { .. } => "Tracker refresh completed",
            TrackerEvent::RefreshSuperseded { .. } => "Tracker refresh superseded",
            TrackerEvent::EntryPushed { .. } => "Track entry pushed",
            TrackerEvent::PushFailed { .. } => "Track entry push failed",
            TrackerEvent::LinkChanged { .. } => "Tracker link changed",
        }
    }
}

/// Central event bus for publishing and subscribing to core events.
///
/// Fully thread-safe; share across tasks with `Arc`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error when there are no active subscribers.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive events.
    ///
    /// Each call creates an independent receiver; past events are not
    /// replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}
