//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the tracker core:
//! - Logging and tracing setup
//! - Event bus system
//!
//! ## Overview
//!
//! This crate establishes the logging conventions and event broadcasting
//! mechanisms used throughout the workspace. Modules publish typed
//! [`CoreEvent`](events::CoreEvent)s; hosts subscribe to drive UI updates
//! such as reloading series content after a link change.

pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus, LibraryEvent, TrackerEvent};
