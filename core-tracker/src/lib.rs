//! # Tracker Synchronization Module
//!
//! Reconciles a local library series with its records on external
//! progress-tracking services and keeps read progress, status and score in
//! sync in both directions.
//!
//! ## Components
//!
//! - **Score Format Table** (`score_format`): legal score domain per
//!   tracker scoring scale
//! - **Tracker Registry** (`registry`): static metadata for the supported
//!   trackers, in display order
//! - **Link Resolver** (`resolver`): link-state resolution, candidate
//!   search and link decisions
//! - **Track Entry Store** (`entry_store`): in-memory entries with
//!   validated optimistic mutations pushed back to the tracker
//! - **Sync Orchestrator** (`orchestrator`): concurrent per-tracker
//!   refresh with per-tracker failure isolation and stale-refresh
//!   discarding

pub mod entry_store;
pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod resolver;
pub mod score_format;

pub use entry_store::TrackEntryStore;
pub use error::{Result, TrackerError};
pub use orchestrator::{RefreshSnapshot, SyncOrchestrator, TrackerView};
pub use registry::{TrackerMetadata, TrackerRegistry};
pub use resolver::{LinkResolver, LinkState, MAX_SEARCH_RESULTS};
pub use score_format::{parse_score_format, score_domain, score_values, DEFAULT_SCORE_FORMAT};
