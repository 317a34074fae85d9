//! Track entry store.
//!
//! Holds the current in-memory track entry per tracker and pushes user
//! edits back to the owning tracker. Mutations are optimistic: local state
//! commits immediately and a failed remote push is logged and surfaced as
//! an event only, never rolled back or retried. The tracker remains the
//! system of record for scoring history; the local edit reflects immediate
//! user intent.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, warn};
use tracker_traits::{Series, TrackEntry, TrackStatus, TrackerKind, TrackerProvider};

use core_runtime::events::{CoreEvent, EventBus, TrackerEvent};

use crate::error::{Result, TrackerError};
use crate::resolver::LinkResolver;
use crate::score_format::{score_domain, DEFAULT_SCORE_FORMAT};

/// Shared map of registered tracker adapters.
pub(crate) type ProviderMap = Arc<RwLock<HashMap<TrackerKind, Arc<dyn TrackerProvider>>>>;

/// In-memory track entries for the series currently in view.
///
/// Mutations to a single tracker's entry are atomic with respect to each
/// other; entries for different trackers are independent.
pub struct TrackEntryStore {
    entries: Mutex<HashMap<TrackerKind, TrackEntry>>,
    providers: ProviderMap,
    resolver: Arc<LinkResolver>,
    event_bus: Arc<EventBus>,
    /// Newest refresh generation; stale publications are discarded.
    latest_generation: Arc<AtomicU64>,
}

impl TrackEntryStore {
    pub(crate) fn new(
        providers: ProviderMap,
        resolver: Arc<LinkResolver>,
        event_bus: Arc<EventBus>,
        latest_generation: Arc<AtomicU64>,
    ) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            providers,
            resolver,
            event_bus,
            latest_generation,
        }
    }

    /// Current entry for a tracker, if one is loaded.
    pub async fn get(&self, kind: TrackerKind) -> Option<TrackEntry> {
        self.entries.lock().await.get(&kind).cloned()
    }

    /// Copy of all loaded entries.
    pub async fn snapshot(&self) -> HashMap<TrackerKind, TrackEntry> {
        self.entries.lock().await.clone()
    }

    /// Discard the entry for a tracker from the active view.
    pub async fn remove(&self, kind: TrackerKind) {
        self.entries.lock().await.remove(&kind);
    }

    /// Replace all entries with a refresh's results, unless the refresh
    /// generation has been superseded. Returns whether the publication
    /// took effect.
    pub(crate) async fn publish(
        &self,
        generation: u64,
        entries: HashMap<TrackerKind, TrackEntry>,
    ) -> bool {
        let mut guard = self.entries.lock().await;
        if self.latest_generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *guard = entries;
        true
    }

    /// Set the reading status and push the updated entry.
    pub async fn set_status(&self, kind: TrackerKind, status: TrackStatus) -> Result<()> {
        let entry = {
            let mut entries = self.entries.lock().await;
            let entry = entries.get_mut(&kind).ok_or_else(|| {
                TrackerError::EntryNotLoaded {
                    tracker: kind.as_str().to_string(),
                }
            })?;
            entry.status = status;
            entry.clone()
        };
        self.spawn_push(kind, entry);
        Ok(())
    }

    /// Set the read progress and push the updated entry.
    ///
    /// Progress is unsigned, so the `>= 0` domain holds by construction.
    pub async fn set_progress(&self, kind: TrackerKind, progress: u32) -> Result<()> {
        let entry = {
            let mut entries = self.entries.lock().await;
            let entry = entries.get_mut(&kind).ok_or_else(|| {
                TrackerError::EntryNotLoaded {
                    tracker: kind.as_str().to_string(),
                }
            })?;
            entry.progress = progress;
            entry.clone()
        };
        self.spawn_push(kind, entry);
        Ok(())
    }

    /// Set the score and push the updated entry.
    ///
    /// The score must lie within the domain of the entry's score format
    /// (the 10-point scale when the entry carries none); out-of-domain
    /// values are rejected before any mutation.
    pub async fn set_score(&self, kind: TrackerKind, score: u32) -> Result<()> {
        let entry = {
            let mut entries = self.entries.lock().await;
            let entry = entries.get_mut(&kind).ok_or_else(|| {
                TrackerError::EntryNotLoaded {
                    tracker: kind.as_str().to_string(),
                }
            })?;
            let format = entry.score_format.unwrap_or(DEFAULT_SCORE_FORMAT);
            let domain = score_domain(format);
            if !domain.contains(&score) {
                return Err(TrackerError::Validation {
                    field: "score".to_string(),
                    message: format!(
                        "{} is outside the {} domain {}..={}",
                        score,
                        format,
                        domain.start(),
                        domain.end()
                    ),
                });
            }
            entry.score = Some(score);
            entry.clone()
        };
        self.spawn_push(kind, entry);
        Ok(())
    }

    /// Clear the tracker link for a series and discard its entry from the
    /// active view.
    pub async fn unlink(&self, series: &Series, kind: TrackerKind) -> Result<()> {
        self.resolver.apply_link(series, kind, "").await?;
        self.remove(kind).await;
        Ok(())
    }

    /// Push the full entry to its tracker in the background.
    ///
    /// Fire-and-forget relative to the caller; the local mutation has
    /// already been applied.
    fn spawn_push(&self, kind: TrackerKind, entry: TrackEntry) {
        let providers = Arc::clone(&self.providers);
        let event_bus = Arc::clone(&self.event_bus);
        tokio::spawn(async move {
            let provider = { providers.read().await.get(&kind).cloned() };
            let Some(provider) = provider else {
                warn!("No adapter registered for tracker {}, dropping push", kind);
                return;
            };

            match provider.update_entry(&entry.series_key, &entry).await {
                Ok(()) => {
                    debug!(
                        "Pushed entry for series key {} to {} (progress: {}, status: {})",
                        entry.series_key, kind, entry.progress, entry.status
                    );
                    event_bus
                        .emit(CoreEvent::Tracker(TrackerEvent::EntryPushed {
                            tracker: kind.as_str().to_string(),
                            series_key: entry.series_key.clone(),
                        }))
                        .ok();
                }
                Err(e) => {
                    error!("Failed to push entry to {}: {}", kind, e);
                    event_bus
                        .emit(CoreEvent::Tracker(TrackerEvent::PushFailed {
                            tracker: kind.as_str().to_string(),
                            series_key: entry.series_key.clone(),
                            message: e.to_string(),
                        }))
                        .ok();
                }
            }
        });
    }
}
