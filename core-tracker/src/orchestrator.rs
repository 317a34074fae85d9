//! # Sync Orchestrator
//!
//! Top-level coordinator for tracker reconciliation.
//!
//! ## Overview
//!
//! For a given series, the orchestrator fans out one reconciliation task
//! per registered tracker and joins on all of them:
//!
//! 1. Fetch the tracker account identity. Absent or failing identity
//!    degrades that tracker to "requires setup".
//! 2. Resolve the link state from the series' link table.
//!    - Linked: fetch the live entry; a missing remote entry is
//!      synthesized with default values rather than failing.
//!    - Unlinked (implicitly or explicitly): search for link candidates.
//! 3. Merge per-tracker outcomes once every task has settled.
//!
//! Tracker tasks are mutually independent: a slow or failing tracker
//! degrades only its own view and never blocks or corrupts the others.
//!
//! ## Stale refreshes
//!
//! Each refresh takes a monotonically increasing generation. When a
//! refresh settles after a newer one was issued (e.g. the user moved to
//! another series mid-flight), its results are discarded instead of
//! overwriting newer state, and [`refresh`](SyncOrchestrator::refresh)
//! returns `None`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_tracker::SyncOrchestrator;
//! use std::sync::Arc;
//!
//! # async fn example(orchestrator: Arc<SyncOrchestrator>, series: tracker_traits::Series) {
//! if let Some(snapshot) = orchestrator.refresh(&series).await {
//!     for (kind, view) in &snapshot.views {
//!         println!("{}: {:?}", kind, view);
//!     }
//! }
//! # }
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use tracker_traits::{
    LibraryStore, Series, SeriesCandidate, SeriesId, TrackEntry, TrackerKind, TrackerProvider,
};

use core_runtime::events::{CoreEvent, EventBus, TrackerEvent};

use crate::entry_store::{ProviderMap, TrackEntryStore};
use crate::registry::TrackerRegistry;
use crate::resolver::{LinkResolver, LinkState};

/// Per-tracker outcome of a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerView {
    /// No account is linked to this tracker (or identity lookup failed).
    RequiresSetup,
    /// The series is linked and an entry is available.
    Entry {
        username: String,
        entry: TrackEntry,
    },
    /// The series is not linked; these are the link candidates.
    Candidates {
        username: String,
        candidates: Vec<SeriesCandidate>,
    },
    /// The tracker call failed; no resolvable data for this tracker.
    Unavailable { username: String },
}

/// Merged result of one refresh fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSnapshot {
    pub series_id: SeriesId,
    pub generation: u64,
    pub views: HashMap<TrackerKind, TrackerView>,
}

/// Coordinates per-tracker reconciliation for a series.
pub struct SyncOrchestrator {
    registry: TrackerRegistry,
    resolver: Arc<LinkResolver>,
    entry_store: Arc<TrackEntryStore>,
    providers: ProviderMap,
    event_bus: Arc<EventBus>,
    /// Monotonic refresh generation; see module docs.
    generation: Arc<AtomicU64>,
}

impl SyncOrchestrator {
    pub fn new(library: Arc<dyn LibraryStore>, event_bus: Arc<EventBus>) -> Self {
        let providers: ProviderMap = Arc::new(tokio::sync::RwLock::new(HashMap::new()));
        let generation = Arc::new(AtomicU64::new(0));
        let resolver = Arc::new(LinkResolver::new(library, Arc::clone(&event_bus)));
        let entry_store = Arc::new(TrackEntryStore::new(
            Arc::clone(&providers),
            Arc::clone(&resolver),
            Arc::clone(&event_bus),
            Arc::clone(&generation),
        ));

        Self {
            registry: TrackerRegistry::new(),
            resolver,
            entry_store,
            providers,
            event_bus,
            generation,
        }
    }

    /// Register a tracker adapter.
    ///
    /// Adapters must be registered before they take part in refreshes;
    /// registered trackers without an adapter present as requiring setup.
    pub async fn register_provider(&self, kind: TrackerKind, provider: Arc<dyn TrackerProvider>) {
        let mut providers = self.providers.write().await;
        providers.insert(kind, provider);
        info!("Registered tracker adapter: {}", kind);
    }

    /// The supported trackers in display order.
    pub fn registry(&self) -> &TrackerRegistry {
        &self.registry
    }

    /// The link resolver, for link decisions made outside a refresh.
    pub fn resolver(&self) -> &Arc<LinkResolver> {
        &self.resolver
    }

    /// The track entry store holding the active view's entries.
    pub fn entry_store(&self) -> &Arc<TrackEntryStore> {
        &self.entry_store
    }

    /// Reconcile a series against every registered tracker.
    ///
    /// Runs one task per tracker concurrently and joins on all of them;
    /// per-tracker failures degrade that tracker's view only. Entries
    /// found or synthesized are published into the entry store.
    ///
    /// Returns `None` when a newer refresh was issued while this one was
    /// in flight; the stale results are discarded.
    #[instrument(skip(self, series), fields(series_id = %series.id, title = %series.title))]
    pub async fn refresh(&self, series: &Series) -> Option<RefreshSnapshot> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.event_bus
            .emit(CoreEvent::Tracker(TrackerEvent::RefreshStarted {
                series_id: series.id.to_string(),
                generation,
            }))
            .ok();

        let providers = { self.providers.read().await.clone() };

        let tasks = self.registry.list().iter().map(|meta| {
            let kind = meta.kind;
            let provider = providers.get(&kind).cloned();
            async move {
                let view = self.refresh_tracker(kind, provider, series).await;
                (kind, view)
            }
        });

        // Fan-out/fan-in barrier: the refresh settles only when every
        // tracker task has, successfully or not.
        let views: HashMap<TrackerKind, TrackerView> = join_all(tasks).await.into_iter().collect();

        let entries: HashMap<TrackerKind, TrackEntry> = views
            .iter()
            .filter_map(|(kind, view)| match view {
                TrackerView::Entry { entry, .. } => Some((*kind, entry.clone())),
                _ => None,
            })
            .collect();

        if !self.entry_store.publish(generation, entries).await {
            debug!(
                "Discarding stale refresh for series {} (generation {})",
                series.id, generation
            );
            self.event_bus
                .emit(CoreEvent::Tracker(TrackerEvent::RefreshSuperseded {
                    series_id: series.id.to_string(),
                    generation,
                }))
                .ok();
            return None;
        }

        self.event_bus
            .emit(CoreEvent::Tracker(TrackerEvent::RefreshCompleted {
                series_id: series.id.to_string(),
                generation,
                trackers: views.len(),
            }))
            .ok();

        Some(RefreshSnapshot {
            series_id: series.id,
            generation,
            views,
        })
    }

    /// One tracker's reconciliation: identity, then link resolution, then
    /// entry fetch or candidate search, strictly in that order.
    async fn refresh_tracker(
        &self,
        kind: TrackerKind,
        provider: Option<Arc<dyn TrackerProvider>>,
        series: &Series,
    ) -> TrackerView {
        let Some(provider) = provider else {
            debug!("No adapter registered for tracker {}", kind);
            return TrackerView::RequiresSetup;
        };

        let username = match provider.get_username().await {
            Ok(Some(username)) => username,
            Ok(None) => {
                debug!("No {} account linked", kind);
                return TrackerView::RequiresSetup;
            }
            Err(e) => {
                warn!("Failed to fetch {} account identity: {}", kind, e);
                return TrackerView::RequiresSetup;
            }
        };

        match self.resolver.resolve(series, kind) {
            LinkState::Linked(key) => match provider.get_entry(&key).await {
                Ok(Some(entry)) => TrackerView::Entry { username, entry },
                Ok(None) => {
                    // The series was removed from the remote list; start a
                    // fresh entry rather than failing.
                    debug!("{} has no entry for key {}, synthesizing", kind, key);
                    TrackerView::Entry {
                        username,
                        entry: TrackEntry::synthesized(key),
                    }
                }
                Err(e) => {
                    warn!("Failed to fetch {} entry for series {}: {}", kind, series.id, e);
                    TrackerView::Unavailable { username }
                }
            },
            LinkState::Unlinked | LinkState::ExplicitlyUnlinked => {
                match self.resolver.search(provider.as_ref(), &series.title).await {
                    Ok(candidates) => TrackerView::Candidates {
                        username,
                        candidates,
                    },
                    Err(e) => {
                        warn!("Failed to search {} for \"{}\": {}", kind, series.title, e);
                        TrackerView::Unavailable { username }
                    }
                }
            }
        }
    }
}
