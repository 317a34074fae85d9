//! Link resolver.
//!
//! Decides, for a single (series, tracker) pair, whether a link exists,
//! obtains ranked candidates when it does not, and writes link decisions
//! through the library store.

use std::sync::Arc;

use tracing::{info, instrument};
use tracker_traits::{
    LibraryStore, Series, SeriesCandidate, TrackerKind, TrackerProvider,
};

use core_runtime::events::{CoreEvent, EventBus, LibraryEvent, TrackerEvent};

use crate::error::Result;

/// Maximum number of search candidates surfaced per tracker.
pub const MAX_SEARCH_RESULTS: usize = 5;

/// Link state of a series on one tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// No link decision has been made yet.
    Unlinked,
    /// The user explicitly cleared the link (empty-key sentinel).
    ExplicitlyUnlinked,
    /// Linked; the value is the tracker's series key.
    Linked(String),
}

/// Resolves and mutates the series' tracker link table.
pub struct LinkResolver {
    library: Arc<dyn LibraryStore>,
    event_bus: Arc<EventBus>,
}

impl LinkResolver {
    pub fn new(library: Arc<dyn LibraryStore>, event_bus: Arc<EventBus>) -> Self {
        Self { library, event_bus }
    }

    /// Current link state for a tracker, read from the series' link table.
    ///
    /// Pure lookup; never performs I/O.
    pub fn resolve(&self, series: &Series, kind: TrackerKind) -> LinkState {
        match series.tracker_links.get(&kind) {
            None => LinkState::Unlinked,
            Some(key) if key.is_empty() => LinkState::ExplicitlyUnlinked,
            Some(key) => LinkState::Linked(key.clone()),
        }
    }

    /// Search a tracker's catalog for link candidates.
    ///
    /// Preserves the tracker's relevance order, truncated to
    /// [`MAX_SEARCH_RESULTS`].
    pub async fn search(
        &self,
        provider: &dyn TrackerProvider,
        title: &str,
    ) -> Result<Vec<SeriesCandidate>> {
        let mut candidates = provider.search(title).await?;
        candidates.truncate(MAX_SEARCH_RESULTS);
        Ok(candidates)
    }

    /// Write a link decision for a tracker.
    ///
    /// An empty `key` records an explicit unlink. Persists the full
    /// replacement link table, then signals dependent views through the
    /// event bus. Does not fetch the entry; a subsequent refresh does that.
    #[instrument(skip(self, series), fields(series_id = %series.id, tracker = %kind))]
    pub async fn apply_link(&self, series: &Series, kind: TrackerKind, key: &str) -> Result<()> {
        let mut links = series.tracker_links.clone();
        links.insert(kind, key.to_string());
        self.library.update_tracker_links(series.id, links).await?;

        info!(
            "Updated {} link for series {} (linked: {})",
            kind,
            series.id,
            !key.is_empty()
        );

        self.event_bus
            .emit(CoreEvent::Library(LibraryEvent::SeriesContentInvalidated {
                series_id: series.id.to_string(),
            }))
            .ok();
        self.event_bus
            .emit(CoreEvent::Tracker(TrackerEvent::LinkChanged {
                tracker: kind.as_str().to_string(),
                series_id: series.id.to_string(),
                linked: !key.is_empty(),
            }))
            .ok();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex as AsyncMutex;
    use tracker_traits::{SeriesId, TrackEntry};

    struct MockLibrary {
        updates: AsyncMutex<Vec<(SeriesId, HashMap<TrackerKind, String>)>>,
    }

    impl MockLibrary {
        fn new() -> Self {
            Self {
                updates: AsyncMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LibraryStore for MockLibrary {
        async fn update_tracker_links(
            &self,
            series_id: SeriesId,
            links: HashMap<TrackerKind, String>,
        ) -> tracker_traits::error::Result<()> {
            self.updates.lock().await.push((series_id, links));
            Ok(())
        }
    }

    struct MockProvider {
        results: Vec<SeriesCandidate>,
    }

    #[async_trait]
    impl TrackerProvider for MockProvider {
        async fn get_username(&self) -> tracker_traits::error::Result<Option<String>> {
            Ok(Some("user".to_string()))
        }

        async fn search(
            &self,
            _title: &str,
        ) -> tracker_traits::error::Result<Vec<SeriesCandidate>> {
            Ok(self.results.clone())
        }

        async fn get_entry(
            &self,
            _key: &str,
        ) -> tracker_traits::error::Result<Option<TrackEntry>> {
            Ok(None)
        }

        async fn update_entry(
            &self,
            _key: &str,
            _entry: &TrackEntry,
        ) -> tracker_traits::error::Result<()> {
            Ok(())
        }
    }

    fn candidate(id: &str) -> SeriesCandidate {
        SeriesCandidate {
            id: id.to_string(),
            title: format!("Series {}", id),
            description: String::new(),
            cover_url: String::new(),
        }
    }

    fn resolver_with_library() -> (LinkResolver, Arc<MockLibrary>) {
        let library = Arc::new(MockLibrary::new());
        let resolver = LinkResolver::new(library.clone(), Arc::new(EventBus::new(16)));
        (resolver, library)
    }

    #[tokio::test]
    async fn test_resolve_link_states() {
        let (resolver, _) = resolver_with_library();
        let mut series = Series::new("Foo");

        assert_eq!(
            resolver.resolve(&series, TrackerKind::AniList),
            LinkState::Unlinked
        );

        series
            .tracker_links
            .insert(TrackerKind::AniList, String::new());
        assert_eq!(
            resolver.resolve(&series, TrackerKind::AniList),
            LinkState::ExplicitlyUnlinked
        );

        series
            .tracker_links
            .insert(TrackerKind::AniList, "123".to_string());
        assert_eq!(
            resolver.resolve(&series, TrackerKind::AniList),
            LinkState::Linked("123".to_string())
        );
    }

    #[tokio::test]
    async fn test_search_truncates_to_five_preserving_order() {
        let (resolver, _) = resolver_with_library();
        let provider = MockProvider {
            results: (0..8).map(|i| candidate(&i.to_string())).collect(),
        };

        let candidates = resolver.search(&provider, "Foo").await.unwrap();
        assert_eq!(candidates.len(), MAX_SEARCH_RESULTS);
        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_apply_link_persists_and_resolves_explicit_unlink() {
        let (resolver, library) = resolver_with_library();
        let mut series = Series::new("Foo");
        series
            .tracker_links
            .insert(TrackerKind::AniList, "123".to_string());

        resolver
            .apply_link(&series, TrackerKind::AniList, "")
            .await
            .unwrap();

        let updates = library.updates.lock().await;
        assert_eq!(updates.len(), 1);
        let (series_id, links) = &updates[0];
        assert_eq!(*series_id, series.id);
        assert_eq!(links.get(&TrackerKind::AniList), Some(&String::new()));

        // The persisted table resolves to an explicit unlink.
        let mut updated = series.clone();
        updated.tracker_links = links.clone();
        assert_eq!(
            resolver.resolve(&updated, TrackerKind::AniList),
            LinkState::ExplicitlyUnlinked
        );
    }

    #[tokio::test]
    async fn test_apply_link_emits_invalidation_and_link_events() {
        let library = Arc::new(MockLibrary::new());
        let event_bus = Arc::new(EventBus::new(16));
        let mut subscriber = event_bus.subscribe();
        let resolver = LinkResolver::new(library, event_bus);

        let series = Series::new("Foo");
        resolver
            .apply_link(&series, TrackerKind::MyAnimeList, "42")
            .await
            .unwrap();

        let first = subscriber.recv().await.unwrap();
        assert_eq!(
            first,
            CoreEvent::Library(LibraryEvent::SeriesContentInvalidated {
                series_id: series.id.to_string(),
            })
        );
        let second = subscriber.recv().await.unwrap();
        assert_eq!(
            second,
            CoreEvent::Tracker(TrackerEvent::LinkChanged {
                tracker: "myanimelist".to_string(),
                series_id: series.id.to_string(),
                linked: true,
            })
        );
    }
}
