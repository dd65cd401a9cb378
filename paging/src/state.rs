//! # List state machine
//!
//! `ListState` owns everything one paged list knows: its identity key, the
//! loaded items, the page cursor, the last error and the single in-flight
//! fetch. Transitions are synchronous; the async driver in
//! [`crate::controller`] only calls `begin_*` before it awaits and `complete`
//! after.
//!
//! ```text
//! Idle ──initialize──▶ LoadingInitial ──complete──▶ Ready ◀──complete── LoadingMore
//!                            ▲                        │ │                    ▲
//!                            └──────retry (initial)───┘ └─────load_more──────┘
//! ```
//!
//! `initialize` is accepted from every phase and starts a new generation;
//! completions issued for an older generation are dropped as stale.

use std::fmt;

use shared::{PageRequest, PagedResponse};
use tracing::{debug, warn};

use crate::cursor::PageCursor;
use crate::error::{ErrorInfo, ListError};

/// Lifecycle phase of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No identity key yet
    Idle,
    /// Page 1 is in flight; items are being replaced
    LoadingInitial,
    /// Nothing in flight. May carry an error waiting for `retry`
    Ready,
    /// A follow-up page is in flight; items will be appended
    LoadingMore,
}

/// Which kind of fetch a request was issued as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    More,
}

/// Tag attached to every issued fetch.
///
/// A response is applied only when its ticket still equals the list's
/// in-flight ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    generation: u64,
    key: K,
    request: PageRequest,
    kind: FetchKind,
}

impl<K> FetchTicket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of one controller call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The gate refused the call; no request was issued
    Skipped,
    /// A page was merged into the list
    Loaded { received: usize, is_last: bool },
    /// The fetch failed; items and cursor are unchanged
    Failed(ErrorInfo),
    /// The response belonged to a superseded request and was dropped
    Discarded,
}

/// Read-only view of a list handed to the UI
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub is_loading_initial: bool,
    pub is_loading_more: bool,
    pub has_more: bool,
    pub error: Option<ErrorInfo>,
    pub total_elements: Option<u64>,
}

impl<T> ListSnapshot<T> {
    /// Loaded to the end and found nothing. Not an error.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && !self.has_more
            && self.error.is_none()
            && !self.is_loading_initial
            && !self.is_loading_more
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading_initial || self.is_loading_more
    }

    /// Initial load failed: show an error view instead of the list
    pub fn failed_initial(&self) -> bool {
        matches!(&self.error, Some(error) if error.kind == FetchKind::Initial)
    }

    /// A follow-up page failed: keep the items and offer an inline retry
    pub fn failed_more(&self) -> bool {
        matches!(&self.error, Some(error) if error.kind == FetchKind::More)
    }
}

/// State of one paged list bound to an identity key `K`
pub struct ListState<K, T> {
    key: Option<K>,
    items: Vec<T>,
    cursor: PageCursor,
    phase: Phase,
    error: Option<ErrorInfo>,
    total_elements: Option<u64>,
    generation: u64,
    in_flight: Option<FetchTicket<K>>,
}

impl<K: fmt::Debug, T> fmt::Debug for ListState<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListState")
            .field("key", &self.key)
            .field("items", &self.items.len())
            .field("cursor", &self.cursor)
            .field("phase", &self.phase)
            .field("error", &self.error)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<K, T> ListState<K, T>
where
    K: Clone + PartialEq + fmt::Debug,
    T: Clone,
{
    pub fn new(page_size: u32) -> Self {
        Self {
            key: None,
            items: Vec::new(),
            cursor: PageCursor::new(page_size),
            phase: Phase::Idle,
            error: None,
            total_elements: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn in_flight(&self) -> Option<&FetchTicket<K>> {
        self.in_flight.as_ref()
    }

    /// Reset the list for `key` and issue the page-1 fetch.
    ///
    /// Always succeeds; any fetch still in flight becomes stale.
    pub fn begin_initialize(&mut self, key: K) -> FetchTicket<K> {
        if let Some(stale) = &self.in_flight {
            debug!(
                "superseding in-flight fetch for {:?} page {}",
                stale.key, stale.request.page_number
            );
        }

        self.generation += 1;
        self.key = Some(key.clone());
        self.items.clear();
        self.cursor.reset();
        self.error = None;
        self.total_elements = None;
        self.issue(key, FetchKind::Initial)
    }

    /// Gate for follow-up pages: returns a ticket only when nothing is in
    /// flight, no error is waiting for `retry`, and the endpoint has more.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket<K>> {
        if self.phase != Phase::Ready || self.error.is_some() || !self.cursor.has_more() {
            debug!(
                "load_more gated: phase={:?} error={} has_more={}",
                self.phase,
                self.error.is_some(),
                self.cursor.has_more()
            );
            return None;
        }

        let key = self.key.clone()?;
        Some(self.issue(key, FetchKind::More))
    }

    /// Clear the pending error and re-issue the fetch that produced it.
    /// Items loaded before the failure are kept.
    pub fn begin_retry(&mut self) -> Option<FetchTicket<K>> {
        if self.phase != Phase::Ready {
            return None;
        }

        let key = self.key.clone()?;
        let failed = self.error.take()?;
        Some(self.issue(key, failed.kind))
    }

    /// Apply the result of a fetch issued with `ticket`
    pub fn complete(
        &mut self,
        ticket: &FetchTicket<K>,
        result: Result<PagedResponse<T>, ListError>,
    ) -> LoadOutcome {
        if self.in_flight.as_ref() != Some(ticket) {
            debug!(
                "discarding stale response for {:?} page {} (generation {}, current {})",
                ticket.key, ticket.request.page_number, ticket.generation, self.generation
            );
            return LoadOutcome::Discarded;
        }

        self.in_flight = None;
        self.phase = Phase::Ready;

        match result {
            Ok(page) => {
                let received = page.data.len();
                match ticket.kind {
                    FetchKind::Initial => self.items = page.data,
                    FetchKind::More => self.items.extend(page.data),
                }
                self.cursor.advance(page.is_last);
                if page.total_elements.is_some() {
                    self.total_elements = page.total_elements;
                }

                LoadOutcome::Loaded {
                    received,
                    is_last: page.is_last,
                }
            }
            Err(error) => {
                warn!(
                    "fetch of {:?} page {} failed: {}",
                    ticket.key, ticket.request.page_number, error
                );
                let info = ErrorInfo::new(ticket.kind, ticket.request.page_number, &error);
                self.error = Some(info.clone());
                LoadOutcome::Failed(info)
            }
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            items: self.items.clone(),
            is_loading_initial: self.phase == Phase::LoadingInitial,
            is_loading_more: self.phase == Phase::LoadingMore,
            has_more: self.cursor.has_more(),
            error: self.error.clone(),
            total_elements: self.total_elements,
        }
    }

    fn issue(&mut self, key: K, kind: FetchKind) -> FetchTicket<K> {
        self.phase = match kind {
            FetchKind::Initial => Phase::LoadingInitial,
            FetchKind::More => Phase::LoadingMore,
        };

        let ticket = FetchTicket {
            generation: self.generation,
            key,
            request: self.cursor.request(),
            kind,
        };
        self.in_flight = Some(ticket.clone());
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(range: std::ops::Range<u32>, is_last: bool) -> Result<PagedResponse<u32>, ListError> {
        Ok(PagedResponse {
            data: range.collect(),
            is_last,
            total_elements: None,
        })
    }

    #[test]
    fn test_new_state_is_idle_and_gated() {
        let mut state: ListState<&str, u32> = ListState::new(10);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.begin_load_more().is_none());
        assert!(state.begin_retry().is_none());
    }

    #[test]
    fn test_initialize_then_append() {
        let mut state: ListState<&str, u32> = ListState::new(10);

        let first = state.begin_initialize("a");
        assert_eq!(first.request(), PageRequest::first(10));
        assert_eq!(first.kind(), FetchKind::Initial);
        assert!(state.snapshot().is_loading_initial);

        assert_eq!(
            state.complete(&first, page(0..10, false)),
            LoadOutcome::Loaded { received: 10, is_last: false }
        );

        let second = state.begin_load_more().expect("gate should be open");
        assert_eq!(second.request().page_number, 2);
        assert!(state.snapshot().is_loading_more);
        assert!(state.begin_load_more().is_none(), "only one fetch in flight");

        state.complete(&second, page(10..14, true));
        assert_eq!(state.items(), (0..14).collect::<Vec<u32>>().as_slice());
        assert!(!state.cursor().has_more());
        assert!(state.begin_load_more().is_none());
    }

    #[test]
    fn test_failure_leaves_items_and_cursor() {
        let mut state: ListState<&str, u32> = ListState::new(10);
        let first = state.begin_initialize("a");
        state.complete(&first, page(0..10, false));

        let second = state.begin_load_more().unwrap();
        let outcome = state.complete(&second, Err(ListError::Network("offline".to_string())));
        assert!(matches!(outcome, LoadOutcome::Failed(ref info) if info.page_number == 2));

        assert_eq!(state.items().len(), 10);
        assert_eq!(state.cursor().page_number(), 2);
        assert!(state.cursor().has_more());
        assert!(state.begin_load_more().is_none(), "errors wait for retry");

        let retried = state.begin_retry().unwrap();
        assert_eq!(retried.kind(), FetchKind::More);
        assert_eq!(retried.request().page_number, 2);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_reinitialize_makes_previous_ticket_stale() {
        let mut state: ListState<&str, u32> = ListState::new(5);
        let old = state.begin_initialize("a");
        let new = state.begin_initialize("b");
        assert_ne!(old.generation(), new.generation());

        assert_eq!(state.complete(&old, page(0..5, false)), LoadOutcome::Discarded);
        assert!(state.items().is_empty());
        assert_eq!(state.phase(), Phase::LoadingInitial);

        state.complete(&new, page(100..102, true));
        assert_eq!(state.items(), &[100, 101]);
        assert_eq!(state.key(), Some(&"b"));
    }

    #[test]
    fn test_duplicate_completion_is_discarded() {
        let mut state: ListState<&str, u32> = ListState::new(5);
        let ticket = state.begin_initialize("a");
        state.complete(&ticket, page(0..5, false));
        assert_eq!(state.complete(&ticket, page(0..5, false)), LoadOutcome::Discarded);
        assert_eq!(state.items().len(), 5);
    }

    #[test]
    fn test_empty_terminal_page_is_not_an_error() {
        let mut state: ListState<&str, u32> = ListState::new(10);
        let ticket = state.begin_initialize("a");
        state.complete(&ticket, Ok(PagedResponse::empty()));

        let snapshot = state.snapshot();
        assert!(snapshot.is_empty());
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.total_elements, Some(0));
    }
}
