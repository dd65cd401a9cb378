//! # List controller
//!
//! Async driver around [`ListState`]. Every public call takes `&self`, so a
//! scroll trigger may call `load_more` again while a previous call is still
//! awaiting; the gate is evaluated and the phase switched before the first
//! `.await`, which makes such redundant calls cheap no-ops.

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, info};

use crate::config::ListConfig;
use crate::source::ListSource;
use crate::state::{FetchTicket, ListSnapshot, ListState, LoadOutcome, Phase};

/// Paged, appendable list bound to one identity key at a time
pub struct ListController<S: ListSource> {
    source: S,
    state: RefCell<ListState<S::Key, S::Item>>,
    observer: Option<Box<dyn Fn()>>,
}

impl<S: ListSource> fmt::Debug for ListController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("state", &self.state)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl<S: ListSource> ListController<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            state: RefCell::new(ListState::new(page_size)),
            observer: None,
        }
    }

    pub fn with_config(source: S, config: &ListConfig) -> Self {
        Self::new(source, config.page_size)
    }

    /// Register a callback run after every state change (a fetch starting,
    /// a page landing, a failure). UI shells use it to re-render.
    pub fn with_observer(mut self, observer: impl Fn() + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn snapshot(&self) -> ListSnapshot<S::Item> {
        self.state.borrow().snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase()
    }

    pub fn key(&self) -> Option<S::Key> {
        self.state.borrow().key().cloned()
    }

    /// Next page the list would request
    pub fn page_number(&self) -> u32 {
        self.state.borrow().cursor().page_number()
    }

    /// Bind the list to `key` and load its first page.
    ///
    /// This is a full reset: items, cursor and error are cleared before the
    /// request goes out, and a response still pending for the previous key is
    /// discarded when it lands.
    pub async fn initialize(&self, key: S::Key) -> LoadOutcome {
        info!("initializing list {:?}", key);
        let ticket = self.state.borrow_mut().begin_initialize(key);
        self.notify();
        self.run(ticket).await
    }

    /// Load the next page if the gate allows it, otherwise return
    /// [`LoadOutcome::Skipped`] without touching the network.
    pub async fn load_more(&self) -> LoadOutcome {
        let ticket = self.state.borrow_mut().begin_load_more();
        let Some(ticket) = ticket else {
            return LoadOutcome::Skipped;
        };

        self.notify();
        self.run(ticket).await
    }

    /// Re-issue the fetch that last failed. Skipped when there is no error
    /// or a fetch is already in flight.
    pub async fn retry(&self) -> LoadOutcome {
        let ticket = self.state.borrow_mut().begin_retry();
        let Some(ticket) = ticket else {
            debug!("retry skipped: nothing to retry");
            return LoadOutcome::Skipped;
        };

        info!(
            "retrying {:?} page {}",
            ticket.key(),
            ticket.request().page_number
        );
        self.notify();
        self.run(ticket).await
    }

    async fn run(&self, ticket: FetchTicket<S::Key>) -> LoadOutcome {
        debug!(
            "fetching {:?} page {} (size {})",
            ticket.key(),
            ticket.request().page_number,
            ticket.request().page_size
        );

        let result = self.source.fetch_page(ticket.key(), ticket.request()).await;
        let outcome = self.state.borrow_mut().complete(&ticket, result);

        if outcome != LoadOutcome::Discarded {
            self.notify();
        }
        outcome
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListError;
    use crate::source::source_fn;
    use shared::{PageRequest, PagedResponse};
    use std::cell::Cell;
    use std::rc::Rc;

    fn catalog_source(
        len: u32,
        calls: Rc<Cell<u32>>,
    ) -> impl ListSource<Key = String, Item = u32> {
        source_fn(move |_key: String, request: PageRequest| {
            calls.set(calls.get() + 1);
            let all: Vec<u32> = (0..len).collect();
            async move { Ok::<_, ListError>(PagedResponse::from_slice(&all, request)) }
        })
    }

    #[tokio::test]
    async fn test_load_more_before_initialize_is_skipped() {
        let calls = Rc::new(Cell::new(0));
        let controller = ListController::new(catalog_source(5, calls.clone()), 10);

        assert_eq!(controller.load_more().await, LoadOutcome::Skipped);
        assert_eq!(controller.retry().await, LoadOutcome::Skipped);
        assert_eq!(calls.get(), 0);
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_pages_through_whole_catalog() {
        let calls = Rc::new(Cell::new(0));
        let controller = ListController::new(catalog_source(25, calls.clone()), 10);

        controller.initialize("feed".to_string()).await;
        while controller.load_more().await != LoadOutcome::Skipped {}

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.items, (0..25).collect::<Vec<u32>>());
        assert!(!snapshot.has_more);
        assert_eq!(snapshot.total_elements, Some(25));
        assert_eq!(calls.get(), 3);
        assert_eq!(controller.page_number(), 4);
    }

    #[tokio::test]
    async fn test_observer_sees_every_transition() {
        let calls = Rc::new(Cell::new(0));
        let notified = Rc::new(Cell::new(0));
        let seen = notified.clone();
        let controller = ListController::with_config(
            catalog_source(15, calls),
            &ListConfig::default(),
        )
        .with_observer(move || seen.set(seen.get() + 1));

        controller.initialize("feed".to_string()).await;
        assert_eq!(notified.get(), 2, "start and completion");

        controller.load_more().await;
        assert_eq!(notified.get(), 4);

        // Terminal: the gate refuses without a state change
        controller.load_more().await;
        assert_eq!(notified.get(), 4);
    }

    #[tokio::test]
    async fn test_key_is_passed_to_source() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let source = source_fn(move |key: String, request: PageRequest| {
            log.borrow_mut().push((key, request.page_number));
            async { Ok::<_, ListError>(PagedResponse::<u32>::empty()) }
        });
        let controller = ListController::new(source, 10);

        controller.initialize("event-7".to_string()).await;
        assert_eq!(controller.key(), Some("event-7".to_string()));
        assert_eq!(*seen.borrow(), vec![("event-7".to_string(), 1)]);
        assert!(controller.snapshot().is_empty());
    }
}
