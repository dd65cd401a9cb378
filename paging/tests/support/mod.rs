//! Scripted list source for controller tests.
//!
//! Each fetch records the request and answers with the next scripted
//! response. Held responses wait until the test releases them, which lets a
//! test observe the controller while a fetch is in flight.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ops::Range;

use async_trait::async_trait;
use paging::{ListError, ListSource};
use shared::{PageRequest, PagedResponse};
use tokio::sync::oneshot;

struct Scripted {
    result: Result<PagedResponse<u32>, ListError>,
    hold: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
pub struct ScriptedSource {
    script: RefCell<VecDeque<Scripted>>,
    calls: RefCell<Vec<(String, PageRequest)>>,
}

pub fn page(range: Range<u32>, is_last: bool) -> PagedResponse<u32> {
    PagedResponse {
        data: range.collect(),
        is_last,
        total_elements: None,
    }
}

pub fn offline() -> ListError {
    ListError::Network("connection reset".to_string())
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, range: Range<u32>, is_last: bool) {
        self.push(Ok(page(range, is_last)), None);
    }

    pub fn push_error(&self, error: ListError) {
        self.push(Err(error), None);
    }

    /// Queue a page that is only delivered once the returned sender fires
    pub fn push_held_page(&self, range: Range<u32>, is_last: bool) -> oneshot::Sender<()> {
        let (release, hold) = oneshot::channel();
        self.push(Ok(page(range, is_last)), Some(hold));
        release
    }

    /// Queue a failure that is only delivered once the returned sender fires
    pub fn push_held_error(&self, error: ListError) -> oneshot::Sender<()> {
        let (release, hold) = oneshot::channel();
        self.push(Err(error), Some(hold));
        release
    }

    pub fn calls(&self) -> Vec<(String, PageRequest)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn push(&self, result: Result<PagedResponse<u32>, ListError>, hold: Option<oneshot::Receiver<()>>) {
        self.script.borrow_mut().push_back(Scripted { result, hold });
    }
}

#[async_trait(?Send)]
impl ListSource for ScriptedSource {
    type Key = String;
    type Item = u32;

    async fn fetch_page(
        &self,
        key: &String,
        request: PageRequest,
    ) -> Result<PagedResponse<u32>, ListError> {
        self.calls.borrow_mut().push((key.clone(), request));

        let next = self.script.borrow_mut().pop_front();
        let Some(next) = next else {
            return Err(ListError::Network("script exhausted".to_string()));
        };

        if let Some(hold) = next.hold {
            let _ = hold.await;
        }
        next.result
    }
}
