//! # List sources
//!
//! The seam between a list controller and wherever its pages come from.
//! The frontend implements it over HTTP; tests implement it with scripted
//! in-memory pages.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use shared::{PageRequest, PagedResponse};

use crate::error::ListError;

/// A paged remote resource, addressed by an identity key.
///
/// Futures are not required to be `Send`: lists are driven from a single
/// threaded UI event loop.
#[async_trait(?Send)]
pub trait ListSource {
    /// Identity of one list (entity id, filter, search text)
    type Key: Clone + PartialEq + fmt::Debug;
    type Item: Clone;

    /// Fetch one page of the list identified by `key`
    async fn fetch_page(
        &self,
        key: &Self::Key,
        request: PageRequest,
    ) -> Result<PagedResponse<Self::Item>, ListError>;
}

/// `ListSource` backed by a closure, see [`source_fn`]
pub struct FnSource<K, T, F> {
    fetch: F,
    _marker: PhantomData<fn(K) -> T>,
}

/// Wrap a `Fn(key, request) -> Future` as a list source
pub fn source_fn<K, T, F, Fut>(fetch: F) -> FnSource<K, T, F>
where
    F: Fn(K, PageRequest) -> Fut,
    Fut: Future<Output = Result<PagedResponse<T>, ListError>>,
{
    FnSource {
        fetch,
        _marker: PhantomData,
    }
}

#[async_trait(?Send)]
impl<K, T, F, Fut> ListSource for FnSource<K, T, F>
where
    K: Clone + PartialEq + fmt::Debug + 'static,
    T: Clone + 'static,
    F: Fn(K, PageRequest) -> Fut + 'static,
    Fut: Future<Output = Result<PagedResponse<T>, ListError>> + 'static,
{
    type Key = K;
    type Item = T;

    async fn fetch_page(
        &self,
        key: &Self::Key,
        request: PageRequest,
    ) -> Result<PagedResponse<Self::Item>, ListError> {
        (self.fetch)(key.clone(), request).await
    }
}
