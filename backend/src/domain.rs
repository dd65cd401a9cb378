use shared::{
    Comment, EventFavourite, EventSummary, Order, OrderStatus, PageRequest, PagedResponse,
    PaymentInfo, Post, ReactionResponse, Subscriber, MAX_PAGE_SIZE,
};
use thiserror::Error;
use tracing::info;

use crate::catalog::CatalogStore;

/// Errors produced while serving catalog lists
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("pageNumber must be 1 or greater, got {0}")]
    InvalidPage(u32),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: u64 },
}

/// Serves the paged marketplace lists out of the catalog store
#[derive(Clone)]
pub struct CatalogService {
    store: CatalogStore,
}

impl CatalogService {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Event search. Matches title or city, case-insensitively.
    pub async fn list_events(
        &self,
        search: Option<&str>,
        request: PageRequest,
    ) -> Result<PagedResponse<EventSummary>, CatalogError> {
        let request = validate(request)?;
        let catalog = self.store.read().await;

        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let matching: Vec<EventSummary> = match needle {
            Some(needle) => catalog
                .events
                .iter()
                .filter(|event| {
                    event.title.to_lowercase().contains(&needle)
                        || event.city.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect(),
            None => catalog.events.clone(),
        };

        Ok(page_of("events", &matching, request))
    }

    pub async fn list_comments(
        &self,
        event_id: u64,
        request: PageRequest,
    ) -> Result<PagedResponse<Comment>, CatalogError> {
        let request = validate(request)?;
        let catalog = self.store.read().await;

        let comments = catalog.comments.get(&event_id).ok_or(CatalogError::NotFound {
            resource: "event",
            id: event_id,
        })?;
        Ok(page_of("comments", comments, request))
    }

    /// Other events in the same city, in catalog order
    pub async fn list_related_events(
        &self,
        event_id: u64,
        request: PageRequest,
    ) -> Result<PagedResponse<EventSummary>, CatalogError> {
        let request = validate(request)?;
        let catalog = self.store.read().await;

        let event = catalog
            .events
            .iter()
            .find(|event| event.id == event_id)
            .ok_or(CatalogError::NotFound {
                resource: "event",
                id: event_id,
            })?;
        let related: Vec<EventSummary> = catalog
            .events
            .iter()
            .filter(|other| other.id != event.id && other.city == event.city)
            .cloned()
            .collect();

        Ok(page_of("related events", &related, request))
    }

    pub async fn list_posts(
        &self,
        author_id: Option<u64>,
        request: PageRequest,
    ) -> Result<PagedResponse<Post>, CatalogError> {
        let request = validate(request)?;
        let catalog = self.store.read().await;

        let posts: Vec<Post> = catalog
            .posts
            .iter()
            .filter(|post| author_id.map_or(true, |id| post.author_id == id))
            .cloned()
            .collect();

        Ok(page_of("posts", &posts, request))
    }

    pub async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        request: PageRequest,
    ) -> Result<PagedResponse<Order>, CatalogError> {
        let request = validate(request)?;
        let catalog = self.store.read().await;

        let orders: Vec<Order> = catalog
            .orders
            .iter()
            .filter(|order| status.map_or(true, |status| order.status == status))
            .cloned()
            .collect();

        Ok(page_of("orders", &orders, request))
    }

    pub async fn list_subscribers(
        &self,
        user_id: u64,
        request: PageRequest,
    ) -> Result<PagedResponse<Subscriber>, CatalogError> {
        let request = validate(request)?;
        let catalog = self.store.read().await;

        let subscribers = catalog.subscribers.get(&user_id).ok_or(CatalogError::NotFound {
            resource: "user",
            id: user_id,
        })?;
        Ok(page_of("subscribers", subscribers, request))
    }

    pub async fn list_payment_info(
        &self,
        user_id: u64,
        request: PageRequest,
    ) -> Result<PagedResponse<PaymentInfo>, CatalogError> {
        let request = validate(request)?;
        let catalog = self.store.read().await;

        let cards = catalog.payment_info.get(&user_id).ok_or(CatalogError::NotFound {
            resource: "user",
            id: user_id,
        })?;
        Ok(page_of("payment info", cards, request))
    }

    pub async fn list_favourites(
        &self,
        user_id: u64,
        request: PageRequest,
    ) -> Result<PagedResponse<EventFavourite>, CatalogError> {
        let request = validate(request)?;
        let catalog = self.store.read().await;

        let favourites = catalog.favourites.get(&user_id).ok_or(CatalogError::NotFound {
            resource: "user",
            id: user_id,
        })?;
        Ok(page_of("favourites", favourites, request))
    }

    /// Set or clear the current user's like on a post. Repeating the same
    /// request leaves the count unchanged.
    pub async fn react_to_post(
        &self,
        post_id: u64,
        liked: bool,
    ) -> Result<ReactionResponse, CatalogError> {
        let mut catalog = self.store.write().await;

        let post = catalog
            .posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or(CatalogError::NotFound {
                resource: "post",
                id: post_id,
            })?;

        if post.liked != liked {
            post.liked = liked;
            post.like_count = if liked {
                post.like_count.saturating_add(1)
            } else {
                post.like_count.saturating_sub(1)
            };
        }

        info!("Post {} liked={} count={}", post.id, post.liked, post.like_count);
        Ok(ReactionResponse {
            liked: post.liked,
            like_count: post.like_count,
        })
    }
}

/// Reject page 0 and clamp the page size to what the endpoints serve
fn validate(request: PageRequest) -> Result<PageRequest, CatalogError> {
    if request.page_number == 0 {
        return Err(CatalogError::InvalidPage(request.page_number));
    }

    Ok(PageRequest {
        page_number: request.page_number,
        page_size: request.page_size.clamp(1, MAX_PAGE_SIZE),
    })
}

fn page_of<T: Clone>(list: &str, all: &[T], request: PageRequest) -> PagedResponse<T> {
    let page = PagedResponse::from_slice(all, request);
    info!(
        "Returning {} {} (page {}, size {}), is_last: {}",
        page.data.len(),
        list,
        request.page_number,
        request.page_size,
        page.is_last
    );
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn create_test_service() -> CatalogService {
        CatalogService::new(CatalogStore::new(Catalog::seeded()))
    }

    #[tokio::test]
    async fn test_list_events_pages_to_the_end() {
        let service = create_test_service();
        let mut request = PageRequest::first(10);
        let mut seen = Vec::new();

        loop {
            let page = service.list_events(None, request).await.unwrap();
            seen.extend(page.data.iter().map(|e| e.id));
            if page.is_last {
                break;
            }
            request = request.next();
        }

        assert_eq!(seen, (1..=42).collect::<Vec<u64>>());
        assert_eq!(request.page_number, 5);
    }

    #[tokio::test]
    async fn test_list_events_search_filters_by_title_and_city() {
        let service = create_test_service();

        let kyoto = service
            .list_events(Some("  kyoto "), PageRequest::first(100))
            .await
            .unwrap();
        assert!(!kyoto.data.is_empty());
        assert!(kyoto.data.iter().all(|e| e.city == "Kyoto"));
        assert!(kyoto.is_last);

        let nothing = service
            .list_events(Some("underwater opera"), PageRequest::first(10))
            .await
            .unwrap();
        assert_eq!(nothing, PagedResponse::empty());
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected_and_size_is_clamped() {
        let service = create_test_service();

        let invalid = PageRequest { page_number: 0, page_size: 10 };
        assert_eq!(
            service.list_posts(None, invalid).await.unwrap_err(),
            CatalogError::InvalidPage(0)
        );

        let huge = PageRequest { page_number: 1, page_size: 5000 };
        let page = service.list_posts(None, huge).await.unwrap();
        assert_eq!(page.data.len(), 57);
        assert!(page.is_last);
    }

    #[tokio::test]
    async fn test_unknown_entities_are_not_found() {
        let service = create_test_service();

        let err = service.list_comments(999, PageRequest::first(10)).await.unwrap_err();
        assert_eq!(err, CatalogError::NotFound { resource: "event", id: 999 });

        let err = service.list_favourites(999, PageRequest::first(10)).await.unwrap_err();
        assert_eq!(err, CatalogError::NotFound { resource: "user", id: 999 });
    }

    #[tokio::test]
    async fn test_empty_lists_are_terminal() {
        let service = create_test_service();

        let comments = service.list_comments(2, PageRequest::first(10)).await.unwrap();
        assert!(comments.data.is_empty());
        assert!(comments.is_last);

        let subscribers = service.list_subscribers(2, PageRequest::first(10)).await.unwrap();
        assert_eq!(subscribers.total_elements, Some(0));
    }

    #[tokio::test]
    async fn test_related_events_share_city_and_exclude_self() {
        let service = create_test_service();
        let page = service.list_related_events(4, PageRequest::first(100)).await.unwrap();

        assert!(page.data.iter().all(|e| e.id != 4 && e.city == "Lisbon"));
        assert_eq!(page.total_elements, Some(9));
    }

    #[tokio::test]
    async fn test_filters_for_posts_and_orders() {
        let service = create_test_service();

        let posts = service.list_posts(Some(2), PageRequest::first(100)).await.unwrap();
        assert!(posts.data.iter().all(|p| p.author_id == 2));

        let refunded = service
            .list_orders(Some(OrderStatus::Refunded), PageRequest::first(100))
            .await
            .unwrap();
        assert!(!refunded.data.is_empty());
        assert!(refunded.data.iter().all(|o| o.status == OrderStatus::Refunded));
    }

    #[tokio::test]
    async fn test_react_to_post_is_idempotent() {
        let service = create_test_service();
        let before = service.list_posts(None, PageRequest::first(1)).await.unwrap().data[0].clone();
        assert!(!before.liked);

        let liked = service.react_to_post(before.id, true).await.unwrap();
        assert_eq!(liked, ReactionResponse { liked: true, like_count: before.like_count + 1 });

        let again = service.react_to_post(before.id, true).await.unwrap();
        assert_eq!(again, liked);

        let unliked = service.react_to_post(before.id, false).await.unwrap();
        assert_eq!(unliked.like_count, before.like_count);

        assert!(service.react_to_post(9999, true).await.is_err());
    }
}
