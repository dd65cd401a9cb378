use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Largest page size the list endpoints will serve
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when a list does not ask for a specific one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Paging parameters sent with every list request.
///
/// `page_number` is 1-based; `page_size` stays fixed for the lifetime of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Request for the first page of a list
    pub fn first(page_size: u32) -> Self {
        Self {
            page_number: 1,
            page_size,
        }
    }

    /// Request for the page following this one
    pub fn next(&self) -> Self {
        Self {
            page_number: self.page_number + 1,
            page_size: self.page_size,
        }
    }

    /// Number of items that come before this page
    pub fn offset(&self) -> usize {
        (self.page_number.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }

    /// Query pairs in the wire naming (`pageNumber`, `pageSize`)
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("pageNumber", self.page_number.to_string()),
            ("pageSize", self.page_size.to_string()),
        ]
    }
}

/// Body returned by every paged list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    /// True on the page after which no further items exist
    pub is_last: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
}

impl<T> PagedResponse<T> {
    /// Terminal page with no items ("no items found")
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            is_last: true,
            total_elements: Some(0),
        }
    }
}

impl<T: Clone> PagedResponse<T> {
    /// Cut one page out of a fully materialized, stably ordered list.
    ///
    /// `is_last` is set exactly when no item exists past the returned page,
    /// so a list whose length is a multiple of the page size ends on its last
    /// full page rather than on an extra empty one.
    pub fn from_slice(all: &[T], request: PageRequest) -> Self {
        let start = request.offset().min(all.len());
        let end = start
            .saturating_add(request.page_size as usize)
            .min(all.len());

        Self {
            data: all[start..end].to_vec(),
            is_last: end >= all.len(),
            total_elements: Some(all.len() as u64),
        }
    }
}

/// Lifecycle status of a ticket order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one paged list.
///
/// Two lists with equal keys show the same data; changing the key means the
/// list has to be reset and loaded again from page 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "list", rename_all = "camelCase")]
pub enum ListKey {
    /// Event search results, filtered by free text
    Events { search: String },
    /// Comments posted under an event
    Comments { event_id: u64 },
    /// Events related to the given one
    RelatedEvents { event_id: u64 },
    /// Social feed posts, optionally restricted to one author
    Posts { author_id: Option<u64> },
    /// The current user's ticket orders
    Orders { status: Option<OrderStatus> },
    /// Users subscribed to a host
    Subscribers { user_id: u64 },
    /// Saved payment methods of a user
    PaymentInfo { user_id: u64 },
    /// Events a user marked as favourite
    EventFavourites { user_id: u64 },
}

impl ListKey {
    /// Short name of the feature this list belongs to, used in logs
    pub fn label(&self) -> &'static str {
        match self {
            ListKey::Events { .. } => "events",
            ListKey::Comments { .. } => "comments",
            ListKey::RelatedEvents { .. } => "related-events",
            ListKey::Posts { .. } => "posts",
            ListKey::Orders { .. } => "orders",
            ListKey::Subscribers { .. } => "subscribers",
            ListKey::PaymentInfo { .. } => "payment-info",
            ListKey::EventFavourites { .. } => "event-favourites",
        }
    }

    /// Path of the remote list endpoint, relative to the API base URL
    pub fn resource_path(&self) -> String {
        match self {
            ListKey::Events { .. } => "/api/events".to_string(),
            ListKey::Comments { event_id } => format!("/api/events/{}/comments", event_id),
            ListKey::RelatedEvents { event_id } => format!("/api/events/{}/related", event_id),
            ListKey::Posts { .. } => "/api/posts".to_string(),
            ListKey::Orders { .. } => "/api/orders".to_string(),
            ListKey::Subscribers { user_id } => format!("/api/users/{}/subscribers", user_id),
            ListKey::PaymentInfo { user_id } => format!("/api/users/{}/payment-info", user_id),
            ListKey::EventFavourites { user_id } => format!("/api/users/{}/favourites", user_id),
        }
    }

    /// Filter parameters sent alongside the paging parameters.
    /// Empty filters are left out entirely.
    pub fn filter_params(&self) -> Vec<(&'static str, String)> {
        match self {
            ListKey::Events { search } if !search.trim().is_empty() => {
                vec![("search", search.trim().to_string())]
            }
            ListKey::Posts {
                author_id: Some(author_id),
            } => vec![("authorId", author_id.to_string())],
            ListKey::Orders {
                status: Some(status),
            } => vec![("status", status.as_str().to_string())],
            _ => Vec::new(),
        }
    }

    /// Page size the feature uses unless configured otherwise
    pub fn default_page_size(&self) -> u32 {
        match self {
            ListKey::Comments { .. } | ListKey::Posts { .. } => 20,
            ListKey::RelatedEvents { .. } => 6,
            ListKey::Subscribers { .. } => 30,
            _ => DEFAULT_PAGE_SIZE,
        }
    }
}

impl fmt::Display for ListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource_path())?;
        for (index, (name, value)) in self.filter_params().iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", separator, name, value)?;
        }
        Ok(())
    }
}

/// Event card data shown in search results, related events and favourites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: u64,
    pub title: String,
    pub city: String,
    pub starts_at: DateTime<Utc>,
    /// Ticket price in the smallest currency unit
    pub price_cents: u64,
    pub favourite_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub event_id: u64,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u32,
    pub liked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u32,
    pub liked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub event_id: u64,
    pub event_title: String,
    pub status: OrderStatus,
    pub total_cents: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub user_id: u64,
    pub display_name: String,
    pub subscribed_at: DateTime<Utc>,
}

/// A saved payment method; only the card brand and last four digits are exposed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub id: u64,
    pub brand: String,
    pub last4: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFavourite {
    pub event: EventSummary,
    pub saved_at: DateTime<Utc>,
}

/// Request to set or clear the current user's like on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRequest {
    pub liked: bool,
}

/// Server view of a post's reactions after a reaction request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub liked: bool,
    pub like_count: u32,
}

/// Log line shipped from the browser to the backend log sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_offset_and_next() {
        let first = PageRequest::first(10);
        assert_eq!(first.offset(), 0);

        let third = first.next().next();
        assert_eq!(third.page_number, 3);
        assert_eq!(third.page_size, 10);
        assert_eq!(third.offset(), 20);

        // Page 0 is invalid on the wire but must not underflow
        let zero = PageRequest { page_number: 0, page_size: 10 };
        assert_eq!(zero.offset(), 0);
    }

    #[test]
    fn test_page_request_query_pairs() {
        let pairs = PageRequest { page_number: 2, page_size: 25 }.query_pairs();
        assert_eq!(pairs[0], ("pageNumber", "2".to_string()));
        assert_eq!(pairs[1], ("pageSize", "25".to_string()));
    }

    #[test]
    fn test_from_slice_marks_last_page_exactly() {
        let all: Vec<u32> = (0..14).collect();

        let page1 = PagedResponse::from_slice(&all, PageRequest::first(10));
        assert_eq!(page1.data, (0..10).collect::<Vec<_>>());
        assert!(!page1.is_last);
        assert_eq!(page1.total_elements, Some(14));

        let page2 = PagedResponse::from_slice(&all, PageRequest::first(10).next());
        assert_eq!(page2.data, (10..14).collect::<Vec<_>>());
        assert!(page2.is_last);
    }

    #[test]
    fn test_from_slice_exact_multiple_ends_on_full_page() {
        let all: Vec<u32> = (0..20).collect();

        let page2 = PagedResponse::from_slice(&all, PageRequest { page_number: 2, page_size: 10 });
        assert_eq!(page2.data.len(), 10);
        assert!(page2.is_last, "no empty trailing page should be needed");
    }

    #[test]
    fn test_from_slice_past_the_end_and_empty() {
        let all: Vec<u32> = (0..3).collect();
        let beyond = PagedResponse::from_slice(&all, PageRequest { page_number: 5, page_size: 10 });
        assert!(beyond.data.is_empty());
        assert!(beyond.is_last);

        let none: Vec<u32> = Vec::new();
        let empty = PagedResponse::from_slice(&none, PageRequest::first(10));
        assert_eq!(empty, PagedResponse::empty());
    }

    #[test]
    fn test_paged_response_wire_shape() {
        let json = r#"{"data":[1,2,3],"isLast":false,"totalElements":30}"#;
        let page: PagedResponse<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data, vec![1, 2, 3]);
        assert!(!page.is_last);
        assert_eq!(page.total_elements, Some(30));

        // totalElements is optional
        let page: PagedResponse<u32> = serde_json::from_str(r#"{"data":[],"isLast":true}"#).unwrap();
        assert_eq!(page.total_elements, None);

        let encoded = serde_json::to_value(PagedResponse::<u32>::empty()).unwrap();
        assert_eq!(encoded["isLast"], serde_json::Value::Bool(true));
        assert_eq!(encoded["totalElements"], serde_json::json!(0));
    }

    #[test]
    fn test_list_key_paths_and_filters() {
        let comments = ListKey::Comments { event_id: 42 };
        assert_eq!(comments.resource_path(), "/api/events/42/comments");
        assert!(comments.filter_params().is_empty());

        let search = ListKey::Events { search: "  jazz night ".to_string() };
        assert_eq!(search.filter_params(), vec![("search", "jazz night".to_string())]);

        let blank = ListKey::Events { search: "   ".to_string() };
        assert!(blank.filter_params().is_empty());

        let orders = ListKey::Orders { status: Some(OrderStatus::Refunded) };
        assert_eq!(orders.to_string(), "/api/orders?status=refunded");

        let favourites = ListKey::EventFavourites { user_id: 7 };
        assert_eq!(favourites.to_string(), "/api/users/7/favourites");
    }

    #[test]
    fn test_list_key_identity() {
        // Different filters are different lists
        assert_ne!(
            ListKey::Events { search: "a".to_string() },
            ListKey::Events { search: "b".to_string() }
        );
        assert_ne!(
            ListKey::Subscribers { user_id: 1 },
            ListKey::PaymentInfo { user_id: 1 }
        );
        assert_eq!(ListKey::Comments { event_id: 3 }.default_page_size(), 20);
        assert_eq!(ListKey::Orders { status: None }.default_page_size(), DEFAULT_PAGE_SIZE);
    }
}
