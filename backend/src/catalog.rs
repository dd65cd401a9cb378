use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::{
    Comment, EventFavourite, EventSummary, Order, OrderStatus, PaymentInfo, Post, Subscriber,
};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

const CITIES: [&str; 4] = ["Lisbon", "Berlin", "Austin", "Kyoto"];

const EVENT_TITLES: [&str; 7] = [
    "Jazz Night",
    "Rooftop Cinema",
    "Street Food Tour",
    "Pottery Workshop",
    "Sunrise Yoga",
    "Vinyl Market",
    "Comedy Open Mic",
];

const AUTHORS: [&str; 5] = ["Ana", "Jonas", "Priya", "Kenji", "Maya"];

/// All marketplace data served by the dev backend.
///
/// Every list is kept in the order it is served in, so paging is stable
/// across requests.
#[derive(Debug, Default)]
pub struct Catalog {
    pub events: Vec<EventSummary>,
    pub comments: HashMap<u64, Vec<Comment>>,
    pub posts: Vec<Post>,
    pub orders: Vec<Order>,
    pub subscribers: HashMap<u64, Vec<Subscriber>>,
    pub payment_info: HashMap<u64, Vec<PaymentInfo>>,
    pub favourites: HashMap<u64, Vec<EventFavourite>>,
}

impl Catalog {
    /// Deterministic demo data. User 1 has data in every list, user 2 has none.
    pub fn seeded() -> Self {
        let base = base_time();

        let events: Vec<EventSummary> = (1..=42u64)
            .map(|id| EventSummary {
                id,
                title: format!("{} #{}", EVENT_TITLES[(id as usize) % EVENT_TITLES.len()], id),
                city: CITIES[(id as usize) % CITIES.len()].to_string(),
                starts_at: base + Duration::days(id as i64),
                price_cents: 1500 + (id % 6) * 500,
                favourite_count: ((id * 7) % 40) as u32,
            })
            .collect();

        let mut comments = HashMap::new();
        for event in &events {
            let count = match event.id {
                1 => 23,
                2 => 0,
                id => (id % 7) * 3,
            };
            let event_comments = (1..=count)
                .map(|n| Comment {
                    id: event.id * 1000 + n,
                    event_id: event.id,
                    author_name: AUTHORS[(n as usize) % AUTHORS.len()].to_string(),
                    body: format!("Comment {} on {}", n, event.title),
                    created_at: base - Duration::minutes((n * 17) as i64),
                    like_count: (n % 5) as u32,
                    liked: n % 4 == 0,
                })
                .collect();
            comments.insert(event.id, event_comments);
        }

        let posts = (1..=57u64)
            .map(|id| {
                let author_id = (id % AUTHORS.len() as u64) + 1;
                Post {
                    id,
                    author_id,
                    author_name: AUTHORS[(author_id - 1) as usize].to_string(),
                    body: format!("Post {} from the marketplace feed", id),
                    created_at: base - Duration::hours(id as i64),
                    like_count: ((id * 3) % 25) as u32,
                    liked: id % 3 == 0,
                }
            })
            .collect();

        let statuses = [
            OrderStatus::Paid,
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Cancelled,
            OrderStatus::Refunded,
        ];
        let orders = (0..18usize)
            .map(|n| {
                let event = &events[n % events.len()];
                Order {
                    id: Uuid::from_u128(n as u128 + 1),
                    event_id: event.id,
                    event_title: event.title.clone(),
                    status: statuses[n % statuses.len()],
                    total_cents: event.price_cents * ((n as u64 % 3) + 1),
                    created_at: base - Duration::days(n as i64),
                }
            })
            .collect();

        let mut subscribers = HashMap::new();
        subscribers.insert(
            1,
            (1..=64u64)
                .map(|n| Subscriber {
                    user_id: 100 + n,
                    display_name: format!("{} {}", AUTHORS[(n as usize) % AUTHORS.len()], n),
                    subscribed_at: base - Duration::days(n as i64),
                })
                .collect(),
        );
        subscribers.insert(2, Vec::new());

        let mut payment_info = HashMap::new();
        payment_info.insert(
            1,
            vec![
                card(1, "visa", "4242", true),
                card(2, "mastercard", "4444", false),
                card(3, "amex", "0005", false),
            ],
        );
        payment_info.insert(2, Vec::new());

        let mut favourites = HashMap::new();
        favourites.insert(
            1,
            events
                .iter()
                .step_by(3)
                .take(12)
                .enumerate()
                .map(|(n, event)| EventFavourite {
                    event: event.clone(),
                    saved_at: base - Duration::hours(n as i64 * 5),
                })
                .collect(),
        );
        favourites.insert(2, Vec::new());

        Self {
            events,
            comments,
            posts,
            orders,
            subscribers,
            payment_info,
            favourites,
        }
    }
}

fn card(id: u64, brand: &str, last4: &str, is_default: bool) -> PaymentInfo {
    PaymentInfo {
        id,
        brand: brand.to_string(),
        last4: last4.to_string(),
        is_default,
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Shared handle to the in-memory catalog
#[derive(Clone)]
pub struct CatalogStore {
    catalog: Arc<RwLock<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Store filled with the demo data
    pub fn init() -> Self {
        let catalog = Catalog::seeded();
        info!(
            "Seeded catalog: {} events, {} posts, {} orders",
            catalog.events.len(),
            catalog.posts.len(),
            catalog.orders.len()
        );
        Self::new(catalog)
    }

    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, Catalog> {
        self.catalog.read().await
    }

    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, Catalog> {
        self.catalog.write().await
    }
}
