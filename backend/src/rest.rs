use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared::{LogEntry, OrderStatus, PageRequest, PagedResponse, ReactionRequest, DEFAULT_PAGE_SIZE};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::domain::{CatalogError, CatalogService};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: CatalogService,
}

impl AppState {
    pub fn new(catalog_service: CatalogService) -> Self {
        Self { catalog_service }
    }
}

/// Paging parameters accepted by every list endpoint
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub author_id: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub status: Option<OrderStatus>,
}

fn page_request(page_number: Option<u32>, page_size: Option<u32>) -> PageRequest {
    PageRequest {
        page_number: page_number.unwrap_or(1),
        page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    }
}

fn list_response<T: Serialize>(
    route: &str,
    result: Result<PagedResponse<T>, CatalogError>,
) -> Response {
    match result {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => error_response(route, e),
    }
}

fn error_response(route: &str, e: CatalogError) -> Response {
    let status = match e {
        CatalogError::InvalidPage(_) => StatusCode::BAD_REQUEST,
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
    };
    error!("{} failed: {}", route, e);
    (status, e.to_string()).into_response()
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Response {
    info!("GET /api/events - query: {:?}", query);

    let request = page_request(query.page_number, query.page_size);
    let result = state
        .catalog_service
        .list_events(query.search.as_deref(), request)
        .await;
    list_response("GET /api/events", result)
}

/// GET /api/events/:event_id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(event_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    info!("GET /api/events/{}/comments - query: {:?}", event_id, query);

    let request = page_request(query.page_number, query.page_size);
    let result = state.catalog_service.list_comments(event_id, request).await;
    list_response("GET /api/events/:event_id/comments", result)
}

/// GET /api/events/:event_id/related
pub async fn list_related_events(
    State(state): State<AppState>,
    Path(event_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    info!("GET /api/events/{}/related - query: {:?}", event_id, query);

    let request = page_request(query.page_number, query.page_size);
    let result = state
        .catalog_service
        .list_related_events(event_id, request)
        .await;
    list_response("GET /api/events/:event_id/related", result)
}

/// GET /api/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> Response {
    info!("GET /api/posts - query: {:?}", query);

    let request = page_request(query.page_number, query.page_size);
    let result = state.catalog_service.list_posts(query.author_id, request).await;
    list_response("GET /api/posts", result)
}

/// POST /api/posts/:post_id/reactions
pub async fn react_to_post(
    State(state): State<AppState>,
    Path(post_id): Path<u64>,
    Json(request): Json<ReactionRequest>,
) -> Response {
    info!("POST /api/posts/{}/reactions - request: {:?}", post_id, request);

    match state.catalog_service.react_to_post(post_id, request.liked).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("POST /api/posts/:post_id/reactions", e),
    }
}

/// GET /api/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Response {
    info!("GET /api/orders - query: {:?}", query);

    let request = page_request(query.page_number, query.page_size);
    let result = state.catalog_service.list_orders(query.status, request).await;
    list_response("GET /api/orders", result)
}

/// GET /api/users/:user_id/subscribers
pub async fn list_subscribers(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    info!("GET /api/users/{}/subscribers - query: {:?}", user_id, query);

    let request = page_request(query.page_number, query.page_size);
    let result = state.catalog_service.list_subscribers(user_id, request).await;
    list_response("GET /api/users/:user_id/subscribers", result)
}

/// GET /api/users/:user_id/payment-info
pub async fn list_payment_info(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    info!("GET /api/users/{}/payment-info - query: {:?}", user_id, query);

    let request = page_request(query.page_number, query.page_size);
    let result = state.catalog_service.list_payment_info(user_id, request).await;
    list_response("GET /api/users/:user_id/payment-info", result)
}

/// GET /api/users/:user_id/favourites
pub async fn list_favourites(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    info!("GET /api/users/{}/favourites - query: {:?}", user_id, query);

    let request = page_request(query.page_number, query.page_size);
    let result = state.catalog_service.list_favourites(user_id, request).await;
    list_response("GET /api/users/:user_id/favourites", result)
}

/// POST /api/logs - sink for the browser-side logger
pub async fn receive_log(Json(entry): Json<LogEntry>) -> StatusCode {
    let component = entry.component.as_deref().unwrap_or("frontend");

    match entry.level.as_str() {
        "error" => error!(component, "{}", entry.message),
        "warn" => warn!(component, "{}", entry.message),
        "debug" => debug!(component, "{}", entry.message),
        _ => info!(component, "{}", entry.message),
    }

    StatusCode::NO_CONTENT
}

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState, config: &ServerConfig) -> Result<Router> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid allowed origin: {}", config.allowed_origin))?;

    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/events", get(list_events))
        .route("/events/:event_id/comments", get(list_comments))
        .route("/events/:event_id/related", get(list_related_events))
        .route("/posts", get(list_posts))
        .route("/posts/:post_id/reactions", post(react_to_post))
        .route("/orders", get(list_orders))
        .route("/users/:user_id/subscribers", get(list_subscribers))
        .route("/users/:user_id/payment-info", get(list_payment_info))
        .route("/users/:user_id/favourites", get(list_favourites))
        .route("/logs", post(receive_log));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state))
}
