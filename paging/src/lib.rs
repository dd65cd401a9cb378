//! # Paged lists
//!
//! Data controller shared by every infinite-scroll list in the marketplace
//! (events, comments, posts, orders, subscribers, payment methods, related
//! events and favourites).
//!
//! - [`ListController`] drives one list: `initialize` on identity change,
//!   `load_more` from a scroll trigger, `retry` after a failure.
//! - [`ListSource`] is where pages come from.
//! - [`ScrollTrigger`] / [`IntersectionTrigger`] decide when to ask for more.
//! - [`OptimisticReaction`] handles like buttons inside list items.

pub mod config;
pub mod controller;
pub mod cursor;
pub mod error;
pub mod optimistic;
pub mod source;
pub mod state;
pub mod trigger;

pub use config::ListConfig;
pub use controller::ListController;
pub use cursor::PageCursor;
pub use error::{ErrorInfo, ListError};
pub use optimistic::{react, OptimisticReaction, ReactionDelta, ReactionOutcome, ReactionState};
pub use source::{source_fn, FnSource, ListSource};
pub use state::{FetchKind, FetchTicket, ListSnapshot, ListState, LoadOutcome, Phase};
pub use trigger::{IntersectionTrigger, ScrollMetrics, ScrollTrigger};
