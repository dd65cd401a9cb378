//! # Optimistic reactions
//!
//! Likes on comments, posts and events are shown immediately and sent to
//! the server afterwards. A failed request reverts the local change; the
//! revert applies at most once per change, however many times it fires.

use std::cell::RefCell;
use std::future::Future;

use shared::ReactionResponse;
use tracing::{debug, warn};

/// Like state of one item as the user sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionState {
    pub liked: bool,
    pub count: u32,
}

impl From<ReactionResponse> for ReactionState {
    fn from(response: ReactionResponse) -> Self {
        Self {
            liked: response.liked,
            count: response.like_count,
        }
    }
}

/// A local change to a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionDelta {
    Like,
    Unlike,
}

impl ReactionDelta {
    /// The change a tap on the like button makes from `state`
    pub fn toggle_from(state: ReactionState) -> Self {
        if state.liked {
            ReactionDelta::Unlike
        } else {
            ReactionDelta::Like
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            ReactionDelta::Like => ReactionDelta::Unlike,
            ReactionDelta::Unlike => ReactionDelta::Like,
        }
    }

    /// Whether the server should record a like after this change
    pub fn liked(self) -> bool {
        self == ReactionDelta::Like
    }
}

impl ReactionState {
    /// Apply `delta`. Liking something already liked (or unliking something
    /// not liked) changes nothing.
    pub fn apply(self, delta: ReactionDelta) -> Self {
        match (delta, self.liked) {
            (ReactionDelta::Like, false) => Self {
                liked: true,
                count: self.count.saturating_add(1),
            },
            (ReactionDelta::Unlike, true) => Self {
                liked: false,
                count: self.count.saturating_sub(1),
            },
            _ => self,
        }
    }
}

/// Reaction with at most one unconfirmed local change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticReaction {
    current: ReactionState,
    pending: Option<ReactionDelta>,
}

impl OptimisticReaction {
    pub fn new(state: ReactionState) -> Self {
        Self {
            current: state,
            pending: None,
        }
    }

    pub fn current(&self) -> ReactionState {
        self.current
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Flip the like locally and return the change to send.
    /// Returns `None` while a previous change is still unconfirmed.
    pub fn toggle(&mut self) -> Option<ReactionDelta> {
        if self.pending.is_some() {
            return None;
        }

        let delta = ReactionDelta::toggle_from(self.current);
        self.current = self.current.apply(delta);
        self.pending = Some(delta);
        Some(delta)
    }

    /// The server accepted the change; its view of the reaction wins
    pub fn confirm(&mut self, server: ReactionState) {
        self.current = server;
        self.pending = None;
    }

    /// Undo the unconfirmed change. Returns false if there was none.
    pub fn rollback(&mut self) -> bool {
        match self.pending.take() {
            Some(delta) => {
                self.current = self.current.apply(delta.inverse());
                true
            }
            None => false,
        }
    }
}

/// What happened to a reaction tap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome<E> {
    /// Another change was still pending; nothing was sent
    Skipped,
    Confirmed(ReactionState),
    RolledBack(E),
}

/// Toggle `reaction`, send the change with `send`, then confirm or roll back.
///
/// No `RefCell` borrow is held while `send` is awaited, so the UI can read
/// the optimistic state in the meantime.
pub async fn react<F, Fut, E>(reaction: &RefCell<OptimisticReaction>, send: F) -> ReactionOutcome<E>
where
    F: FnOnce(ReactionDelta) -> Fut,
    Fut: Future<Output = Result<ReactionState, E>>,
    E: std::fmt::Display,
{
    let delta = reaction.borrow_mut().toggle();
    let Some(delta) = delta else {
        debug!("reaction skipped: previous change still pending");
        return ReactionOutcome::Skipped;
    };

    match send(delta).await {
        Ok(server) => {
            reaction.borrow_mut().confirm(server);
            ReactionOutcome::Confirmed(server)
        }
        Err(error) => {
            warn!("reaction {:?} failed, rolling back: {}", delta, error);
            reaction.borrow_mut().rollback();
            ReactionOutcome::RolledBack(error)
        }
    }
}
