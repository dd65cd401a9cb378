use std::cell::RefCell;

use paging::{react, OptimisticReaction, ReactionOutcome, ReactionState};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub struct UseReactionResult {
    pub state: ReactionState,
    pub pending: bool,
    pub toggle: Callback<()>,
}

/// Hook for the like button on a post.
///
/// The tap is reflected immediately; if the request fails the like is
/// reverted. Taps made while a request is still pending are ignored.
#[hook]
pub fn use_reaction(api_client: &ApiClient, post_id: u64, initial: ReactionState) -> UseReactionResult {
    let update = use_force_update();
    // A reload that brings new server counts starts over from them
    let reaction = use_memo((post_id, initial), |(_, initial)| {
        RefCell::new(OptimisticReaction::new(*initial))
    });

    let toggle = {
        let api_client = api_client.clone();
        let reaction = reaction.clone();
        let update = update.clone();
        // Same deps as the memo, so the callback always holds the live reaction
        use_callback((post_id, initial), move |_: (), _| {
            let api_client = api_client.clone();
            let reaction = reaction.clone();
            let update = update.clone();

            spawn_local(async move {
                let outcome = react(&reaction, |delta| {
                    // Show the optimistic state while the request is out
                    update.force_update();
                    let api_client = api_client.clone();
                    async move {
                        api_client
                            .react_to_post(post_id, delta.liked())
                            .await
                            .map(ReactionState::from)
                    }
                })
                .await;

                if let ReactionOutcome::RolledBack(error) = outcome {
                    Logger::warn_with_component(
                        "reaction",
                        &format!("like on post {} rolled back: {}", post_id, error),
                    );
                }
                update.force_update();
            });
        })
    };

    let current = reaction.borrow();
    UseReactionResult {
        state: current.current(),
        pending: current.is_pending(),
        toggle,
    }
}
