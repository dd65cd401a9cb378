use paging::{IntersectionTrigger, ListConfig};
use shared::{Comment, EventSummary, ListKey};
use yew::prelude::*;

use crate::components::format::{format_count, format_date, format_price};
use crate::components::paged_list::paged_list_view;
use crate::hooks::{use_intersection_sentinel, use_paged_list, UsePagedListResult};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct EventDetailProps {
    pub api_client: ApiClient,
    pub event_id: u64,
    pub on_back: Callback<()>,
}

#[function_component(EventDetail)]
pub fn event_detail(props: &EventDetailProps) -> Html {
    let on_back = props.on_back.clone();
    html! {
        <div class="event-detail">
            <button class="back-button" onclick={Callback::from(move |_: MouseEvent| on_back.emit(()))}>
                {"Back to events"}
            </button>
            <RelatedEvents api_client={props.api_client.clone()} event_id={props.event_id} />
            <CommentList api_client={props.api_client.clone()} event_id={props.event_id} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EventListProps {
    pub api_client: ApiClient,
    pub event_id: u64,
}

/// Comments under an event. Older ones load when the end of the thread
/// comes into view.
#[function_component(CommentList)]
pub fn comment_list(props: &EventListProps) -> Html {
    let key = ListKey::Comments {
        event_id: props.event_id,
    };
    let config = ListConfig::for_key(&key);

    let list: UsePagedListResult<Comment> = use_paged_list(&props.api_client, key, config);
    let sentinel = use_intersection_sentinel(
        IntersectionTrigger::default(),
        list.snapshot.items.len(),
        list.actions.load_more.clone(),
    );

    let heading = match list.snapshot.total_elements {
        Some(total) => format!("Comments ({})", total),
        None => "Comments".to_string(),
    };

    html! {
        <div class="comments">
            <h2>{heading}</h2>
            {paged_list_view(&list, "comments", "Be the first to comment", |comment: &Comment| html! {
                <div class="comment">
                    <span class="comment-author">{&comment.author_name}</span>
                    <span class="comment-date">{format_date(&comment.created_at)}</span>
                    <p>{&comment.body}</p>
                    <span class="comment-likes">{format_count(comment.like_count, "like", "likes")}</span>
                </div>
            })}
            <div ref={sentinel} class="list-sentinel" />
        </div>
    }
}

/// Short strip of events in the same city. Loads one page only; there is
/// no "see more" on this strip.
#[function_component(RelatedEvents)]
pub fn related_events(props: &EventListProps) -> Html {
    let key = ListKey::RelatedEvents {
        event_id: props.event_id,
    };
    let config = ListConfig::for_key(&key);
    let list: UsePagedListResult<EventSummary> = use_paged_list(&props.api_client, key, config);

    html! {
        <div class="related-events">
            <h2>{"More in this city"}</h2>
            {paged_list_view(&list, "related", "Nothing else nearby yet", |event: &EventSummary| html! {
                <div class="related-event">
                    <span>{&event.title}</span>
                    <span class="event-price">{format_price(event.price_cents)}</span>
                </div>
            })}
        </div>
    }
}
