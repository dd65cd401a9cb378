use paging::{ListConfig, ScrollTrigger};
use shared::{EventSummary, ListKey};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::format::{format_date, format_price};
use crate::components::paged_list::paged_list_view;
use crate::hooks::{use_infinite_scroll, use_paged_list, UsePagedListResult};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct EventFeedProps {
    pub api_client: ApiClient,
    pub on_select: Callback<u64>,
}

/// Searchable, infinitely scrolling event catalog
#[function_component(EventFeed)]
pub fn event_feed(props: &EventFeedProps) -> Html {
    let search = use_state(String::new);
    let key = ListKey::Events {
        search: (*search).clone(),
    };
    let config = ListConfig::for_key(&key);
    let trigger = ScrollTrigger::from_config(&config);

    // Each keystroke is a new list identity; stale pages from the
    // previous query are dropped by the controller
    let list: UsePagedListResult<EventSummary> = use_paged_list(&props.api_client, key, config);
    use_infinite_scroll(trigger, list.snapshot.items.len(), list.actions.load_more.clone());

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_select = props.on_select.clone();
    html! {
        <div class="event-feed">
            <input
                class="event-search"
                type="search"
                placeholder="Search events or cities"
                value={(*search).clone()}
                oninput={on_search}
            />
            {paged_list_view(&list, "events", "No events match your search", |event: &EventSummary| {
                let id = event.id;
                let on_select = on_select.clone();
                html! {
                    <article class="event-card" onclick={Callback::from(move |_: MouseEvent| on_select.emit(id))}>
                        <h3>{&event.title}</h3>
                        <p class="event-meta">
                            {format!("{} · {}", event.city, format_date(&event.starts_at))}
                        </p>
                        <p class="event-price">{format_price(event.price_cents)}</p>
                    </article>
                }
            })}
        </div>
    }
}
