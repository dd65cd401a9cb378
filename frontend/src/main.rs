use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::account_lists::AccountLists;
use components::event_detail::EventDetail;
use components::event_feed::EventFeed;
use components::post_feed::PostFeed;
use services::api::ApiClient;
use services::logging::Logger;

/// Demo account the account tab is shown for
const CURRENT_USER_ID: u64 = 1;

#[derive(Clone, Copy, PartialEq)]
enum Screen {
    Events,
    Event(u64),
    Posts,
    Account,
}

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| {
        let api_client = ApiClient::new();
        Logger::init(&api_client);
        api_client
    });
    let screen = use_state(|| Screen::Events);

    use_effect_with((), |_| {
        Logger::info_with_component("app", "marketplace frontend started");
        || ()
    });

    let nav_button = |target: Screen, label: &'static str| {
        let screen = screen.clone();
        let active = match (*screen, target) {
            (Screen::Event(_), Screen::Events) => true,
            (current, target) => current == target,
        };
        html! {
            <button
                class={classes!("nav-button", active.then_some("active"))}
                onclick={Callback::from(move |_: MouseEvent| screen.set(target))}
            >
                {label}
            </button>
        }
    };

    let on_select_event = {
        let screen = screen.clone();
        Callback::from(move |event_id: u64| screen.set(Screen::Event(event_id)))
    };
    let on_back = {
        let screen = screen.clone();
        Callback::from(move |_: ()| screen.set(Screen::Events))
    };

    let api_client = (*api_client).clone();
    let content = match *screen {
        Screen::Events => html! { <EventFeed {api_client} on_select={on_select_event} /> },
        Screen::Event(event_id) => html! { <EventDetail {api_client} {event_id} {on_back} /> },
        Screen::Posts => html! { <PostFeed {api_client} /> },
        Screen::Account => html! { <AccountLists {api_client} user_id={CURRENT_USER_ID} /> },
    };

    html! {
        <main class="app">
            <nav class="main-nav">
                {nav_button(Screen::Events, "Events")}
                {nav_button(Screen::Posts, "Posts")}
                {nav_button(Screen::Account, "Account")}
            </nav>
            {content}
        </main>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
