use paging::{ListConfig, ScrollTrigger};
use shared::{EventFavourite, ListKey, Order, OrderStatus, PaymentInfo, Subscriber};
use yew::prelude::*;

use crate::components::format::{format_date, format_price};
use crate::components::paged_list::paged_list_view;
use crate::hooks::{use_infinite_scroll, use_paged_list, UsePagedListResult};
use crate::services::api::ApiClient;

#[derive(Clone, Copy, PartialEq)]
enum AccountTab {
    Orders,
    Favourites,
    Subscribers,
    PaymentInfo,
}

impl AccountTab {
    const ALL: [AccountTab; 4] = [
        AccountTab::Orders,
        AccountTab::Favourites,
        AccountTab::Subscribers,
        AccountTab::PaymentInfo,
    ];

    fn title(self) -> &'static str {
        match self {
            AccountTab::Orders => "Orders",
            AccountTab::Favourites => "Saved",
            AccountTab::Subscribers => "Subscribers",
            AccountTab::PaymentInfo => "Payment",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AccountListsProps {
    pub api_client: ApiClient,
    pub user_id: u64,
}

/// The signed-in user's lists, one tab at a time. Only the open tab is
/// mounted, so only it listens to scrolling.
#[function_component(AccountLists)]
pub fn account_lists(props: &AccountListsProps) -> Html {
    let tab = use_state(|| AccountTab::Orders);

    let tabs = AccountTab::ALL.iter().map(|&candidate| {
        let tab = tab.clone();
        let active = *tab == candidate;
        html! {
            <button
                class={classes!("tab", active.then_some("active"))}
                onclick={Callback::from(move |_: MouseEvent| tab.set(candidate))}
            >
                {candidate.title()}
            </button>
        }
    });

    let api_client = props.api_client.clone();
    let user_id = props.user_id;
    let content = match *tab {
        AccountTab::Orders => html! { <OrderList {api_client} /> },
        AccountTab::Favourites => html! { <FavouriteList {api_client} {user_id} /> },
        AccountTab::Subscribers => html! { <SubscriberList {api_client} {user_id} /> },
        AccountTab::PaymentInfo => html! { <PaymentInfoList {api_client} {user_id} /> },
    };

    html! {
        <div class="account-lists">
            <nav class="tabs">{for tabs}</nav>
            {content}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct OrderListProps {
    pub api_client: ApiClient,
}

const STATUS_FILTERS: [Option<OrderStatus>; 5] = [
    None,
    Some(OrderStatus::Pending),
    Some(OrderStatus::Paid),
    Some(OrderStatus::Cancelled),
    Some(OrderStatus::Refunded),
];

#[function_component(OrderList)]
pub fn order_list(props: &OrderListProps) -> Html {
    let status = use_state(|| Option::<OrderStatus>::None);
    let key = ListKey::Orders { status: *status };
    let config = ListConfig::for_key(&key);
    let trigger = ScrollTrigger::from_config(&config);

    let list: UsePagedListResult<Order> = use_paged_list(&props.api_client, key, config);
    use_infinite_scroll(trigger, list.snapshot.items.len(), list.actions.load_more.clone());

    let filters = STATUS_FILTERS.iter().map(|&filter| {
        let status = status.clone();
        let label = filter.map(|s| s.to_string()).unwrap_or_else(|| "all".to_string());
        html! {
            <button
                class={classes!("filter", (*status == filter).then_some("active"))}
                onclick={Callback::from(move |_: MouseEvent| status.set(filter))}
            >
                {label}
            </button>
        }
    });

    html! {
        <div class="orders">
            <div class="filters">{for filters}</div>
            {paged_list_view(&list, "orders", "No orders here", |order: &Order| html! {
                <div class="order-row">
                    <span>{&order.event_title}</span>
                    <span class="order-status">{order.status.as_str()}</span>
                    <span>{format_price(order.total_cents)}</span>
                    <span class="order-date">{format_date(&order.created_at)}</span>
                </div>
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct UserListProps {
    pub api_client: ApiClient,
    pub user_id: u64,
}

#[function_component(FavouriteList)]
pub fn favourite_list(props: &UserListProps) -> Html {
    let key = ListKey::EventFavourites {
        user_id: props.user_id,
    };
    let config = ListConfig::for_key(&key);
    let trigger = ScrollTrigger::from_config(&config);

    let list: UsePagedListResult<EventFavourite> = use_paged_list(&props.api_client, key, config);
    use_infinite_scroll(trigger, list.snapshot.items.len(), list.actions.load_more.clone());

    paged_list_view(&list, "favourites", "Nothing saved yet", |favourite: &EventFavourite| html! {
        <div class="favourite-row">
            <span>{&favourite.event.title}</span>
            <span>{&favourite.event.city}</span>
            <span class="saved-at">{format!("saved {}", format_date(&favourite.saved_at))}</span>
        </div>
    })
}

#[function_component(SubscriberList)]
pub fn subscriber_list(props: &UserListProps) -> Html {
    let key = ListKey::Subscribers {
        user_id: props.user_id,
    };
    let config = ListConfig::for_key(&key);
    let trigger = ScrollTrigger::from_config(&config);

    let list: UsePagedListResult<Subscriber> = use_paged_list(&props.api_client, key, config);
    use_infinite_scroll(trigger, list.snapshot.items.len(), list.actions.load_more.clone());

    paged_list_view(&list, "subscribers", "No subscribers yet", |subscriber: &Subscriber| html! {
        <div class="subscriber-row">
            <span>{&subscriber.display_name}</span>
            <span class="subscribed-at">{format_date(&subscriber.subscribed_at)}</span>
        </div>
    })
}

#[function_component(PaymentInfoList)]
pub fn payment_info_list(props: &UserListProps) -> Html {
    let key = ListKey::PaymentInfo {
        user_id: props.user_id,
    };
    let config = ListConfig::for_key(&key);
    let trigger = ScrollTrigger::from_config(&config);

    let list: UsePagedListResult<PaymentInfo> = use_paged_list(&props.api_client, key, config);
    use_infinite_scroll(trigger, list.snapshot.items.len(), list.actions.load_more.clone());

    paged_list_view(&list, "payment-info", "No saved cards", |card: &PaymentInfo| html! {
        <div class="card-row">
            <span>{format!("{} •••• {}", card.brand, card.last4)}</span>
            {if card.is_default { html! { <span class="default-card">{"Default"}</span> } } else { html! {} }}
        </div>
    })
}
