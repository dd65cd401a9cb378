use yew::prelude::*;

use crate::components::list_status::{status_view, ListStatus};
use crate::hooks::UsePagedListResult;

/// Items of a paged list followed by its status line
pub fn paged_list_view<T>(
    list: &UsePagedListResult<T>,
    class: &'static str,
    empty_text: &'static str,
    item: impl Fn(&T) -> Html,
) -> Html {
    let view = status_view(&list.snapshot);
    let retry = list.actions.retry.clone();

    html! {
        <section class={classes!("paged-list", class)}>
            <ul class="paged-list-items">
                {for list.snapshot.items.iter().map(|entry| html! { <li>{item(entry)}</li> })}
            </ul>
            <ListStatus {view} empty_text={empty_text} on_retry={retry} />
        </section>
    }
}
