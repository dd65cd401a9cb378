use paging::ListSnapshot;
use yew::prelude::*;

/// What a paged list should show around its items
#[derive(Debug, Clone, PartialEq)]
pub enum StatusView {
    LoadingInitial,
    /// The first page failed; there is nothing to show but the error
    FailedInitial(String),
    Empty,
    Items {
        loading_more: bool,
        failed_more: Option<String>,
        at_end: bool,
    },
}

pub fn status_view<T>(snapshot: &ListSnapshot<T>) -> StatusView {
    if snapshot.is_loading_initial {
        return StatusView::LoadingInitial;
    }
    let error_message = snapshot.error.as_ref().map(|error| error.message.clone());
    if snapshot.failed_initial() {
        return StatusView::FailedInitial(error_message.unwrap_or_default());
    }
    if snapshot.is_empty() {
        return StatusView::Empty;
    }

    StatusView::Items {
        loading_more: snapshot.is_loading_more,
        failed_more: error_message.filter(|_| snapshot.failed_more()),
        at_end: !snapshot.has_more,
    }
}

#[derive(Properties, PartialEq)]
pub struct ListStatusProps {
    pub view: StatusView,
    pub empty_text: AttrValue,
    pub on_retry: Callback<()>,
}

/// Spinner, error and end-of-list markers shared by every paged list
#[function_component(ListStatus)]
pub fn list_status(props: &ListStatusProps) -> Html {
    let retry_button = {
        let on_retry = props.on_retry.clone();
        html! {
            <button class="retry-button" onclick={Callback::from(move |_: MouseEvent| on_retry.emit(()))}>
                {"Try again"}
            </button>
        }
    };

    match &props.view {
        StatusView::LoadingInitial => html! {
            <div class="loading">{"Loading..."}</div>
        },
        StatusView::FailedInitial(message) => html! {
            <div class="list-error">
                <p>{message}</p>
                {retry_button}
            </div>
        },
        StatusView::Empty => html! {
            <div class="list-empty">{&props.empty_text}</div>
        },
        StatusView::Items { loading_more, failed_more, at_end } => {
            if let Some(message) = failed_more {
                html! {
                    <div class="list-error inline">
                        <span>{message}</span>
                        {retry_button}
                    </div>
                }
            } else if *loading_more {
                html! { <div class="loading more">{"Loading more..."}</div> }
            } else if *at_end {
                html! { <div class="list-end">{"You're all caught up"}</div> }
            } else {
                html! {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paging::{ErrorInfo, FetchKind};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn snapshot(items: Vec<u32>) -> ListSnapshot<u32> {
        ListSnapshot {
            items,
            is_loading_initial: false,
            is_loading_more: false,
            has_more: true,
            error: None,
            total_elements: None,
        }
    }

    #[wasm_bindgen_test]
    fn test_loading_initial_wins() {
        let mut s = snapshot(vec![]);
        s.is_loading_initial = true;
        assert_eq!(status_view(&s), StatusView::LoadingInitial);
    }

    #[wasm_bindgen_test]
    fn test_empty_list_after_load() {
        let mut s = snapshot(vec![]);
        s.has_more = false;
        assert_eq!(status_view(&s), StatusView::Empty);
    }

    #[wasm_bindgen_test]
    fn test_error_with_items_shows_items() {
        let mut s = snapshot(vec![1, 2, 3]);
        s.error = Some(ErrorInfo {
            kind: FetchKind::More,
            page_number: 2,
            message: "Network error".to_string(),
        });
        assert_eq!(
            status_view(&s),
            StatusView::Items {
                loading_more: false,
                failed_more: Some("Network error".to_string()),
                at_end: false,
            }
        );
    }

    #[wasm_bindgen_test]
    fn test_failed_first_page() {
        let mut s = snapshot(vec![]);
        s.error = Some(ErrorInfo {
            kind: FetchKind::Initial,
            page_number: 1,
            message: "Server error".to_string(),
        });
        assert_eq!(status_view(&s), StatusView::FailedInitial("Server error".to_string()));
    }
}
