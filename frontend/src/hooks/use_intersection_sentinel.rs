use paging::IntersectionTrigger;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};
use yew::prelude::*;

/// Hook emitting `on_near_end` when the element behind the returned ref
/// scrolls into view. Render it after the last item of a list.
///
/// The observer is rebuilt when `content_len` changes. A fresh observer
/// reports the sentinel's current visibility straight away, so a list that
/// still does not fill the screen keeps loading.
#[hook]
pub fn use_intersection_sentinel(
    trigger: IntersectionTrigger,
    content_len: usize,
    on_near_end: Callback<()>,
) -> NodeRef {
    let sentinel = use_node_ref();

    {
        let sentinel = sentinel.clone();
        use_effect_with((trigger, content_len, on_near_end), move |(trigger, _, on_near_end)| {
            let trigger = *trigger;
            let on_near_end = on_near_end.clone();

            let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
                let near_end = entries.iter().any(|entry| {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    trigger.should_request(entry.is_intersecting(), entry.intersection_ratio())
                });
                if near_end {
                    on_near_end.emit(());
                }
            });

            let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref()).ok();
            if let (Some(observer), Some(element)) = (&observer, sentinel.cast::<Element>()) {
                observer.observe(&element);
            }

            move || {
                if let Some(observer) = observer {
                    observer.disconnect();
                }
                drop(callback);
            }
        });
    }

    sentinel
}
