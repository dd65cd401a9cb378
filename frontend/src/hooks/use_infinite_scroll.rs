use gloo::events::EventListener;
use paging::{ScrollMetrics, ScrollTrigger};
use yew::prelude::*;

/// Current window scroll position, if running in a browser window
fn window_scroll_metrics() -> Option<ScrollMetrics> {
    let window = web_sys::window()?;
    let root = window.document()?.document_element()?;

    Some(ScrollMetrics {
        scroll_top: window.scroll_y().ok()?,
        viewport_height: window.inner_height().ok()?.as_f64()?,
        content_height: root.scroll_height() as f64,
    })
}

/// Hook emitting `on_near_end` whenever the window is scrolled close to the
/// end of the page.
///
/// Also re-checks after every change of `content_len`, so a list whose first
/// pages do not fill the screen keeps asking for more without a scroll.
/// Emits may be redundant; the receiving list gates them.
#[hook]
pub fn use_infinite_scroll(trigger: ScrollTrigger, content_len: usize, on_near_end: Callback<()>) {
    {
        let on_near_end = on_near_end.clone();
        use_effect_with((trigger, on_near_end), move |(trigger, on_near_end)| {
            let trigger = *trigger;
            let on_near_end = on_near_end.clone();

            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "scroll", move |_| {
                    if let Some(metrics) = window_scroll_metrics() {
                        if trigger.should_request(&metrics) {
                            on_near_end.emit(());
                        }
                    }
                })
            });

            move || drop(listener)
        });
    }

    use_effect_with(content_len, move |_| {
        if let Some(metrics) = window_scroll_metrics() {
            if trigger.should_request(&metrics) {
                on_near_end.emit(());
            }
        }
        || ()
    });
}
