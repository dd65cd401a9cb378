use std::rc::Rc;

use paging::{ListConfig, ListController, ListSnapshot, LoadOutcome};
use serde::de::DeserializeOwned;
use shared::ListKey;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{ApiClient, EndpointSource};
use crate::services::logging::Logger;

pub struct UsePagedListResult<T> {
    pub snapshot: ListSnapshot<T>,
    pub actions: UsePagedListActions,
}

#[derive(Clone, PartialEq)]
pub struct UsePagedListActions {
    /// Safe to emit as often as a scroll trigger fires
    pub load_more: Callback<()>,
    pub retry: Callback<()>,
}

/// Hook binding a paged list to `key`.
///
/// The first page loads on mount and again, from scratch, whenever `key`
/// changes. The page size comes from `config` on the first render and stays
/// fixed for the lifetime of the component.
#[hook]
pub fn use_paged_list<T>(
    api_client: &ApiClient,
    key: ListKey,
    config: ListConfig,
) -> UsePagedListResult<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    let update = use_force_update();

    let controller: Rc<ListController<EndpointSource<T>>> = {
        let api_client = api_client.clone();
        let update = update.clone();
        use_memo((), move |_| {
            ListController::with_config(EndpointSource::new(api_client), &config)
                .with_observer(move || update.force_update())
        })
    };

    // Identity change: full reset and reload
    {
        let controller = controller.clone();
        use_effect_with(key, move |key| {
            let key = key.clone();
            spawn_local(async move {
                let label = key.label();
                if let LoadOutcome::Failed(error) = controller.initialize(key).await {
                    Logger::warn_with_component(
                        label,
                        &format!("initial load failed: {}", error.message),
                    );
                }
            });
            || ()
        });
    }

    let load_more = {
        let controller = controller.clone();
        use_callback((), move |_: (), _| {
            let controller = controller.clone();
            spawn_local(async move {
                match controller.load_more().await {
                    LoadOutcome::Failed(error) => {
                        let label = controller.key().map(|key| key.label()).unwrap_or("list");
                        Logger::warn_with_component(
                            label,
                            &format!("page {} failed: {}", error.page_number, error.message),
                        );
                    }
                    LoadOutcome::Loaded { received, is_last } => {
                        let label = controller.key().map(|key| key.label()).unwrap_or("list");
                        Logger::debug_with_component(
                            label,
                            &format!("appended {} items, last page: {}", received, is_last),
                        );
                    }
                    LoadOutcome::Skipped | LoadOutcome::Discarded => {}
                }
            });
        })
    };

    let retry = {
        let controller = controller.clone();
        use_callback((), move |_: (), _| {
            let controller = controller.clone();
            spawn_local(async move {
                let label = || controller.key().map(|key| key.label()).unwrap_or("list");
                match controller.retry().await {
                    LoadOutcome::Failed(error) => Logger::warn_with_component(
                        label(),
                        &format!("retry of page {} failed: {}", error.page_number, error.message),
                    ),
                    LoadOutcome::Loaded { received, .. } => Logger::info_with_component(
                        label(),
                        &format!("retry recovered {} items", received),
                    ),
                    LoadOutcome::Skipped | LoadOutcome::Discarded => {}
                }
            });
        })
    };

    UsePagedListResult {
        snapshot: controller.snapshot(),
        actions: UsePagedListActions { load_more, retry },
    }
}
