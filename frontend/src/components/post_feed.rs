use paging::{ListConfig, ReactionState, ScrollTrigger};
use shared::{ListKey, Post};
use yew::prelude::*;

use crate::components::format::{format_count, format_date};
use crate::components::paged_list::paged_list_view;
use crate::hooks::{use_infinite_scroll, use_paged_list, use_reaction, UsePagedListResult};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct PostFeedProps {
    pub api_client: ApiClient,
    /// Only posts by this author, or everyone's when unset
    #[prop_or_default]
    pub author_id: Option<u64>,
}

#[function_component(PostFeed)]
pub fn post_feed(props: &PostFeedProps) -> Html {
    let key = ListKey::Posts {
        author_id: props.author_id,
    };
    let config = ListConfig::for_key(&key);
    let trigger = ScrollTrigger::from_config(&config);

    let list: UsePagedListResult<Post> = use_paged_list(&props.api_client, key, config);
    use_infinite_scroll(trigger, list.snapshot.items.len(), list.actions.load_more.clone());

    let api_client = props.api_client.clone();
    html! {
        <div class="post-feed">
            {paged_list_view(&list, "posts", "No posts yet", |post: &Post| html! {
                <PostCard key={post.id} api_client={api_client.clone()} post={post.clone()} />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PostCardProps {
    pub api_client: ApiClient,
    pub post: Post,
}

#[function_component(PostCard)]
pub fn post_card(props: &PostCardProps) -> Html {
    let post = &props.post;
    let reaction = use_reaction(
        &props.api_client,
        post.id,
        ReactionState {
            liked: post.liked,
            count: post.like_count,
        },
    );

    let on_like = {
        let toggle = reaction.toggle.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };

    html! {
        <article class="post-card">
            <header>
                <span class="post-author">{&post.author_name}</span>
                <span class="post-date">{format_date(&post.created_at)}</span>
            </header>
            <p>{&post.body}</p>
            <button
                class={classes!("like-button", reaction.state.liked.then_some("liked"))}
                disabled={reaction.pending}
                onclick={on_like}
            >
                {format_count(reaction.state.count, "like", "likes")}
            </button>
        </article>
    }
}
