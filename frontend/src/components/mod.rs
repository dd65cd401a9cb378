pub mod account_lists;
pub mod event_detail;
pub mod event_feed;
pub mod format;
pub mod list_status;
pub mod paged_list;
pub mod post_feed;
