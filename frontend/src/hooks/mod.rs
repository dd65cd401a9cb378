pub mod use_infinite_scroll;
pub mod use_intersection_sentinel;
pub mod use_paged_list;
pub mod use_reaction;

pub use use_infinite_scroll::use_infinite_scroll;
pub use use_intersection_sentinel::use_intersection_sentinel;
pub use use_paged_list::{use_paged_list, UsePagedListActions, UsePagedListResult};
pub use use_reaction::{use_reaction, UseReactionResult};
