//! HTTP Handlers

mod chapter;
mod import;
mod ping;
mod policy;

pub use chapter::{
    create_chapter, delete_chapter, get_chapter, get_lock_state, list_chapters, update_chapter,
};
pub use import::bulk_import;
pub use ping::ping;
pub use policy::{get_policy, set_policy};
