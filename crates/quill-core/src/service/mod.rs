//! Domain services built on top of the ports.

mod posts;

pub use posts::{
    DEFAULT_PAGE_SIZE, LifecycleConfig, ListParams, MAX_PAGE_SIZE, NewPost, Page, PostPatch,
    PostService,
};
