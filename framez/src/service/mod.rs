//! Backend functions.
//!
//! Each handler takes the caller's identity (if any), validates input,
//! resolves the caller's stored user, checks authorization and then reads or
//! writes the [`Store`]. Handlers are grouped per collection:
//!
//! - `users` - `store_user`, `get_user_profile`, `get_user_by_id`
//! - `posts` - `create_post`, `get_all_posts`, `get_posts_by_user`
//! - `comments` - `create_comment`, `delete_comment`, `get_comments_by_post`
//! - `likes` - `toggle_like`, `get_like_count`, `get_likes_by_post`

mod comments;
mod likes;
mod posts;
mod users;

pub use comments::MAX_COMMENT_CHARS;

use crate::{
    errors::FramezError,
    identity::{Identity, require_token},
    keys::POSTS,
    model::{Post, User},
    store::{MemoryStore, RedisStore, Store},
};

/// Request handlers over a document store.
#[derive(Debug, Clone)]
pub struct Backend<S> {
    store: S,
}

impl<S: Store> Backend<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the caller's stored user, failing when unauthenticated or not yet stored.
    async fn require_user(&self, caller: Option<&Identity>) -> Result<User, FramezError> {
        let token = require_token(caller)?;
        self.store
            .user_by_token(token)
            .await?
            .ok_or(FramezError::UserNotRegistered)
    }

    async fn require_post(&self, post_id: &str) -> Result<Post, FramezError> {
        self.store
            .get_post(post_id)
            .await?
            .ok_or_else(|| FramezError::not_found(POSTS, post_id))
    }
}

impl Backend<MemoryStore> {
    /// Backend over a fresh process-local store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Backend<RedisStore> {
    /// Backend over Redis Stack at `url`, namespacing every key under `prefix`.
    pub async fn connect(url: &str, prefix: impl Into<String>) -> Result<Self, FramezError> {
        Ok(Self::new(RedisStore::connect(url, prefix).await?))
    }
}
