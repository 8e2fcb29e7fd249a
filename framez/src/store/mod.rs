//! Document store seam.
//!
//! Backend functions only talk to a [`Store`]. Two implementations ship with
//! the crate: [`RedisStore`] (RedisJSON documents, sorted-set indexes and Lua
//! scripts for every multi-key write) and [`MemoryStore`] (process-local).

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use crate::{
    errors::FramezError,
    model::{Comment, Like, LikeToggle, Post, User, UserPatch},
};

/// Upper bound accepted by list queries.
pub const MAX_LIST_LIMIT: usize = 200;
/// Page size used when the caller supplies no usable limit.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Clamps a caller-supplied limit: positive values are capped at
/// [`MAX_LIST_LIMIT`], anything else falls back to [`DEFAULT_LIST_LIMIT`].
pub fn clamp_limit(limit: Option<i64>) -> usize {
    match limit {
        Some(limit) if limit > 0 => (limit as u64).min(MAX_LIST_LIMIT as u64) as usize,
        _ => DEFAULT_LIST_LIMIT,
    }
}

/// Persistence operations required by the backend functions.
///
/// Every method is a single logical store operation; implementations make
/// each one atomic with respect to the others.
#[allow(async_fn_in_trait)]
pub trait Store {
    async fn user_by_token(&self, token_identifier: &str) -> Result<Option<User>, FramezError>;

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, FramezError>;

    /// Inserts a user. Fails with [`FramezError::UniqueViolation`] when the
    /// token identifier already maps to another user.
    async fn insert_user(&self, user: &User) -> Result<(), FramezError>;

    /// Applies `patch` and bumps `updated_at` to `at`.
    async fn patch_user(&self, user_id: &str, patch: &UserPatch, at: chrono::DateTime<chrono::Utc>)
    -> Result<(), FramezError>;

    async fn insert_post(&self, post: &Post) -> Result<(), FramezError>;

    async fn get_post(&self, post_id: &str) -> Result<Option<Post>, FramezError>;

    /// Every post, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, FramezError>;

    /// Posts of one author in creation order.
    async fn list_posts_by_author(&self, author_id: &str) -> Result<Vec<Post>, FramezError>;

    async fn insert_comment(&self, comment: &Comment) -> Result<(), FramezError>;

    async fn get_comment(&self, comment_id: &str) -> Result<Option<Comment>, FramezError>;

    /// Removes a comment and its index entries. Returns `false` when it was already gone.
    async fn delete_comment(&self, comment_id: &str) -> Result<bool, FramezError>;

    /// Comments of one post, newest first.
    async fn list_comments_by_post(&self, post_id: &str, limit: usize) -> Result<Vec<Comment>, FramezError>;

    /// Deletes the like of (`candidate.post_id`, `candidate.user_id`) if one
    /// exists, otherwise inserts `candidate`. The check and the write happen
    /// atomically.
    async fn toggle_like(&self, candidate: &Like) -> Result<LikeToggle, FramezError>;

    async fn count_likes(&self, post_id: &str) -> Result<u64, FramezError>;

    /// Likes of one post, newest first.
    async fn list_likes_by_post(&self, post_id: &str, limit: usize) -> Result<Vec<Like>, FramezError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_clamping() {
        assert_eq!(clamp_limit(None), DEFAULT_LIST_LIMIT);
        assert_eq!(clamp_limit(Some(0)), DEFAULT_LIST_LIMIT);
        assert_eq!(clamp_limit(Some(-5)), DEFAULT_LIST_LIMIT);
        assert_eq!(clamp_limit(Some(7)), 7);
        assert_eq!(clamp_limit(Some(5_000)), MAX_LIST_LIMIT);
    }
}
