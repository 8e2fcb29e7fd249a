//! framez core library.
//!
//! Backend functions for a photo/video sharing app (users, posts, comments,
//! likes) over a pluggable document store, plus the optimistic client state
//! the feed UI keeps on top of them.

pub mod client;
pub mod errors;
pub mod format;
pub mod id;
pub mod identity;
pub mod keys;
pub mod model;
pub mod runtime;
pub mod service;
pub mod store;
pub mod validators;

pub use client::{CommentThread, LikeState, Overlay, PostCard, Session};
pub use errors::*;
pub use identity::Identity;
pub use model::{Comment, Deleted, Like, LikeToggle, Liker, Media, MediaKind, NewPost, Post, User};
pub use service::Backend;
pub use store::{MemoryStore, RedisStore, Store};

// Re-export redis types so users don't need to depend on a specific redis version
pub use redis;
pub use redis::aio::ConnectionManager;

/// Delete all keys matching a pattern (for test cleanup).
///
/// This performs a SCAN + DEL operation to safely delete keys without blocking Redis.
pub async fn cleanup_pattern(conn: &mut ConnectionManager, pattern: &str) -> Result<u64, FramezError> {
    const SCAN_COUNT: usize = 1000;
    let mut cursor: u64 = 0;
    let mut total_deleted: u64 = 0;

    loop {
        let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(SCAN_COUNT)
            .query_async(conn)
            .await?;

        if !keys.is_empty() {
            let deleted: u64 = redis::cmd("DEL").arg(&keys).query_async(conn).await?;
            total_deleted += deleted;
        }

        cursor = next_cursor;
        if cursor == 0 {
            break;
        }
    }

    Ok(total_deleted)
}
