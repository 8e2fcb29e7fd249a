//! Client-side state for the feed UI.
//!
//! This module provides:
//! - `Session` - stores the user record when the identity provider signs someone in
//! - `Overlay<T>` - a server list with a local pending override
//! - `CommentThread` / `LikeState` - optimistic edits with rollback snapshots
//! - `PostCard` - drives those edits against a `Backend`
//!
//! # Example
//! ```ignore
//! let session = Session::establish(&backend, Some(identity.clone())).await;
//! let mut card = PostCard::new(&backend, post, Some(identity), session.user_id().map(str::to_string));
//! card.refresh().await?;
//! card.toggle_like().await?;
//! card.add_comment("nice light").await?;
//! ```

mod comments;
mod likes;
mod overlay;
mod post_card;
mod session;

pub use comments::{CommentThread, PENDING_AUTHOR_NAME};
pub use likes::LikeState;
pub use overlay::Overlay;
pub use post_card::PostCard;
pub use session::Session;
