use chrono::Utc;

use super::Backend;
use crate::{
    errors::FramezError,
    id::generate_document_id,
    identity::Identity,
    model::{Like, LikeToggle, Liker},
    store::{Store, clamp_limit},
};

const UNKNOWN_USER: &str = "Unknown";

impl<S: Store> Backend<S> {
    /// Likes the post for the caller, or removes the caller's existing like.
    pub async fn toggle_like(&self, caller: Option<&Identity>, post_id: &str) -> Result<LikeToggle, FramezError> {
        let user = self.require_user(caller).await?;
        self.require_post(post_id).await?;

        let candidate = Like {
            id: generate_document_id(),
            created_at: Utc::now(),
            post_id: post_id.to_string(),
            user_id: user.id,
        };
        let outcome = self.store.toggle_like(&candidate).await?;
        log::debug!(
            "user {} {} post {post_id}",
            candidate.user_id,
            if outcome.liked { "liked" } else { "unliked" }
        );
        Ok(outcome)
    }

    pub async fn get_like_count(&self, post_id: &str) -> Result<u64, FramezError> {
        self.store.count_likes(post_id).await
    }

    /// Likes of a post joined with the liking users, newest first.
    pub async fn get_likes_by_post(&self, post_id: &str, limit: Option<i64>) -> Result<Vec<Liker>, FramezError> {
        let likes = self.store.list_likes_by_post(post_id, clamp_limit(limit)).await?;
        let mut likers = Vec::with_capacity(likes.len());
        for like in likes {
            let user = self.store.get_user(&like.user_id).await?;
            let (username, profile_image) = match user {
                Some(user) => (user.display_name().to_string(), user.profile_image),
                None => (UNKNOWN_USER.to_string(), None),
            };
            likers.push(Liker {
                like_id: like.id,
                user_id: like.user_id,
                username,
                profile_image,
                liked_at: like.created_at,
            });
        }
        Ok(likers)
    }
}
