use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::Store;
use crate::{
    errors::FramezError,
    keys::{COMMENTS, USERS},
    model::{Comment, Like, LikeToggle, Post, User, UserPatch},
};

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<String, User>,
    users_by_token: HashMap<String, String>,
    posts: HashMap<String, Post>,
    /// Insertion order, used to break `created_at` ties.
    post_order: Vec<String>,
    comments: HashMap<String, Comment>,
    comments_by_post: HashMap<String, Vec<String>>,
    likes: HashMap<String, Like>,
    likes_by_post: HashMap<String, Vec<String>>,
    like_by_post_user: HashMap<(String, String), String>,
}

/// Process-local [`Store`]. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolves `ids` against `documents`, newest first. Later insertions win ties.
fn newest_first<'a, T, F>(ids: &'a [String], documents: &'a HashMap<String, T>, created_at: F) -> Vec<&'a T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut items: Vec<&T> = ids.iter().rev().filter_map(|id| documents.get(id)).collect();
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

impl Store for MemoryStore {
    async fn user_by_token(&self, token_identifier: &str) -> Result<Option<User>, FramezError> {
        let state = self.state.read().await;
        Ok(state
            .users_by_token
            .get(token_identifier)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, FramezError> {
        Ok(self.state.read().await.users.get(user_id).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), FramezError> {
        let mut state = self.state.write().await;
        if let Some(existing_id) = state.users_by_token.get(&user.token_identifier) {
            return Err(FramezError::UniqueViolation {
                index: format!("{USERS}.by_token"),
                existing_id: existing_id.clone(),
            });
        }
        state
            .users_by_token
            .insert(user.token_identifier.clone(), user.id.clone());
        state.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn patch_user(&self, user_id: &str, patch: &UserPatch, at: DateTime<Utc>) -> Result<(), FramezError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| FramezError::not_found(USERS, user_id))?;
        patch.apply(user, at);
        Ok(())
    }

    async fn insert_post(&self, post: &Post) -> Result<(), FramezError> {
        let mut state = self.state.write().await;
        state.post_order.push(post.id.clone());
        state.posts.insert(post.id.clone(), post.clone());
        Ok(())
    }

    async fn get_post(&self, post_id: &str) -> Result<Option<Post>, FramezError> {
        Ok(self.state.read().await.posts.get(post_id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, FramezError> {
        let state = self.state.read().await;
        Ok(newest_first(&state.post_order, &state.posts, |post| post.created_at)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn list_posts_by_author(&self, author_id: &str) -> Result<Vec<Post>, FramezError> {
        let state = self.state.read().await;
        let mut posts: Vec<Post> = state
            .post_order
            .iter()
            .filter_map(|id| state.posts.get(id))
            .filter(|post| post.author == author_id)
            .cloned()
            .collect();
        posts.sort_by_key(|post| post.created_at);
        Ok(posts)
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), FramezError> {
        let mut state = self.state.write().await;
        state
            .comments_by_post
            .entry(comment.post_id.clone())
            .or_default()
            .push(comment.id.clone());
        state.comments.insert(comment.id.clone(), comment.clone());
        Ok(())
    }

    async fn get_comment(&self, comment_id: &str) -> Result<Option<Comment>, FramezError> {
        Ok(self.state.read().await.comments.get(comment_id).cloned())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<bool, FramezError> {
        let mut state = self.state.write().await;
        let Some(comment) = state.comments.remove(comment_id) else {
            log::debug!("{COMMENTS} {comment_id} already deleted");
            return Ok(false);
        };
        if let Some(ids) = state.comments_by_post.get_mut(&comment.post_id) {
            ids.retain(|id| id != comment_id);
        }
        Ok(true)
    }

    async fn list_comments_by_post(&self, post_id: &str, limit: usize) -> Result<Vec<Comment>, FramezError> {
        let state = self.state.read().await;
        let Some(ids) = state.comments_by_post.get(post_id) else {
            return Ok(Vec::new());
        };
        Ok(newest_first(ids, &state.comments, |comment| comment.created_at)
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn toggle_like(&self, candidate: &Like) -> Result<LikeToggle, FramezError> {
        let mut state = self.state.write().await;
        let pair = (candidate.post_id.clone(), candidate.user_id.clone());
        if let Some(existing_id) = state.like_by_post_user.remove(&pair) {
            state.likes.remove(&existing_id);
            if let Some(ids) = state.likes_by_post.get_mut(&candidate.post_id) {
                ids.retain(|id| id != &existing_id);
            }
            return Ok(LikeToggle { liked: false });
        }
        state.like_by_post_user.insert(pair, candidate.id.clone());
        state
            .likes_by_post
            .entry(candidate.post_id.clone())
            .or_default()
            .push(candidate.id.clone());
        state.likes.insert(candidate.id.clone(), candidate.clone());
        Ok(LikeToggle { liked: true })
    }

    async fn count_likes(&self, post_id: &str) -> Result<u64, FramezError> {
        let state = self.state.read().await;
        Ok(state.likes_by_post.get(post_id).map_or(0, |ids| ids.len() as u64))
    }

    async fn list_likes_by_post(&self, post_id: &str, limit: usize) -> Result<Vec<Like>, FramezError> {
        let state = self.state.read().await;
        let Some(ids) = state.likes_by_post.get(post_id) else {
            return Ok(Vec::new());
        };
        Ok(newest_first(ids, &state.likes, |like| like.created_at)
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }
}
