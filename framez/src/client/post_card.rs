use super::{comments::CommentThread, likes::LikeState};
use crate::{
    errors::FramezError,
    identity::Identity,
    model::{Comment, CommentId, Post},
    service::Backend,
    store::{MAX_LIST_LIMIT, Store},
};

/// Client state of one feed item.
///
/// Mutations are applied locally first, then sent to the backend. On success
/// temporary ids are swapped for the server's; on failure the local view is
/// rolled back and the error is returned.
pub struct PostCard<'a, S> {
    backend: &'a Backend<S>,
    caller: Option<Identity>,
    current_user_id: Option<String>,
    post: Post,
    comments: CommentThread,
    likes: LikeState,
}

impl<'a, S: Store> PostCard<'a, S> {
    pub fn new(backend: &'a Backend<S>, post: Post, caller: Option<Identity>, current_user_id: Option<String>) -> Self {
        Self {
            backend,
            caller,
            current_user_id,
            comments: CommentThread::new(post.id.clone()),
            likes: LikeState::new(),
            post,
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.comments()
    }

    pub fn thread(&self) -> &CommentThread {
        &self.comments
    }

    pub fn like_count(&self) -> u64 {
        self.likes.count()
    }

    pub fn has_liked(&self) -> bool {
        self.likes.has_liked(self.current_user_id.as_deref())
    }

    /// Whether the current viewer may delete `comment`.
    pub fn can_delete(&self, comment: &Comment) -> bool {
        CommentThread::can_delete(comment, self.current_user_id.as_deref(), &self.post.author)
    }

    /// Re-runs the card's queries and adopts the results.
    pub async fn refresh(&mut self) -> Result<(), FramezError> {
        let limit = Some(MAX_LIST_LIMIT as i64);
        let comments = self.backend.get_comments_by_post(&self.post.id, limit).await?;
        let likers = self.backend.get_likes_by_post(&self.post.id, limit).await?;
        let count = self.backend.get_like_count(&self.post.id).await?;
        self.comments.sync(comments);
        self.likes.sync(&likers);
        self.likes.sync_count(count);
        Ok(())
    }

    /// Adds a comment optimistically. Blank text is a no-op returning `Ok(None)`.
    pub async fn add_comment(&mut self, text: &str) -> Result<Option<CommentId>, FramezError> {
        let Some(temp) = self.comments.begin_add(self.current_user_id.as_deref(), text) else {
            return Ok(None);
        };
        match self
            .backend
            .create_comment(self.caller.as_ref(), &self.post.id, &temp.text)
            .await
        {
            Ok(comment_id) => {
                self.comments.confirm_add(&temp.id, &comment_id);
                Ok(Some(comment_id))
            }
            Err(err) => {
                log::warn!("create_comment failed on post {}: {err}", self.post.id);
                self.comments.abort_add(&temp.id);
                Err(err)
            }
        }
    }

    pub async fn delete_comment(&mut self, comment_id: &str) -> Result<(), FramezError> {
        let previous = self.comments.begin_delete(comment_id);
        if let Err(err) = self.backend.delete_comment(self.caller.as_ref(), comment_id).await {
            log::warn!("delete_comment failed for {comment_id}: {err}");
            self.comments.abort_delete(previous);
            return Err(err);
        }
        Ok(())
    }

    /// Flips the viewer's like. Without a signed-in user this does nothing.
    pub async fn toggle_like(&mut self) -> Result<(), FramezError> {
        let Some(user_id) = self.current_user_id.clone() else {
            return Ok(());
        };
        let previous = self.likes.begin_toggle(&user_id);
        if let Err(err) = self.backend.toggle_like(self.caller.as_ref(), &self.post.id).await {
            log::warn!("toggle_like failed on post {}: {err}", self.post.id);
            self.likes.rollback(previous);
            return Err(err);
        }
        Ok(())
    }
}
