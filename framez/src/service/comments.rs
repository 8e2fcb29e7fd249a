use chrono::Utc;

use super::Backend;
use crate::{
    errors::{FramezError, ValidationError},
    id::generate_document_id,
    identity::{Identity, require_token},
    keys::COMMENTS,
    model::{Comment, CommentId, Deleted},
    store::{Store, clamp_limit},
};

/// Longest accepted comment, in characters after trimming.
pub const MAX_COMMENT_CHARS: usize = 1000;

fn clean_comment_text(text: &str) -> Result<&str, ValidationError> {
    let clean = text.trim();
    if clean.is_empty() {
        return Err(ValidationError::single("text", "comment.empty", "comment is empty"));
    }
    if clean.chars().count() > MAX_COMMENT_CHARS {
        return Err(ValidationError::single(
            "text",
            "comment.too_long",
            format!("comment must be at most {MAX_COMMENT_CHARS} characters"),
        ));
    }
    Ok(clean)
}

impl<S: Store> Backend<S> {
    pub async fn create_comment(
        &self,
        caller: Option<&Identity>,
        post_id: &str,
        text: &str,
    ) -> Result<CommentId, FramezError> {
        require_token(caller)?;
        let clean = clean_comment_text(text)?;
        self.require_post(post_id).await?;
        let author = self.require_user(caller).await?;

        let comment = Comment {
            id: generate_document_id(),
            created_at: Utc::now(),
            post_id: post_id.to_string(),
            author_id: author.id.clone(),
            author_name: author.display_name().to_string(),
            author_profile_image: author.profile_image.clone(),
            text: clean.to_string(),
        };
        self.store.insert_comment(&comment).await?;
        Ok(comment.id)
    }

    /// Deletes a comment. Allowed for the comment author and for the owner of the post.
    pub async fn delete_comment(&self, caller: Option<&Identity>, comment_id: &str) -> Result<Deleted, FramezError> {
        require_token(caller)?;
        let comment = self
            .store
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| FramezError::not_found(COMMENTS, comment_id))?;
        let user = self.require_user(caller).await?;

        let permitted = if comment.author_id == user.id {
            true
        } else {
            // The post may be gone; then only the comment author could delete.
            self.store
                .get_post(&comment.post_id)
                .await?
                .is_some_and(|post| post.author == user.id)
        };
        if !permitted {
            log::warn!("user {} denied deleting comment {comment_id}", user.id);
            return Err(FramezError::Unauthorized {
                action: "delete this comment",
            });
        }

        // A concurrent delete may have removed it since the lookup.
        if !self.store.delete_comment(comment_id).await? {
            return Err(FramezError::not_found(COMMENTS, comment_id));
        }
        Ok(Deleted { deleted: true })
    }

    /// Comments of a post, newest first.
    pub async fn get_comments_by_post(&self, post_id: &str, limit: Option<i64>) -> Result<Vec<Comment>, FramezError> {
        self.store.list_comments_by_post(post_id, clamp_limit(limit)).await
    }
}
