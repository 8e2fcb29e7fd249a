use chrono::Utc;

use super::overlay::Overlay;
use crate::{
    id::{generate_temp_id, is_temp_id},
    model::Comment,
};

/// Author name shown on a comment until the server echoes the real one.
pub const PENDING_AUTHOR_NAME: &str = "You";
const UNKNOWN_AUTHOR: &str = "unknown";

/// Comment list of one post with pending local edits.
#[derive(Debug, Clone)]
pub struct CommentThread {
    post_id: String,
    comments: Overlay<Comment>,
}

impl CommentThread {
    pub fn new(post_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            comments: Overlay::new(),
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.current()
    }

    pub fn len(&self) -> usize {
        self.comments().len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments().is_empty()
    }

    pub fn sync(&mut self, server: Vec<Comment>) {
        self.comments.sync(server);
    }

    /// Comments that exist only locally.
    pub fn pending(&self) -> impl Iterator<Item = &Comment> {
        self.comments().iter().filter(|comment| is_temp_id(&comment.id))
    }

    /// Prepends a placeholder comment. Blank text is ignored and yields `None`.
    pub fn begin_add(&mut self, author_id: Option<&str>, text: &str) -> Option<Comment> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let temp = Comment {
            id: generate_temp_id(),
            created_at: Utc::now(),
            post_id: self.post_id.clone(),
            author_id: author_id.unwrap_or(UNKNOWN_AUTHOR).to_string(),
            author_name: PENDING_AUTHOR_NAME.to_string(),
            author_profile_image: None,
            text: trimmed.to_string(),
        };
        self.comments.update(|items| items.insert(0, temp.clone()));
        Some(temp)
    }

    /// Swaps the placeholder id for the id the server assigned.
    pub fn confirm_add(&mut self, temp_id: &str, server_id: &str) {
        self.comments.update(|items| {
            if let Some(comment) = items.iter_mut().find(|comment| comment.id == temp_id) {
                comment.id = server_id.to_string();
            }
        });
    }

    pub fn abort_add(&mut self, temp_id: &str) {
        self.comments.update(|items| items.retain(|comment| comment.id != temp_id));
    }

    /// Hides a comment and returns the view from before the change.
    pub fn begin_delete(&mut self, comment_id: &str) -> Vec<Comment> {
        let previous = self.comments.snapshot();
        self.comments.update(|items| items.retain(|comment| comment.id != comment_id));
        previous
    }

    pub fn abort_delete(&mut self, previous: Vec<Comment>) {
        self.comments.restore(previous);
    }

    /// Whether the delete affordance should be shown to `viewer`: comment
    /// authors and the post owner may delete.
    pub fn can_delete(comment: &Comment, viewer: Option<&str>, post_owner: &str) -> bool {
        match viewer {
            Some(viewer) => !is_temp_id(&comment.id) && (comment.author_id == viewer || post_owner == viewer),
            None => false,
        }
    }
}
