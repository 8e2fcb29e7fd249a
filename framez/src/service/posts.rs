use chrono::Utc;

use super::Backend;
use crate::{
    errors::FramezError,
    id::generate_document_id,
    identity::Identity,
    model::{NewPost, Post, PostId},
    store::Store,
};

impl<S: Store> Backend<S> {
    /// Creates a post owned by the caller.
    ///
    /// The author's display name and avatar are copied onto the post and are
    /// not refreshed by later profile edits.
    pub async fn create_post(&self, caller: Option<&Identity>, new_post: NewPost) -> Result<PostId, FramezError> {
        new_post.validate()?;
        let author = self.require_user(caller).await?;

        let post = Post {
            id: generate_document_id(),
            created_at: Utc::now(),
            author: author.id.clone(),
            author_name: author.display_name().to_string(),
            author_profile_image: author.profile_image.clone(),
            caption: new_post.normalized_caption(),
            media: new_post.media,
        };
        self.store.insert_post(&post).await?;
        log::debug!("user {} created post {} with {} media item(s)", author.id, post.id, post.media.len());
        Ok(post.id)
    }

    /// Every post, newest first.
    pub async fn get_all_posts(&self) -> Result<Vec<Post>, FramezError> {
        self.store.list_posts().await
    }

    /// Posts of one user in creation order, for the profile grid.
    pub async fn get_posts_by_user(&self, user_id: &str) -> Result<Vec<Post>, FramezError> {
        self.store.list_posts_by_author(user_id).await
    }
}
