use chrono::Utc;

use super::Backend;
use crate::{
    errors::FramezError,
    id::generate_document_id,
    identity::Identity,
    model::{User, UserId, UserPatch},
    store::Store,
};

impl<S: Store> Backend<S> {
    /// Stores the caller's profile, creating it on first access and
    /// refreshing changed identity attributes afterwards. Returns the user id.
    pub async fn store_user(&self, caller: Option<&Identity>, username: Option<&str>) -> Result<UserId, FramezError> {
        let identity = caller.ok_or(FramezError::NotAuthenticated)?;
        let token = identity.token_id()?;
        let incoming_name = identity.preferred_name(username);

        if let Some(user) = self.store.user_by_token(token).await? {
            return self.refresh_user(user, identity, username, incoming_name).await;
        }

        let now = Utc::now();
        let user = User {
            id: generate_document_id(),
            created_at: now,
            name: incoming_name.to_string(),
            username: username.or(identity.username.as_deref()).map(str::to_string),
            token_identifier: token.to_string(),
            profile_image: identity.image_url.clone(),
            updated_at: now,
        };
        match self.store.insert_user(&user).await {
            Ok(()) => {
                log::info!("stored new user {} for token {token}", user.id);
                Ok(user.id)
            }
            // Lost an insert race for the same token: the winner's record is the user.
            Err(FramezError::UniqueViolation { existing_id, .. }) => {
                log::debug!("user for token {token} already stored as {existing_id}");
                Ok(existing_id)
            }
            Err(err) => Err(err),
        }
    }

    async fn refresh_user(
        &self,
        user: User,
        identity: &Identity,
        username: Option<&str>,
        incoming_name: &str,
    ) -> Result<UserId, FramezError> {
        let mut patch = UserPatch::default();
        if user.name != incoming_name {
            patch.name = Some(incoming_name.to_string());
        }
        if let Some(username) = username
            && user.username.as_deref() != Some(username)
        {
            patch.username = Some(username.to_string());
        }
        if let Some(image) = identity.image_url.as_deref()
            && user.profile_image.as_deref() != Some(image)
        {
            patch.profile_image = Some(image.to_string());
        }
        if !patch.is_empty() {
            log::debug!("patching user {}: {patch:?}", user.id);
            self.store.patch_user(&user.id, &patch, Utc::now()).await?;
        }
        Ok(user.id)
    }

    /// The caller's stored profile, or `None` when signed out or not stored yet.
    pub async fn get_user_profile(&self, caller: Option<&Identity>) -> Result<Option<User>, FramezError> {
        let Some(token) = caller.and_then(|identity| identity.token_id().ok()) else {
            return Ok(None);
        };
        self.store.user_by_token(token).await
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>, FramezError> {
        self.store.get_user(user_id).await
    }
}
