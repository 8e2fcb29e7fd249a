use crate::{identity::Identity, service::Backend, store::Store};

/// Signed-in state: stores the user record once the identity provider
/// reports a session, and exposes the stored user id to the rest of the UI.
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
    user_id: Option<String>,
}

impl Session {
    /// Establishes the session for `identity`. A failed store is logged and
    /// leaves the session loading.
    pub async fn establish<S: Store>(backend: &Backend<S>, identity: Option<Identity>) -> Self {
        let user_id = match identity.as_ref() {
            Some(identity) => match backend.store_user(Some(identity), None).await {
                Ok(user_id) => Some(user_id),
                Err(err) => {
                    log::error!("failed to store user: {err}");
                    None
                }
            },
            None => None,
        };
        Self { identity, user_id }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Signed in but the user record is not available yet.
    pub fn is_loading(&self) -> bool {
        self.identity.is_some() && self.user_id.is_none()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some() && self.user_id.is_some()
    }

    pub fn sign_out(&mut self) {
        self.identity = None;
        self.user_id = None;
    }
}
