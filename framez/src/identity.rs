//! Caller identity as handed over by the external identity provider.
//!
//! Token verification happens upstream; by the time an [`Identity`] reaches a
//! backend function it is trusted.

use serde::{Deserialize, Serialize};

use crate::errors::FramezError;

const ANONYMOUS: &str = "Anonymous";

/// Claims of an authenticated session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Issuer-qualified token identifier, preferred when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_identifier: Option<String>,
    /// Bare subject claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Identity {
    pub fn with_token(token_identifier: impl Into<String>) -> Self {
        Self {
            token_identifier: Some(token_identifier.into()),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Key under which the user's record is stored.
    pub fn token_id(&self) -> Result<&str, FramezError> {
        self.token_identifier
            .as_deref()
            .or(self.subject.as_deref())
            .ok_or(FramezError::MissingTokenIdentifier)
    }

    /// Name to store for the user: an explicit username wins, then the identity's own claims.
    pub fn preferred_name<'a>(&'a self, explicit_username: Option<&'a str>) -> &'a str {
        explicit_username
            .or(self.username.as_deref())
            .or(self.name.as_deref())
            .or(self.first_name.as_deref())
            .unwrap_or(ANONYMOUS)
    }
}

/// Resolves the token id of an optional caller.
pub(crate) fn require_token(caller: Option<&Identity>) -> Result<&str, FramezError> {
    caller.ok_or(FramezError::NotAuthenticated)?.token_id()
}
