pub mod comments;
pub mod likes;
pub mod posts;
pub mod users;

use anyhow::{Context, Result};
use clap::Args;
use framez::{Backend, Identity, RedisStore};

use crate::context::CliContext;
use crate::output::OutputManager;

/// Claims of the caller, standing in for a verified identity-provider token.
#[derive(Args, Clone, Debug, Default)]
pub struct IdentityArgs {
    /// Token identifier of the acting user
    #[arg(long, global = true, env = "FRAMEZ_TOKEN")]
    pub token: Option<String>,

    /// Subject claim, used when no token identifier is given
    #[arg(long, global = true)]
    pub subject: Option<String>,

    /// Display name claim
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Username claim
    #[arg(long, global = true)]
    pub handle: Option<String>,

    /// Profile image claim
    #[arg(long, global = true)]
    pub image_url: Option<String>,
}

impl IdentityArgs {
    /// `None` when neither a token nor a subject was supplied.
    pub fn identity(&self) -> Option<Identity> {
        if self.token.is_none() && self.subject.is_none() {
            return None;
        }
        Some(Identity {
            token_identifier: self.token.clone(),
            subject: self.subject.clone(),
            name: self.name.clone(),
            username: self.handle.clone(),
            first_name: None,
            image_url: self.image_url.clone(),
        })
    }
}

/// Everything a command handler needs: a connected backend and the caller.
pub struct CommandContext {
    pub backend: Backend<RedisStore>,
    pub identity: Option<Identity>,
}

impl CommandContext {
    pub async fn connect(cli: &CliContext, identity: &IdentityArgs, output: &OutputManager) -> Result<Self> {
        if let Some(path) = &cli.config_path {
            output.verbose(&format!("Using config {}", path.display()));
        }
        let url = cli.redis_url()?;
        output.verbose(&format!("Connecting to {url} (prefix '{}')", cli.prefix()));
        let backend = Backend::connect(&url, cli.prefix())
            .await
            .with_context(|| format!("Failed to connect to Redis at {url}"))?;
        Ok(Self {
            backend,
            identity: identity.identity(),
        })
    }

    pub fn caller(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_requires_token_or_subject() {
        let args = IdentityArgs {
            name: Some("Ada".into()),
            ..Default::default()
        };
        assert!(args.identity().is_none());

        let args = IdentityArgs {
            subject: Some("user_1".into()),
            handle: Some("ada".into()),
            ..Default::default()
        };
        let identity = args.identity().unwrap();
        assert_eq!(identity.token_id().unwrap(), "user_1");
        assert_eq!(identity.username.as_deref(), Some("ada"));
    }
}
