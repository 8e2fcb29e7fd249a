use anyhow::Result;
use clap::Subcommand;

use crate::commands::CommandContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Register",
        commands: &[
            "framez --token https://auth|u1 --name 'Ada L' user store               # Create or refresh your record",
            "framez --token https://auth|u1 user store --username ada               # Pick a username",
        ],
    },
    ExampleGroup {
        title: "Lookup",
        commands: &[
            "framez --token https://auth|u1 user me        # Show your profile",
            "framez user get k3x9Qm2pLw8vR4tYn6Zb          # Show any user by id",
        ],
    },
];

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create the caller's user record, or refresh it from the identity claims
    #[command(name = "store")]
    Store {
        /// Username to store instead of the one in the identity claims
        #[arg(long)]
        username: Option<String>,
    },

    /// Show the caller's user record
    #[command(name = "me")]
    Me,

    /// Show a user by id
    #[command(name = "get")]
    Get {
        /// User id
        id: String,
    },
}

pub async fn handle_user_commands(command: UserCommands, ctx: &CommandContext, output: &OutputManager) -> Result<()> {
    match command {
        UserCommands::Store { username } => {
            let id = ctx.backend.store_user(ctx.caller(), username.as_deref()).await?;
            output.success("User stored");
            output.display_value("id", id)?;
        }
        UserCommands::Me => match ctx.backend.get_user_profile(ctx.caller()).await? {
            Some(user) => output.display_one(&user)?,
            None => output.warning("No user record for this identity. Run 'framez user store' first."),
        },
        UserCommands::Get { id } => match ctx.backend.get_user_by_id(&id).await? {
            Some(user) => output.display_one(&user)?,
            None => anyhow::bail!("User '{id}' not found"),
        },
    }
    Ok(())
}
