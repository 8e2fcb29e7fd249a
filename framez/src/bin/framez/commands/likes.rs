use anyhow::Result;
use clap::Subcommand;

use crate::commands::CommandContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::theme::ICONS;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Likes",
    commands: &[
        "framez --token https://auth|u1 like toggle <post_id>   # Like, or unlike if already liked",
        "framez like count <post_id>",
        "framez like list <post_id> --limit 20",
    ],
}];

#[derive(Subcommand)]
pub enum LikeCommands {
    /// Like a post, or remove the caller's like
    #[command(name = "toggle")]
    Toggle {
        /// Post id
        post_id: String,
    },

    /// Show how many users like a post
    #[command(name = "count")]
    Count {
        /// Post id
        post_id: String,
    },

    /// List who liked a post
    #[command(name = "list")]
    List {
        /// Post id
        post_id: String,
        /// Maximum number of likers (capped at 200)
        #[arg(long)]
        limit: Option<i64>,
    },
}

pub async fn handle_like_commands(command: LikeCommands, ctx: &CommandContext, output: &OutputManager) -> Result<()> {
    match command {
        LikeCommands::Toggle { post_id } => {
            let toggle = ctx.backend.toggle_like(ctx.caller(), &post_id).await?;
            if toggle.liked {
                output.success(&format!("{} Liked '{post_id}'", ICONS.heart));
            } else {
                output.success(&format!("{} Removed like from '{post_id}'", ICONS.broken_heart));
            }
            output.display_value("liked", toggle.liked)?;
        }
        LikeCommands::Count { post_id } => {
            let count = ctx.backend.get_like_count(&post_id).await?;
            output.display_value("likes", count)?;
        }
        LikeCommands::List { post_id, limit } => {
            let likers = ctx.backend.get_likes_by_post(&post_id, limit).await?;
            output.display_rows(&likers)?;
        }
    }
    Ok(())
}
