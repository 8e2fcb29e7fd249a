use anyhow::Result;
use clap::Subcommand;

use crate::commands::CommandContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Discuss",
        commands: &[
            "framez --token https://auth|u1 comment add <post_id> 'Great light'",
            "framez --token https://auth|u1 comment delete <comment_id>   # Author or post owner only",
        ],
    },
    ExampleGroup {
        title: "Read",
        commands: &[
            "framez comment list <post_id>              # Newest 100 comments",
            "framez comment list <post_id> --limit 10",
        ],
    },
];

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Comment on a post as the caller
    #[command(name = "add")]
    Add {
        /// Post id
        post_id: String,
        /// Comment text
        text: String,
    },

    /// Delete a comment written by the caller or left on the caller's post
    #[command(name = "delete")]
    Delete {
        /// Comment id
        id: String,
    },

    /// List a post's comments, newest first
    #[command(name = "list")]
    List {
        /// Post id
        post_id: String,
        /// Maximum number of comments (capped at 200)
        #[arg(long)]
        limit: Option<i64>,
    },
}

pub async fn handle_comment_commands(
    command: CommentCommands,
    ctx: &CommandContext,
    output: &OutputManager,
) -> Result<()> {
    match command {
        CommentCommands::Add { post_id, text } => {
            let id = ctx.backend.create_comment(ctx.caller(), &post_id, &text).await?;
            output.success("Comment added");
            output.display_value("id", id)?;
        }
        CommentCommands::Delete { id } => {
            ctx.backend.delete_comment(ctx.caller(), &id).await?;
            output.success(&format!("Comment '{id}' deleted"));
        }
        CommentCommands::List { post_id, limit } => {
            let comments = ctx.backend.get_comments_by_post(&post_id, limit).await?;
            output.display_rows(&comments)?;
        }
    }
    Ok(())
}
