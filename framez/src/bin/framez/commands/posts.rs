use anyhow::Result;
use clap::Subcommand;
use framez::{Media, MediaKind, NewPost};

use crate::commands::CommandContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Publish",
        commands: &[
            "framez --token https://auth|u1 post create --media https://cdn.example/a.jpg --caption 'Sunset'",
            "framez --token https://auth|u1 post create --media https://cdn.example/a.jpg --media video=https://cdn.example/b",
        ],
    },
    ExampleGroup {
        title: "Browse",
        commands: &[
            "framez post feed                          # Newest posts first",
            "framez post by-user k3x9Qm2pLw8vR4tYn6Zb  # One author's posts",
            "framez --output json post feed            # Raw records",
        ],
    },
];

#[derive(Subcommand)]
pub enum PostCommands {
    /// Publish a post as the caller
    #[command(name = "create")]
    Create {
        /// Media item as URL or KIND=URL; the kind is inferred from the extension otherwise
        #[arg(long = "media", required = true, value_parser = parse_media)]
        media: Vec<Media>,

        /// Caption text
        #[arg(long)]
        caption: Option<String>,
    },

    /// List every post, newest first
    #[command(name = "feed")]
    Feed,

    /// List the posts of one author
    #[command(name = "by-user")]
    ByUser {
        /// Author's user id
        user_id: String,
    },
}

fn parse_media(value: &str) -> Result<Media, String> {
    if let Some((kind, url)) = value.split_once('=')
        && !kind.contains(':')
    {
        let kind: MediaKind = kind.parse().map_err(|err: framez::ValidationError| err.to_string())?;
        return Ok(Media {
            kind,
            url: url.to_string(),
            poster: None,
        });
    }
    Ok(Media::from_url(value))
}

pub async fn handle_post_commands(command: PostCommands, ctx: &CommandContext, output: &OutputManager) -> Result<()> {
    match command {
        PostCommands::Create { media, caption } => {
            let mut new_post = NewPost::new(media);
            if let Some(caption) = caption {
                new_post = new_post.caption(caption);
            }
            let id = ctx.backend.create_post(ctx.caller(), new_post).await?;
            output.success("Post published");
            output.display_value("id", id)?;
        }
        PostCommands::Feed => {
            let posts = ctx.backend.get_all_posts().await?;
            output.verbose(&format!("{} posts", posts.len()));
            output.display_rows(&posts)?;
        }
        PostCommands::ByUser { user_id } => {
            let posts = ctx.backend.get_posts_by_user(&user_id).await?;
            output.display_rows(&posts)?;
        }
    }
    Ok(())
}
