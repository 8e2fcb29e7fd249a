mod commands;
mod context;
mod examples;
mod output;
mod theme;

use anyhow::Result;
use clap::{
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Color as ClapColor, RgbColor, Style},
    },
    error::ErrorKind,
};

use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};
use std::fmt::Write;
use std::io::{self, Write as IoWrite};
use std::path::PathBuf;

use commands::{
    CommandContext, IdentityArgs,
    comments::{CommentCommands, handle_comment_commands},
    likes::{LikeCommands, handle_like_commands},
    posts::{PostCommands, handle_post_commands},
    users::{UserCommands, handle_user_commands},
};
use context::CliContext;
use examples::{ExampleGroup, command_examples};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{ICONS, THEME};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("REDIS_URL", "Redis Stack connection URL (default config reads ${REDIS_URL})"),
    ("FRAMEZ_TOKEN", "Token identifier of the acting user"),
    ("RUST_LOG", "Log filter, e.g. framez=debug"),
];

#[derive(Parser)]
#[command(name = "framez")]
#[command(version)]
#[command(
    about = "Operate the framez photo and video sharing backend",
    long_about = r#"Command-line access to the framez backend stored in Redis Stack:

• Register users from identity-provider claims
• Publish media posts and browse the feed
• Comment on posts and moderate comments on your own posts
• Like and unlike posts

Commands:
  user      Store and look up user records
  post      Publish and list posts
  comment   Add, delete, and list comments
  like      Toggle, count, and list likes
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to a config file (defaults to the nearest .framez/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    identity: IdentityArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Parses arguments with themed help; help, version and usage errors exit here.
fn parse_cli() -> Cli {
    let use_color = detect_color_support();
    let parsed = build_cli_command(use_color)
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches));
    match parsed {
        Ok(cli) => cli,
        Err(err) => exit_with_clap_error(err),
    }
}

fn exit_with_clap_error(err: clap::Error) -> ! {
    let informational = matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    padded(informational, || {
        if let Err(print_err) = err.print()
            && print_err.kind() != io::ErrorKind::BrokenPipe
        {
            eprintln!("Failed to print usage: {print_err}");
        }
    });
    std::process::exit(err.exit_code());
}

/// Runs `body` between two blank lines on stdout or stderr.
fn padded(stdout: bool, body: impl FnOnce()) {
    let blank = || {
        let _ = if stdout {
            io::stdout().write_all(b"\n").and_then(|()| io::stdout().flush())
        } else {
            io::stderr().write_all(b"\n").and_then(|()| io::stderr().flush())
        };
    };
    blank();
    body();
    blank();
}

fn build_cli_command(use_color: bool) -> Command {
    let mut command = Cli::command()
        .after_long_help(render_appendix(use_color))
        .styles(help_styles())
        .color(if use_color { ColorChoice::Auto } else { ColorChoice::Never });
    for example in command_examples() {
        if let Some(subcommand) = command.find_subcommand_mut(example.name) {
            *subcommand = subcommand.clone().after_long_help(render_examples(example.groups, use_color));
        }
    }
    command
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "{}", paint("Examples:", THEME.highlight, true, use_color));
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            buffer.push('\n');
        }
        let _ = writeln!(buffer, "  {}", paint(group.title, THEME.primary, true, use_color));
        for line in group.commands {
            let _ = writeln!(
                buffer,
                "    {} {}",
                paint(ICONS.arrow, THEME.secondary, false, use_color),
                paint(line, THEME.secondary, false, use_color)
            );
        }
    }
    buffer
}

fn render_appendix(use_color: bool) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "{}", paint("Environment Variables:", THEME.highlight, true, use_color));
    for (key, description) in ENVIRONMENT_VARIABLES {
        let _ = writeln!(
            buffer,
            "  {}  {}",
            paint(key, THEME.key, true, use_color),
            paint(description, THEME.value, false, use_color)
        );
    }
    let _ = writeln!(
        buffer,
        "\n{} {}",
        paint("Tip:", THEME.highlight, true, use_color),
        paint(
            "Use 'framez <command> --help' to view examples for each command.",
            THEME.secondary,
            false,
            use_color
        )
    );
    buffer
}

fn paint(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    match (use_color, bold) {
        (false, _) => text.to_string(),
        (true, true) => text.color(color).bold().to_string(),
        (true, false) => text.color(color).to_string(),
    }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

fn help_styles() -> Styles {
    let style = |color: ThemeColor| Style::new().fg_color(clap_color(color));
    Styles::styled()
        .usage(style(THEME.primary).bold())
        .header(style(THEME.highlight).bold())
        .literal(style(THEME.secondary))
        .placeholder(style(THEME.muted))
        .valid(style(THEME.success))
        .invalid(style(THEME.warning))
        .error(style(THEME.error).bold())
}

/// Clap equivalent of a theme color; colors the theme never uses render unstyled.
fn clap_color(color: ThemeColor) -> Option<ClapColor> {
    let ansi = match color {
        ThemeColor::Red => AnsiColor::Red,
        ThemeColor::Green => AnsiColor::Green,
        ThemeColor::Yellow => AnsiColor::Yellow,
        ThemeColor::Blue => AnsiColor::Blue,
        ThemeColor::Magenta => AnsiColor::Magenta,
        ThemeColor::Cyan => AnsiColor::Cyan,
        ThemeColor::White => AnsiColor::White,
        ThemeColor::BrightBlack => AnsiColor::BrightBlack,
        ThemeColor::BrightRed => AnsiColor::BrightRed,
        ThemeColor::BrightMagenta => AnsiColor::BrightMagenta,
        ThemeColor::BrightCyan => AnsiColor::BrightCyan,
        ThemeColor::TrueColor { r, g, b } => return Some(ClapColor::Rgb(RgbColor(r, g, b))),
        _ => return None,
    };
    Some(ClapColor::Ansi(ansi))
}

#[derive(Subcommand)]
enum Commands {
    /// Store and look up user records
    #[command(subcommand)]
    User(UserCommands),

    /// Publish posts and browse the feed
    #[command(subcommand)]
    Post(PostCommands),

    /// Add, delete, and list comments
    #[command(subcommand)]
    Comment(CommentCommands),

    /// Toggle, count, and list likes
    #[command(subcommand)]
    Like(LikeCommands),
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = parse_cli();
    let no_color = cli.no_color;

    println!();
    if let Err(err) = execute(cli).await {
        OutputManager::new(GlobalOptions {
            no_color,
            ..Default::default()
        })
        .error(&format!("{err:#}"));
        std::process::exit(1);
    }
    println!();
}

async fn execute(cli: Cli) -> Result<()> {
    let global_options = GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };
    if global_options.no_color {
        colored::control::set_override(false);
    }

    let output = OutputManager::new(global_options);
    let config = CliContext::load(cli.config.as_deref())?;
    let ctx = CommandContext::connect(&config, &cli.identity, &output).await?;

    match cli.command {
        Commands::User(command) => handle_user_commands(command, &ctx, &output).await?,
        Commands::Post(command) => handle_post_commands(command, &ctx, &output).await?,
        Commands::Comment(command) => handle_comment_commands(command, &ctx, &output).await?,
        Commands::Like(command) => handle_like_commands(command, &ctx, &output).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_example_names_a_subcommand() {
        let command = Cli::command();
        for example in command_examples() {
            assert!(
                command.find_subcommand(example.name).is_some(),
                "no subcommand named {}",
                example.name
            );
        }
    }

    #[test]
    fn identity_flags_are_global() {
        let cli = Cli::try_parse_from(["framez", "like", "toggle", "p1", "--token", "t1"]).unwrap();
        assert_eq!(cli.identity.token.as_deref(), Some("t1"));
        assert!(matches!(cli.command, Commands::Like(LikeCommands::Toggle { .. })));
    }
}
