use anyhow::Result;
use chrono::Utc;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color as TableColor, Table};
use serde::Serialize;

use framez::{Comment, Liker, Post, User, format::format_relative};

use crate::theme::{ICONS, THEME};

/// Output format options for CLI commands
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Formatted table output (default)
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// Compact single-line output
    Compact,
}

/// Global CLI options that affect output and behavior
#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// A record that renders as one table row.
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
    fn to_compact(&self) -> String;
}

/// Output manager handles formatting and display
pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Display records according to the configured output format
    pub fn display_rows<T>(&self, rows: &[T]) -> Result<()>
    where
        T: Serialize + TableRow,
    {
        if self.options.quiet {
            return Ok(());
        }

        match self.options.output_format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(rows)?);
            }
            OutputFormat::Table => {
                if rows.is_empty() {
                    self.info("No items found");
                    return Ok(());
                }
                let mut table = self.create_table();
                self.add_table_header(&mut table, T::headers());
                for row in rows {
                    table.add_row(row.row());
                }
                println!("{table}");
            }
            OutputFormat::Compact => {
                for row in rows {
                    println!("{}", row.to_compact());
                }
            }
        }
        Ok(())
    }

    pub fn display_one<T>(&self, row: &T) -> Result<()>
    where
        T: Serialize + TableRow,
    {
        self.display_rows(std::slice::from_ref(row))
    }

    /// Display a bare value (an id, a count) honoring the output format
    pub fn display_value(&self, key: &str, value: impl Serialize + ToString) -> Result<()> {
        if self.options.quiet {
            return Ok(());
        }
        match self.options.output_format {
            OutputFormat::Json => {
                let mut object = serde_json::Map::new();
                object.insert(key.to_string(), serde_json::to_value(&value)?);
                println!("{}", serde_json::to_string_pretty(&object)?);
            }
            OutputFormat::Compact => println!("{}", value.to_string()),
            OutputFormat::Table => self.key_value(key, &value.to_string()),
        }
        Ok(())
    }

    /// Display a success message with color and icon
    pub fn success(&self, message: &str) {
        if !self.options.quiet {
            let output = if self.options.no_color {
                format!("{} {message}", ICONS.success)
            } else {
                format!("{} {}", ICONS.success.color(THEME.success), message.color(THEME.success))
            };
            println!("{output}");
        }
    }

    /// Display an error message with color and icon
    pub fn error(&self, message: &str) {
        let output = if self.options.no_color {
            format!("{} {message}", ICONS.error)
        } else {
            format!("{} {}", ICONS.error.color(THEME.error), message.color(THEME.error))
        };
        eprintln!("{output}");
    }

    pub fn warning(&self, message: &str) {
        if !self.options.quiet {
            let output = if self.options.no_color {
                format!("{} {message}", ICONS.warning)
            } else {
                format!("{} {}", ICONS.warning.color(THEME.warning), message.color(THEME.warning))
            };
            println!("{output}");
        }
    }

    /// Display verbose information (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.options.verbose && !self.options.quiet {
            let output = if self.options.no_color {
                format!("{} {message}", ICONS.arrow)
            } else {
                format!("{} {}", ICONS.arrow.color(THEME.muted), message.color(THEME.muted))
            };
            eprintln!("{output}");
        }
    }

    pub fn info(&self, message: &str) {
        if !self.options.quiet {
            let output = if self.options.no_color {
                format!("{} {message}", ICONS.info)
            } else {
                format!("{} {}", ICONS.info.color(THEME.info), message.color(THEME.info))
            };
            println!("{output}");
        }
    }

    pub fn key_value(&self, key: &str, value: &str) {
        if !self.options.quiet {
            let output = if self.options.no_color {
                format!("{key}: {value}")
            } else {
                format!("{}: {}", key.color(THEME.key).bold(), value.color(THEME.value))
            };
            println!("{output}");
        }
    }

    pub fn create_table(&self) -> Table {
        let mut table = Table::new();
        if !self.options.no_color {
            table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
        } else {
            table.load_preset(comfy_table::presets::ASCII_FULL);
        }
        table
    }

    pub fn add_table_header(&self, table: &mut Table, headers: &[&str]) {
        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|header| {
                let cell = Cell::new(header).add_attribute(Attribute::Bold);
                if self.options.no_color { cell } else { cell.fg(TableColor::Cyan) }
            })
            .collect();
        table.set_header(header_cells);
    }
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl TableRow for User {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Username", "Avatar", "Updated"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            optional(self.username.as_deref()),
            optional(self.profile_image.as_deref()),
            format_relative(self.updated_at, Utc::now()),
        ]
    }

    fn to_compact(&self) -> String {
        format!("{} {}", self.id, self.display_name())
    }
}

impl TableRow for Post {
    fn headers() -> &'static [&'static str] {
        &["ID", "Author", "Media", "Caption", "Posted"]
    }

    fn row(&self) -> Vec<String> {
        let media = self
            .media
            .iter()
            .map(|item| format!("{} {}", item.kind, item.url))
            .collect::<Vec<_>>()
            .join("\n");
        vec![
            self.id.clone(),
            self.author_name.clone(),
            media,
            optional(self.caption.as_deref()),
            format_relative(self.created_at, Utc::now()),
        ]
    }

    fn to_compact(&self) -> String {
        format!("{} {} ({} media)", self.id, self.author_name, self.media.len())
    }
}

impl TableRow for Comment {
    fn headers() -> &'static [&'static str] {
        &["ID", "Author", "Text", "Posted"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.author_name.clone(),
            self.text.clone(),
            format_relative(self.created_at, Utc::now()),
        ]
    }

    fn to_compact(&self) -> String {
        format!("{} {}: {}", self.id, self.author_name, self.text)
    }
}

impl TableRow for Liker {
    fn headers() -> &'static [&'static str] {
        &["User", "Username", "Avatar", "Liked"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.username.clone(),
            optional(self.profile_image.as_deref()),
            format_relative(self.liked_at, Utc::now()),
        ]
    }

    fn to_compact(&self) -> String {
        format!("{} {} {}", ICONS.heart, self.user_id, self.username)
    }
}
