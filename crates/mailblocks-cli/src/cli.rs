//! Command-line surface of the `mailblocks` binary.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Edit block-tree email templates and compile them to HTML.
#[derive(Parser, Debug)]
#[command(name = "mailblocks", version, about, propagate_version = true)]
pub struct MailblocksCli {
    /// Config file to use instead of ~/.config/mailblocks/config.toml
    #[arg(long, short = 'c', global = true, env = "MAILBLOCKS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty template
    New {
        template: PathBuf,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        snippet: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List templates under the configured templates directory
    List,
    /// Drop a palette block at the root or into a container
    Add {
        template: PathBuf,
        /// Palette type: container, heading, text, image, button, divider, columns
        block_type: String,
        /// Container or columns block to drop into
        #[arg(long)]
        into: Option<String>,
    },
    /// Merge content fields into a block (`field=value`, JSON values allowed)
    Content {
        template: PathBuf,
        id: String,
        #[arg(value_parser = parse_assignment, required = true)]
        fields: Vec<(String, String)>,
    },
    /// Merge style properties into a block (`property=value`)
    Style {
        template: PathBuf,
        id: String,
        #[arg(value_parser = parse_assignment, required = true)]
        properties: Vec<(String, String)>,
    },
    /// Apply a style-editor preset to a heading, button or columns block
    Set {
        template: PathBuf,
        id: String,
        preset: Preset,
        value: String,
    },
    /// Update template metadata
    Meta {
        template: PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        snippet: Option<String>,
    },
    /// Remove a block and everything inside it
    Remove { template: PathBuf, id: String },
    /// Swap a block with its previous or next sibling
    Move {
        template: PathBuf,
        id: String,
        direction: MoveDirection,
    },
    /// Print the block tree
    Tree { template: PathBuf },
    /// Compile a template to email HTML
    Compile {
        template: PathBuf,
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Button size: xs, sm, md, lg
    Size,
    /// Button shape: rectangle, rounded, pill
    Shape,
    /// Heading level: h1, h2, h3
    Level,
    /// Column count: 2 to 4
    Columns,
    /// Column alignment: top, center, bottom
    Alignment,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected `key=value`, got `{raw}`")),
    }
}
