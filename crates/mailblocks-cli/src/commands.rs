//! Subcommand implementations. Each edit loads the template, applies one
//! document operation and saves only when the tree actually changed.

use anyhow::{Context, Result, anyhow, bail};
use mailblocks_config::Config;
use mailblocks_engine::editing::tree;
use mailblocks_engine::{
    BlockId, ButtonShape, ButtonSize, ColumnAlignment, Content, Direction, DropTarget,
    EmailDocument, EmailMeta, EmailTemplate, HeadingLevel, Styles, io, place,
};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::cli::{Commands, MoveDirection, Preset};

/// Run one subcommand; the returned text goes to stdout
pub fn run(command: Commands, config: &Config) -> Result<String> {
    match command {
        Commands::New {
            template,
            name,
            subject,
            snippet,
            force,
        } => {
            let path = config.template_path(&template);
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let template = EmailTemplate {
                meta: EmailMeta::new(name, subject, snippet),
                blocks: Vec::new(),
            };
            io::write_template(&path, &template)?;
            Ok(format!("created {}", path.display()))
        }
        Commands::List => {
            let files = io::scan_templates(&config.templates_path)?;
            Ok(files
                .iter()
                .map(|file| {
                    file.strip_prefix(&config.templates_path)
                        .unwrap_or(file)
                        .display()
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Commands::Add {
            template,
            block_type,
            into,
        } => {
            let mut session = Session::open(config, &template)?;
            let target = match into {
                Some(container) => DropTarget::Container(BlockId::new(container)),
                None => DropTarget::Root,
            };
            let id = place(&mut session.doc, &block_type, &target)?;
            session.save()?;
            Ok(id.to_string())
        }
        Commands::Content {
            template,
            id,
            fields,
        } => {
            let mut session = Session::open(config, &template)?;
            let patch: Content = fields
                .into_iter()
                .map(|(field, raw)| (field, content_value(&raw)))
                .collect();
            session.doc.patch_content(&BlockId::new(id), &patch)?;
            session.save_if_changed()
        }
        Commands::Style {
            template,
            id,
            properties,
        } => {
            let mut session = Session::open(config, &template)?;
            let patch: Styles = properties.into_iter().collect();
            session.doc.patch_styles(&BlockId::new(id), &patch)?;
            session.save_if_changed()
        }
        Commands::Set {
            template,
            id,
            preset,
            value,
        } => {
            let mut session = Session::open(config, &template)?;
            apply_preset(&mut session.doc, &BlockId::new(id), preset, &value)?;
            session.save_if_changed()
        }
        Commands::Meta {
            template,
            name,
            subject,
            snippet,
        } => {
            let mut session = Session::open(config, &template)?;
            let current = session.doc.meta().clone();
            session.doc.set_meta(EmailMeta {
                name: name.unwrap_or(current.name),
                subject: subject.unwrap_or(current.subject),
                snippet: snippet.unwrap_or(current.snippet),
            });
            session.save_if_changed()
        }
        Commands::Remove { template, id } => {
            let mut session = Session::open(config, &template)?;
            let id = BlockId::new(id);
            let parent = session
                .doc
                .parent_of(&id)
                .ok_or_else(|| anyhow!("no block with id `{id}`"))?;
            let removed = session.doc.remove(&parent, &id)?;
            session.save()?;
            Ok(format!(
                "removed {} block{}",
                tree::count(std::slice::from_ref(&removed)),
                if removed.children.is_empty() { "" } else { "s" }
            ))
        }
        Commands::Move {
            template,
            id,
            direction,
        } => {
            let mut session = Session::open(config, &template)?;
            let id = BlockId::new(id);
            let parent = session
                .doc
                .parent_of(&id)
                .ok_or_else(|| anyhow!("no block with id `{id}`"))?;
            let direction = match direction {
                MoveDirection::Up => Direction::Up,
                MoveDirection::Down => Direction::Down,
            };
            session.doc.move_block(&parent, &id, direction)?;
            session.save_if_changed()
        }
        Commands::Tree { template } => {
            let session = Session::open(config, &template)?;
            Ok(render_tree(&session.doc))
        }
        Commands::Compile { template, output } => {
            let session = Session::open(config, &template)?;
            let html = session.doc.html_with(&config.compile_options());
            match output {
                Some(output) => {
                    std::fs::write(&output, html)
                        .with_context(|| format!("failed to write {}", output.display()))?;
                    Ok(format!("wrote {}", output.display()))
                }
                None => Ok(html),
            }
        }
    }
}

/// A template loaded for a single edit
struct Session {
    path: PathBuf,
    doc: EmailDocument,
}

impl Session {
    fn open(config: &Config, template: &Path) -> Result<Self> {
        let path = config.template_path(template);
        let loaded = io::read_template(&path)
            .with_context(|| format!("failed to load template {}", path.display()))?;
        log::debug!("loaded {} ({} root blocks)", path.display(), loaded.blocks.len());
        Ok(Self {
            path,
            doc: EmailDocument::from_template(loaded),
        })
    }

    fn save(&self) -> Result<()> {
        io::write_template(&self.path, &self.doc.to_template())?;
        log::info!("saved {}", self.path.display());
        Ok(())
    }

    fn save_if_changed(&self) -> Result<String> {
        if self.doc.version() == 0 {
            return Ok("no change".to_string());
        }
        self.save()?;
        Ok("updated".to_string())
    }
}

/// JSON literals (`3`, `true`, `[1, 2]`) keep their type; anything else is text
fn content_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_) | Value::Array(_) | Value::Object(_))) => {
            value
        }
        _ => Value::String(raw.to_string()),
    }
}

fn apply_preset(
    doc: &mut EmailDocument,
    id: &BlockId,
    preset: Preset,
    value: &str,
) -> Result<()> {
    match preset {
        Preset::Size => {
            let size = ButtonSize::parse(value)
                .ok_or_else(|| anyhow!("unknown button size `{value}` (xs, sm, md, lg)"))?;
            doc.set_button_size(id, size)?;
        }
        Preset::Shape => {
            let shape = ButtonShape::parse(value).ok_or_else(|| {
                anyhow!("unknown button shape `{value}` (rectangle, rounded, pill)")
            })?;
            doc.set_button_shape(id, shape)?;
        }
        Preset::Level => {
            let level = HeadingLevel::parse(value)
                .ok_or_else(|| anyhow!("unknown heading level `{value}` (h1, h2, h3)"))?;
            doc.set_heading_level(id, level)?;
        }
        Preset::Columns => {
            let columns: u64 = value
                .parse()
                .with_context(|| format!("column count `{value}` is not a number"))?;
            doc.set_column_count(id, columns)?;
        }
        Preset::Alignment => {
            let alignment = ColumnAlignment::parse(value)
                .ok_or_else(|| anyhow!("unknown alignment `{value}` (top, center, bottom)"))?;
            doc.set_column_alignment(id, alignment)?;
        }
    }
    Ok(())
}

fn render_tree(doc: &EmailDocument) -> String {
    let mut lines = Vec::new();
    tree::walk(doc.blocks(), &mut |block, depth| {
        let label = block
            .content
            .str_field("text")
            .map(|text| format!(" \"{text}\""))
            .unwrap_or_default();
        lines.push(format!(
            "{}{} [{}]{label}",
            "  ".repeat(depth),
            block.id,
            block.kind
        ));
    });
    if lines.is_empty() {
        return "(empty)".to_string();
    }
    lines.join("\n")
}
