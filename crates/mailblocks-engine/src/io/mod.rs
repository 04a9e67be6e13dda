use crate::models::{Block, EmailMeta};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const TEMPLATE_EXTENSION: &str = "json";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid templates directory: {0}")]
    InvalidTemplatesDir(String),
}

/// A saved email: metadata plus the root block sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    #[serde(default)]
    pub meta: EmailMeta,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

pub fn parse_template(json: &str) -> Result<EmailTemplate, IoError> {
    Ok(serde_json::from_str(json)?)
}

pub fn template_to_json(template: &EmailTemplate) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(template)?)
}

/// Read and parse a template file
pub fn read_template(path: &Path) -> Result<EmailTemplate, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    parse_template(&json)
}

/// Write a template as pretty JSON, creating parent directories
pub fn write_template(path: &Path, template: &EmailTemplate) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut json = template_to_json(template)?;
    json.push('\n');
    fs::write(path, json)?;
    log::debug!("wrote template to {}", path.display());
    Ok(())
}

/// Template files under `root`, recursively, sorted by path
pub fn scan_templates(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidTemplatesDir(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == TEMPLATE_EXTENSION
        {
            files.push(path);
        }
    }

    Ok(())
}
