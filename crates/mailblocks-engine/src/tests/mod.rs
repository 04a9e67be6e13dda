//! Shared helpers for unit tests

use std::path::PathBuf;

use tempfile::TempDir;

use crate::models::{Block, BlockKind};

/// A block with its palette defaults, as if freshly dropped
pub fn block(id: &str, kind: BlockKind) -> Block {
    Block::with_defaults(id, kind)
}

pub fn ids_of(blocks: &[Block]) -> Vec<&str> {
    blocks.iter().map(|b| b.id.as_str()).collect()
}

pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Write `content` to `relative` under `dir`, creating folders as needed
pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create test folder");
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
