use std::sync::Arc;

use crate::models::{Block, BlockId, EmailMeta};
use crate::render::{self, CompileOptions};

/// Immutable view of a document at one version.
///
/// Shares the block sequence with the document it came from; later edits
/// copy on write and never show up in an existing snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub version: u64,
    pub blocks: Arc<Vec<Block>>,
    pub meta: EmailMeta,
}

impl Snapshot {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        crate::editing::tree::find(&self.blocks, id)
    }

    pub fn compile(&self) -> String {
        render::compile(&self.blocks, &self.meta)
    }

    pub fn compile_with(&self, options: &CompileOptions) -> String {
        render::compile_with(&self.blocks, &self.meta, options)
    }
}
