//! Turns a drop event into a tree insertion.

use crate::editing::{EmailDocument, TreeError};
use crate::models::{BlockId, BlockKind};

/// Where a palette item was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The canvas itself: append a new root block
    Root,
    /// A container or columns block found by hit-testing
    Container(BlockId),
}

/// Create a block of `dragged_type` with palette defaults and attach it at
/// `target`. Returns the new block's id.
///
/// Misdirected drops (a type outside the palette, a missing or leaf target)
/// leave the document unchanged.
pub fn place(
    doc: &mut EmailDocument,
    dragged_type: &str,
    target: &DropTarget,
) -> Result<BlockId, TreeError> {
    let kind = BlockKind::from_tag(dragged_type);
    if !kind.is_supported() {
        log::debug!("ignoring drop of unknown block type `{dragged_type}`");
        return Err(TreeError::UnknownBlockType(dragged_type.to_string()));
    }

    let block = doc.create_block(kind);
    let id = block.id.clone();
    match target {
        DropTarget::Root => doc.insert_root(block)?,
        DropTarget::Container(container_id) => doc.insert_child(container_id, block)?,
    }
    log::debug!("placed `{id}` at {target:?}");
    Ok(id)
}
