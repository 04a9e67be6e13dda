use crate::editing::document::Direction;
use crate::editing::placement::{DropTarget, place};
use crate::editing::tree::Parent;
use crate::editing::{EmailDocument, TreeError};
use crate::models::{
    BlockId, ButtonShape, ButtonSize, ColumnAlignment, Content, EmailMeta, HeadingLevel, Styles,
};

/// Every edit the surrounding UI can request
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// A palette item was dropped on the canvas or into a container
    Drop {
        block_type: String,
        target: DropTarget,
    },
    Move {
        parent: Parent,
        id: BlockId,
        direction: Direction,
    },
    Remove {
        parent: Parent,
        id: BlockId,
    },
    PatchContent {
        id: BlockId,
        content: Content,
    },
    PatchStyles {
        id: BlockId,
        styles: Styles,
    },
    SetButtonSize {
        id: BlockId,
        size: ButtonSize,
    },
    SetButtonShape {
        id: BlockId,
        shape: ButtonShape,
    },
    SetHeadingLevel {
        id: BlockId,
        level: HeadingLevel,
    },
    SetColumnCount {
        id: BlockId,
        columns: u64,
    },
    SetColumnAlignment {
        id: BlockId,
        alignment: ColumnAlignment,
    },
    SetMeta(EmailMeta),
}

/// Run a command against the document. Returns the id of a created block.
pub(crate) fn execute(doc: &mut EmailDocument, cmd: Cmd) -> Result<Option<BlockId>, TreeError> {
    match cmd {
        Cmd::Drop { block_type, target } => place(doc, &block_type, &target).map(Some),
        Cmd::Move {
            parent,
            id,
            direction,
        } => doc.move_block(&parent, &id, direction).map(|_| None),
        Cmd::Remove { parent, id } => doc.remove(&parent, &id).map(|_| None),
        Cmd::PatchContent { id, content } => doc.patch_content(&id, &content).map(|_| None),
        Cmd::PatchStyles { id, styles } => doc.patch_styles(&id, &styles).map(|_| None),
        Cmd::SetButtonSize { id, size } => doc.set_button_size(&id, size).map(|_| None),
        Cmd::SetButtonShape { id, shape } => doc.set_button_shape(&id, shape).map(|_| None),
        Cmd::SetHeadingLevel { id, level } => doc.set_heading_level(&id, level).map(|_| None),
        Cmd::SetColumnCount { id, columns } => doc.set_column_count(&id, columns).map(|_| None),
        Cmd::SetColumnAlignment { id, alignment } => {
            doc.set_column_alignment(&id, alignment).map(|_| None)
        }
        Cmd::SetMeta(meta) => {
            doc.set_meta(meta);
            Ok(None)
        }
    }
}
