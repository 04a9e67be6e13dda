use crate::editing::tree::Parent;
use crate::models::BlockId;

/// Why an edit was not applied.
///
/// Every edit is total: on error the document is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("no block with id `{0}`")]
    TargetNotFound(BlockId),
    #[error("block `{0}` cannot hold children")]
    NotAContainer(BlockId),
    #[error("block `{child}` is not a child of {parent}")]
    ChildNotFound { parent: Parent, child: BlockId },
    #[error("block id `{0}` already exists in the document")]
    DuplicateId(BlockId),
    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),
    #[error("unsupported column count {0}")]
    InvalidColumnCount(u64),
}
