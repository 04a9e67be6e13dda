use crate::editing::TreeError;
use crate::models::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Document version after the command
    pub version: u64,
    /// Whether the document changed
    pub changed: bool,
    /// Id of the block a drop created
    pub created: Option<BlockId>,
    /// Why the command was ignored, if it was
    pub error: Option<TreeError>,
}

impl Patch {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
