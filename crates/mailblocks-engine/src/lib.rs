pub mod editing;
pub mod io;
pub mod models;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{
    BlockPath, Cmd, Direction, DropTarget, EmailDocument, IdGenerator, Parent, Patch, Snapshot,
    TreeError, place,
};
pub use io::*;
pub use models::{
    Block, BlockId, BlockKind, BlockSchema, ButtonShape, ButtonSize, ColumnAlignment, Content,
    EmailMeta, HeadingLevel, Styles,
};
pub use render::{CompileOptions, compile, compile_block, compile_with};
