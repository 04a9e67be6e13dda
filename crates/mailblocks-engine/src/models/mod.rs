pub mod block;
pub mod content;
pub mod defaults;
pub mod meta;
pub mod styles;

pub use block::{Block, BlockId, BlockKind};
pub use content::Content;
pub use defaults::{BlockSchema, ButtonShape, ButtonSize, ColumnAlignment, HeadingLevel};
pub use meta::EmailMeta;
pub use styles::Styles;
