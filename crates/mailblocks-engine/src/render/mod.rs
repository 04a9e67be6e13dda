//! Compiles the block tree into table-based HTML for email clients.
//!
//! [`compile`] is pure: the same blocks and metadata always produce the same
//! bytes. Malformed content never fails compilation; missing fields render
//! as empty text and unsupported block types render as nothing.

pub mod blocks;
pub mod document;
pub mod options;

pub use blocks::{compile_block, compile_block_with};
pub use document::{compile, compile_with};
pub use options::CompileOptions;
