/*!
 * # Editing Core Module
 *
 * Owns the email's block tree and every way it may change.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: the block tree
 * - An ordered root sequence of [`Block`](crate::models::Block)s held by
 *   [`EmailDocument`]
 * - Only `container` and `columns` blocks own children; ids are unique
 *   document-wide
 * - The sequence is copied on write, so readers hold consistent
 *   **Snapshots** while edits continue
 *
 * ### 2. Command-Based Editing
 * - UI events map onto the **`Cmd`** enum; `EmailDocument::apply` runs one
 *   and returns a **`Patch`** describing the outcome
 * - Each edit is also available as a direct method returning
 *   `Result<_, TreeError>`
 * - Edits are total: a misdirected event leaves the tree untouched
 *
 * ### 3. Shared Tree Walk
 * - Every id-addressed edit resolves its target through **`tree`**
 *   (depth-first, first match wins) and mutates through the resulting path
 *
 * ### 4. Placement
 * - A drop names a palette type and a **`DropTarget`**; **`place`** creates
 *   the block with its defaults and inserts it at the root or into a
 *   container
 *
 * ## Module Structure
 *
 * - **`document`**: `EmailDocument`, the tree store
 * - **`commands`**: `Cmd` enum and its dispatch
 * - **`placement`**: drop resolution
 * - **`tree`**: paths, lookup, traversal, normalization
 * - **`ids`**: timestamp-based id generation
 * - **`snapshot`**: immutable views for rendering
 * - **`patch`**: command outcome
 * - **`error`**: `TreeError`
 */

pub mod commands;
pub mod document;
pub mod error;
pub mod ids;
pub mod patch;
pub mod placement;
pub mod snapshot;
pub mod tree;

// Public API re-exports
pub use commands::Cmd;
pub use document::{Direction, EmailDocument};
pub use error::TreeError;
pub use ids::IdGenerator;
pub use patch::Patch;
pub use placement::{DropTarget, place};
pub use snapshot::Snapshot;
pub use tree::{BlockPath, Parent};
