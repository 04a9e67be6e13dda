use std::collections::HashSet;
use std::sync::Arc;

use crate::editing::tree::{self, Parent};
use crate::editing::{Cmd, IdGenerator, Patch, Snapshot, TreeError};
use crate::io::EmailTemplate;
use crate::models::defaults::column_count_patch;
use crate::models::{
    Block, BlockId, BlockKind, ButtonShape, ButtonSize, ColumnAlignment, Content, EmailMeta,
    HeadingLevel, Styles,
};
use crate::render::{self, CompileOptions};

/// Direction of a sibling swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Single owner of an email's block tree and metadata.
///
/// ## Editing model
/// - The root sequence is held behind an `Arc` and copied on write, so a
///   [`Snapshot`] taken before an edit keeps seeing the old tree.
/// - Every edit is total: it either applies completely or returns a
///   [`TreeError`] and leaves the document untouched. Nothing panics on a
///   stale or misdirected UI event.
/// - `version` increments only when the tree or the metadata actually
///   changed; the compiled HTML is memoized against it.
///
/// ```rust
/// # use mailblocks_engine::{EmailDocument, BlockKind, DropTarget, place};
/// let mut doc = EmailDocument::new();
/// let container = place(&mut doc, "container", &DropTarget::Root).unwrap();
/// place(&mut doc, "text", &DropTarget::Container(container)).unwrap();
///
/// assert_eq!(doc.block_count(), 2);
/// assert!(doc.html().contains("Enter your text here"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailDocument {
    blocks: Arc<Vec<Block>>,
    meta: EmailMeta,
    version: u64,
    ids: IdGenerator,
    compiled: Option<(u64, String)>,
}

impl EmailDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meta(meta: EmailMeta) -> Self {
        Self {
            meta,
            ..Self::default()
        }
    }

    /// Adopt blocks from outside (a loaded template), restoring the nesting
    /// and id-uniqueness invariants on the way in.
    pub fn from_blocks(blocks: Vec<Block>, meta: EmailMeta) -> Self {
        let blocks = tree::normalize(blocks, &mut HashSet::new());
        Self {
            blocks: Arc::new(blocks),
            meta,
            ..Self::default()
        }
    }

    pub fn from_template(template: EmailTemplate) -> Self {
        Self::from_blocks(template.blocks, template.meta)
    }

    pub fn to_template(&self) -> EmailTemplate {
        EmailTemplate {
            meta: self.meta.clone(),
            blocks: self.blocks.to_vec(),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn meta(&self) -> &EmailMeta {
        &self.meta
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            blocks: Arc::clone(&self.blocks),
            meta: self.meta.clone(),
        }
    }

    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        tree::find(&self.blocks, id)
    }

    pub fn parent_of(&self, id: &BlockId) -> Option<Parent> {
        let path = tree::locate(&self.blocks, id)?;
        match path.parent() {
            None => Some(Parent::Root),
            Some(parent) => tree::get(&self.blocks, &parent).map(|b| Parent::Block(b.id.clone())),
        }
    }

    pub fn block_count(&self) -> usize {
        tree::count(&self.blocks)
    }

    /// New block with palette defaults and an id unused in this document
    pub fn create_block(&mut self, kind: BlockKind) -> Block {
        loop {
            let id = self.ids.next_id(&kind);
            if !tree::contains(&self.blocks, &id) {
                return Block::with_defaults(id, kind);
            }
        }
    }

    /// Apply a UI command, reporting the outcome instead of failing
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let before = self.version;
        let result = crate::editing::commands::execute(self, cmd);
        let (created, error) = match result {
            Ok(created) => (created, None),
            Err(err) => (None, Some(err)),
        };
        Patch {
            version: self.version,
            changed: self.version != before,
            created,
            error,
        }
    }

    // ============ Structural edits ============

    /// Append to the root sequence
    pub fn insert_root(&mut self, block: Block) -> Result<(), TreeError> {
        self.insert(&Parent::Root, block)
            .inspect_err(|err| log::debug!("insert_root ignored: {err}"))
    }

    /// Append to the child list of a container or columns block
    pub fn insert_child(&mut self, container_id: &BlockId, block: Block) -> Result<(), TreeError> {
        self.insert(&Parent::Block(container_id.clone()), block)
            .inspect_err(|err| log::debug!("insert_child ignored: {err}"))
    }

    pub fn insert(&mut self, parent: &Parent, block: Block) -> Result<(), TreeError> {
        self.children_of(parent)?;

        if let Some(duplicate) = tree::collect_ids(std::slice::from_ref(&block))
            .into_iter()
            .find(|id| tree::contains(&self.blocks, id))
        {
            return Err(TreeError::DuplicateId(duplicate.clone()));
        }

        // A fresh id set never rejects the top block itself
        let Some(block) = tree::normalize(vec![block], &mut HashSet::new()).pop() else {
            return Ok(());
        };

        self.children_of_mut(parent)?.push(block);
        self.touch();
        Ok(())
    }

    pub fn remove_child(
        &mut self,
        container_id: &BlockId,
        block_id: &BlockId,
    ) -> Result<Block, TreeError> {
        self.remove(&Parent::Block(container_id.clone()), block_id)
            .inspect_err(|err| log::debug!("remove_child ignored: {err}"))
    }

    pub fn remove_root(&mut self, block_id: &BlockId) -> Result<Block, TreeError> {
        self.remove(&Parent::Root, block_id)
            .inspect_err(|err| log::debug!("remove_root ignored: {err}"))
    }

    /// Detach a block (and its subtree) from its parent's child list
    pub fn remove(&mut self, parent: &Parent, block_id: &BlockId) -> Result<Block, TreeError> {
        let index = self.child_index(parent, block_id)?;
        let removed = self.children_of_mut(parent)?.remove(index);
        self.touch();
        Ok(removed)
    }

    pub fn move_child(
        &mut self,
        container_id: &BlockId,
        block_id: &BlockId,
        direction: Direction,
    ) -> Result<(), TreeError> {
        self.move_block(&Parent::Block(container_id.clone()), block_id, direction)
            .inspect_err(|err| log::debug!("move_child ignored: {err}"))
    }

    pub fn move_root(&mut self, block_id: &BlockId, direction: Direction) -> Result<(), TreeError> {
        self.move_block(&Parent::Root, block_id, direction)
            .inspect_err(|err| log::debug!("move_root ignored: {err}"))
    }

    /// Swap a block with its neighbour. Moving past either end is a no-op.
    pub fn move_block(
        &mut self,
        parent: &Parent,
        block_id: &BlockId,
        direction: Direction,
    ) -> Result<(), TreeError> {
        let index = self.child_index(parent, block_id)?;
        let len = self.children_of(parent)?.len();
        let neighbour = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&next| next < len),
        };
        let Some(neighbour) = neighbour else {
            return Ok(());
        };

        self.children_of_mut(parent)?.swap(index, neighbour);
        self.touch();
        Ok(())
    }

    // ============ Field edits ============

    /// Shallow-merge content fields into the block with `block_id`
    pub fn patch_content(&mut self, block_id: &BlockId, patch: &Content) -> Result<(), TreeError> {
        self.patch_fields(block_id, patch, &Styles::new())
            .inspect_err(|err| log::debug!("patch_content ignored: {err}"))
    }

    /// Shallow-merge style properties into the block with `block_id`
    pub fn patch_styles(&mut self, block_id: &BlockId, patch: &Styles) -> Result<(), TreeError> {
        self.patch_fields(block_id, &Content::new(), patch)
            .inspect_err(|err| log::debug!("patch_styles ignored: {err}"))
    }

    /// Merge a content patch and a style patch as one edit
    pub fn patch_fields(
        &mut self,
        block_id: &BlockId,
        content: &Content,
        styles: &Styles,
    ) -> Result<(), TreeError> {
        let path = tree::locate(&self.blocks, block_id)
            .ok_or_else(|| TreeError::TargetNotFound(block_id.clone()))?;
        if content.is_empty() && styles.is_empty() {
            return Ok(());
        }

        let blocks = Arc::make_mut(&mut self.blocks).as_mut_slice();
        let block = tree::get_mut(blocks, &path)
            .ok_or_else(|| TreeError::TargetNotFound(block_id.clone()))?;
        let content_changed = block.content.merge(content);
        let styles_changed = block.styles.merge(styles);
        if content_changed || styles_changed {
            self.touch();
        }
        Ok(())
    }

    pub fn set_button_size(&mut self, block_id: &BlockId, size: ButtonSize) -> Result<(), TreeError> {
        let (content, styles) = size.patches();
        self.patch_fields(block_id, &content, &styles)
    }

    pub fn set_button_shape(
        &mut self,
        block_id: &BlockId,
        shape: ButtonShape,
    ) -> Result<(), TreeError> {
        let (content, styles) = shape.patches();
        self.patch_fields(block_id, &content, &styles)
    }

    pub fn set_heading_level(
        &mut self,
        block_id: &BlockId,
        level: HeadingLevel,
    ) -> Result<(), TreeError> {
        let (content, styles) = level.patches();
        self.patch_fields(block_id, &content, &styles)
    }

    pub fn set_column_alignment(
        &mut self,
        block_id: &BlockId,
        alignment: ColumnAlignment,
    ) -> Result<(), TreeError> {
        let (content, styles) = alignment.patches();
        self.patch_fields(block_id, &content, &styles)
    }

    /// Change the column count; sizes reset to equal shares
    pub fn set_column_count(&mut self, block_id: &BlockId, columns: u64) -> Result<(), TreeError> {
        let patch = column_count_patch(columns).ok_or(TreeError::InvalidColumnCount(columns))?;
        self.patch_fields(block_id, &patch, &Styles::new())
    }

    // ============ Metadata ============

    pub fn set_meta(&mut self, meta: EmailMeta) {
        if self.meta != meta {
            self.meta = meta;
            self.touch();
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let meta = EmailMeta {
            name: name.into(),
            ..self.meta.clone()
        };
        self.set_meta(meta);
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        let meta = EmailMeta {
            subject: subject.into(),
            ..self.meta.clone()
        };
        self.set_meta(meta);
    }

    pub fn set_snippet(&mut self, snippet: impl Into<String>) {
        let meta = EmailMeta {
            snippet: snippet.into(),
            ..self.meta.clone()
        };
        self.set_meta(meta);
    }

    // ============ Output ============

    /// Compiled HTML for the current version, recompiled only after edits
    pub fn html(&mut self) -> &str {
        let stale = self
            .compiled
            .as_ref()
            .is_none_or(|(version, _)| *version != self.version);
        if stale {
            log::trace!("compiling document at version {}", self.version);
            let html = render::compile(&self.blocks, &self.meta);
            self.compiled = Some((self.version, html));
        }
        match &self.compiled {
            Some((_, html)) => html.as_str(),
            None => "",
        }
    }

    pub fn html_with(&self, options: &CompileOptions) -> String {
        render::compile_with(&self.blocks, &self.meta, options)
    }

    // ============ Internals ============

    fn touch(&mut self) {
        self.version += 1;
    }

    fn child_index(&self, parent: &Parent, block_id: &BlockId) -> Result<usize, TreeError> {
        self.children_of(parent)?
            .iter()
            .position(|child| &child.id == block_id)
            .ok_or_else(|| TreeError::ChildNotFound {
                parent: parent.clone(),
                child: block_id.clone(),
            })
    }

    fn children_of(&self, parent: &Parent) -> Result<&Vec<Block>, TreeError> {
        match parent {
            Parent::Root => Ok(self.blocks.as_ref()),
            Parent::Block(id) => {
                let block = tree::find(&self.blocks, id)
                    .ok_or_else(|| TreeError::TargetNotFound(id.clone()))?;
                if !block.kind.accepts_children() {
                    return Err(TreeError::NotAContainer(id.clone()));
                }
                Ok(&block.children)
            }
        }
    }

    /// Mutable child list; validates before the copy-on-write clone
    fn children_of_mut(&mut self, parent: &Parent) -> Result<&mut Vec<Block>, TreeError> {
        match parent {
            Parent::Root => Ok(Arc::make_mut(&mut self.blocks)),
            Parent::Block(id) => {
                let path = tree::locate(&self.blocks, id)
                    .ok_or_else(|| TreeError::TargetNotFound(id.clone()))?;
                let accepts = tree::get(&self.blocks, &path)
                    .is_some_and(|block| block.kind.accepts_children());
                if !accepts {
                    return Err(TreeError::NotAContainer(id.clone()));
                }
                let blocks = Arc::make_mut(&mut self.blocks).as_mut_slice();
                let block = tree::get_mut(blocks, &path)
                    .ok_or_else(|| TreeError::TargetNotFound(id.clone()))?;
                Ok(&mut block.children)
            }
        }
    }
}

impl PartialEq for EmailDocument {
    fn eq(&self, other: &Self) -> bool {
        // The id generator and compile cache are derived state
        self.blocks == other.blocks && self.meta == other.meta && self.version == other.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{block, ids_of};
    use pretty_assertions::assert_eq;

    fn doc_with_container() -> EmailDocument {
        let mut doc = EmailDocument::new();
        doc.insert_root(block("container-1", BlockKind::Container))
            .unwrap();
        doc
    }

    // ============ Insert ============

    #[test]
    fn test_insert_root_appends() {
        let mut doc = EmailDocument::new();
        doc.insert_root(block("heading-1", BlockKind::Heading)).unwrap();
        doc.insert_root(block("text-1", BlockKind::Text)).unwrap();

        assert_eq!(ids_of(doc.blocks()), vec!["heading-1", "text-1"]);
        assert_eq!(doc.version(), 2);
    }

    #[test]
    fn test_insert_child_into_nested_container() {
        let mut doc = doc_with_container();
        doc.insert_child(&"container-1".into(), block("columns-1", BlockKind::Columns))
            .unwrap();
        doc.insert_child(&"columns-1".into(), block("text-1", BlockKind::Text))
            .unwrap();

        assert_eq!(
            doc.parent_of(&"text-1".into()),
            Some(Parent::Block("columns-1".into()))
        );
        assert_eq!(doc.parent_of(&"container-1".into()), Some(Parent::Root));
    }

    #[test]
    fn test_insert_child_missing_target() {
        let mut doc = doc_with_container();
        let before = doc.clone();

        let err = doc
            .insert_child(&"nope".into(), block("text-1", BlockKind::Text))
            .unwrap_err();

        assert_eq!(err, TreeError::TargetNotFound("nope".into()));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_insert_child_into_leaf() {
        let mut doc = EmailDocument::new();
        doc.insert_root(block("text-1", BlockKind::Text)).unwrap();
        let before = doc.clone();

        let err = doc
            .insert_child(&"text-1".into(), block("text-2", BlockKind::Text))
            .unwrap_err();

        assert_eq!(err, TreeError::NotAContainer("text-1".into()));
        assert_eq!(doc, before);
        assert!(doc.blocks()[0].children.is_empty());
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut doc = doc_with_container();
        let dup = block("other", BlockKind::Container)
            .with_children(vec![block("container-1", BlockKind::Text)]);

        let err = doc.insert_root(dup).unwrap_err();

        assert_eq!(err, TreeError::DuplicateId("container-1".into()));
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn test_insert_strips_children_of_leaf_blocks() {
        let mut doc = EmailDocument::new();
        let leaf = block("text-1", BlockKind::Text)
            .with_children(vec![block("text-2", BlockKind::Text)]);

        doc.insert_root(leaf).unwrap();

        assert!(doc.find(&"text-1".into()).unwrap().children.is_empty());
        assert!(doc.find(&"text-2".into()).is_none());
    }

    // ============ Remove ============

    #[test]
    fn test_remove_child_keeps_sibling_order() {
        let mut doc = doc_with_container();
        let container: BlockId = "container-1".into();
        for id in ["a", "b", "c"] {
            doc.insert_child(&container, block(id, BlockKind::Text))
                .unwrap();
        }

        let removed = doc.remove_child(&container, &"b".into()).unwrap();

        assert_eq!(removed.id.as_str(), "b");
        assert_eq!(
            ids_of(&doc.find(&container).unwrap().children),
            vec!["a", "c"]
        );
    }

    #[test]
    fn test_remove_absent_child_is_noop() {
        let mut doc = doc_with_container();
        let before = doc.clone();

        let err = doc
            .remove_child(&"container-1".into(), &"ghost".into())
            .unwrap_err();

        assert!(matches!(err, TreeError::ChildNotFound { .. }));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_root_drops_subtree() {
        let mut doc = doc_with_container();
        doc.insert_child(&"container-1".into(), block("text-1", BlockKind::Text))
            .unwrap();

        doc.remove_root(&"container-1".into()).unwrap();

        assert_eq!(doc.block_count(), 0);
    }

    // ============ Move ============

    #[test]
    fn test_move_child_up_and_down() {
        let mut doc = doc_with_container();
        let container: BlockId = "container-1".into();
        for id in ["a", "b", "c"] {
            doc.insert_child(&container, block(id, BlockKind::Text))
                .unwrap();
        }

        doc.move_child(&container, &"c".into(), Direction::Up)
            .unwrap();
        assert_eq!(
            ids_of(&doc.find(&container).unwrap().children),
            vec!["a", "c", "b"]
        );

        doc.move_child(&container, &"a".into(), Direction::Down)
            .unwrap();
        assert_eq!(
            ids_of(&doc.find(&container).unwrap().children),
            vec!["c", "a", "b"]
        );
    }

    #[test]
    fn test_move_at_boundary_is_silent_noop() {
        let mut doc = EmailDocument::new();
        doc.insert_root(block("a", BlockKind::Text)).unwrap();
        doc.insert_root(block("b", BlockKind::Text)).unwrap();
        let version = doc.version();

        assert_eq!(doc.move_root(&"a".into(), Direction::Up), Ok(()));
        assert_eq!(doc.move_root(&"b".into(), Direction::Down), Ok(()));

        assert_eq!(ids_of(doc.blocks()), vec!["a", "b"]);
        assert_eq!(doc.version(), version);
    }

    // ============ Patch ============

    #[test]
    fn test_patch_styles_deep_in_tree() {
        let mut doc = doc_with_container();
        doc.insert_child(&"container-1".into(), block("text-1", BlockKind::Text))
            .unwrap();

        doc.patch_styles(&"text-1".into(), &Styles::new().with("color", "#ff0000"))
            .unwrap();

        let text = doc.find(&"text-1".into()).unwrap();
        assert_eq!(text.styles.get("color"), Some("#ff0000"));
    }

    #[test]
    fn test_patch_missing_block() {
        let mut doc = doc_with_container();
        let err = doc
            .patch_content(&"ghost".into(), &Content::new().with("text", "x"))
            .unwrap_err();
        assert_eq!(err, TreeError::TargetNotFound("ghost".into()));
    }

    #[test]
    fn test_empty_patch_keeps_version() {
        let mut doc = doc_with_container();
        let before = doc.clone();

        doc.patch_styles(&"container-1".into(), &Styles::new()).unwrap();
        doc.patch_content(&"container-1".into(), &Content::new())
            .unwrap();

        assert_eq!(doc, before);
    }

    #[test]
    fn test_button_size_updates_content_and_styles_together() {
        let mut doc = EmailDocument::new();
        let button = doc.create_block(BlockKind::Button);
        let id = button.id.clone();
        doc.insert_root(button).unwrap();
        let version = doc.version();

        doc.set_button_size(&id, ButtonSize::Lg).unwrap();

        let button = doc.find(&id).unwrap();
        assert_eq!(button.content.str_field("size").as_deref(), Some("lg"));
        assert_eq!(button.styles.get("fontSize"), Some("18px"));
        assert_eq!(button.styles.get("padding"), Some("12px 24px"));
        assert_eq!(doc.version(), version + 1);
    }

    #[test]
    fn test_heading_level_rescales_font() {
        let mut doc = EmailDocument::new();
        doc.insert_root(block("heading-1", BlockKind::Heading)).unwrap();
        let id = BlockId::from("heading-1");

        doc.set_heading_level(&id, HeadingLevel::H3).unwrap();

        let heading = doc.find(&id).unwrap();
        assert_eq!(heading.content.str_field("level").as_deref(), Some("h3"));
        assert_eq!(heading.styles.get("fontSize"), Some("20px"));
        assert_eq!(heading.styles.get("fontWeight"), Some("500"));
        assert!(doc.html().contains("<h3 style=\"margin: 0; padding: 1rem;"));
        assert!(doc.html().contains("font-size: 20px"));
    }

    #[test]
    fn test_set_column_count_out_of_range() {
        let mut doc = EmailDocument::new();
        let columns = doc.create_block(BlockKind::Columns);
        let id = columns.id.clone();
        doc.insert_root(columns).unwrap();

        assert_eq!(
            doc.set_column_count(&id, 7),
            Err(TreeError::InvalidColumnCount(7))
        );
        doc.set_column_count(&id, 3).unwrap();
        assert_eq!(
            doc.find(&id).unwrap().content.number_list("columnSizes"),
            Some(vec![1.0, 1.0, 1.0])
        );
    }

    // ============ Snapshots and output ============

    #[test]
    fn test_snapshot_is_isolated_from_later_edits() {
        let mut doc = doc_with_container();
        let snapshot = doc.snapshot();

        doc.insert_child(&"container-1".into(), block("text-1", BlockKind::Text))
            .unwrap();

        assert!(snapshot.blocks()[0].children.is_empty());
        assert_eq!(doc.blocks()[0].children.len(), 1);
        assert!(snapshot.version < doc.version());
    }

    #[test]
    fn test_html_is_memoized_per_version() {
        let mut doc = doc_with_container();
        let first = doc.html().to_string();
        assert_eq!(doc.html(), first);

        doc.set_subject("Hello");
        assert_ne!(doc.html(), first);
        assert!(doc.html().contains("<title>Hello</title>"));
    }

    #[test]
    fn test_meta_setters_only_bump_on_change() {
        let mut doc = EmailDocument::new();
        doc.set_name("Welcome");
        doc.set_name("Welcome");

        assert_eq!(doc.meta().name, "Welcome");
        assert_eq!(doc.version(), 1);
    }

    #[test]
    fn test_template_round_trip_normalizes() {
        let template = EmailTemplate {
            meta: EmailMeta::new("n", "s", "p"),
            blocks: vec![
                block("a", BlockKind::Text),
                block("a", BlockKind::Heading),
            ],
        };

        let doc = EmailDocument::from_template(template);

        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.to_template().meta.subject, "s");
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn test_create_block_skips_ids_in_use() {
        let mut doc = EmailDocument::new();
        for _ in 0..20 {
            let block = doc.create_block(BlockKind::Text);
            doc.insert_root(block).unwrap();
        }
        assert_eq!(doc.block_count(), 20);
    }
}
