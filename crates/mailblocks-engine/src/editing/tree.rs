//! Tree-walk helpers shared by every id-addressed edit.
//!
//! Blocks are located by a depth-first pre-order search; the first match
//! wins. A located block is addressed by its [`BlockPath`] so the mutable
//! walk can go straight to it without searching again.

use std::collections::HashSet;
use std::fmt;

use crate::models::content::CHILDREN_FIELD;
use crate::models::{Block, BlockId};

/// Index path from the root sequence down to a block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockPath(Vec<usize>);

impl BlockPath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Position among siblings
    pub fn index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Path of the parent block; `None` for root-level blocks
    pub fn parent(&self) -> Option<BlockPath> {
        if self.0.len() < 2 {
            return None;
        }
        Some(BlockPath(self.0[..self.0.len() - 1].to_vec()))
    }
}

/// Owner of a sibling list: the root sequence or a container block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Block(BlockId),
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Root => f.write_str("root"),
            Parent::Block(id) => write!(f, "{id}"),
        }
    }
}

impl From<BlockId> for Parent {
    fn from(id: BlockId) -> Self {
        Parent::Block(id)
    }
}

pub fn locate(blocks: &[Block], id: &BlockId) -> Option<BlockPath> {
    let mut path = Vec::new();
    if locate_into(blocks, id, &mut path) {
        Some(BlockPath(path))
    } else {
        None
    }
}

fn locate_into(blocks: &[Block], id: &BlockId, path: &mut Vec<usize>) -> bool {
    for (index, block) in blocks.iter().enumerate() {
        path.push(index);
        if &block.id == id || locate_into(&block.children, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

pub fn get<'a>(blocks: &'a [Block], path: &BlockPath) -> Option<&'a Block> {
    let (first, rest) = path.0.split_first()?;
    let mut block = blocks.get(*first)?;
    for &index in rest {
        block = block.children.get(index)?;
    }
    Some(block)
}

pub fn get_mut<'a>(blocks: &'a mut [Block], path: &BlockPath) -> Option<&'a mut Block> {
    let (first, rest) = path.0.split_first()?;
    let mut block = blocks.get_mut(*first)?;
    for &index in rest {
        block = block.children.get_mut(index)?;
    }
    Some(block)
}

pub fn find<'a>(blocks: &'a [Block], id: &BlockId) -> Option<&'a Block> {
    locate(blocks, id).and_then(|path| get(blocks, &path))
}

pub fn contains(blocks: &[Block], id: &BlockId) -> bool {
    locate(blocks, id).is_some()
}

/// Pre-order visit of every block with its depth (root level is 0)
pub fn walk<'a>(blocks: &'a [Block], visitor: &mut impl FnMut(&'a Block, usize)) {
    walk_at(blocks, 0, visitor);
}

fn walk_at<'a>(blocks: &'a [Block], depth: usize, visitor: &mut impl FnMut(&'a Block, usize)) {
    for block in blocks {
        visitor(block, depth);
        walk_at(&block.children, depth + 1, visitor);
    }
}

pub fn collect_ids(blocks: &[Block]) -> Vec<&BlockId> {
    let mut ids = Vec::new();
    walk(blocks, &mut |block, _| ids.push(&block.id));
    ids
}

pub fn count(blocks: &[Block]) -> usize {
    let mut total = 0;
    walk(blocks, &mut |_, _| total += 1);
    total
}

/// A container or columns block that keeps a `children` list inside its
/// content map. Only `Block::children` is rendered.
pub fn has_inline_children(block: &Block) -> bool {
    block.kind.accepts_children() && block.content.get(CHILDREN_FIELD).is_some()
}

/// Restore the structural invariants on externally supplied blocks:
/// leaf kinds lose any children, and blocks repeating an id already seen
/// (in `seen` or earlier in the walk) are dropped with their subtree.
pub fn normalize(blocks: Vec<Block>, seen: &mut HashSet<BlockId>) -> Vec<Block> {
    blocks
        .into_iter()
        .filter_map(|mut block| {
            if !seen.insert(block.id.clone()) {
                log::warn!("dropping block with duplicate id `{}`", block.id);
                return None;
            }
            if has_inline_children(&block) {
                log::warn!(
                    "block `{}` ({}) has `{CHILDREN_FIELD}` in its content; only nested blocks are rendered",
                    block.id,
                    block.kind
                );
            }
            let children = std::mem::take(&mut block.children);
            if block.kind.accepts_children() {
                block.children = normalize(children, seen);
            } else if !children.is_empty() {
                log::warn!(
                    "dropping {} children of leaf block `{}` ({})",
                    children.len(),
                    block.id,
                    block.kind
                );
            }
            Some(block)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockKind;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Block> {
        vec![
            Block::new("heading-1", BlockKind::Heading),
            Block::new("container-1", BlockKind::Container).with_children(vec![
                Block::new("text-1", BlockKind::Text),
                Block::new("columns-1", BlockKind::Columns)
                    .with_children(vec![Block::new("image-1", BlockKind::Image)]),
            ]),
        ]
    }

    #[test]
    fn test_locate_nested() {
        let blocks = sample();
        let path = locate(&blocks, &"image-1".into()).unwrap();

        assert_eq!(path.indices(), &[1, 1, 0]);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.index(), Some(0));
        assert_eq!(path.parent(), Some(BlockPath::new(vec![1, 1])));
        assert_eq!(get(&blocks, &path).unwrap().id.as_str(), "image-1");
    }

    #[test]
    fn test_locate_missing() {
        assert!(locate(&sample(), &"nope".into()).is_none());
        assert!(locate(&[], &"nope".into()).is_none());
    }

    #[test]
    fn test_root_path_has_no_parent() {
        let path = locate(&sample(), &"heading-1".into()).unwrap();
        assert_eq!(path.parent(), None);
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut blocks = sample();
        let path = locate(&blocks, &"text-1".into()).unwrap();
        get_mut(&mut blocks, &path).unwrap().styles.set("color", "red");

        assert_eq!(
            find(&blocks, &"text-1".into()).unwrap().styles.get("color"),
            Some("red")
        );
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let blocks = sample();
        let mut seen = Vec::new();
        walk(&blocks, &mut |block, depth| {
            seen.push((block.id.as_str(), depth))
        });

        assert_eq!(
            seen,
            vec![
                ("heading-1", 0),
                ("container-1", 0),
                ("text-1", 1),
                ("columns-1", 1),
                ("image-1", 2),
            ]
        );
        assert_eq!(count(&blocks), 5);
        assert_eq!(collect_ids(&blocks).len(), 5);
    }

    #[test]
    fn test_normalize_strips_leaf_children_and_duplicates() {
        let blocks = vec![
            Block::new("text-1", BlockKind::Text)
                .with_children(vec![Block::new("orphan", BlockKind::Text)]),
            Block::new("container-1", BlockKind::Container)
                .with_children(vec![Block::new("text-1", BlockKind::Text)]),
        ];

        let normalized = normalize(blocks, &mut HashSet::new());

        assert!(normalized[0].children.is_empty());
        assert!(normalized[1].children.is_empty());
        assert!(!contains(&normalized, &"orphan".into()));
    }

    #[test]
    fn test_content_children_on_container_is_flagged() {
        use crate::models::Content;
        use serde_json::json;

        let stray = Block::new("container-1", BlockKind::Container)
            .with_content(Content::new().with(CHILDREN_FIELD, json!([{"id": "text-1"}])));
        let text = Block::new("text-1", BlockKind::Text)
            .with_content(Content::new().with(CHILDREN_FIELD, json!([])));

        assert!(has_inline_children(&stray));
        assert!(!has_inline_children(&text));
        assert!(!has_inline_children(&Block::new("columns-1", BlockKind::Columns)));

        let normalized = normalize(vec![stray], &mut HashSet::new());
        assert_eq!(normalized.len(), 1);
        assert!(normalized[0].children.is_empty());
    }
}
