use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::content::Content;
use super::styles::Styles;

/// Document-wide unique identifier of a block.
///
/// Assigned once at creation time and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The closed palette of block types.
///
/// `Unsupported` keeps whatever tag a foreign document carried so that it
/// still loads; it renders to nothing and holds no children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Container,
    Heading,
    Text,
    Image,
    Button,
    Divider,
    Columns,
    Unsupported(String),
}

impl BlockKind {
    /// Creatable kinds, in toolbar order.
    pub const PALETTE: [BlockKind; 7] = [
        BlockKind::Container,
        BlockKind::Heading,
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Button,
        BlockKind::Divider,
        BlockKind::Columns,
    ];

    /// Parse a type tag. Total: unknown tags become `Unsupported`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "container" => BlockKind::Container,
            "heading" => BlockKind::Heading,
            "text" => BlockKind::Text,
            "image" => BlockKind::Image,
            "button" => BlockKind::Button,
            "divider" => BlockKind::Divider,
            "columns" => BlockKind::Columns,
            other => BlockKind::Unsupported(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Container => "container",
            BlockKind::Heading => "heading",
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Button => "button",
            BlockKind::Divider => "divider",
            BlockKind::Columns => "columns",
            BlockKind::Unsupported(tag) => tag,
        }
    }

    /// Only containers and columns own child blocks
    pub fn accepts_children(&self) -> bool {
        matches!(self, BlockKind::Container | BlockKind::Columns)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, BlockKind::Unsupported(_))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BlockKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.tag().to_string()
    }
}

/// A node of the email document tree.
///
/// `children` is only ever non-empty for kinds where
/// [`BlockKind::accepts_children`] holds; the tree store enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub styles: Styles,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            content: Content::default(),
            styles: Styles::default(),
            children: Vec::new(),
        }
    }

    /// Build a block carrying the palette defaults for its kind
    pub fn with_defaults(id: impl Into<BlockId>, kind: BlockKind) -> Self {
        let content = super::defaults::default_content(&kind);
        let styles = super::defaults::default_styles(&kind);
        Self {
            id: id.into(),
            kind,
            content,
            styles,
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }
}
