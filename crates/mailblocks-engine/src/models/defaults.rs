//! Palette defaults and the style-editor tables bound to them.
//!
//! Every freshly dropped block starts from [`default_content`] and
//! [`default_styles`] for its kind. Both are total over [`BlockKind`];
//! unsupported kinds get empty maps.

use serde_json::json;

use super::block::BlockKind;
use super::content::Content;
use super::styles::Styles;

fn base_styles() -> Styles {
    Styles::new()
        .with("padding", "1rem")
        .with("margin", "0")
        .with("color", "#000000")
        .with("fontSize", "16px")
        .with("fontFamily", "Arial, sans-serif")
}

pub fn default_content(kind: &BlockKind) -> Content {
    match kind {
        BlockKind::Container => Content::new(),
        BlockKind::Heading => Content::new()
            .with("text", "Enter heading")
            .with("level", "h1"),
        BlockKind::Text => Content::new().with("text", "Enter your text here"),
        BlockKind::Image => Content::new().with("src", "").with("alt", ""),
        BlockKind::Button => Content::new()
            .with("text", "Click me")
            .with("url", "#")
            .with("width", "auto")
            .with("size", ButtonSize::Md.as_str())
            .with("style", ButtonShape::Rounded.as_str()),
        BlockKind::Divider => Content::new().with("height", 1),
        BlockKind::Columns => Content::new()
            .with("columns", 2)
            .with("columnSizes", json!([1, 1]))
            .with("gap", 16)
            .with("alignment", ColumnAlignment::Top.as_str()),
        BlockKind::Unsupported(_) => Content::new(),
    }
}

pub fn default_styles(kind: &BlockKind) -> Styles {
    match kind {
        BlockKind::Container => Styles::new()
            .with("padding", "20px")
            .with("margin", "0")
            .with("borderWidth", "0")
            .with("borderStyle", "solid")
            .with("borderColor", "#000000")
            .with("borderRadius", "0")
            .with("backgroundColor", "#ffffff"),
        BlockKind::Heading => base_styles()
            .with("fontSize", "24px")
            .with("fontWeight", "bold"),
        BlockKind::Text | BlockKind::Image => base_styles(),
        BlockKind::Button => Styles::new()
            .with("display", "inline-block")
            .with("padding", ButtonSize::Md.padding())
            .with("backgroundColor", "#4F46E5")
            .with("color", "#ffffff")
            .with("textDecoration", "none")
            .with("borderRadius", ButtonShape::Rounded.border_radius())
            .with("fontSize", ButtonSize::Md.font_size())
            .with("fontWeight", "500")
            .with("textAlign", "center")
            .with("cursor", "pointer"),
        BlockKind::Divider => Styles::new()
            .with("borderTop", "1px solid #E5E7EB")
            .with("margin", "1rem 0"),
        BlockKind::Columns => Styles::new()
            .with("display", "flex")
            .with("gap", "16px")
            .with("alignItems", ColumnAlignment::Top.as_str())
            .with("backgroundColor", "transparent")
            .with("padding", "0"),
        BlockKind::Unsupported(_) => Styles::new(),
    }
}

/// Button size presets, bound to `fontSize` and `padding`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSize {
    Xs,
    Sm,
    Md,
    Lg,
}

impl ButtonSize {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "xs" => Some(Self::Xs),
            "sm" => Some(Self::Sm),
            "md" => Some(Self::Md),
            "lg" => Some(Self::Lg),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }

    pub fn font_size(self) -> &'static str {
        match self {
            Self::Xs => "12px",
            Self::Sm => "14px",
            Self::Md => "16px",
            Self::Lg => "18px",
        }
    }

    pub fn padding(self) -> &'static str {
        match self {
            Self::Xs => "6px 12px",
            Self::Sm => "8px 16px",
            Self::Md => "10px 20px",
            Self::Lg => "12px 24px",
        }
    }

    /// Content and style patches applied together when the size changes
    pub fn patches(self) -> (Content, Styles) {
        (
            Content::new().with("size", self.as_str()),
            Styles::new()
                .with("fontSize", self.font_size())
                .with("padding", self.padding()),
        )
    }
}

/// Button corner presets, bound to `borderRadius`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonShape {
    Rectangle,
    Rounded,
    Pill,
}

impl ButtonShape {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rectangle" => Some(Self::Rectangle),
            "rounded" => Some(Self::Rounded),
            "pill" => Some(Self::Pill),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Rounded => "rounded",
            Self::Pill => "pill",
        }
    }

    pub fn border_radius(self) -> &'static str {
        match self {
            Self::Rectangle => "0",
            Self::Rounded => "6px",
            Self::Pill => "9999px",
        }
    }

    pub fn patches(self) -> (Content, Styles) {
        (
            Content::new().with("style", self.as_str()),
            Styles::new().with("borderRadius", self.border_radius()),
        )
    }
}

/// Heading presets, bound to `fontSize` and `fontWeight`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }

    pub fn font_size(self) -> &'static str {
        match self {
            Self::H1 => "32px",
            Self::H2 => "24px",
            Self::H3 => "20px",
        }
    }

    pub fn font_weight(self) -> &'static str {
        match self {
            Self::H1 => "700",
            Self::H2 => "600",
            Self::H3 => "500",
        }
    }

    pub fn patches(self) -> (Content, Styles) {
        (
            Content::new().with("level", self.as_str()),
            Styles::new()
                .with("fontSize", self.font_size())
                .with("fontWeight", self.font_weight()),
        )
    }
}

/// Vertical alignment of column cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlignment {
    Top,
    Center,
    Bottom,
}

impl ColumnAlignment {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }

    /// Table cell `valign` value
    pub fn valign(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "middle",
            Self::Bottom => "bottom",
        }
    }

    pub fn patches(self) -> (Content, Styles) {
        (
            Content::new().with("alignment", self.as_str()),
            Styles::new().with("alignItems", self.as_str()),
        )
    }
}

pub const MIN_COLUMNS: u64 = 2;
pub const MAX_COLUMNS: u64 = 4;

/// Content patch for a new column count; sizes reset to equal shares.
///
/// `None` if the count is outside the supported range.
pub fn column_count_patch(columns: u64) -> Option<Content> {
    if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns) {
        return None;
    }
    let sizes: Vec<u64> = vec![1; columns as usize];
    Some(
        Content::new()
            .with("columns", columns)
            .with("columnSizes", json!(sizes)),
    )
}

/// What the style editor may change for a given kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSchema {
    pub content_fields: &'static [&'static str],
    pub style_properties: &'static [&'static str],
}

const TEXT_STYLE_PROPERTIES: &[&str] = &[
    "color",
    "backgroundColor",
    "fontSize",
    "fontFamily",
    "fontWeight",
    "textAlign",
    "padding",
    "margin",
];

impl BlockSchema {
    pub fn for_kind(kind: &BlockKind) -> Self {
        match kind {
            BlockKind::Container => Self {
                content_fields: &[],
                style_properties: &[
                    "padding",
                    "margin",
                    "borderWidth",
                    "borderStyle",
                    "borderColor",
                    "borderRadius",
                    "backgroundColor",
                ],
            },
            BlockKind::Heading => Self {
                content_fields: &["text", "level"],
                style_properties: TEXT_STYLE_PROPERTIES,
            },
            BlockKind::Text => Self {
                content_fields: &["text"],
                style_properties: TEXT_STYLE_PROPERTIES,
            },
            BlockKind::Image => Self {
                content_fields: &["src", "alt"],
                style_properties: &["padding", "margin"],
            },
            BlockKind::Button => Self {
                content_fields: &["text", "url", "width", "size", "style"],
                style_properties: &[
                    "color",
                    "backgroundColor",
                    "fontSize",
                    "fontWeight",
                    "padding",
                    "borderRadius",
                ],
            },
            BlockKind::Divider => Self {
                content_fields: &["height"],
                style_properties: &["borderTopColor", "borderTopWidth", "padding"],
            },
            BlockKind::Columns => Self {
                content_fields: &["columns", "columnSizes", "gap", "alignment"],
                style_properties: &["backgroundColor", "padding", "alignItems"],
            },
            BlockKind::Unsupported(_) => Self {
                content_fields: &[],
                style_properties: &[],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_heading_defaults() {
        let content = default_content(&BlockKind::Heading);
        assert_eq!(content.str_field("text").as_deref(), Some("Enter heading"));
        assert_eq!(content.str_field("level").as_deref(), Some("h1"));

        let styles = default_styles(&BlockKind::Heading);
        assert_eq!(styles.get("fontSize"), Some("24px"));
        assert_eq!(styles.get("fontWeight"), Some("bold"));
        assert_snapshot!(
            styles.to_css(),
            @"padding: 1rem; margin: 0; color: #000000; font-size: 24px; font-family: Arial, sans-serif; font-weight: bold"
        );
    }

    #[test]
    fn test_text_defaults() {
        let content = default_content(&BlockKind::Text);
        assert_eq!(
            content.str_field("text").as_deref(),
            Some("Enter your text here")
        );
        assert_eq!(default_styles(&BlockKind::Text), base_styles());
    }

    #[test]
    fn test_button_defaults() {
        let content = default_content(&BlockKind::Button);
        assert_eq!(content.str_field("text").as_deref(), Some("Click me"));
        assert_eq!(content.str_field("url").as_deref(), Some("#"));
        assert_eq!(content.str_field("width").as_deref(), Some("auto"));
        assert_eq!(content.str_field("size").as_deref(), Some("md"));
        assert_eq!(content.str_field("style").as_deref(), Some("rounded"));

        let styles = default_styles(&BlockKind::Button);
        assert_eq!(styles.get("borderRadius"), Some("6px"));
        assert_eq!(styles.get("fontSize"), Some("16px"));
        assert_eq!(styles.get("padding"), Some("10px 20px"));
    }

    #[test]
    fn test_columns_defaults() {
        let content = default_content(&BlockKind::Columns);
        assert_eq!(content.u64_field("columns"), Some(2));
        assert_eq!(content.number_list("columnSizes"), Some(vec![1.0, 1.0]));
        assert_eq!(content.u64_field("gap"), Some(16));
        assert_eq!(content.str_field("alignment").as_deref(), Some("top"));
        assert!(content.get("children").is_none());
    }

    #[test]
    fn test_unsupported_kind_gets_empty_maps() {
        let kind = BlockKind::from_tag("spacer");
        assert!(default_content(&kind).is_empty());
        assert!(default_styles(&kind).is_empty());
    }

    #[rstest]
    #[case(ButtonSize::Xs, "12px", "6px 12px")]
    #[case(ButtonSize::Sm, "14px", "8px 16px")]
    #[case(ButtonSize::Md, "16px", "10px 20px")]
    #[case(ButtonSize::Lg, "18px", "12px 24px")]
    fn test_button_size_table(
        #[case] size: ButtonSize,
        #[case] font_size: &str,
        #[case] padding: &str,
    ) {
        let (content, styles) = size.patches();
        assert_eq!(ButtonSize::parse(size.as_str()), Some(size));
        assert_eq!(content.str_field("size").as_deref(), Some(size.as_str()));
        assert_eq!(styles.get("fontSize"), Some(font_size));
        assert_eq!(styles.get("padding"), Some(padding));
    }

    #[rstest]
    #[case("rectangle", "0")]
    #[case("rounded", "6px")]
    #[case("pill", "9999px")]
    fn test_button_shape_table(#[case] name: &str, #[case] radius: &str) {
        let shape = ButtonShape::parse(name).unwrap();
        assert_eq!(shape.border_radius(), radius);
        assert_eq!(shape.patches().1.get("borderRadius"), Some(radius));
    }

    #[rstest]
    #[case("h1", "32px", "700")]
    #[case("h2", "24px", "600")]
    #[case("h3", "20px", "500")]
    fn test_heading_level_table(
        #[case] name: &str,
        #[case] font_size: &str,
        #[case] font_weight: &str,
    ) {
        let level = HeadingLevel::parse(name).unwrap();
        let (content, styles) = level.patches();
        assert_eq!(content.str_field("level").as_deref(), Some(name));
        assert_eq!(styles.get("fontSize"), Some(font_size));
        assert_eq!(styles.get("fontWeight"), Some(font_weight));
        assert_eq!(HeadingLevel::parse("h4"), None);
    }

    #[rstest]
    #[case(1, None)]
    #[case(2, Some(vec![1.0, 1.0]))]
    #[case(4, Some(vec![1.0, 1.0, 1.0, 1.0]))]
    #[case(5, None)]
    fn test_column_count_patch(#[case] columns: u64, #[case] sizes: Option<Vec<f64>>) {
        let patch = column_count_patch(columns);
        assert_eq!(patch.and_then(|p| p.number_list("columnSizes")), sizes);
    }

    #[test]
    fn test_alignment_maps_center_to_middle() {
        assert_eq!(ColumnAlignment::Center.valign(), "middle");
        assert_eq!(ColumnAlignment::parse("sideways"), None);
    }

    #[test]
    fn test_schema_covers_default_content_fields() {
        for kind in BlockKind::PALETTE {
            let schema = BlockSchema::for_kind(&kind);
            for (field, _) in default_content(&kind).iter() {
                assert!(
                    schema.content_fields.contains(&field.as_str()),
                    "{kind}: `{field}` missing from schema"
                );
            }
        }
    }
}
