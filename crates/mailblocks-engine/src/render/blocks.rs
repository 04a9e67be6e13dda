use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::defaults::MAX_COLUMNS;
use crate::models::{Block, BlockKind, ColumnAlignment, Content, Styles};
use crate::render::CompileOptions;

/// Style properties that only drive the editor's flex preview of columns
const PREVIEW_ONLY_PROPERTIES: &[&str] = &["display", "gap", "alignItems", "align-items"];

/// Compile one block and its descendants to an HTML fragment
pub fn compile_block(block: &Block) -> String {
    compile_block_with(block, &CompileOptions::default())
}

pub fn compile_block_with(block: &Block, options: &CompileOptions) -> String {
    match &block.kind {
        BlockKind::Container => emit_container(block, options),
        BlockKind::Heading => emit_heading(block, options),
        BlockKind::Text => emit_text(block, options),
        BlockKind::Image => emit_image(block, options),
        BlockKind::Button => emit_button(block, options),
        BlockKind::Divider => emit_divider(block, options),
        BlockKind::Columns => emit_columns(block, options),
        BlockKind::Unsupported(tag) => {
            log::trace!("skipping block `{}` of unsupported type `{tag}`", block.id);
            String::new()
        }
    }
}

fn emit_container(block: &Block, options: &CompileOptions) -> String {
    let inner = block
        .children
        .iter()
        .map(|child| compile_block_with(child, options))
        .collect::<Vec<_>>()
        .join("\n");
    layout_table(options, &style_attr(&block.styles.to_css()), &inner)
}

fn emit_heading(block: &Block, options: &CompileOptions) -> String {
    let css = block.styles.to_css();
    let tag = heading_tag(&block.content);
    let inner = format!(
        "<{tag}{style}>{text}</{tag}>",
        style = style_attr(&with_zero_margin(&css)),
        text = text_field(&block.content, "text"),
    );
    layout_table(options, &style_attr(&css), &inner)
}

fn emit_text(block: &Block, options: &CompileOptions) -> String {
    let css = block.styles.to_css();
    let inner = format!(
        "<p{style}>{text}</p>",
        style = style_attr(&with_zero_margin(&css)),
        text = text_field(&block.content, "text"),
    );
    layout_table(options, &style_attr(&css), &inner)
}

fn emit_image(block: &Block, options: &CompileOptions) -> String {
    let inner = format!(
        "<img src=\"{src}\" alt=\"{alt}\" class=\"responsive-image\" style=\"max-width: 100%; height: auto;\" />",
        src = attr_field(&block.content, "src"),
        alt = attr_field(&block.content, "alt"),
    );
    layout_table(
        options,
        " style=\"text-align: center; padding: 10px 0;\"",
        &inner,
    )
}

fn emit_button(block: &Block, options: &CompileOptions) -> String {
    let full_width = block.content.str_field("width").as_deref() == Some("full");
    let css = if full_width {
        let mut styles = block.styles.clone();
        styles.set("display", "block");
        styles.to_css()
    } else {
        block.styles.to_css()
    };
    let url = block.content.str_field("url").unwrap_or_else(|| "#".to_string());
    let inner = format!(
        "<a href=\"{href}\" target=\"_blank\"{style}>{text}</a>",
        href = encode_double_quoted_attribute(&url),
        style = style_attr(&css),
        text = text_field(&block.content, "text"),
    );
    layout_table(options, " align=\"center\" style=\"padding: 10px 0;\"", &inner)
}

fn emit_divider(block: &Block, options: &CompileOptions) -> String {
    let css = block.styles.to_css();
    let rule_css = if css.is_empty() {
        "font-size: 0; line-height: 0;".to_string()
    } else {
        format!("{css}; font-size: 0; line-height: 0;")
    };
    let inner = format!("<div{}>&nbsp;</div>", style_attr(&rule_css));
    layout_table(options, "", &inner)
}

fn emit_columns(block: &Block, options: &CompileOptions) -> String {
    let layout = ColumnLayout::from_content(&block.content);
    let rows = if block.children.is_empty() {
        vec![layout.row(&[], options)]
    } else {
        block
            .children
            .chunks(layout.weights.len())
            .map(|chunk| layout.row(chunk, options))
            .collect()
    };
    let grid = format!(
        r#"<table width="100%" border="0" cellspacing="0" cellpadding="0" role="presentation" style="width: 100%; table-layout: fixed;">
  <tbody>
{rows}
  </tbody>
</table>"#,
        rows = rows.join("\n"),
    );

    let wrapper: Styles = block
        .styles
        .iter()
        .filter(|(property, _)| !PREVIEW_ONLY_PROPERTIES.contains(property))
        .collect();
    layout_table(options, &style_attr(&wrapper.to_css()), &grid)
}

/// Column weights, gutter and alignment read leniently from content
struct ColumnLayout {
    weights: Vec<f64>,
    gap: f64,
    valign: &'static str,
}

impl ColumnLayout {
    fn from_content(content: &Content) -> Self {
        let sizes = content.number_list("columnSizes").unwrap_or_default();
        let count = content
            .u64_field("columns")
            .or_else(|| (!sizes.is_empty()).then_some(sizes.len() as u64))
            .unwrap_or(2)
            .clamp(1, MAX_COLUMNS) as usize;
        let weights = (0..count)
            .map(|i| {
                sizes
                    .get(i)
                    .copied()
                    .filter(|w| w.is_finite() && *w > 0.0)
                    .unwrap_or(1.0)
            })
            .collect();
        let valign = content
            .str_field("alignment")
            .as_deref()
            .and_then(ColumnAlignment::parse)
            .unwrap_or(ColumnAlignment::Top)
            .valign();

        Self {
            weights,
            gap: content.u64_field("gap").unwrap_or(0) as f64,
            valign,
        }
    }

    fn row(&self, children: &[Block], options: &CompileOptions) -> String {
        let total: f64 = self.weights.iter().sum();
        let last = self.weights.len() - 1;
        let half_gap = self.gap / 2.0;
        let cells = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, weight)| {
                let share = weight / total * 100.0;
                let left = if i == 0 { 0.0 } else { half_gap };
                let right = if i == last { 0.0 } else { half_gap };
                let inner = children
                    .get(i)
                    .map(|child| compile_block_with(child, options))
                    .unwrap_or_default();
                format!(
                    "      <td valign=\"{valign}\" width=\"{share:.1}%\" style=\"width: {share:.1}%; padding: 0 {right}px 0 {left}px;\">\n{inner}\n      </td>",
                    valign = self.valign,
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("    <tr>\n{cells}\n    </tr>")
    }
}

/// The table every block fragment is wrapped in
fn layout_table(options: &CompileOptions, cell_attrs: &str, inner: &str) -> String {
    format!(
        r#"<table width="{width}" border="0" cellspacing="0" cellpadding="0" role="presentation" class="responsiveTable" style="width: 100%; max-width: {width}px; box-sizing: content-box; table-layout: fixed;">
  <tbody>
    <tr valign="top">
      <td{cell_attrs}>
{inner}
      </td>
    </tr>
  </tbody>
</table>"#,
        width = options.content_width,
    )
}

fn style_attr(css: &str) -> String {
    if css.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", encode_double_quoted_attribute(css))
    }
}

fn with_zero_margin(css: &str) -> String {
    if css.is_empty() {
        "margin: 0".to_string()
    } else {
        format!("margin: 0; {css}")
    }
}

/// `h1`..`h6` from `content.level`; anything else falls back to `h1`
fn heading_tag(content: &Content) -> &'static str {
    let level = content
        .str_field("level")
        .map(|level| level.trim().to_ascii_lowercase());
    match level.as_deref() {
        Some("h2") => "h2",
        Some("h3") => "h3",
        Some("h4") => "h4",
        Some("h5") => "h5",
        Some("h6") => "h6",
        _ => "h1",
    }
}

fn text_field(content: &Content, field: &str) -> String {
    content
        .str_field(field)
        .map(|text| encode_text(&text).into_owned())
        .unwrap_or_default()
}

fn attr_field(content: &Content, field: &str) -> String {
    content
        .str_field(field)
        .map(|value| encode_double_quoted_attribute(&value).into_owned())
        .unwrap_or_default()
}
