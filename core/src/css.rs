use convert_case::{Case, Casing};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    color::to_hex,
    error::Result,
    node::{Fill, Node, Paint},
    walk,
};

/// Layer-name fragments (matched case-insensitively) that mark a component
/// worth extracting.
pub const CSS_NAME_PATTERNS: [&str; 3] = ["status", "tag", "button"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssBlock {
    pub name: String,
    pub css: String,
}

/// Renders a CSS block for every node whose name matches
/// [`CSS_NAME_PATTERNS`], in document order.
pub fn extract_css(root: &Node) -> Result<Vec<CssBlock>> {
    walk::collect(root, is_component)
        .into_iter()
        .map(|node| -> Result<CssBlock> {
            Ok(CssBlock {
                name: node.name.clone().unwrap_or_default(),
                css: node_to_css(node)?,
            })
        })
        .collect()
}

fn is_component(node: &Node) -> bool {
    node.name.as_deref().map_or(false, |name| {
        let name = name.to_lowercase();
        CSS_NAME_PATTERNS.iter().any(|pattern| name.contains(pattern))
    })
}

/// One `property: value;` line per visual attribute present on the node.
pub fn node_to_css(node: &Node) -> Result<String> {
    let mut entries: Vec<(String, String)> = Vec::new();

    if let Some(hex) = solid_hex(node.primary_fill())? {
        entries.push(("background".to_string(), hex));
    }
    if let Some(hex) = solid_hex(node.primary_stroke())? {
        let weight = node.stroke_weight.filter(|w| *w != 0.0).unwrap_or(1.0);
        entries.push(("border".to_string(), format!("{weight}px solid {hex}")));
    }
    if let Some(radius) = node.corner_radius {
        entries.push(css_entry("cornerRadius", px(radius)));
    }

    if let Some(style) = node.style.as_ref().filter(|_| node.is_text()) {
        if let Some(family) = style.font_family.as_deref().filter(|f| !f.is_empty()) {
            entries.push(css_entry("fontFamily", family.to_string()));
        }
        if let Some(size) = style.font_size.filter(|s| *s != 0.0) {
            entries.push(css_entry("fontSize", px(size)));
        }
        if let Some(weight) = style.font_weight.filter(|w| *w != 0.0) {
            entries.push(css_entry("fontWeight", weight.to_string()));
        }
        if let Some(spacing) = style.letter_spacing {
            entries.push(css_entry("letterSpacing", px(spacing)));
        }
        if let Some(line_height) = style.line_height_px {
            entries.push(css_entry("lineHeightPx", px(line_height)));
        }
        if let Some(hex) = solid_hex(style.fill.as_ref())? {
            entries.push(("color".to_string(), hex));
        }
    }

    let padding = [
        ("paddingLeft", node.padding_left),
        ("paddingRight", node.padding_right),
        ("paddingTop", node.padding_top),
        ("paddingBottom", node.padding_bottom),
    ];
    for (key, value) in padding {
        if let Some(value) = value {
            entries.push(css_entry(key, px(value)));
        }
    }

    Ok(entries
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .join("\n"))
}

/// Hex of a solid paint. Other paints, and solids without a color, give
/// `None`.
fn solid_hex(paint: Option<&Paint>) -> Result<Option<String>> {
    match paint.and_then(Paint::fill) {
        Some(Fill::Solid(color)) => to_hex(color).map(Some),
        _ => Ok(None),
    }
}

fn css_entry(key: &str, value: String) -> (String, String) {
    (css_property(key), value)
}
fn css_property(key: &str) -> String {
    match key {
        "cornerRadius" => "border-radius".to_string(),
        "lineHeightPx" => "line-height".to_string(),
        _ => key.to_case(Case::Kebab),
    }
}
fn px(value: f64) -> String {
    format!("{value}px")
}

/// Wraps each block in a class rule named after the layer, e.g.
/// `Status/Success` becomes `.status-success { ... }`.
pub fn to_stylesheet(blocks: &[CssBlock]) -> String {
    blocks
        .iter()
        .map(|block| {
            let selector = slug::slugify(&block.name);
            if block.css.is_empty() {
                return format!(".{selector} {{}}");
            }
            let body = block
                .css
                .lines()
                .map(|line| format!("  {line}"))
                .join("\n");
            format!(".{selector} {{\n{body}\n}}")
        })
        .join("\n\n")
}
