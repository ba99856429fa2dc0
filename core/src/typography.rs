use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::{node::Node, rank::Tally, walk};

/// A font family in use, ranked by how many text nodes use it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFamilyToken {
    pub font_family: Option<String>,
    pub order_label: String,
    pub styles: Vec<FontVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontVariant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::number::serialize_opt"
    )]
    pub font_weight: Option<f64>,
}

// Weights are compared bitwise so the pair can key a map.
type VariantKey = (Option<String>, Option<u64>);

/// Every `TEXT` node carrying a style, in document order. One entry per node.
pub fn extract_typography(root: &Node) -> Vec<&Node> {
    walk::collect(root, |node| node.is_text() && node.style.is_some())
}

/// Groups text nodes by font family and ranks the families by usage.
///
/// Each family lists its distinct `(fontStyle, fontWeight)` pairs in the
/// order they were first seen. Nodes that are not styled text are ignored.
pub fn unique_fonts(nodes: &[&Node]) -> Vec<FontFamilyToken> {
    let mut families: Tally<Option<String>, IndexMap<VariantKey, FontVariant>> = Tally::new();
    for style in nodes
        .iter()
        .filter(|node| node.is_text())
        .filter_map(|node| node.style.as_ref())
    {
        let variant = FontVariant {
            font_style: style.font_style.clone(),
            font_weight: style.font_weight,
        };
        let key = (variant.font_style.clone(), variant.font_weight.map(f64::to_bits));
        families
            .record(style.font_family.clone(), IndexMap::new)
            .entry(key)
            .or_insert(variant);
    }

    families
        .ranked()
        .into_iter()
        .map(|ranked| FontFamilyToken {
            font_family: ranked.key,
            order_label: ranked.order_label,
            styles: ranked.value.into_values().collect(),
        })
        .collect()
}

/// Renders the ranked families as CSS custom properties on `:root`.
pub fn to_css_variables(fonts: &[FontFamilyToken]) -> String {
    let inner = fonts
        .iter()
        .filter_map(|font| {
            let family = font.font_family.as_deref()?;
            Some(format!(
                "  --font-{}: \"{}\";",
                slug::slugify(&font.order_label),
                family.replace('"', "\\\"")
            ))
        })
        .join("\n");
    format!(":root {{\n{inner}\n}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, TypeStyle};
    use pretty_assertions::assert_eq;

    fn text(name: &str, family: &str, style: &str, weight: f64) -> Node {
        Node::new(NodeKind::Text, name).with_style(TypeStyle::font(family, style, weight))
    }

    fn variant(style: &str, weight: f64) -> FontVariant {
        FontVariant {
            font_style: Some(style.to_string()),
            font_weight: Some(weight),
        }
    }

    #[test]
    fn extracts_styled_text_only() {
        let tree = Node::new(NodeKind::Document, "doc").with_children(vec![
            text("a", "Inter", "Regular", 400.0),
            Node::new(NodeKind::Text, "unstyled"),
            Node::new(NodeKind::Frame, "frame").with_style(TypeStyle::font("Inter", "Bold", 700.0)),
            Node::new(NodeKind::Group, "g").with_children(vec![text("b", "Inter", "Regular", 400.0)]),
        ]);
        let names: Vec<_> = extract_typography(&tree)
            .into_iter()
            .filter_map(|n| n.name.as_deref())
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn groups_and_ranks_families() {
        let tree = Node::new(NodeKind::Document, "doc").with_children(vec![
            text("1", "Roboto", "Regular", 400.0),
            text("2", "Inter", "Regular", 400.0),
            text("3", "Inter", "Bold", 700.0),
            text("4", "Inter", "Regular", 400.0),
            text("5", "Mono", "Regular", 400.0),
            text("6", "Mono", "Italic", 400.0),
        ]);
        let fonts = unique_fonts(&extract_typography(&tree));
        assert_eq!(
            fonts,
            [
                FontFamilyToken {
                    font_family: Some("Inter".to_string()),
                    order_label: "Primary".to_string(),
                    styles: vec![variant("Regular", 400.0), variant("Bold", 700.0)],
                },
                FontFamilyToken {
                    font_family: Some("Mono".to_string()),
                    order_label: "Secondary".to_string(),
                    styles: vec![variant("Regular", 400.0), variant("Italic", 400.0)],
                },
                FontFamilyToken {
                    font_family: Some("Roboto".to_string()),
                    order_label: "Tertiary".to_string(),
                    styles: vec![variant("Regular", 400.0)],
                },
            ]
        );
    }

    #[test]
    fn serializes_like_the_api() {
        let tree = text("t", "Inter", "Medium", 500.0);
        let json = serde_json::to_value(unique_fonts(&extract_typography(&tree))).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "fontFamily": "Inter",
                "orderLabel": "Primary",
                "styles": [{"fontStyle": "Medium", "fontWeight": 500}]
            }])
        );
    }

    #[test]
    fn empty_tree_has_no_fonts() {
        let tree = Node::new(NodeKind::Document, "doc");
        assert!(extract_typography(&tree).is_empty());
        assert!(unique_fonts(&[]).is_empty());
    }

    #[test]
    fn css_variables() {
        let fonts = [
            FontFamilyToken {
                font_family: Some("Inter".to_string()),
                order_label: "Primary".to_string(),
                styles: vec![],
            },
            FontFamilyToken {
                font_family: None,
                order_label: "Secondary".to_string(),
                styles: vec![],
            },
            FontFamilyToken {
                font_family: Some("IBM Plex Mono".to_string()),
                order_label: "Tertiary".to_string(),
                styles: vec![],
            },
        ];
        assert_eq!(
            to_css_variables(&fonts),
            ":root {\n  --font-primary: \"Inter\";\n  --font-tertiary: \"IBM Plex Mono\";\n}"
        );
    }
}
