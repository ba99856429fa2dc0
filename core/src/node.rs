use std::fmt;

use indexmap::IndexMap;
use serde::{
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

use crate::walk::PreOrder;

/// Index of the paint that decides a node's effective fill or stroke.
///
/// Figma stacks paints bottom to top; only this entry is read, every other
/// paint on the node is ignored.
pub const AUTHORITATIVE_PAINT_INDEX: usize = 0;

/// Top-level response of the Figma `GET /v1/files/:key` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FigmaFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub document: Option<Node>,
    #[serde(default)]
    pub styles: IndexMap<String, StyleMeta>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Rectangle,
    Ellipse,
    Vector,
    Text,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub style: Option<TypeStyle>,
    #[serde(default)]
    pub corner_radius: Option<f64>,
    #[serde(default)]
    pub stroke_weight: Option<f64>,
    #[serde(default)]
    pub padding_left: Option<f64>,
    #[serde(default)]
    pub padding_right: Option<f64>,
    #[serde(default)]
    pub padding_top: Option<f64>,
    #[serde(default)]
    pub padding_bottom: Option<f64>,
}
impl Node {
    pub fn new(kind: NodeKind, name: &str) -> Self {
        let mut node = Self::default();
        node.kind = kind;
        node.name = Some(name.to_string());
        node
    }
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }
    pub fn with_style(mut self, style: TypeStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Pre-order walk over this node and everything below it.
    pub fn descendants(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }
    pub fn primary_fill(&self) -> Option<&Paint> {
        self.fills.get(AUTHORITATIVE_PAINT_INDEX)
    }
    pub fn primary_stroke(&self) -> Option<&Paint> {
        self.strokes.get(AUTHORITATIVE_PAINT_INDEX)
    }
}

// Drop glue would recurse once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A raw fill or stroke entry as Figma sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub gradient_stops: Option<Vec<GradientStop>>,
}
impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            kind: "SOLID".to_string(),
            color: Some(color),
            gradient_stops: None,
        }
    }
    pub fn gradient(kind: &str, stops: Vec<GradientStop>) -> Self {
        Self {
            kind: kind.to_string(),
            color: None,
            gradient_stops: Some(stops),
        }
    }

    /// Classifies the paint. Paint types other than `SOLID` and `GRADIENT_*`,
    /// or entries missing the data their type needs, come back as `None`.
    pub fn fill(&self) -> Option<Fill<'_>> {
        if self.kind == "SOLID" {
            return self.color.as_ref().map(Fill::Solid);
        }
        if self.kind.starts_with("GRADIENT") {
            return self.gradient_stops.as_deref().map(|stops| Fill::Gradient {
                kind: &self.kind,
                stops,
            });
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill<'a> {
    Solid(&'a Color),
    Gradient {
        kind: &'a str,
        stops: &'a [GradientStop],
    },
}

/// Figma color with channels in `0..=1`.
///
/// A channel that is present but not a number reads as NaN, so the file
/// still parses and the color is rejected when it is converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Color {
    #[serde(default, deserialize_with = "channel")]
    pub r: Option<f64>,
    #[serde(default, deserialize_with = "channel")]
    pub g: Option<f64>,
    #[serde(default, deserialize_with = "channel")]
    pub b: Option<f64>,
    #[serde(default, deserialize_with = "channel")]
    pub a: Option<f64>,
}
impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: Some(r),
            g: Some(g),
            b: Some(b),
            a: None,
        }
    }
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            a: Some(a),
            ..Self::rgb(r, g, b)
        }
    }
}

fn channel<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ChannelVisitor)
}

struct ChannelVisitor;

impl<'de> Visitor<'de> for ChannelVisitor {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a color channel")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value))
    }
    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }
    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Some(f64::NAN))
    }
    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(Some(f64::NAN))
    }
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Some(f64::NAN))
    }
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Some(f64::NAN))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_style: Option<String>,
    #[serde(default)]
    pub font_weight: Option<f64>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub letter_spacing: Option<f64>,
    #[serde(default)]
    pub line_height_px: Option<f64>,
    #[serde(default)]
    pub fill: Option<Paint>,
}
impl TypeStyle {
    pub fn font(family: &str, style: &str, weight: f64) -> Self {
        Self {
            font_family: Some(family.to_string()),
            font_style: Some(style.to_string()),
            font_weight: Some(weight),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum StyleType {
    #[serde(rename = "FILL")]
    Fill,
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "EFFECT")]
    Effect,
    #[serde(rename = "GRID")]
    Grid,
    #[serde(other)]
    Other,
}

/// Entry of the file-level `styles` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMeta {
    pub name: String,
    pub style_type: StyleType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_api_shape() {
        let node: Node = serde_json::from_str(
            r#"{
                "id": "1:2",
                "name": "Button/Primary",
                "type": "TEXT",
                "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0, "a": 1}}],
                "cornerRadius": 4,
                "paddingLeft": 12,
                "style": {"fontFamily": "Inter", "fontWeight": 700, "lineHeightPx": 20.5}
            }"#,
        )
        .unwrap();
        assert_eq!(node.kind, NodeKind::Text);
        assert_eq!(node.corner_radius, Some(4.0));
        assert_eq!(node.padding_left, Some(12.0));
        assert!(node.children.is_empty());
        let style = node.style.as_ref().unwrap();
        assert_eq!(style.font_family.as_deref(), Some("Inter"));
        assert_eq!(style.line_height_px, Some(20.5));
    }

    #[test]
    fn unknown_node_types_are_other() {
        let node: Node = serde_json::from_str(r#"{"type": "BOOLEAN_OPERATION"}"#).unwrap();
        assert_eq!(node.kind, NodeKind::Other);
        let node: Node = serde_json::from_str("{}").unwrap();
        assert_eq!(node.kind, NodeKind::Other);
    }

    #[test]
    fn classifies_paints() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        assert_eq!(Paint::solid(red).fill(), Some(Fill::Solid(&red)));

        let radial = Paint::gradient("GRADIENT_RADIAL", vec![]);
        assert!(matches!(
            radial.fill(),
            Some(Fill::Gradient { kind: "GRADIENT_RADIAL", stops: [] })
        ));

        let image: Paint = serde_json::from_str(r#"{"type": "IMAGE", "imageRef": "abc"}"#).unwrap();
        assert_eq!(image.fill(), None);

        let bare_solid: Paint = serde_json::from_str(r#"{"type": "SOLID"}"#).unwrap();
        assert_eq!(bare_solid.fill(), None);

        let bare_gradient: Paint = serde_json::from_str(r#"{"type": "GRADIENT_LINEAR"}"#).unwrap();
        assert_eq!(bare_gradient.fill(), None);
    }

    #[test]
    fn non_numeric_channels_still_parse() {
        let paint: Paint = serde_json::from_str(
            r#"{"type": "SOLID", "color": {"r": "x", "g": 0, "b": null, "a": [1]}}"#,
        )
        .unwrap();
        let color = paint.color.unwrap();
        assert!(color.r.unwrap().is_nan());
        assert_eq!(color.g, Some(0.0));
        assert_eq!(color.b, None);
        assert!(color.a.unwrap().is_nan());
    }

    #[test]
    fn deep_chains_drop_without_recursion() {
        let mut node = Node::new(NodeKind::Text, "leaf");
        for _ in 0..200_000 {
            node = Node::new(NodeKind::Group, "g").with_children(vec![node]);
        }
        drop(node);
    }

    #[test]
    fn only_first_paint_is_primary() {
        let node = Node::new(NodeKind::Rectangle, "r")
            .with_fill(Paint::solid(Color::rgb(0.0, 0.0, 1.0)))
            .with_fill(Paint::solid(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(
            node.primary_fill().and_then(Paint::fill),
            Some(Fill::Solid(&Color::rgb(0.0, 0.0, 1.0)))
        );
        assert!(node.primary_stroke().is_none());
    }

    #[test]
    fn style_types() {
        let file: FigmaFile = serde_json::from_str(
            r#"{"styles": {
                "1:1": {"name": "Brand/Red", "styleType": "FILL", "key": "k"},
                "1:2": {"name": "Shadow", "styleType": "EFFECT"},
                "1:3": {"name": "Odd", "styleType": "SOMETHING_NEW"}
            }}"#,
        )
        .unwrap();
        let kinds: Vec<_> = file.styles.values().map(|s| s.style_type).collect();
        assert_eq!(kinds, [StyleType::Fill, StyleType::Effect, StyleType::Other]);
        assert!(file.document.is_none());
    }
}
