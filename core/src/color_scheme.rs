use itertools::Itertools;
use serde::Serialize;

use crate::{
    color::to_hex,
    error::Result,
    node::{Fill, Node},
    rank::Tally,
    walk,
};

/// A distinct solid color or gradient, ranked by how many nodes use it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorToken {
    /// Paint type of the first node that produced this token, e.g. `SOLID`
    /// or `GRADIENT_LINEAR`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: ColorValue,
    pub order_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorValue {
    Hex(String),
    Stops(Vec<HexStop>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HexStop {
    #[serde(serialize_with = "crate::number::serialize")]
    pub position: f64,
    pub color: String,
}

/// Grouping key. Gradients group on their position-sorted stops alone, so
/// two gradient kinds with identical stops share a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ColorKey {
    Solid(String),
    Gradient(Vec<(u64, String)>),
}

/// Nodes with at least one fill entry, in document order.
pub fn extract_filled_nodes(root: &Node) -> Vec<&Node> {
    walk::collect(root, |node| !node.fills.is_empty())
}

/// Groups nodes by the color or gradient of their first fill and ranks the
/// groups by usage. Nodes whose first fill is neither solid nor a gradient
/// are skipped without being counted.
pub fn unique_color_scheme(nodes: &[&Node]) -> Result<Vec<ColorToken>> {
    let mut tally: Tally<ColorKey, (String, ColorValue)> = Tally::new();
    for node in nodes {
        let Some(fill) = node.primary_fill().and_then(|paint| paint.fill()) else {
            continue;
        };
        match fill {
            Fill::Solid(color) => {
                let hex = to_hex(color)?;
                tally.record(ColorKey::Solid(hex.clone()), || {
                    ("SOLID".to_string(), ColorValue::Hex(hex))
                });
            }
            Fill::Gradient { kind, stops } => {
                let stops: Vec<HexStop> = stops
                    .iter()
                    .map(|stop| -> Result<HexStop> {
                        Ok(HexStop {
                            position: stop.position,
                            color: to_hex(&stop.color)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?
                    .into_iter()
                    .sorted_by(|a, b| a.position.total_cmp(&b.position))
                    .collect();
                let key = ColorKey::Gradient(
                    stops
                        .iter()
                        .map(|stop| (position_bits(stop.position), stop.color.clone()))
                        .collect(),
                );
                tally.record(key, || (kind.to_string(), ColorValue::Stops(stops)));
            }
        }
    }

    Ok(tally
        .ranked()
        .into_iter()
        .map(|ranked| {
            let (kind, value) = ranked.value;
            ColorToken {
                kind,
                value,
                order_label: ranked.order_label,
            }
        })
        .collect())
}

fn position_bits(position: f64) -> u64 {
    // -0.0 and 0.0 are the same stop
    if position == 0.0 {
        0
    } else {
        position.to_bits()
    }
}

impl ColorToken {
    /// CSS value for this token: the hex for solids, a gradient function
    /// otherwise.
    pub fn to_css(&self) -> String {
        match &self.value {
            ColorValue::Hex(hex) => hex.clone(),
            ColorValue::Stops(stops) => {
                let function = match self.kind.as_str() {
                    "GRADIENT_RADIAL" | "GRADIENT_DIAMOND" => "radial-gradient",
                    "GRADIENT_ANGULAR" => "conic-gradient",
                    _ => "linear-gradient",
                };
                let stops = stops
                    .iter()
                    .map(|stop| {
                        let percent = (stop.position * 10000.0).round() / 100.0;
                        format!("{} {percent}%", stop.color)
                    })
                    .join(", ");
                format!("{function}({stops})")
            }
        }
    }
}

/// Renders ranked color tokens as CSS custom properties on `:root`.
pub fn to_css_variables(tokens: &[ColorToken]) -> String {
    let inner = tokens
        .iter()
        .map(|token| {
            format!(
                "  --color-{}: {};",
                slug::slugify(&token.order_label),
                token.to_css()
            )
        })
        .join("\n");
    format!(":root {{\n{inner}\n}}")
}
