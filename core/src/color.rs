use csscolorparser::Color as CssColor;

use crate::{
    error::{Result, TokenError},
    node::Color,
};

/// Canonical lowercase `#rrggbb` for a Figma color.
///
/// Each channel is clamped to `0..=1` before scaling to `0..=255`; alpha is
/// not part of the hex. A missing or non-finite channel is rejected rather
/// than defaulted.
pub fn to_hex(color: &Color) -> Result<String> {
    let r = channel("r", color.r)?;
    let g = channel("g", color.g)?;
    let b = channel("b", color.b)?;
    Ok(CssColor::new(r, g, b, 1.0).to_hex_string())
}

fn channel(name: &'static str, value: Option<f64>) -> Result<f64> {
    match value {
        None => Err(TokenError::InvalidColor {
            channel: name,
            reason: "missing",
        }),
        Some(v) if v.is_nan() => Err(TokenError::InvalidColor {
            channel: name,
            reason: "not a number",
        }),
        Some(v) if v.is_infinite() => Err(TokenError::InvalidColor {
            channel: name,
            reason: "not finite",
        }),
        Some(v) => Ok(v.clamp(0.0, 1.0)),
    }
}
