//! Design-token extraction from Figma document trees.
//!
//! Every extractor borrows an already-parsed tree and returns plain,
//! serializable data. Nothing here performs I/O.

pub mod catalog;
pub mod color;
pub mod color_scheme;
pub mod css;
pub mod error;
pub mod node;
mod number;
pub mod ordinal;
pub mod rank;
pub mod typography;
pub mod walk;

pub use catalog::{extract_style_catalog, StyleCatalog, StyleEntry};
pub use color::to_hex;
pub use color_scheme::{extract_filled_nodes, unique_color_scheme, ColorToken, ColorValue, HexStop};
pub use css::{extract_css, CssBlock};
pub use error::TokenError;
pub use node::{
    Color, FigmaFile, Fill, GradientStop, Node, NodeKind, Paint, StyleMeta, StyleType, TypeStyle,
    AUTHORITATIVE_PAINT_INDEX,
};
pub use ordinal::order_label;
pub use typography::{extract_typography, unique_fonts, FontFamilyToken, FontVariant};
