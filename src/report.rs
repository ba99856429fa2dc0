//! Maps an extraction mode to its extractor and renders the result.

use figma_tokens_core::{
    color_scheme, css, extract_css, extract_filled_nodes, extract_style_catalog,
    extract_typography, typography, unique_color_scheme, unique_fonts, ColorToken, CssBlock,
    FigmaFile, FontFamilyToken, Node, StyleCatalog, TokenError,
};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Font families ranked by usage, with their style/weight variants
    Typography,
    /// Published color and text styles, sorted by name
    BaseTheme,
    /// Solid colors and gradients ranked by usage
    UniqueColorScheme,
    /// CSS for status, tag and button layers
    CssExtract,
}
impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Typography => "typography",
            Mode::BaseTheme => "base-theme",
            Mode::UniqueColorScheme => "unique-color-scheme",
            Mode::CssExtract => "css-extract",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Typography(Vec<FontFamilyToken>),
    BaseTheme(StyleCatalog),
    ColorScheme(Vec<ColorToken>),
    Css(Vec<CssBlock>),
}
impl Report {
    /// Number of tokens (or style entries, or CSS blocks) in the report.
    pub fn len(&self) -> usize {
        match self {
            Report::Typography(fonts) => fonts.len(),
            Report::BaseTheme(catalog) => catalog.colors.len() + catalog.typography.len(),
            Report::ColorScheme(tokens) => tokens.len(),
            Report::Css(blocks) => blocks.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// CSS rendering, where the mode has one. The style catalog only lists
    /// names, so it has none.
    pub fn to_css(&self) -> Option<String> {
        match self {
            Report::Typography(fonts) => Some(typography::to_css_variables(fonts)),
            Report::BaseTheme(_) => None,
            Report::ColorScheme(tokens) => Some(color_scheme::to_css_variables(tokens)),
            Report::Css(blocks) => Some(css::to_stylesheet(blocks)),
        }
    }
}

/// Runs the extractor for `mode`.
///
/// Tree-based modes read `file.document`, narrowed to `node_id` when given
/// and present. A file without a document yields an empty report.
pub fn extract(mode: Mode, file: &FigmaFile, node_id: Option<&str>) -> Result<Report, TokenError> {
    let report = match mode {
        Mode::BaseTheme => Report::BaseTheme(extract_style_catalog(file)),
        Mode::Typography => Report::Typography(
            tree(file, node_id)
                .map(|root| unique_fonts(&extract_typography(root)))
                .unwrap_or_default(),
        ),
        Mode::UniqueColorScheme => Report::ColorScheme(
            tree(file, node_id)
                .map(|root| unique_color_scheme(&extract_filled_nodes(root)))
                .transpose()?
                .unwrap_or_default(),
        ),
        Mode::CssExtract => Report::Css(
            tree(file, node_id)
                .map(extract_css)
                .transpose()?
                .unwrap_or_default(),
        ),
    };
    Ok(report)
}

fn tree<'a>(file: &'a FigmaFile, node_id: Option<&str>) -> Option<&'a Node> {
    let Some(document) = file.document.as_ref() else {
        debug!("file has no document, nothing to extract");
        return None;
    };
    Some(scope(document, node_id))
}

fn scope<'a>(document: &'a Node, node_id: Option<&str>) -> &'a Node {
    let Some(id) = node_id else {
        return document;
    };
    match document.descendants().find(|node| node.id == id) {
        Some(node) => {
            debug!(node_id = id, "scoping extraction to node");
            node
        }
        None => {
            warn!(node_id = id, "node not found, extracting from the whole document");
            document
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::parse_file;
    use pretty_assertions::assert_eq;

    fn file() -> FigmaFile {
        serde_json::from_str(
            r#"{
                "document": {"id": "0:0", "type": "DOCUMENT", "children": [
                    {"id": "1:1", "name": "Page A", "type": "CANVAS", "children": [
                        {"id": "2:1", "name": "Tag", "type": "FRAME", "cornerRadius": 2,
                         "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}}]}
                    ]},
                    {"id": "1:2", "name": "Page B", "type": "CANVAS", "children": [
                        {"id": "2:2", "name": "Title", "type": "TEXT",
                         "style": {"fontFamily": "Inter", "fontStyle": "Bold", "fontWeight": 700},
                         "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 1}}]}
                    ]}
                ]},
                "styles": {"S:1": {"name": "Red", "styleType": "FILL"}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn each_mode_runs_its_extractor() {
        let file = file();
        for (mode, len) in [
            (Mode::Typography, 1),
            (Mode::BaseTheme, 1),
            (Mode::UniqueColorScheme, 2),
            (Mode::CssExtract, 1),
        ] {
            let report = extract(mode, &file, None).unwrap();
            assert_eq!(report.len(), len, "{}", mode.name());
        }
    }

    #[test]
    fn node_id_scopes_tree_modes() {
        let file = file();
        let report = extract(Mode::UniqueColorScheme, &file, Some("1:2")).unwrap();
        let Report::ColorScheme(tokens) = report else {
            panic!("wrong report kind");
        };
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].to_css(), "#0000ff");

        let unknown = extract(Mode::UniqueColorScheme, &file, Some("9:9")).unwrap();
        assert_eq!(unknown.len(), 2);
    }

    #[test]
    fn missing_document_is_empty_not_an_error() {
        let file = FigmaFile::default();
        for mode in [Mode::Typography, Mode::UniqueColorScheme, Mode::CssExtract, Mode::BaseTheme] {
            let report = extract(mode, &file, None).unwrap();
            assert!(report.is_empty(), "{}", mode.name());
        }
    }

    #[test]
    fn extracts_from_deeply_nested_documents() {
        let depth = 10_000;
        let open = r#"{"id": "f", "type": "FRAME", "children": ["#.repeat(depth);
        let close = "]}".repeat(depth);
        let leaf = r#"{"id": "leaf", "name": "Status", "type": "TEXT",
            "style": {"fontFamily": "Inter", "fontWeight": 400},
            "fills": [{"type": "SOLID", "color": {"r": 0, "g": 1, "b": 0}}]}"#;
        let json = format!(r#"{{"document": {open}{leaf}{close}}}"#);
        let file = parse_file(json.as_bytes()).unwrap();

        assert_eq!(extract(Mode::Typography, &file, None).unwrap().len(), 1);
        assert_eq!(extract(Mode::CssExtract, &file, None).unwrap().len(), 1);
        let Report::ColorScheme(tokens) =
            extract(Mode::UniqueColorScheme, &file, Some("leaf")).unwrap()
        else {
            panic!("wrong report kind");
        };
        assert_eq!(tokens[0].to_css(), "#00ff00");
    }

    #[test]
    fn css_rendering() {
        let file = file();
        let css = extract(Mode::CssExtract, &file, None).unwrap().to_css();
        assert_eq!(
            css.as_deref(),
            Some(".tag {\n  background: #ff0000;\n  border-radius: 2px;\n}")
        );
        assert_eq!(extract(Mode::BaseTheme, &file, None).unwrap().to_css(), None);
    }

    #[test]
    fn serializes_untagged() {
        let report = extract(Mode::BaseTheme, &file(), None).unwrap();
        assert_eq!(
            serde_json::to_value(report).unwrap(),
            serde_json::json!({
                "colors": [{"id": "S:1", "name": "Red", "styleType": "FILL"}],
                "typography": []
            })
        );
    }
}
