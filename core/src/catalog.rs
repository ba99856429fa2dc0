use std::cmp::Ordering;

use serde::Serialize;

use crate::node::{FigmaFile, StyleType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEntry {
    pub id: String,
    pub name: String,
    pub style_type: StyleType,
}

/// Named color and text styles published by a file, each list sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleCatalog {
    pub colors: Vec<StyleEntry>,
    pub typography: Vec<StyleEntry>,
}

/// Partitions the file's `styles` table into color (`FILL`) and typography
/// (`TEXT`) entries. Effect, grid and unknown styles are dropped.
pub fn extract_style_catalog(file: &FigmaFile) -> StyleCatalog {
    let mut catalog = StyleCatalog::default();
    for (id, meta) in &file.styles {
        let list = match meta.style_type {
            StyleType::Fill => &mut catalog.colors,
            StyleType::Text => &mut catalog.typography,
            _ => continue,
        };
        list.push(StyleEntry {
            id: id.clone(),
            name: meta.name.clone(),
            style_type: meta.style_type,
        });
    }
    catalog.colors.sort_by(|a, b| collate(&a.name, &b.name));
    catalog.typography.sort_by(|a, b| collate(&a.name, &b.name));
    catalog
}

/// ASCII punctuation and symbols in root-collation order. All of them sort
/// after whitespace and before digits and letters.
const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Human-friendly name ordering, close to a root-locale collator:
/// 1. base characters, with accents and case folded away, where whitespace
///    sorts first, then punctuation and symbols, then digits, then letters
/// 2. accents, unaccented first
/// 3. case, lowercase first
///
/// The raw text breaks any remaining tie.
pub fn collate(a: &str, b: &str) -> Ordering {
    let swap_case = |s: &str| {
        s.chars()
            .map(|c| {
                if c.is_uppercase() {
                    c.to_lowercase().next().unwrap_or(c)
                } else {
                    c.to_uppercase().next().unwrap_or(c)
                }
            })
            .collect::<String>()
    };
    primary_weights(a)
        .cmp(&primary_weights(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| swap_case(a).cmp(&swap_case(b)))
        .then_with(|| a.cmp(b))
}

fn primary_weights(s: &str) -> Vec<(u8, u32)> {
    deunicode::deunicode(s)
        .chars()
        .flat_map(char::to_lowercase)
        .map(primary_weight)
        .collect()
}

fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        return (0, c as u32);
    }
    if let Some(index) = PUNCTUATION.find(c) {
        return (1, index as u32);
    }
    if let Some(digit) = c.to_digit(10) {
        return (3, digit);
    }
    if c.is_alphabetic() {
        return (4, c as u32);
    }
    (2, c as u32)
}
