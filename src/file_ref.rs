use std::{fmt, str::FromStr};

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::FileRefError;

/// A Figma file, given either as its bare key or as a link copied from the
/// app. Links may point at a node (`?node-id=12-34`), which then scopes
/// extraction to that subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub key: String,
    pub node_id: Option<String>,
}
impl FileRef {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            node_id: None,
        }
    }
    pub fn parse(input: &str) -> Result<Self, FileRefError> {
        file_ref_parser::file_ref(input).map_err(|err| FileRefError {
            input: input.to_string(),
            reason: format!("expected {} at {}", err.expected, err.location),
        })
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node_id {
            None => f.write_str(&self.key),
            Some(id) => write!(
                f,
                "https://www.figma.com/file/{}?node-id={}",
                self.key,
                id.replace(':', "-")
            ),
        }
    }
}
impl FromStr for FileRef {
    type Err = FileRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn normalize_node_id(raw: &str) -> String {
    raw.replace("%3A", ":").replace("%3a", ":").replace('-', ":")
}

peg::parser! {
  grammar file_ref_parser() for str {
    rule _ = quiet!{[' ' | '\n' | '\t']*}

    rule key() -> &'input str = $(['a'..='z' | 'A'..='Z' | '0'..='9']+)
    rule host() = "http" "s"? "://" ("www." / "beta.")? "figma.com"
    rule kind() = "file" / "design" / "proto" / "board"
    rule title() = "/" (!['?' | '#'] [_])*
    rule param() -> Option<String>
        = "node-id=" v:$((!['&' | '#'] [_])+) { Some(normalize_node_id(v)) }
        / (!['&' | '#'] [_])* { None }
    rule query() -> Option<String> = "?" ps:(param() ** "&") { ps.into_iter().flatten().next() }
    rule fragment() = "#" [_]*

    rule url() -> FileRef
        = host() "/" kind() "/" k:key() title()? q:query()? fragment()? {
            FileRef { key: k.to_string(), node_id: q.flatten() }
        }

    rule raw() -> FileRef = k:key() { FileRef::new(k) }

    pub(crate) rule file_ref() -> FileRef = _ r:(url() / raw()) _ { r }
  }
}

struct FileRefVisitor;

impl<'de> Visitor<'de> for FileRefVisitor {
    type Value = FileRef;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a Figma file key or file URL")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        FileRef::parse(value).map_err(E::custom)
    }

    // Env providers hand all-digit keys over as integers.
    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visit_str(&value.to_string())
    }
    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visit_str(&value.to_string())
    }
}

impl<'de> Deserialize<'de> for FileRef {
    fn deserialize<D>(deserializer: D) -> Result<FileRef, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FileRefVisitor)
    }
}

impl Serialize for FileRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[test]
fn test() {
    assert_eq!(
        FileRef::parse("aBc123XYZ").unwrap(),
        FileRef::new("aBc123XYZ")
    );
    assert_eq!(
        FileRef::parse("  aBc123XYZ\n").unwrap(),
        FileRef::new("aBc123XYZ")
    );
    assert_eq!(
        FileRef::parse("https://www.figma.com/file/aBc123XYZ/My-Design-System").unwrap(),
        FileRef::new("aBc123XYZ")
    );
    assert_eq!(
        FileRef::parse("https://www.figma.com/design/aBc123XYZ/Title?node-id=12-34&t=xyz-0")
            .unwrap(),
        FileRef {
            key: "aBc123XYZ".to_string(),
            node_id: Some("12:34".to_string()),
        }
    );
    assert_eq!(
        FileRef::parse("https://figma.com/proto/aBc123XYZ?t=1&node-id=1%3A2#frag").unwrap(),
        FileRef {
            key: "aBc123XYZ".to_string(),
            node_id: Some("1:2".to_string()),
        }
    );
    assert!(FileRef::parse("").is_err());
    assert!(FileRef::parse("not a key").is_err());
    assert!(FileRef::parse("https://example.com/file/aBc").is_err());
}
