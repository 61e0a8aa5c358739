//! Static translation catalogs
//!
//! Each language ships as a nested JSON document embedded at compile time.
//! Leaves are strings, every other node is a mapping.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::Language;

/// One node of a translation tree
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TranslationNode {
    /// Final translated string
    Leaf(String),
    /// Nested group of keys
    Branch(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
    fn empty() -> Self {
        Self::Branch(BTreeMap::new())
    }

    /// Parse a catalog document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Walk a dotted key path and return the leaf string it names.
    ///
    /// `None` when a segment is missing, when a segment tries to descend
    /// into a leaf, or when the path stops on a branch.
    pub fn resolve(&self, dotted_key: &str) -> Option<&str> {
        let mut node = self;
        for segment in dotted_key.split('.') {
            node = match node {
                Self::Branch(children) => children.get(segment)?,
                Self::Leaf(_) => return None,
            };
        }

        match node {
            Self::Leaf(text) => Some(text),
            Self::Branch(_) => None,
        }
    }
}

static PL: Lazy<TranslationNode> = Lazy::new(|| {
    load_embedded(Language::Pl, include_str!("../../locales/pl.json"))
});

static EN: Lazy<TranslationNode> = Lazy::new(|| {
    load_embedded(Language::En, include_str!("../../locales/en.json"))
});

fn load_embedded(lang: Language, json: &str) -> TranslationNode {
    TranslationNode::from_json(json).unwrap_or_else(|e| {
        // Every lookup falls back to its key
        tracing::error!(lang = lang.code(), "Invalid translation catalog: {}", e);
        TranslationNode::empty()
    })
}

/// Root node of the catalog for `lang`
pub fn catalog(lang: Language) -> &'static TranslationNode {
    match lang {
        Language::Pl => &*PL,
        Language::En => &*EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TranslationNode {
        TranslationNode::from_json(r#"{"a": {"b": "Hello", "c": {"d": "Deep"}}, "top": "Top"}"#)
            .unwrap()
    }

    #[test]
    fn test_resolve_leaf() {
        let root = sample();
        assert_eq!(root.resolve("a.b"), Some("Hello"));
        assert_eq!(root.resolve("a.c.d"), Some("Deep"));
        assert_eq!(root.resolve("top"), Some("Top"));
    }

    #[test]
    fn test_resolve_missing_or_branch() {
        let root = sample();
        assert_eq!(root.resolve("a.x"), None);
        assert_eq!(root.resolve("missing.b"), None);
        assert_eq!(root.resolve("a"), None);
        assert_eq!(root.resolve("a.c"), None);
        // Descending past a leaf
        assert_eq!(root.resolve("a.b.c"), None);
        assert_eq!(root.resolve(""), None);
    }

    #[test]
    fn test_non_string_leaf_is_rejected() {
        assert!(TranslationNode::from_json(r#"{"count": 3}"#).is_err());
    }

    #[test]
    fn test_embedded_catalogs_parse() {
        for lang in [Language::Pl, Language::En] {
            let json = match lang {
                Language::Pl => include_str!("../../locales/pl.json"),
                Language::En => include_str!("../../locales/en.json"),
            };
            assert!(TranslationNode::from_json(json).is_ok(), "{:?}", lang);
            assert_ne!(catalog(lang), &TranslationNode::empty());
        }
    }
}
