//! Translation lookup for the site's two languages
//!
//! Keys are dotted paths into the catalog ("nav.home"). A key that does not
//! resolve to a string is returned unchanged, so missing translations stay
//! visible on the page instead of failing the render.

pub mod catalog;

use std::fmt;
use std::str::FromStr;

pub use catalog::TranslationNode;

/// Supported site languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Pl,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Pl, Language::En];

    /// Language tag as used in URLs and catalog file names
    pub fn code(self) -> &'static str {
        match self {
            Language::Pl => "pl",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "pl" => Ok(Language::Pl),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language tag: {}", other)),
        }
    }
}

/// Resolve `dotted_key` in the catalog for `lang`, or return the key itself
pub fn translate(lang: Language, dotted_key: &str) -> String {
    lookup(catalog::catalog(lang), dotted_key)
}

fn lookup(root: &TranslationNode, dotted_key: &str) -> String {
    match root.resolve(dotted_key) {
        Some(text) => text.to_string(),
        None => {
            tracing::debug!("Translation not found: {}", dotted_key);
            dotted_key.to_string()
        }
    }
}

/// Lookup bound to one language, for pages rendered in a single locale
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn t(&self, dotted_key: &str) -> String {
        translate(self.lang, dotted_key)
    }
}

pub fn use_translations(lang: Language) -> Translator {
    Translator { lang }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_catalog() {
        let root = TranslationNode::from_json(r#"{"a": {"b": "Hello"}}"#).unwrap();
        assert_eq!(lookup(&root, "a.b"), "Hello");
        assert_eq!(lookup(&root, "a.c"), "a.c");
        assert_eq!(lookup(&root, "a"), "a");
    }

    #[test]
    fn test_translate_both_languages() {
        assert_eq!(translate(Language::Pl, "nav.gallery"), "Galeria");
        assert_eq!(translate(Language::En, "nav.gallery"), "Gallery");
        assert_eq!(
            translate(Language::En, "gallery.categories.kuchnie"),
            "Kitchens"
        );
    }

    #[test]
    fn test_translate_fallback_to_key() {
        for lang in Language::ALL {
            assert_eq!(translate(lang, "nav.missing"), "nav.missing");
            assert_eq!(translate(lang, "nope.nav.home"), "nope.nav.home");
            assert_eq!(translate(lang, "gallery.categories"), "gallery.categories");
            assert_eq!(translate(lang, "nav.home.extra"), "nav.home.extra");
        }
    }

    #[test]
    fn test_translator_is_bound_to_language() {
        let t = use_translations(Language::Pl);
        assert_eq!(t.language(), Language::Pl);
        assert_eq!(t.t("contact.phone"), "Telefon");

        let t = use_translations(Language::En);
        assert_eq!(t.t("contact.phone"), "Phone");
    }

    #[test]
    fn test_language_tags() {
        assert_eq!("pl".parse::<Language>(), Ok(Language::Pl));
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::Pl);
        assert_eq!(Language::En.to_string(), "en");
    }
}
