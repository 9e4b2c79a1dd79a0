//! Language registry: Single source of truth for all supported languages.
//!
//! The site is published in Uzbek (primary), Russian and English. The registry
//! is initialized once with `OnceLock` and is immutable thereafter.

use std::sync::OnceLock;

use crate::i18n::strings::{ENGLISH_STRINGS, RUSSIAN_STRINGS, UZBEK_STRINGS};
use crate::i18n::LanguageStrings;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code, also the suffix of localized CMS fields (`title_uz`)
    pub code: &'static str,

    /// English name of the language (e.g., "Uzbek", "Russian")
    pub name: &'static str,

    /// Native name of the language (e.g., "O'zbekcha", "Русский")
    pub native_name: &'static str,

    /// Short label shown in the language switcher (e.g., "UZ")
    pub label: &'static str,

    /// Whether this is the primary language of the site (only one should be true)
    pub is_canonical: bool,

    /// Whether this language is offered in the switcher
    pub enabled: bool,

    /// Interface strings for this language
    pub strings: &'static LanguageStrings,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in switcher order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get all languages (including disabled ones).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Codes of every registered language in registry order.
    ///
    /// This is the fixed global fallback order used when resolving localized
    /// fields: primary language first, then the others.
    pub fn fallback_order(&self) -> Vec<&'static str> {
        self.languages.iter().map(|lang| lang.code).collect()
    }

    /// Get the canonical (primary) language configuration.
    ///
    /// # Panics
    /// Panics if no canonical language or more than one is defined
    /// (this indicates a configuration error in `default_languages`).
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// Default language configurations: Uzbek (canonical), Russian, English.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "uz",
            name: "Uzbek",
            native_name: "O'zbekcha",
            label: "UZ",
            is_canonical: true,
            enabled: true,
            strings: &UZBEK_STRINGS,
        },
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            label: "RU",
            is_canonical: false,
            enabled: true,
            strings: &RUSSIAN_STRINGS,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            label: "EN",
            is_canonical: false,
            enabled: true,
            strings: &ENGLISH_STRINGS,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_uzbek() {
        let registry = LanguageRegistry::get();
        let config = registry.get_by_code("uz").expect("uz should exist");

        assert_eq!(config.code, "uz");
        assert_eq!(config.name, "Uzbek");
        assert_eq!(config.label, "UZ");
        assert!(config.is_canonical);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_russian() {
        let registry = LanguageRegistry::get();
        let config = registry.get_by_code("ru").expect("ru should exist");

        assert_eq!(config.native_name, "Русский");
        assert!(!config.is_canonical);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("fr").is_none());
        assert!(registry.get_by_code("").is_none());
    }

    #[test]
    fn test_list_enabled_in_switcher_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| lang.code)
            .collect();

        assert_eq!(codes, vec!["uz", "ru", "en"]);
    }

    #[test]
    fn test_list_all_has_three_languages() {
        assert_eq!(LanguageRegistry::get().list_all().len(), 3);
    }

    #[test]
    fn test_fallback_order_starts_with_canonical() {
        let registry = LanguageRegistry::get();
        let order = registry.fallback_order();

        assert_eq!(order, vec!["uz", "ru", "en"]);
        assert_eq!(order[0], registry.canonical().code);
    }

    #[test]
    fn test_canonical_returns_uzbek() {
        let canonical = LanguageRegistry::get().canonical();

        assert_eq!(canonical.code, "uz");
        assert!(canonical.is_canonical);
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("uz"));
        assert!(registry.is_enabled("ru"));
        assert!(registry.is_enabled("en"));
        assert!(!registry.is_enabled("es"));
    }

    #[test]
    fn test_each_language_has_its_own_strings() {
        let registry = LanguageRegistry::get();
        let uz = registry.get_by_code("uz").unwrap();
        let ru = registry.get_by_code("ru").unwrap();

        assert_ne!(uz.strings.search, ru.strings.search);
    }
}
