//! Localized field resolution for CMS records.
//!
//! The CMS stores translatable fields as `{base}_{lang}` (`title_uz`,
//! `title_ru`, `title_en`). Any language may be missing. Resolution picks
//! the best available variant and never fails.

use serde_json::Value;

use crate::i18n::{Language, LanguageRegistry};

/// Resolve the best available translation of `base_key` on `record`.
///
/// Order: `current`, then `fallback`, then every registered language in
/// registry order, then the first populated `{base_key}_*` key in record
/// order. Returns `""` when nothing is populated or `record` is not an object.
pub fn resolve(record: &Value, base_key: &str, current: Language, fallback: Language) -> String {
    let Some(fields) = record.as_object() else {
        return String::new();
    };

    let order = [current.code(), fallback.code()]
        .into_iter()
        .chain(LanguageRegistry::get().fallback_order());

    for code in order {
        if let Some(text) = fields.get(&format!("{}_{}", base_key, code)).and_then(field_text) {
            return text;
        }
    }

    let prefix = format!("{}_", base_key);
    fields
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .find_map(|(_, value)| field_text(value))
        .unwrap_or_default()
}

/// Text of a populated field, trimmed. `null` and `""` are unpopulated.
fn field_text(value: &Value) -> Option<String> {
    let raw = match value {
        Value::Null => return None,
        Value::String(s) if s.is_empty() => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(raw.trim().to_string())
}

/// Resolver bound to the language of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localizer {
    pub current: Language,
    pub fallback: Language,
}

impl Localizer {
    /// Localizer whose fallback is the site's primary language.
    pub fn new(current: Language) -> Self {
        Self {
            current,
            fallback: Language::canonical(),
        }
    }

    pub fn with_fallback(current: Language, fallback: Language) -> Self {
        Self { current, fallback }
    }

    pub fn text(&self, record: &Value, base_key: &str) -> String {
        resolve(record, base_key, self.current, self.fallback)
    }
}
