//! Small HTML helpers shared by the menu and page renderers.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// Absolute URL for an asset path returned by the CMS.
///
/// Empty paths stay empty, `http(s)` URLs pass through, and relative paths
/// are joined to `base` with exactly one slash.
pub fn absolute_url(base: &str, path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }
    if path.starts_with("http") {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Image path of a CMS image field, which is either a string or `{"image": ...}`.
pub fn image_path(value: &Value) -> Option<&str> {
    let path = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("image").and_then(Value::as_str)?,
        Value::Array(items) => return items.first().and_then(image_path),
        _ => return None,
    };

    let path = path.trim();
    (!path.is_empty()).then_some(path)
}

/// Replace `{name}` placeholders in a UI string.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}

/// Display form (`DD.MM.YYYY`) of a CMS date or datetime. Unparseable input
/// is shown as-is.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d.%m.%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d.%m.%Y").to_string();
    }

    raw.to_string()
}
