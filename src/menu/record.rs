//! Lenient decoding of CMS menu records.
//!
//! Menu payloads come straight from the CMS and are not trusted: fields may
//! be missing or carry the wrong type, and children may be delivered nested
//! under `children`, flat with `parent` references, or both at once.

use serde_json::Value;
use tracing::debug;

/// Where a record hangs in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRef {
    /// `parent` is null or absent
    Root,
    /// `parent` names another record
    Id(i64),
    /// `parent` is present but not an id
    Invalid,
}

/// One menu entry as delivered by the CMS, before tree assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRecord {
    pub id: Option<i64>,
    pub parent: ParentRef,
    pub position: i64,
    /// `None` when `status` is missing or not a boolean
    pub status: Option<bool>,
    pub has_page: bool,
    pub page_slug: Option<String>,
    /// Original object, kept for localized title lookup
    pub fields: Value,
}

impl MenuRecord {
    /// Decode a single record. Never fails: unusable fields read as absent.
    pub fn from_value(value: &Value) -> MenuRecord {
        let parent = match value.get("parent") {
            None | Some(Value::Null) => ParentRef::Root,
            Some(v) => as_id(v).map(ParentRef::Id).unwrap_or(ParentRef::Invalid),
        };

        MenuRecord {
            id: value.get("id").and_then(as_id),
            parent,
            position: value.get("position").and_then(as_id).unwrap_or(0),
            status: value.get("status").and_then(Value::as_bool),
            has_page: value
                .get("has_page")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            page_slug: value
                .get("page_slug")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            fields: if value.is_object() {
                value.clone()
            } else {
                Value::Null
            },
        }
    }

    /// A record is well-formed when it is an object with an id, a boolean
    /// status and a usable parent reference. Anything else renders as an
    /// inert leaf.
    pub fn is_well_formed(&self) -> bool {
        self.fields.is_object()
            && self.id.is_some()
            && self.status.is_some()
            && self.parent != ParentRef::Invalid
    }

    /// Explicitly disabled in the CMS.
    pub fn is_disabled(&self) -> bool {
        self.status == Some(false)
    }

    /// Navigation target when the record is linked to a page.
    pub fn page_target(&self) -> Option<String> {
        match (&self.page_slug, self.has_page) {
            (Some(slug), true) => Some(format!("/dynamic-page/{}", slug)),
            _ => None,
        }
    }
}

/// Decode a menu payload into records, flattening nested `children`.
///
/// Nested children without their own `parent` inherit the enclosing record's
/// id. Records are returned in payload order, each followed by its nested
/// children (pre-order). A payload that is not an array yields no records.
pub fn flatten_payload(payload: &Value) -> Vec<MenuRecord> {
    let mut records = Vec::new();

    match payload.as_array() {
        Some(items) => {
            for item in items {
                flatten_into(item, None, &mut records);
            }
        }
        None => debug!("Menu payload is not an array, treating as empty"),
    }

    records
}

fn flatten_into(value: &Value, inherited_parent: Option<i64>, out: &mut Vec<MenuRecord>) {
    let mut record = MenuRecord::from_value(value);

    let parent_missing = value.get("parent").map_or(true, Value::is_null);
    if parent_missing {
        if let Some(parent) = inherited_parent {
            record.parent = ParentRef::Id(parent);
        }
    }

    let id = record.id;
    out.push(record);

    if let Some(children) = value.get("children").and_then(Value::as_array) {
        for child in children {
            flatten_into(child, id, out);
        }
    }
}

/// Integer id from a JSON number or a numeric string.
fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
