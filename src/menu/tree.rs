//! Navigation tree assembly and active-path computation.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::i18n::Localizer;
use crate::menu::record::{flatten_payload, MenuRecord, ParentRef};

/// Link target of nodes that are not attached to a page.
pub const NO_TARGET: &str = "#";

/// One visible entry of the navigation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    /// `None` only for malformed records, which are always leaves
    pub id: Option<i64>,
    pub position: i64,
    target: Option<String>,
    fields: Value,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Page path this node navigates to, if it is linked to a page.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// `href` for rendering: the target or the no-target marker.
    pub fn href(&self) -> &str {
        self.target().unwrap_or(NO_TARGET)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Localized title of the entry.
    pub fn title(&self, localizer: &Localizer) -> String {
        localizer.text(&self.fields, "title")
    }

    /// True when this node or any descendant targets `current_path`.
    ///
    /// Nodes without a page never match, so a grouping label is active only
    /// through its descendants.
    pub fn is_active(&self, current_path: &str) -> bool {
        self.target() == Some(current_path)
            || self.children.iter().any(|child| child.is_active(current_path))
    }

    fn leaf(record: &MenuRecord) -> MenuNode {
        MenuNode {
            id: record.id,
            position: record.position,
            target: None,
            fields: record.fields.clone(),
            children: Vec::new(),
        }
    }
}

/// Free-function form of [`MenuNode::is_active`].
pub fn is_active(node: &MenuNode, current_path: &str) -> bool {
    node.is_active(current_path)
}

/// Build the navigation forest from a raw CMS menu payload.
///
/// Accepts flat records with `parent` references, nested `children`, or a
/// mix of both (first occurrence of an id wins). Disabled records are
/// dropped together with their subtree at every level. Siblings are ordered
/// by `position`, then id. Records whose parent does not exist are
/// unreachable and dropped. Malformed records become inert leaves.
pub fn build_tree(payload: &Value) -> Vec<MenuNode> {
    build_from_records(flatten_payload(payload))
}

/// Build the forest from already decoded records.
pub fn build_from_records(records: Vec<MenuRecord>) -> Vec<MenuNode> {
    let mut seen = HashSet::new();
    let records: Vec<MenuRecord> = records
        .into_iter()
        .filter(|record| match record.id {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect();

    let mut roots = Vec::new();
    let mut children_of: HashMap<i64, Vec<usize>> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        match record.parent {
            ParentRef::Root | ParentRef::Invalid => roots.push(index),
            ParentRef::Id(parent) if seen.contains(&parent) => {
                children_of.entry(parent).or_default().push(index)
            }
            ParentRef::Id(parent) => {
                debug!(
                    "Dropping menu record {:?}: parent {} does not exist",
                    record.id, parent
                );
            }
        }
    }

    let builder = TreeBuilder {
        records: &records,
        children_of: &children_of,
    };
    let mut visited = HashSet::new();
    builder.level(&roots, &mut visited)
}

struct TreeBuilder<'a> {
    records: &'a [MenuRecord],
    children_of: &'a HashMap<i64, Vec<usize>>,
}

impl TreeBuilder<'_> {
    fn level(&self, indices: &[usize], visited: &mut HashSet<i64>) -> Vec<MenuNode> {
        let mut siblings: Vec<&MenuRecord> = indices
            .iter()
            .map(|&i| &self.records[i])
            .filter(|record| !record.is_disabled())
            .collect();

        siblings.sort_by_key(|record| (record.position, record.id.unwrap_or(i64::MAX)));

        siblings
            .into_iter()
            .map(|record| self.node(record, visited))
            .collect()
    }

    fn node(&self, record: &MenuRecord, visited: &mut HashSet<i64>) -> MenuNode {
        if !record.is_well_formed() {
            debug!("Menu record {:?} is malformed, rendering as inert leaf", record.id);
            return MenuNode::leaf(record);
        }

        // is_well_formed guarantees an id
        let Some(id) = record.id else {
            return MenuNode::leaf(record);
        };

        if !visited.insert(id) {
            warn!("Menu record {} reached twice, cutting cycle", id);
            return MenuNode::leaf(record);
        }

        let children = self
            .children_of
            .get(&id)
            .map(|indices| self.level(indices, visited))
            .unwrap_or_default();

        MenuNode {
            id: Some(id),
            position: record.position,
            target: record.page_target(),
            fields: record.fields.clone(),
            children,
        }
    }
}

/// Assembled navigation tree for one menu payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuTree {
    roots: Vec<MenuNode>,
}

impl MenuTree {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            roots: build_tree(payload),
        }
    }

    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    /// Ids of the root entries, in display order.
    pub fn root_ids(&self) -> Vec<i64> {
        self.roots.iter().filter_map(|node| node.id).collect()
    }

    /// Ids from the root down to the deepest node targeting `current_path`.
    pub fn active_trail(&self, current_path: &str) -> Vec<i64> {
        let mut trail = Vec::new();
        let mut level = self.roots.as_slice();

        while let Some(node) = level.iter().find(|node| node.is_active(current_path)) {
            trail.extend(node.id);
            level = node.children.as_slice();
        }

        trail
    }
}
