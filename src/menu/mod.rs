//! Site navigation built from the CMS menu list.
//!
//! - `record`: lenient decoding of raw menu records
//! - `tree`: forest assembly, ordering, status filtering, active path
//! - `disclosure`: open/closed state with the single-open-root rule
//! - `render`: desktop flyout and mobile accordion HTML

mod disclosure;
mod record;
mod render;
mod tree;

pub use disclosure::DisclosureState;
pub use record::{flatten_payload, MenuRecord, ParentRef};
pub use render::{mobile_indent, render_desktop, render_mobile, MenuView};
pub use tree::{build_from_records, build_tree, is_active, MenuNode, MenuTree, NO_TARGET};
