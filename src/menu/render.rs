//! HTML rendering of the navigation tree.
//!
//! Two variants share one tree: a desktop bar with nested flyouts and a
//! mobile accordion. Disclosures are `<details>` elements. Root disclosures
//! share a `name` so the browser keeps at most one of them open; nested
//! disclosures are unnamed and therefore independent.

use std::fmt::Write;

use crate::i18n::Localizer;
use crate::menu::{DisclosureState, MenuNode};
use crate::render::html::escape_html;

const DESKTOP_ROOT_GROUP: &str = "nav-root";
const MOBILE_ROOT_GROUP: &str = "nav-mobile-root";

/// Everything a menu render needs for one request.
#[derive(Debug, Clone, Copy)]
pub struct MenuView<'a> {
    pub roots: &'a [MenuNode],
    pub current_path: &'a str,
    pub localizer: &'a Localizer,
    pub state: &'a DisclosureState,
}

impl MenuView<'_> {
    fn link(&self, node: &MenuNode, class: &str, style: &str) -> String {
        let title = escape_html(&node.title(self.localizer));

        match node.target() {
            Some(target) => {
                let current = target == self.current_path;
                format!(
                    r#"<a class="{}{}" href="{}"{}{}>{}</a>"#,
                    class,
                    if current { " active" } else { "" },
                    escape_html(target),
                    if current { r#" aria-current="page""# } else { "" },
                    style,
                    title
                )
            }
            None => format!(r#"<span class="{} inert"{}>{}</span>"#, class, style, title),
        }
    }

    fn details_open(&self, node: &MenuNode, group: Option<&str>, class: &str) -> String {
        let open = node.id.is_some_and(|id| self.state.is_open(id));
        let active = node.is_active(self.current_path);

        format!(
            r#"<details class="{}{}"{}{}{}>"#,
            class,
            if active { " active" } else { "" },
            group
                .map(|g| format!(r#" name="{}""#, g))
                .unwrap_or_default(),
            node.id
                .map(|id| format!(r#" data-menu-id="{}""#, id))
                .unwrap_or_default(),
            if open { " open" } else { "" }
        )
    }
}

/// Desktop navigation bar.
pub fn render_desktop(view: &MenuView<'_>) -> String {
    let mut out = String::from(r#"<nav class="nav-desktop"><ul class="nav-bar">"#);

    for node in view.roots {
        out.push_str("<li>");
        if node.has_children() {
            out.push_str(&view.details_open(node, Some(DESKTOP_ROOT_GROUP), "nav-disclosure"));
            let _ = write!(
                out,
                r#"<summary class="nav-link">{}</summary><div class="nav-flyout">"#,
                escape_html(&node.title(view.localizer))
            );
            desktop_rows(view, node, &mut out);
            out.push_str("</div></details>");
        } else {
            out.push_str(&view.link(node, "nav-link", ""));
        }
        out.push_str("</li>");
    }

    out.push_str("</ul></nav>");
    out
}

/// Rows of a flyout: the parent's own page first (if any), then children.
fn desktop_rows(view: &MenuView<'_>, parent: &MenuNode, out: &mut String) {
    if parent.target().is_some() {
        out.push_str(&view.link(parent, "nav-row", ""));
    }

    for child in &parent.children {
        if child.has_children() {
            out.push_str(&view.details_open(child, None, "nav-row nav-disclosure nested"));
            let _ = write!(
                out,
                r#"<summary class="nav-row-label">{}</summary><div class="nav-flyout side">"#,
                escape_html(&child.title(view.localizer))
            );
            desktop_rows(view, child, out);
            out.push_str("</div></details>");
        } else {
            out.push_str(&view.link(child, "nav-row", ""));
        }
    }
}

/// Mobile accordion menu.
pub fn render_mobile(view: &MenuView<'_>) -> String {
    let mut out = String::from(r#"<nav class="nav-mobile">"#);
    for node in view.roots {
        mobile_item(view, node, 0, &mut out);
    }
    out.push_str("</nav>");
    out
}

/// Left padding of a mobile entry at `level`, in pixels.
pub fn mobile_indent(level: usize) -> usize {
    if level == 0 {
        16
    } else {
        16 + level * 14
    }
}

fn mobile_item(view: &MenuView<'_>, node: &MenuNode, level: usize, out: &mut String) {
    let style = format!(r#" style="padding-left:{}px""#, mobile_indent(level));
    let size = if level > 0 { " small" } else { "" };

    if !node.has_children() {
        out.push_str(&view.link(node, &format!("nav-item{}", size), &style));
        return;
    }

    let group = (level == 0).then_some(MOBILE_ROOT_GROUP);
    out.push_str(&view.details_open(node, group, "nav-accordion"));
    let _ = write!(
        out,
        r#"<summary class="nav-item{}"{}>{}</summary><div class="nav-panel">"#,
        size,
        style,
        escape_html(&node.title(view.localizer))
    );

    if node.target().is_some() {
        let child_style = format!(r#" style="padding-left:{}px""#, mobile_indent(level + 1));
        out.push_str(&view.link(node, "nav-item small", &child_style));
    }
    for child in &node.children {
        mobile_item(view, child, level + 1, out);
    }

    out.push_str("</div></details>");
}
