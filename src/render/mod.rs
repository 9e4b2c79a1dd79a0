//! Server-side HTML rendering.
//!
//! `layout` wraps every page in the document shell (head, header with the
//! navigation, footer). `pages` renders page bodies from CMS records.

pub mod html;
pub mod layout;
pub mod pages;

pub use html::{absolute_url, escape_html, fill, format_date, image_path};
pub use layout::{render_document, render_load_error, Layout};
pub use pages::Page;
