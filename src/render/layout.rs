//! Document shell shared by every page.

use chrono::{Datelike, Utc};
use serde_json::Value;
use std::fmt::Write;

use crate::i18n::{Language, LanguageRegistry, Localizer};
use crate::menu::{render_desktop, render_mobile, DisclosureState, MenuTree, MenuView};
use crate::render::html::{absolute_url, escape_html, fill, image_path};
use crate::render::pages::Page;

const SOCIAL_LINKS: [(&str, &str); 4] = [
    ("telegram", "Telegram"),
    ("facebook", "Facebook"),
    ("instagram", "Instagram"),
    ("youtube", "YouTube"),
];

/// Layout resources and request context for one render.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub company: &'a Value,
    pub menu: &'a MenuTree,
    pub localizer: Localizer,
    pub current_path: &'a str,
    /// CMS base URL that relative asset paths are joined to
    pub asset_base: &'a str,
    /// Current search text, echoed into the header search box
    pub search_query: &'a str,
}

impl Layout<'_> {
    fn language(&self) -> Language {
        self.localizer.current
    }

    fn logo_url(&self) -> String {
        image_path(&self.company["logo"])
            .map(|path| absolute_url(self.asset_base, path))
            .unwrap_or_default()
    }

    fn company_name(&self) -> String {
        let name = self.localizer.text(self.company, "name");
        if name.is_empty() {
            self.language().strings().site_title.to_string()
        } else {
            name
        }
    }
}

/// Full HTML document for `page` inside the site layout.
pub fn render_document(layout: &Layout<'_>, page: &Page) -> String {
    let strings = layout.language().strings();
    let logo = layout.logo_url();

    let mut out = document_head(layout.language(), page.title.as_deref(), &logo);
    out.push_str(r#"<body><div class="site">"#);
    out.push_str(&header(layout, &logo));
    let _ = write!(out, r#"<main class="site-main">{}</main>"#, page.body);
    out.push_str(&footer(layout, &logo));
    let _ = write!(
        out,
        r#"</div><noscript><p class="hint">{}</p></noscript></body></html>"#,
        escape_html(strings.site_description)
    );
    out
}

/// Full-page error shown when the layout resources cannot be loaded.
///
/// Offers a retry (the same URL again) and a plain reload.
pub fn render_load_error(language: Language, current_path: &str) -> String {
    let strings = language.strings();
    let retry_href = escape_html(if current_path.is_empty() { "/" } else { current_path });

    let mut out = document_head(language, Some(strings.load_error_title), "");
    let _ = write!(
        out,
        concat!(
            r#"<body><main class="load-error" role="alert">"#,
            r#"<h1>{title}</h1><p>{hint}</p>"#,
            r#"<div class="actions"><a class="button primary" href="{retry_href}">{retry}</a>"#,
            r#"<a class="button" href="{retry_href}" "#,
            r#"onclick="window.location.reload();return false;">{reload}</a></div>"#,
            r#"</main></body></html>"#
        ),
        title = escape_html(strings.load_error_title),
        hint = escape_html(strings.load_error_hint),
        retry_href = retry_href,
        retry = escape_html(strings.retry),
        reload = escape_html(strings.reload),
    );
    out
}

fn document_head(language: Language, page_title: Option<&str>, icon: &str) -> String {
    let strings = language.strings();
    let title = match page_title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(page_title) => format!("{} | {}", page_title, strings.site_title),
        None => strings.site_title.to_string(),
    };

    let mut out = String::from("<!DOCTYPE html>");
    let _ = write!(
        out,
        concat!(
            r#"<html lang="{lang}"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            r#"<title>{title}</title><meta name="description" content="{description}">"#,
            r#"<meta property="og:title" content="{title}">"#
        ),
        lang = language.code(),
        title = escape_html(&title),
        description = escape_html(strings.site_description),
    );
    if !icon.is_empty() {
        let _ = write!(out, r#"<link rel="icon" href="{}">"#, escape_html(icon));
    }
    out.push_str(r#"<link rel="stylesheet" href="/static/site.css"></head>"#);
    out
}

fn header(layout: &Layout<'_>, logo: &str) -> String {
    let strings = layout.language().strings();
    let name = escape_html(&layout.company_name());

    // Desktop flyouts start closed; the mobile accordion opens the branch
    // holding the current page.
    let closed = DisclosureState::new(layout.menu.root_ids());
    let mut expanded = DisclosureState::new(layout.menu.root_ids());
    for id in layout.menu.active_trail(layout.current_path) {
        expanded.open(id);
    }

    let desktop = MenuView {
        roots: layout.menu.roots(),
        current_path: layout.current_path,
        localizer: &layout.localizer,
        state: &closed,
    };
    let mobile = MenuView {
        state: &expanded,
        ..desktop
    };

    let mut out = String::from(r#"<header class="site-header"><div class="brand">"#);
    let _ = write!(out, r#"<a class="brand-link" href="/" title="{}">"#, escape_html(strings.home));
    if !logo.is_empty() {
        let _ = write!(out, r#"<img class="logo" src="{}" alt="{}">"#, escape_html(logo), name);
    }
    let _ = write!(out, r#"<span class="brand-name">{}</span></a></div>"#, name);

    out.push_str(&render_desktop(&desktop));
    out.push_str(&search_box(layout));
    out.push_str(&language_switcher(layout.language()));

    let _ = write!(
        out,
        concat!(
            r#"<details class="mobile-menu"><summary aria-label="{menu}">{menu}</summary>"#,
            r#"{nav}</details></header>"#
        ),
        menu = escape_html(strings.menu),
        nav = render_mobile(&mobile)
    );
    out
}

fn search_box(layout: &Layout<'_>) -> String {
    let strings = layout.language().strings();
    format!(
        concat!(
            r#"<form class="search-box" action="/search" method="get" role="search">"#,
            r#"<input type="search" name="q" value="{value}" "#,
            r#"placeholder="{placeholder}" aria-label="{label}">"#,
            r#"<button type="submit">{label}</button></form>"#
        ),
        value = escape_html(layout.search_query),
        placeholder = escape_html(strings.search_placeholder),
        label = escape_html(strings.search),
    )
}

fn language_switcher(current: Language) -> String {
    let mut out = format!(
        r#"<nav class="lang-switch" aria-label="{}"><ul>"#,
        escape_html(current.strings().language)
    );

    for config in LanguageRegistry::get().list_enabled() {
        let selected = config.code == current.code();
        let _ = write!(
            out,
            concat!(
                r#"<li><a href="/lang/{code}" hreflang="{code}" "#,
                r#"title="{native}"{current}>{label}</a></li>"#
            ),
            code = config.code,
            native = escape_html(config.native_name),
            current = if selected { r#" class="active" aria-current="true""# } else { "" },
            label = escape_html(config.label),
        );
    }

    out.push_str("</ul></nav>");
    out
}

fn footer(layout: &Layout<'_>, logo: &str) -> String {
    let strings = layout.language().strings();
    let company = layout.company;
    let name = escape_html(&layout.company_name());

    let mut out = String::from(r#"<footer class="site-footer"><div class="footer-brand">"#);
    if !logo.is_empty() {
        let _ = write!(out, r#"<img class="logo" src="{}" alt="{}">"#, escape_html(logo), name);
    }
    let _ = write!(out, "<p>{}</p></div>", name);

    let _ = write!(
        out,
        r#"<div class="footer-contacts"><h2>{}</h2><dl>"#,
        escape_html(strings.contacts)
    );

    let address = layout.localizer.text(company, "address");
    if !address.is_empty() {
        let _ = write!(
            out,
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(strings.address),
            escape_html(&address)
        );
    }
    if let Some(phone) = plain_field(company, "phone_number") {
        let _ = write!(
            out,
            r#"<dt>{}</dt><dd><a href="tel:{}">{}</a></dd>"#,
            escape_html(strings.phone),
            escape_html(&phone.replace(' ', "")),
            escape_html(phone)
        );
    }
    if let Some(email) = plain_field(company, "email") {
        let _ = write!(
            out,
            r#"<dt>{}</dt><dd><a href="mailto:{email}">{email}</a></dd>"#,
            escape_html(strings.email),
            email = escape_html(email)
        );
    }
    out.push_str("</dl></div>");

    let socials: Vec<String> = SOCIAL_LINKS
        .iter()
        .filter_map(|(field, label)| {
            plain_field(company, field).map(|url| {
                format!(
                    r#"<li><a href="{}" rel="noopener" target="_blank">{}</a></li>"#,
                    escape_html(url),
                    label
                )
            })
        })
        .collect();
    if !socials.is_empty() {
        let _ = write!(out, r#"<ul class="footer-social">{}</ul>"#, socials.concat());
    }

    let year = Utc::now().year().to_string();
    let _ = write!(
        out,
        r#"<p class="copyright">{}</p></footer>"#,
        escape_html(&fill(strings.rights_reserved, &[("year", &year)]))
    );
    out
}

/// Non-localized string field, trimmed; empty counts as absent.
fn plain_field<'v>(record: &'v Value, key: &str) -> Option<&'v str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
