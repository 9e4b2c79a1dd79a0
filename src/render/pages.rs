//! Page bodies rendered from CMS records.
//!
//! Every function returns a [`Page`]: an optional title for the document
//! head and the HTML placed inside `<main>`. Rich-text `description` fields
//! are HTML authored in the CMS and are embedded as-is; every other value is
//! escaped.

use serde_json::Value;
use std::fmt::Write;

use crate::cms::{NewsKind, NewsPage, NewsQuery};
use crate::contact::{ContactError, ContactForm};
use crate::i18n::Localizer;
use crate::render::html::{absolute_url, escape_html, fill, format_date, image_path};

/// Rendered page body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub title: Option<String>,
    pub body: String,
}

impl Page {
    pub fn titled(title: impl Into<String>, body: String) -> Self {
        let title = title.into();
        Self {
            title: (!title.trim().is_empty()).then_some(title),
            body,
        }
    }

    pub fn untitled(body: String) -> Self {
        Self { title: None, body }
    }
}

/// Per-request inputs shared by all page renderers.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub localizer: Localizer,
    pub asset_base: &'a str,
}

impl PageContext<'_> {
    fn text(&self, record: &Value, key: &str) -> String {
        self.localizer.text(record, key)
    }

    fn image(&self, value: &Value) -> Option<String> {
        image_path(value).map(|path| absolute_url(self.asset_base, path))
    }

    fn strings(&self) -> &'static crate::i18n::LanguageStrings {
        self.localizer.current.strings()
    }
}

/// Outcome of a contact-form submission, shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactNotice {
    Sent,
    Failed,
}

fn items<'v>(record: &'v Value, key: &str) -> &'v [Value] {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn plain<'v>(record: &'v Value, key: &str) -> Option<&'v str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// `slug` if present, otherwise the numeric `id`.
fn slug_or_id(record: &Value) -> Option<String> {
    plain(record, "slug")
        .map(str::to_string)
        .or_else(|| record.get("id").filter(|v| !v.is_null()).map(id_text))
}

fn id_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn section(out: &mut String, class: &str, heading: &str, content: &str) {
    if content.is_empty() {
        return;
    }
    let _ = write!(
        out,
        r#"<section class="{}"><h2>{}</h2>{}</section>"#,
        class,
        escape_html(heading),
        content
    );
}

// ==================== Cards ====================

fn news_card(ctx: &PageContext<'_>, item: &Value) -> String {
    let title = escape_html(&ctx.text(item, "title"));
    let href = item
        .get("id")
        .filter(|v| !v.is_null())
        .map(|id| format!("/news/{}", escape_html(&id_text(id))));

    let mut out = String::from(r#"<article class="card news-card">"#);
    if let Some(src) = ctx.image(&item["image"]) {
        let _ = write!(out, r#"<img src="{}" alt="{}" loading="lazy">"#, escape_html(&src), title);
    }
    if let Some(date) = plain(item, "published_date") {
        let _ = write!(
            out,
            "<time datetime=\"{}\">{}</time>",
            escape_html(date),
            escape_html(&format_date(date))
        );
    }
    match &href {
        Some(href) => {
            let _ = write!(
                out,
                r#"<h3><a href="{href}">{title}</a></h3><a class="more" href="{href}">{more}</a>"#,
                href = href,
                title = title,
                more = escape_html(ctx.strings().read_more)
            );
        }
        None => {
            let _ = write!(out, "<h3>{}</h3>", title);
        }
    }
    out.push_str("</article>");
    out
}

fn employee_card(ctx: &PageContext<'_>, employee: &Value) -> String {
    let name = escape_html(&ctx.text(employee, "full_name"));
    let position = ctx.text(employee, "position");

    let mut out = String::from(r#"<article class="card employee-card">"#);
    if let Some(src) = ctx.image(&employee["image"]) {
        let _ = write!(out, r#"<img src="{}" alt="{}" loading="lazy">"#, escape_html(&src), name);
    }
    match employee.get("id").filter(|v| !v.is_null()) {
        Some(id) => {
            let _ = write!(
                out,
                r#"<h3><a href="/employees/{}">{}</a></h3>"#,
                escape_html(&id_text(id)),
                name
            );
        }
        None => {
            let _ = write!(out, "<h3>{}</h3>", name);
        }
    }
    if !position.is_empty() {
        let _ = write!(out, r#"<p class="position">{}</p>"#, escape_html(&position));
    }
    out.push_str(&contact_links(employee));
    out.push_str("</article>");
    out
}

fn contact_links(record: &Value) -> String {
    let mut out = String::new();
    if let Some(phone) = plain(record, "phone") {
        let _ = write!(
            out,
            r#"<a class="phone" href="tel:{}">{}</a>"#,
            escape_html(&phone.replace(' ', "")),
            escape_html(phone)
        );
    }
    if let Some(email) = plain(record, "email") {
        let _ = write!(
            out,
            r#"<a class="email" href="mailto:{email}">{email}</a>"#,
            email = escape_html(email)
        );
    }
    out
}

fn file_card(ctx: &PageContext<'_>, file: &Value) -> String {
    let Some(path) = plain(file, "file") else {
        return String::new();
    };
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let title = ctx.text(file, "title");
    let title = if title.is_empty() { file_name.to_string() } else { title };

    format!(
        r#"<li class="document"><a href="{}" target="_blank" rel="noopener">{}</a></li>"#,
        escape_html(&absolute_url(ctx.asset_base, path)),
        escape_html(&title)
    )
}

/// Linked title card for a collection entry under `base_path`.
fn link_card(ctx: &PageContext<'_>, item: &Value, base_path: &str, image_key: &str) -> String {
    let title = escape_html(&ctx.text(item, "title"));
    let sub_title = ctx.text(item, "sub_title");

    let mut out = String::from(r#"<article class="card">"#);
    if let Some(src) = ctx.image(&item[image_key]) {
        let _ = write!(out, r#"<img src="{}" alt="{}" loading="lazy">"#, escape_html(&src), title);
    }
    match slug_or_id(item) {
        Some(target) => {
            let _ = write!(
                out,
                r#"<h3><a href="{}/{}">{}</a></h3>"#,
                base_path,
                escape_html(&target),
                title
            );
        }
        None => {
            let _ = write!(out, "<h3>{}</h3>", title);
        }
    }
    if !sub_title.is_empty() {
        let _ = write!(out, "<p>{}</p>", escape_html(&sub_title));
    }
    out.push_str("</article>");
    out
}

fn grid<F>(list: &[Value], class: &str, card: F) -> String
where
    F: Fn(&Value) -> String,
{
    let cards: String = list.iter().map(card).collect();
    if cards.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="{}">{}</div>"#, class, cards)
    }
}

fn documents(ctx: &PageContext<'_>, list: &[Value]) -> String {
    let files: String = list.iter().map(|file| file_card(ctx, file)).collect();
    if files.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="documents">{}</ul>"#, files)
    }
}

fn gallery(ctx: &PageContext<'_>, record: &Value, alt: &str) -> String {
    let images: String = items(record, "images")
        .iter()
        .filter_map(|image| ctx.image(image))
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{}" loading="lazy">"#,
                escape_html(&src),
                escape_html(alt)
            )
        })
        .collect();
    if images.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="gallery">{}</div>"#, images)
    }
}

/// Title block, optional facts, and rich-text description of a record.
fn record_header(ctx: &PageContext<'_>, record: &Value, title: &str) -> String {
    let strings = ctx.strings();
    let mut out = format!("<header class=\"page-header\"><h1>{}</h1>", escape_html(title));

    let sub_title = ctx.text(record, "sub_title");
    if !sub_title.is_empty() {
        let _ = write!(out, r#"<p class="subtitle">{}</p>"#, escape_html(&sub_title));
    }

    let facts: Vec<String> = [("direction", strings.direction), ("duration", strings.duration)]
        .iter()
        .filter_map(|(key, label)| {
            let value = ctx.text(record, key);
            (!value.is_empty()).then(|| {
                format!(
                    "<dt>{}</dt><dd>{}</dd>",
                    escape_html(label),
                    escape_html(&value)
                )
            })
        })
        .collect();
    if !facts.is_empty() {
        let _ = write!(out, r#"<dl class="facts">{}</dl>"#, facts.concat());
    }
    out.push_str("</header>");

    let description = ctx.text(record, "description");
    if !description.is_empty() {
        let _ = write!(out, r#"<div class="rich-text">{}</div>"#, description);
    }
    out
}

// ==================== Home ====================

pub fn home(ctx: &PageContext<'_>, data: &Value, contact: &str) -> Page {
    let strings = ctx.strings();
    let mut out = String::new();

    let slides: String = items(data, "carousels")
        .iter()
        .map(|slide| {
            let title = escape_html(&ctx.text(slide, "title"));
            let description = escape_html(&ctx.text(slide, "description"));
            let image = ctx
                .image(&slide["image"])
                .map(|src| format!(r#"<img src="{}" alt="{}">"#, escape_html(&src), title))
                .unwrap_or_default();
            let link = plain(slide, "link").unwrap_or("#");
            format!(
                concat!(
                    r#"<figure class="slide">{}<figcaption>"#,
                    r#"<h2><a href="{}">{}</a></h2><p>{}</p></figcaption></figure>"#
                ),
                image,
                escape_html(link),
                title,
                description
            )
        })
        .collect();
    if !slides.is_empty() {
        let _ = write!(out, r#"<section class="hero">{}</section>"#, slides);
    }

    for (key, heading, filter) in [
        ("latest_news", strings.latest_news, NewsKind::News),
        ("latest_announcements", strings.announcements, NewsKind::Announcement),
    ] {
        let cards = grid(items(data, key), "grid news-grid", |item| news_card(ctx, item));
        if !cards.is_empty() {
            let content = format!(
                r#"{}<a class="more" href="/news?type={}">{}</a>"#,
                cards,
                filter.as_str(),
                escape_html(strings.news)
            );
            section(&mut out, "news-section", heading, &content);
        }
    }

    section(
        &mut out,
        "directions",
        strings.scientific_directions,
        &grid(items(data, "scientific_directions"), "grid", |item| {
            link_card(ctx, item, "/scientific-directions", "image")
        }),
    );
    section(
        &mut out,
        "postgraduate",
        strings.postgraduate_programs,
        &grid(items(data, "postgraduate_education"), "grid", |item| {
            link_card(ctx, item, "/postgraduate-educations", "image")
        }),
    );

    let partners: String = items(data, "collaborations")
        .iter()
        .map(|partner| {
            let title = escape_html(&ctx.text(partner, "title"));
            let image = ctx
                .image(&partner["image"])
                .map(|src| {
                    format!(
                        r#"<img src="{}" alt="{}" loading="lazy">"#,
                        escape_html(&src),
                        title
                    )
                })
                .unwrap_or_else(|| format!("<span>{}</span>", title));
            match plain(partner, "link") {
                Some(link) => format!(
                    r#"<li><a href="{}" target="_blank" rel="noopener">{}</a></li>"#,
                    escape_html(link),
                    image
                ),
                None => format!("<li>{}</li>", image),
            }
        })
        .collect();
    if !partners.is_empty() {
        section(&mut out, "partners", strings.partners, &format!("<ul>{}</ul>", partners));
    }

    out.push_str(contact);
    Page::untitled(out)
}

// ==================== Dynamic Page ====================

/// Page managed in the CMS menu, laid out by its `type`.
pub fn dynamic_page(ctx: &PageContext<'_>, data: &Value) -> Page {
    let strings = ctx.strings();
    let title = ctx.text(data, "title");
    let kind = plain(data, "type").unwrap_or_default();

    let mut out = format!(r#"<article class="dynamic-page {}">"#, escape_html(kind));
    out.push_str(&record_header(ctx, data, &title));

    let employees = grid(items(data, "employees"), "grid employees", |emp| employee_card(ctx, emp));
    // Leadership pages lead with the people; other pages list them after the content.
    if kind == "leadership" {
        section(&mut out, "employees", strings.employees, &employees);
    }

    let collections = [
        (
            "postgraduate_educations",
            strings.postgraduate_programs,
            "/postgraduate-educations",
            "logo",
        ),
        (
            "scientific_directions",
            strings.scientific_directions,
            "/scientific-directions",
            "logo",
        ),
        ("labs", strings.laboratories, "/laboratories", "image"),
        ("departments", strings.departments, "/departments", "image"),
    ];
    for (key, heading, base_path, image_key) in collections {
        let cards = grid(items(data, key), "grid", |item| {
            link_card(ctx, item, base_path, image_key)
        });
        section(&mut out, key, heading, &cards);
    }

    section(
        &mut out,
        "posts",
        strings.latest_news,
        &grid(items(data, "posts"), "grid news-grid", |item| news_card(ctx, item)),
    );
    if kind != "leadership" {
        section(&mut out, "employees", strings.employees, &employees);
    }
    section(&mut out, "gallery", strings.gallery, &gallery(ctx, data, &title));
    section(&mut out, "documents", strings.documents, &documents(ctx, items(data, "files")));

    out.push_str("</article>");
    Page::titled(title, out)
}

/// Whether a dynamic page stands in for the news list.
pub fn is_news_page(data: &Value) -> bool {
    plain(data, "type") == Some("news")
}

// ==================== Detail Pages ====================

/// Laboratory, department, scientific direction or postgraduate program.
pub fn collection_detail(ctx: &PageContext<'_>, record: &Value) -> Page {
    let strings = ctx.strings();
    let title = ctx.text(record, "title");

    let mut out = String::from(r#"<article class="detail">"#);
    if let Some(src) = ctx.image(&record["logo"]).or_else(|| ctx.image(&record["image"])) {
        let _ = write!(
            out,
            r#"<img class="cover" src="{}" alt="{}">"#,
            escape_html(&src),
            escape_html(&title)
        );
    }
    out.push_str(&record_header(ctx, record, &title));
    section(
        &mut out,
        "employees",
        strings.employees,
        &grid(items(record, "employees"), "grid employees", |emp| employee_card(ctx, emp)),
    );
    section(
        &mut out,
        "posts",
        strings.latest_news,
        &grid(items(record, "posts"), "grid news-grid", |item| news_card(ctx, item)),
    );
    section(&mut out, "gallery", strings.gallery, &gallery(ctx, record, &title));
    section(&mut out, "documents", strings.documents, &documents(ctx, items(record, "files")));
    out.push_str("</article>");

    Page::titled(title, out)
}

pub fn news_detail(ctx: &PageContext<'_>, item: &Value) -> Page {
    let strings = ctx.strings();
    let title = ctx.text(item, "title");

    let mut out = String::from(r#"<article class="news-detail">"#);
    let _ = write!(out, "<h1>{}</h1>", escape_html(&title));
    if let Some(date) = plain(item, "published_date") {
        let _ = write!(
            out,
            "<time datetime=\"{}\">{}</time>",
            escape_html(date),
            escape_html(&format_date(date))
        );
    }
    if let Some(src) = ctx.image(&item["image"]) {
        let _ = write!(
            out,
            r#"<img class="cover" src="{}" alt="{}">"#,
            escape_html(&src),
            escape_html(&title)
        );
    }
    let description = ctx.text(item, "description");
    if !description.is_empty() {
        let _ = write!(out, r#"<div class="rich-text">{}</div>"#, description);
    }
    section(&mut out, "gallery", strings.gallery, &gallery(ctx, item, &title));
    let _ = write!(
        out,
        r#"<a class="back" href="/news">{}</a></article>"#,
        escape_html(strings.news)
    );

    Page::titled(title, out)
}

pub fn employee_detail(ctx: &PageContext<'_>, employee: &Value) -> Page {
    let name = ctx.text(employee, "full_name");
    let position = ctx.text(employee, "position");

    let mut out = String::from(r#"<article class="employee-detail"><aside class="profile">"#);
    if let Some(src) = ctx.image(&employee["image"]) {
        let _ = write!(out, r#"<img src="{}" alt="{}">"#, escape_html(&src), escape_html(&name));
    }
    let _ = write!(out, "<h1>{}</h1>", escape_html(&name));
    if !position.is_empty() {
        let _ = write!(out, r#"<p class="position">{}</p>"#, escape_html(&position));
    }
    out.push_str(&contact_links(employee));
    out.push_str("</aside>");

    let description = ctx.text(employee, "description");
    if !description.is_empty() {
        let _ = write!(out, r#"<div class="rich-text">{}</div>"#, description);
    }
    out.push_str("</article>");

    Page::titled(name, out)
}

// ==================== News List ====================

pub fn news_list(ctx: &PageContext<'_>, page: &NewsPage, query: NewsQuery) -> Page {
    let strings = ctx.strings();
    let mut out = format!(r#"<section class="news-list"><h1>{}</h1>"#, escape_html(strings.news));

    out.push_str(r#"<nav class="filters">"#);
    for (kind, label) in [
        (NewsKind::All, strings.filter_all),
        (NewsKind::News, strings.filter_news),
        (NewsKind::Announcement, strings.filter_announcements),
    ] {
        let _ = write!(
            out,
            r#"<a href="/news?type={}"{}>{}</a>"#,
            kind.as_str(),
            if kind == query.kind { r#" class="active" aria-current="true""# } else { "" },
            escape_html(label)
        );
    }
    out.push_str("</nav>");

    let cards = grid(&page.results, "grid news-grid", |item| news_card(ctx, item));
    if cards.is_empty() {
        let _ = write!(out, r#"<p class="empty">{}</p>"#, escape_html(strings.news_empty));
    } else {
        out.push_str(&cards);
    }

    let total = page.total_pages(query.page_size);
    if total > 1 {
        let current = u64::from(query.page);
        out.push_str(r#"<nav class="pagination">"#);
        if page.previous.is_some() && current > 1 {
            let _ = write!(
                out,
                r#"<a rel="prev" href="/news?type={}&amp;page={}">{}</a>"#,
                query.kind.as_str(),
                current - 1,
                escape_html(strings.previous)
            );
        }
        for number in 1..=total {
            if number == current {
                let _ = write!(
                    out,
                    r#"<span class="current" aria-current="page">{}</span>"#,
                    number
                );
            } else {
                let _ = write!(
                    out,
                    r#"<a href="/news?type={}&amp;page={}">{}</a>"#,
                    query.kind.as_str(),
                    number,
                    number
                );
            }
        }
        if page.next.is_some() && current < total {
            let _ = write!(
                out,
                r#"<a rel="next" href="/news?type={}&amp;page={}">{}</a>"#,
                query.kind.as_str(),
                current + 1,
                escape_html(strings.next)
            );
        }
        out.push_str("</nav>");
    }

    out.push_str("</section>");
    Page::titled(strings.news, out)
}

// ==================== Search ====================

/// Search page. `results` is `None` when no query was given.
pub fn search(ctx: &PageContext<'_>, query: &str, results: Option<&Value>) -> Page {
    let strings = ctx.strings();
    let mut out = format!(
        concat!(
            r#"<section class="search"><h1>{title}</h1>"#,
            r#"<form action="/search" method="get" role="search">"#,
            r#"<input type="search" name="q" value="{value}" placeholder="{placeholder}">"#,
            r#"<button type="submit">{label}</button></form>"#
        ),
        title = escape_html(strings.search_title),
        value = escape_html(query),
        placeholder = escape_html(strings.search_placeholder),
        label = escape_html(strings.search),
    );

    if let Some(results) = results {
        let _ = write!(
            out,
            r#"<p class="summary">{}</p>"#,
            escape_html(&fill(strings.search_results_for, &[("query", query)]))
        );

        let mut shown = 0;
        if let Some(sections) = results.get("results").and_then(Value::as_object) {
            for (key, list) in sections {
                let list = list.as_array().map(Vec::as_slice).unwrap_or_default();
                if list.is_empty() {
                    continue;
                }
                let content = match key.as_str() {
                    "posts" => grid(list, "grid news-grid", |item| news_card(ctx, item)),
                    "employees" => grid(list, "grid employees", |emp| employee_card(ctx, emp)),
                    "page_files" => documents(ctx, list),
                    "pages" => grid(list, "grid", |item| {
                        link_card(ctx, item, "/dynamic-page", "image")
                    }),
                    _ => continue,
                };
                if content.is_empty() {
                    continue;
                }
                let _ = write!(
                    out,
                    concat!(
                        r#"<section class="results {key}"><h2>{heading} "#,
                        r#"<span class="count">{count}</span></h2>{content}</section>"#
                    ),
                    key = escape_html(key),
                    heading = escape_html(search_heading(ctx, key)),
                    count = list.len(),
                    content = content
                );
                shown += 1;
            }
        }

        if shown == 0 {
            let _ = write!(
                out,
                r#"<div class="empty"><p>{}</p><a href="/">{}</a></div>"#,
                escape_html(strings.search_no_results),
                escape_html(strings.back_home)
            );
        }
    }

    out.push_str("</section>");
    Page::titled(strings.search, out)
}

fn search_heading(ctx: &PageContext<'_>, key: &str) -> &'static str {
    let strings = ctx.strings();
    match key {
        "posts" => strings.news,
        "employees" => strings.employees,
        "page_files" => strings.documents,
        _ => strings.search_title,
    }
}

// ==================== Contact Form ====================

/// Contact form section, with field errors or a submission notice.
pub fn contact_form(
    ctx: &PageContext<'_>,
    form: &ContactForm,
    errors: &[ContactError],
    notice: Option<ContactNotice>,
) -> String {
    let strings = ctx.strings();
    let language = ctx.localizer.current;

    let mut out = format!(
        r#"<section class="contact" id="contact"><h2>{}</h2>"#,
        escape_html(strings.contact_title)
    );
    match notice {
        Some(ContactNotice::Sent) => {
            let _ = write!(
                out,
                r#"<p class="notice success" role="status">{}</p>"#,
                escape_html(strings.contact_success)
            );
        }
        Some(ContactNotice::Failed) => {
            let _ = write!(
                out,
                r#"<p class="notice error" role="alert">{}</p>"#,
                escape_html(strings.contact_failed)
            );
        }
        None => {}
    }

    out.push_str(r#"<form action="/contact" method="post">"#);
    let fields = [
        ("name", strings.contact_name, form.name.as_str(), false),
        ("phone", strings.contact_phone, form.phone.as_str(), false),
        ("message", strings.contact_message, form.message.as_str(), true),
    ];
    for (field, label, value, multiline) in fields {
        let error = errors.iter().find(|e| e.field() == field);
        let _ = write!(
            out,
            r#"<label for="contact-{field}">{}</label>"#,
            escape_html(label),
            field = field
        );
        let invalid = if error.is_some() { r#" aria-invalid="true""# } else { "" };
        if multiline {
            let _ = write!(
                out,
                concat!(
                    r#"<textarea id="contact-{field}" name="{field}" rows="4"{invalid}>"#,
                    r#"{value}</textarea>"#
                ),
                field = field,
                invalid = invalid,
                value = escape_html(value)
            );
        } else {
            let _ = write!(
                out,
                concat!(
                    r#"<input id="contact-{field}" name="{field}" "#,
                    r#"type="{kind}" value="{value}"{invalid}>"#
                ),
                field = field,
                kind = if field == "phone" { "tel" } else { "text" },
                value = escape_html(value),
                invalid = invalid
            );
        }
        if let Some(error) = error {
            let _ = write!(
                out,
                r#"<p class="field-error">{}</p>"#,
                escape_html(error.localized(language))
            );
        }
    }
    let _ = write!(
        out,
        r#"<button type="submit">{}</button></form></section>"#,
        escape_html(strings.contact_submit)
    );
    out
}

pub fn contact_page(ctx: &PageContext<'_>, form_html: String) -> Page {
    Page::titled(ctx.strings().contact_title, form_html)
}

// ==================== Errors ====================

pub fn not_found(ctx: &PageContext<'_>) -> Page {
    let strings = ctx.strings();
    Page::titled(
        strings.not_found_title,
        format!(
            concat!(
                r#"<section class="not-found"><p class="code">404</p>"#,
                r#"<h1>{}</h1><p>{}</p><a class="button" href="/">{}</a></section>"#
            ),
            escape_html(strings.not_found_title),
            escape_html(strings.not_found_text),
            escape_html(strings.back_home)
        ),
    )
}

/// Error state inside the layout when one page's data failed to load.
pub fn page_error(ctx: &PageContext<'_>, retry_href: &str) -> Page {
    let strings = ctx.strings();
    Page::titled(
        strings.page_error_title,
        format!(
            concat!(
                r#"<section class="page-error" role="alert"><h1>{}</h1><p>{}</p>"#,
                r#"<a class="button" href="{}">{}</a></section>"#
            ),
            escape_html(strings.page_error_title),
            escape_html(strings.load_error_hint),
            escape_html(retry_href),
            escape_html(strings.retry)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use serde_json::json;

    fn ctx(language: Language) -> PageContext<'static> {
        PageContext {
            localizer: Localizer::new(language),
            asset_base: "https://api.example.uz",
        }
    }

    // ==================== Home ====================

    #[test]
    fn test_home_sections() {
        let data = json!({
            "carousels": [{"title_uz": "Xush kelibsiz", "image": "/media/s1.jpg", "link": "/news"}],
            "latest_news": [{"id": 7, "title_uz": "Konferensiya", "published_date": "2024-03-05"}],
            "latest_announcements": [],
            "scientific_directions": [{"slug": "geologiya", "title_uz": "Geologiya"}],
            "collaborations": [{"title_uz": "Hamkor", "link": "https://partner.uz"}]
        });
        let page = home(&ctx(Language::UZBEK), &data, "<section id=\"contact\"></section>");

        assert!(page.title.is_none());
        assert!(page.body.contains(r#"src="https://api.example.uz/media/s1.jpg""#));
        assert!(page.body.contains(r#"<a href="/news/7">Konferensiya</a>"#));
        assert!(page.body.contains("05.03.2024"));
        assert!(page.body.contains(r#"href="/scientific-directions/geologiya""#));
        assert!(page.body.contains("https://partner.uz"));
        // Empty announcements section is omitted
        assert!(!page.body.contains("type=announcement"));
        assert!(page.body.ends_with("<section id=\"contact\"></section>"));
    }

    // ==================== Dynamic Page ====================

    #[test]
    fn test_dynamic_lab_page() {
        let data = json!({
            "type": "lab",
            "title_ru": "Лаборатории",
            "description_ru": "<p>Описание</p>",
            "labs": [{"id": 3, "slug": "seismic", "title_ru": "Сейсмика"}],
            "employees": [{"id": 11, "full_name_ru": "Иванов И.", "position_ru": "Заведующий",
                           "email": "ivanov@example.uz"}],
            "files": [{"id": 1, "file": "/media/docs/plan.pdf"}],
            "images": ["/media/a.jpg", {"image": "/media/b.jpg"}]
        });
        let page = dynamic_page(&ctx(Language::RUSSIAN), &data);

        assert_eq!(page.title.as_deref(), Some("Лаборатории"));
        assert!(page.body.contains("<p>Описание</p>"));
        assert!(page.body.contains(r#"href="/laboratories/seismic""#));
        assert!(page.body.contains(r#"href="/employees/11""#));
        assert!(page.body.contains("mailto:ivanov@example.uz"));
        // Untitled file falls back to its file name
        assert!(page.body.contains(">plan.pdf</a>"));
        assert!(page.body.contains("https://api.example.uz/media/b.jpg"));
    }

    #[test]
    fn test_leadership_lists_employees_first() {
        let data = json!({
            "type": "leadership",
            "title_en": "Leadership",
            "employees": [{"id": 1, "full_name_en": "Director"}],
            "posts": [{"id": 2, "title_en": "Post"}]
        });
        let page = dynamic_page(&ctx(Language::ENGLISH), &data);

        let employees = page.body.find("Director").unwrap();
        let posts = page.body.find("Post</a>").unwrap();
        assert!(employees < posts);
    }

    #[test]
    fn test_is_news_page() {
        assert!(is_news_page(&json!({"type": "news"})));
        assert!(!is_news_page(&json!({"type": "lab"})));
        assert!(!is_news_page(&json!([])));
    }

    #[test]
    fn test_description_is_not_escaped_but_titles_are() {
        let data = json!({"title_en": "<b>Lab</b>", "description_en": "<em>rich</em>"});
        let page = collection_detail(&ctx(Language::ENGLISH), &data);

        assert!(page.body.contains("&lt;b&gt;Lab&lt;/b&gt;"));
        assert!(page.body.contains("<em>rich</em>"));
    }

    // ==================== News List ====================

    #[test]
    fn test_news_list_pagination_and_filter() {
        let page = NewsPage {
            count: 20,
            next: Some("next".to_string()),
            previous: Some("prev".to_string()),
            results: vec![json!({"id": 1, "title_en": "First"})],
        };
        let query = NewsQuery::new(2, 9, NewsKind::Announcement);
        let rendered = news_list(&ctx(Language::ENGLISH), &page, query);

        assert!(rendered.body.contains(r#"<a href="/news?type=announcement" class="active""#));
        assert!(rendered.body.contains(r#"rel="prev" href="/news?type=announcement&amp;page=1""#));
        assert!(rendered.body.contains(r#"rel="next" href="/news?type=announcement&amp;page=3""#));
        assert!(rendered.body.contains(r#"<span class="current" aria-current="page">2</span>"#));
    }

    #[test]
    fn test_news_list_empty() {
        let rendered = news_list(
            &ctx(Language::UZBEK),
            &NewsPage::default(),
            NewsQuery::new(1, 9, NewsKind::All),
        );
        assert!(rendered.body.contains(&escape_html(Language::UZBEK.strings().news_empty)));
        assert!(!rendered.body.contains("pagination"));
    }

    // ==================== Search ====================

    #[test]
    fn test_search_shows_only_non_empty_sections() {
        let results = json!({"results": {
            "posts": [],
            "employees": [{"id": 4, "full_name_en": "Jane Doe"}],
            "pages": [{"slug": "about", "title_en": "About us"}],
            "unknown": [{"id": 1}]
        }});
        let page = search(&ctx(Language::ENGLISH), "doe", Some(&results));

        assert!(!page.body.contains("results posts"));
        assert!(page.body.contains("results employees"));
        assert!(page.body.contains(r#"href="/dynamic-page/about""#));
        assert!(!page.body.contains("results unknown"));
        assert!(!page.body.contains(&escape_html(Language::ENGLISH.strings().search_no_results)));
    }

    #[test]
    fn test_search_without_matches() {
        let page = search(&ctx(Language::ENGLISH), "zzz", Some(&json!({"results": {"posts": []}})));
        assert!(page.body.contains(&escape_html(Language::ENGLISH.strings().search_no_results)));
    }

    #[test]
    fn test_search_without_query_shows_form_only() {
        let page = search(&ctx(Language::ENGLISH), "", None);
        assert!(page.body.contains(r#"action="/search""#));
        assert!(!page.body.contains("summary"));
    }

    // ==================== Contact Form ====================

    #[test]
    fn test_contact_form_errors_are_localized() {
        let form = ContactForm {
            name: "A".to_string(),
            phone: "<123>".to_string(),
            message: "Savolim bor".to_string(),
        };
        let html = contact_form(
            &ctx(Language::UZBEK),
            &form,
            &[ContactError::NameTooShort, ContactError::PhoneTooShort],
            None,
        );

        assert!(html.contains(&escape_html(ContactError::NameTooShort.localized(Language::UZBEK))));
        assert!(html.contains(r#"value="&lt;123&gt;" aria-invalid="true""#));
        assert!(html.contains(">Savolim bor</textarea>"));
    }

    #[test]
    fn test_contact_notice() {
        let html = contact_form(
            &ctx(Language::ENGLISH),
            &ContactForm::default(),
            &[],
            Some(ContactNotice::Sent),
        );
        assert!(html.contains(&escape_html(Language::ENGLISH.strings().contact_success)));
        assert!(!html.contains("aria-invalid"));
    }

    // ==================== Errors ====================

    #[test]
    fn test_not_found_and_page_error() {
        let strings = Language::ENGLISH.strings();
        let page = not_found(&ctx(Language::ENGLISH));
        assert_eq!(page.title.as_deref(), Some(strings.not_found_title));
        assert!(page.body.contains("404"));

        let page = page_error(&ctx(Language::ENGLISH), "/news/5");
        assert!(page.body.contains(r#"href="/news/5""#));
    }
}
