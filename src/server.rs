//! HTTP server: routes, request language detection and page handlers.

use anyhow::{Context, Result};
use axum::{
    async_trait,
    extract::{Form, FromRequestParts, Path, Query, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheKey, ResourceCache};
use crate::cms::{CmsClient, CmsError, NewsKind, NewsQuery};
use crate::config::Config;
use crate::contact::ContactForm;
use crate::i18n::{Language, Localizer};
use crate::menu::MenuTree;
use crate::render::pages::{self, ContactNotice, PageContext};
use crate::render::{render_document, render_load_error, Layout, Page};
use crate::{scheduler, security};

pub const LANG_COOKIE: &str = "lang";
const LANG_COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;
const SITE_CSS: &str = include_str!("../static/site.css");

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cms: CmsClient,
    pub cache: Arc<ResourceCache>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, CmsError> {
        let cms = CmsClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            cms,
            cache: Arc::new(ResourceCache::new()),
        })
    }

    fn page_context(&self, language: Language) -> PageContext<'_> {
        PageContext {
            localizer: Localizer::new(language),
            asset_base: self.cms.base_url(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/home", get(home))
        .route("/dynamic-page/:slug", get(dynamic_page))
        .route("/news", get(news_list))
        .route("/news/:id", get(news_detail))
        .route("/employees/:id", get(employee_detail))
        .route("/laboratories/:id", get(laboratory_detail))
        .route("/departments/:id", get(department_detail))
        .route("/scientific-directions/:slug", get(scientific_direction_detail))
        .route("/postgraduate-educations/:slug", get(postgraduate_detail))
        .route("/search", get(search))
        .route("/contact", get(contact_page).post(submit_contact))
        .route("/lang/:code", get(switch_language))
        .route("/health", get(health))
        .route("/cache/refresh", post(refresh_cache))
        .route("/static/site.css", get(stylesheet))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `0.0.0.0:port` and serve until Ctrl-C.
pub async fn run(state: AppState, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("✓ Listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("Server error")
}

// ==================== Request Context ====================

#[derive(Debug, Default, Deserialize)]
struct RequestParams {
    lang: Option<String>,
    q: Option<String>,
}

/// Per-request facts every page needs.
#[derive(Debug, Clone)]
pub struct SiteRequest {
    pub language: Language,
    pub path: String,
    pub path_and_query: String,
    pub search_query: String,
}

#[async_trait]
impl FromRequestParts<AppState> for SiteRequest {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let params = Query::<RequestParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();

        let language = detect_language(
            params.lang.as_deref(),
            &parts.headers,
            state.config.default_language,
        );

        Ok(Self {
            language,
            path: decode_path(parts.uri.path()),
            path_and_query: parts
                .uri
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| "/".to_string()),
            search_query: params.q.unwrap_or_default().trim().to_string(),
        })
    }
}

/// Percent-decoded request path, so it compares equal to menu targets
/// built from raw CMS slugs.
fn decode_path(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|path| path.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Language for a request: `?lang=`, then the `lang` cookie, then
/// `Accept-Language`, then `default`.
pub fn detect_language(query: Option<&str>, headers: &HeaderMap, default: Language) -> Language {
    query
        .and_then(Language::parse_loose)
        .or_else(|| cookie_value(headers, LANG_COOKIE).and_then(Language::parse_loose))
        .or_else(|| accept_language(headers))
        .unwrap_or(default)
}

fn cookie_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value.trim())
        })
}

/// First supported language in `Accept-Language`, in header order.
fn accept_language(headers: &HeaderMap) -> Option<Language> {
    headers
        .get(header::ACCEPT_LANGUAGE)?
        .to_str()
        .ok()?
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .find_map(Language::parse_loose)
}

// ==================== Page Plumbing ====================

struct LayoutData {
    company: Arc<Value>,
    menu: MenuTree,
}

/// Company info and menus, fetched concurrently and cached for the process.
async fn load_layout(state: &AppState) -> Result<LayoutData, CmsError> {
    let (company, menus) = futures::future::try_join(
        state
            .cache
            .get_or_fetch(CacheKey::CompanyInfo, || state.cms.company_info()),
        state
            .cache
            .get_or_fetch(CacheKey::Menus, || state.cms.menus()),
    )
    .await?;

    Ok(LayoutData {
        company,
        menu: MenuTree::from_payload(&menus),
    })
}

/// Fetch `key` anew; on a transient failure fall back to the cached copy.
async fn fresh<F, Fut>(state: &AppState, key: CacheKey, fetch: F) -> Result<Arc<Value>, CmsError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Value, CmsError>>,
{
    match state.cache.refresh(key.clone(), fetch).await {
        Ok(value) => Ok(value),
        Err(err) if err.is_not_found() => {
            state.cache.invalidate(&key);
            Err(err)
        }
        Err(err) => match state.cache.get(&key) {
            Some(stale) => {
                warn!("Serving cached {} after fetch failure: {}", key, err);
                Ok(stale)
            }
            None => Err(err),
        },
    }
}

fn document(
    state: &AppState,
    req: &SiteRequest,
    layout: &LayoutData,
    status: StatusCode,
    page: &Page,
) -> Response {
    let html = render_document(
        &Layout {
            company: &layout.company,
            menu: &layout.menu,
            localizer: Localizer::new(req.language),
            current_path: &req.path,
            asset_base: state.cms.base_url(),
            search_query: &req.search_query,
        },
        page,
    );
    (status, Html(html)).into_response()
}

fn load_error(req: &SiteRequest, err: &CmsError) -> Response {
    error!("Failed to load layout resources for {}: {}", req.path, err);
    (
        StatusCode::BAD_GATEWAY,
        Html(render_load_error(req.language, &req.path_and_query)),
    )
        .into_response()
}

fn page_failure(ctx: &PageContext<'_>, req: &SiteRequest, err: &CmsError) -> (StatusCode, Page) {
    if err.is_not_found() {
        debug!("{} not found in CMS", req.path);
        (StatusCode::NOT_FOUND, pages::not_found(ctx))
    } else {
        error!("Failed to load {}: {}", req.path, err);
        (StatusCode::BAD_GATEWAY, pages::page_error(ctx, &req.path_and_query))
    }
}

/// Load the layout and the page data together, then render.
async fn serve<T, Fut, R>(state: &AppState, req: &SiteRequest, fetch: Fut, render: R) -> Response
where
    Fut: Future<Output = Result<T, CmsError>>,
    R: FnOnce(&PageContext<'_>, &T) -> Page,
{
    let (layout, data) = tokio::join!(load_layout(state), fetch);
    respond(state, req, layout, data, render)
}

fn respond<T, R>(
    state: &AppState,
    req: &SiteRequest,
    layout: Result<LayoutData, CmsError>,
    data: Result<T, CmsError>,
    render: R,
) -> Response
where
    R: FnOnce(&PageContext<'_>, &T) -> Page,
{
    let layout = match layout {
        Ok(layout) => layout,
        Err(err) => return load_error(req, &err),
    };

    let ctx = state.page_context(req.language);
    let (status, page) = match data {
        Ok(data) => (StatusCode::OK, render(&ctx, &data)),
        Err(err) => page_failure(&ctx, req, &err),
    };
    document(state, req, &layout, status, &page)
}

// ==================== Page Handlers ====================

async fn home(State(state): State<AppState>, req: SiteRequest) -> Response {
    let fetch = fresh(&state, CacheKey::Home, || state.cms.home());
    serve(&state, &req, fetch, |ctx, data| {
        let contact = pages::contact_form(ctx, &ContactForm::default(), &[], None);
        pages::home(ctx, data, &contact)
    })
    .await
}

async fn dynamic_page(
    State(state): State<AppState>,
    req: SiteRequest,
    Path(slug): Path<String>,
) -> Response {
    let (layout, data) = tokio::join!(
        load_layout(&state),
        fresh(&state, CacheKey::Page(slug.clone()), || state.cms.page(&slug)),
    );

    if matches!(&data, Ok(page) if pages::is_news_page(page)) {
        return Redirect::to("/news").into_response();
    }

    respond(&state, &req, layout, data, |ctx, data| pages::dynamic_page(ctx, data))
}

#[derive(Debug, Default, Deserialize)]
struct NewsParams {
    page: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

async fn news_list(
    State(state): State<AppState>,
    req: SiteRequest,
    Query(params): Query<NewsParams>,
) -> Response {
    let page = params
        .page
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(1);
    let query = NewsQuery::new(
        page,
        state.config.news_page_size,
        NewsKind::from_query(params.kind.as_deref()),
    );

    serve(&state, &req, state.cms.news(query), |ctx, news| {
        pages::news_list(ctx, news, query)
    })
    .await
}

async fn news_detail(
    State(state): State<AppState>,
    req: SiteRequest,
    Path(id): Path<String>,
) -> Response {
    serve(&state, &req, state.cms.news_item(&id), pages::news_detail).await
}

async fn employee_detail(
    State(state): State<AppState>,
    req: SiteRequest,
    Path(id): Path<String>,
) -> Response {
    serve(&state, &req, state.cms.employee(&id), pages::employee_detail).await
}

async fn laboratory_detail(
    State(state): State<AppState>,
    req: SiteRequest,
    Path(id): Path<String>,
) -> Response {
    serve(&state, &req, state.cms.laboratory(&id), pages::collection_detail).await
}

async fn department_detail(
    State(state): State<AppState>,
    req: SiteRequest,
    Path(id): Path<String>,
) -> Response {
    serve(&state, &req, state.cms.department(&id), pages::collection_detail).await
}

async fn scientific_direction_detail(
    State(state): State<AppState>,
    req: SiteRequest,
    Path(slug): Path<String>,
) -> Response {
    serve(
        &state,
        &req,
        state.cms.scientific_direction(&slug),
        pages::collection_detail,
    )
    .await
}

async fn postgraduate_detail(
    State(state): State<AppState>,
    req: SiteRequest,
    Path(slug): Path<String>,
) -> Response {
    serve(
        &state,
        &req,
        state.cms.postgraduate_education(&slug),
        pages::collection_detail,
    )
    .await
}

async fn search(State(state): State<AppState>, req: SiteRequest) -> Response {
    let query = req.search_query.clone();
    if query.is_empty() {
        return serve(&state, &req, async { Ok::<_, CmsError>(()) }, |ctx, _| {
            pages::search(ctx, "", None)
        })
        .await;
    }

    serve(&state, &req, state.cms.search(&query), |ctx, results| {
        pages::search(ctx, &query, Some(results))
    })
    .await
}

async fn contact_page(State(state): State<AppState>, req: SiteRequest) -> Response {
    serve(&state, &req, async { Ok::<_, CmsError>(()) }, |ctx, _| {
        pages::contact_page(ctx, pages::contact_form(ctx, &ContactForm::default(), &[], None))
    })
    .await
}

async fn submit_contact(
    State(state): State<AppState>,
    req: SiteRequest,
    Form(form): Form<ContactForm>,
) -> Response {
    let layout = match load_layout(&state).await {
        Ok(layout) => layout,
        Err(err) => return load_error(&req, &err),
    };

    let (status, errors, notice) = match form.validate() {
        Err(errors) => {
            info!("Contact form rejected ({} invalid fields)", errors.len());
            (StatusCode::UNPROCESSABLE_ENTITY, errors, None)
        }
        Ok(application) => match state.cms.submit_application(&application).await {
            Ok(()) => (StatusCode::OK, Vec::new(), Some(ContactNotice::Sent)),
            Err(err) => {
                error!("Failed to submit application: {}", err);
                (StatusCode::BAD_GATEWAY, Vec::new(), Some(ContactNotice::Failed))
            }
        },
    };

    // A sent form starts over empty; anything else keeps what was typed
    let form = if notice == Some(ContactNotice::Sent) {
        ContactForm::default()
    } else {
        form
    };

    let ctx = state.page_context(req.language);
    let page = pages::contact_page(&ctx, pages::contact_form(&ctx, &form, &errors, notice));
    document(&state, &req, &layout, status, &page)
}

async fn not_found(State(state): State<AppState>, req: SiteRequest) -> Response {
    let layout = match load_layout(&state).await {
        Ok(layout) => layout,
        Err(err) => return load_error(&req, &err),
    };

    let ctx = state.page_context(req.language);
    document(&state, &req, &layout, StatusCode::NOT_FOUND, &pages::not_found(&ctx))
}

// ==================== Utility Endpoints ====================

/// Remember the chosen language and go back to where the visitor came from.
async fn switch_language(Path(code): Path<String>, headers: HeaderMap) -> Response {
    let target = back_target(&headers);

    match Language::parse_loose(&code) {
        Some(language) => {
            let cookie = format!(
                "{}={}; Path=/; Max-Age={}; SameSite=Lax",
                LANG_COOKIE,
                language.code(),
                LANG_COOKIE_MAX_AGE
            );
            ([(header::SET_COOKIE, cookie)], Redirect::to(&target)).into_response()
        }
        None => {
            debug!("Ignoring unknown language '{}'", code);
            Redirect::to(&target).into_response()
        }
    }
}

/// Local path (with query, minus any `lang` parameter) of the `Referer`,
/// or `/`.
fn back_target(headers: &HeaderMap) -> String {
    let Some(referer) = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
    else {
        return "/".to_string();
    };

    let Ok(mut url) = Url::parse("http://site.invalid/").and_then(|base| base.join(referer)) else {
        return "/".to_string();
    };

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "lang")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.set_query(None);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    // A path like `//host/x` would leave the site as a scheme-relative URL
    let path = format!("/{}", url.path().trim_start_matches('/'));
    match url.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Drop every cached resource and reload the layout resources.
async fn refresh_cache(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(expected) = state.config.api_key.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let provided = headers.get("x-api-key").and_then(|value| value.to_str().ok());
    if !security::api_key_matches(Some(expected), provided) {
        warn!("Rejected cache refresh with invalid API key");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid API key"})),
        )
            .into_response();
    }

    state.cache.clear();
    match scheduler::refresh_layout(&state.cms, &state.cache).await {
        Ok(()) => Json(json!({"status": "refreshed"})).into_response(),
        Err(err) => {
            error!("Cache refresh failed: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": err.to_string()})),
            )
                .into_response()
        }
    }
}

async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        SITE_CSS,
    )
}
