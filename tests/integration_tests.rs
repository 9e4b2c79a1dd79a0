//! Integration tests for the institute site
//!
//! These tests drive the public router against a mocked CMS and check how
//! the resolver, the menu builder, the cache and the renderer work together.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, path_regex, query_param},
    Mock, MockServer, ResponseTemplate,
};

use institute_site::{
    cache::CacheKey,
    config::Config,
    i18n::{resolve, Language},
    menu::{DisclosureState, MenuTree},
    render::escape_html,
    retry::RetryConfig,
    server::{build_router, AppState},
};

// ==================== Test Helpers ====================

fn company() -> Value {
    json!({
        "name_uz": "Neft va gaz instituti",
        "name_ru": "Институт нефти и газа",
        "address_uz": "Toshkent, Olmazor tumani",
        "phone_number": "+998 71 200 00 00",
        "email": "info@institute.uz",
        "logo": "media/logo.svg"
    })
}

/// Menu payload mixing the nested and the flat shape.
fn menus() -> Value {
    json!([
        {"id": 1, "position": 2, "status": true, "title_uz": "Institut", "title_ru": "Институт",
         "children": [
            {"id": 2, "position": 1, "status": true, "title_uz": "Biz haqimizda",
             "title_ru": "О нас", "has_page": true, "page_slug": "about"},
            {"id": 3, "position": 2, "status": false, "title_uz": "Yashirin",
             "has_page": true, "page_slug": "hidden"}
         ]},
        {"id": 4, "position": 1, "status": true, "title_uz": "Yangiliklar",
         "has_page": true, "page_slug": "news"},
        {"id": 5, "parent": 1, "position": 3, "status": true, "title_uz": "Tuzilma"},
        {"id": 6, "parent": 5, "position": 1, "status": true, "title_uz": "Laboratoriyalar",
         "has_page": true, "page_slug": "labs"}
    ])
}

async fn mock_cms() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/main/company"))
        .respond_with(ResponseTemplate::new(200).set_body_json(company()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/menu/menus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menus()))
        .mount(&server)
        .await;
    server
}

fn test_state(server: &MockServer, api_key: Option<&str>) -> AppState {
    let mut config = Config::for_api(&server.uri());
    config.api_key = api_key.map(str::to_string);
    let state = AppState::new(config).expect("state");
    AppState {
        cms: state.cms.with_retry(RetryConfig::none()),
        ..state
    }
}

async fn get(app: Router, uri: &str, cookie: Option<&str>) -> (StatusCode, String) {
    let mut request = Request::get(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

// ==================== Full Page Rendering ====================

#[tokio::test]
async fn test_home_page_renders_layout_and_content() {
    let server = mock_cms().await;
    Mock::given(method("GET"))
        .and(path("/main/home"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "carousels": [],
            "latest_news": [{"id": 12, "title_uz": "Ilmiy kengash", "title_ru": "Учёный совет",
                             "published_date": "2025-09-01T09:00:00+05:00"}],
            "collaborations": []
        })))
        .mount(&server)
        .await;

    let (status, html) = get(build_router(test_state(&server, None)), "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<html lang=\"uz\">"));
    assert!(html.contains("Neft va gaz instituti"));
    assert!(html.contains(r#"src="http://"#) && html.contains("/media/logo.svg"));
    assert!(html.contains(r#"<a href="/news/12">Ilmiy kengash</a>"#));
    assert!(html.contains("01.09.2025"));
    assert!(html.contains(r#"action="/contact""#));
}

#[tokio::test]
async fn test_menu_order_and_filtering() {
    let server = mock_cms().await;
    let (status, html) = get(build_router(test_state(&server, None)), "/contact", None).await;
    assert_eq!(status, StatusCode::OK);

    let desktop_start = html.find("nav-desktop").unwrap();
    let desktop_end = html[desktop_start..].find("</nav>").unwrap() + desktop_start;
    let desktop = &html[desktop_start..desktop_end];

    // Position 1 root renders before position 2 root
    let news = desktop.find("Yangiliklar").unwrap();
    let institute = desktop.find("Institut<").unwrap();
    assert!(news < institute);

    // Disabled child is gone, flat child of a nested node is attached
    assert!(!desktop.contains("Yashirin"));
    assert!(desktop.contains("Tuzilma"));
    assert!(desktop.contains(r#"href="/dynamic-page/labs""#));
}

#[tokio::test]
async fn test_deep_active_path_highlights_ancestors() {
    let server = mock_cms().await;
    Mock::given(method("GET"))
        .and(path("/menu/pages-users/labs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "lab", "title_uz": "Laboratoriyalar",
            "labs": [{"id": 1, "slug": "seysmik", "title_uz": "Seysmik tadqiqotlar"}]
        })))
        .mount(&server)
        .await;

    let (status, html) = get(
        build_router(test_state(&server, None)),
        "/dynamic-page/labs",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"class="nav-disclosure active" name="nav-root" data-menu-id="1">"#));
    assert!(html.contains(r#"class="nav-row nav-disclosure nested active" data-menu-id="5">"#));
    assert!(html.contains(r#"href="/dynamic-page/labs" aria-current="page""#));
    assert!(html.contains(r#"href="/laboratories/seysmik""#));
}

#[tokio::test]
async fn test_non_ascii_slug_marks_menu_path_active() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/main/company"))
        .respond_with(ResponseTemplate::new(200).set_body_json(company()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/menu/menus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "position": 1, "status": true, "title_ru": "Институт",
             "children": [
                {"id": 2, "position": 1, "status": true, "title_ru": "О нас",
                 "has_page": true, "page_slug": "о-нас"}
             ]}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/menu/pages-users/[^/]+/$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "department", "title_ru": "О нас"
        })))
        .mount(&server)
        .await;

    let (status, html) = get(
        build_router(test_state(&server, None)),
        "/dynamic-page/%D0%BE-%D0%BD%D0%B0%D1%81?lang=ru",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"href="/dynamic-page/о-нас" aria-current="page""#));
    assert!(html.contains(r#"class="nav-disclosure active" name="nav-root" data-menu-id="1">"#));
}

// ==================== Language Handling ====================

#[tokio::test]
async fn test_language_cookie_selects_content_language() {
    let server = mock_cms().await;
    let app = build_router(test_state(&server, None));

    let (_, html) = get(app.clone(), "/contact", Some("lang=ru")).await;
    assert!(html.contains("<html lang=\"ru\">"));
    assert!(html.contains("Институт нефти и газа"));
    assert!(html.contains("О нас"));

    // Query parameter beats the cookie
    let (_, html) = get(app, "/contact?lang=uz", Some("lang=ru")).await;
    assert!(html.contains("<html lang=\"uz\">"));
    assert!(html.contains("Biz haqimizda"));
}

#[tokio::test]
async fn test_missing_translation_falls_back_to_primary_language() {
    let server = mock_cms().await;
    let (_, html) = get(build_router(test_state(&server, None)), "/contact?lang=en", None).await;

    // No English titles in the menu payload
    assert!(html.contains("<html lang=\"en\">"));
    assert!(html.contains("Biz haqimizda"));
    assert!(html.contains(&escape_html(Language::ENGLISH.strings().contact_title)));
}

// ==================== News ====================

#[tokio::test]
async fn test_news_list_forwards_filter_and_page() {
    let server = mock_cms().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "9"))
        .and(query_param("type", "news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 10, "next": null, "previous": "p",
            "results": [{"id": 10, "title_uz": "O'ninchi yangilik"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, html) = get(
        build_router(test_state(&server, None)),
        "/news?type=news&page=2",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("O&#39;ninchi yangilik"));
    assert!(html.contains(r#"rel="prev" href="/news?type=news&amp;page=1""#));
    assert!(!html.contains(r#"rel="next""#));
}

// ==================== Caching ====================

#[tokio::test]
async fn test_layout_resources_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/main/company"))
        .respond_with(ResponseTemplate::new(200).set_body_json(company()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/menu/menus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menus()))
        .expect(1)
        .mount(&server)
        .await;

    let state = test_state(&server, None);
    let app = build_router(state.clone());

    for _ in 0..3 {
        let (status, _) = get(app.clone(), "/contact", None).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert!(state.cache.get(&CacheKey::Menus).is_some());
}

#[tokio::test]
async fn test_refresh_endpoint_reloads_layout() {
    let server = mock_cms().await;
    let state = test_state(&server, Some("admin-key"));
    let app = build_router(state.clone());

    state.cache.complete(
        CacheKey::CompanyInfo,
        state.cache.begin(),
        json!({"name_uz": "Eski nom"}),
    );
    let (_, html) = get(app.clone(), "/contact", None).await;
    assert!(html.contains("Eski nom"));

    let response = app
        .clone()
        .oneshot(
            Request::post("/cache/refresh")
                .header("X-API-Key", "admin-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, html) = get(app, "/contact", None).await;
    assert!(html.contains("Neft va gaz instituti"));
    assert!(!html.contains("Eski nom"));
}

#[tokio::test]
async fn test_dynamic_page_served_from_cache_when_cms_fails() {
    let server = mock_cms().await;
    Mock::given(method("GET"))
        .and(path("/menu/pages-users/about/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let state = test_state(&server, None);
    state.cache.complete(
        CacheKey::Page("about".to_string()),
        state.cache.begin(),
        json!({"type": "department", "title_uz": "Institut haqida"}),
    );

    let (status, html) = get(build_router(state), "/dynamic-page/about", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Institut haqida"));
}

// ==================== Core Behaviour Scenarios ====================

#[test]
fn test_resolver_prefers_fallback_over_scan() {
    let record = json!({"title_uz": "", "title_ru": "Привет", "title_en": "Hi"});
    assert_eq!(
        resolve(&record, "title", Language::UZBEK, Language::UZBEK),
        "Привет"
    );
}

#[test]
fn test_disclosure_single_open_root_with_tree_ids() {
    let tree = MenuTree::from_payload(&menus());
    let roots = tree.root_ids();
    assert_eq!(roots, vec![4, 1]);

    let mut state = DisclosureState::new(roots);
    state.open(4);
    state.open(1);
    assert!(!state.is_open(4));
    assert!(state.is_open(1));

    // Nested node under the open root is independent
    state.toggle(5);
    assert!(state.is_open(5));
    assert!(state.is_open(1));

    assert_eq!(tree.active_trail("/dynamic-page/labs"), vec![1, 5, 6]);
}
