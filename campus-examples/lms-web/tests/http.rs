use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use campus_core::config::THEME_MAX_SESSIONS;
use campus_core::CampusApp;
use campus_theme::{HttpThemeSource, THEME_ENDPOINT};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use lms_web::build_with;
use serde_json::{json, Value};
use tower::ServiceExt;

const OAKRIDGE: &str = "oakridge.campus.test";

fn edge(server: &MockServer) -> axum::Router {
    let source = HttpThemeSource::new(server.base_url()).unwrap();
    build_with(CampusApp::new(), Arc::new(source)).router
}

fn oakridge_theme(primary: &str) -> Value {
    json!({
        "site_name": "Oakridge Academy",
        "logo_url": null,
        "primary_color": primary,
        "secondary_color": "#f59e0b",
        "accent_color": "#1e293b"
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("host", OAKRIDGE)
        .body(Body::empty())
        .unwrap()
}

async fn text_body(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    serde_json::from_str(&text_body(res).await).unwrap()
}

#[tokio::test]
async fn health_ok() {
    let server = MockServer::start();
    let res = edge(&server).oneshot(get("/health")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert!(res.headers().get("x-request-id").is_some());
    assert_eq!(text_body(res).await, "ok");
}

#[tokio::test]
async fn home_page_resolves_tenant_theme_once() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(THEME_ENDPOINT)
            .header("x-tenant-domain", OAKRIDGE);
        then.status(200).json_body(oakridge_theme("#0f766e"));
    });
    let router = edge(&server);

    let res = router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(body["page"], "home");
    assert_eq!(body["tenant"], OAKRIDGE);
    assert_eq!(body["siteName"], "Oakridge Academy");

    let res = router.oneshot(get("/theme")).await.unwrap();
    let body = json_body(res).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["isLoading"], false);
    assert_eq!(body["theme"]["primary_color"], "#0f766e");

    mock.assert_hits(1);
}

#[tokio::test]
async fn stylesheet_carries_all_six_variables() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(THEME_ENDPOINT);
        then.status(200).json_body(oakridge_theme("#ffffff"));
    });

    let res = edge(&server).oneshot(get("/theme.css")).await.unwrap();

    assert_eq!(res.headers()["content-type"], "text/css; charset=utf-8");
    let css = text_body(res).await;
    assert!(css.starts_with(":root {"));
    assert!(css.contains("--primary: 0 0% 100%;"));
    assert!(css.contains("--primary-foreground: 0 0% 0%;"));
    for var in ["--secondary:", "--secondary-foreground:", "--accent:", "--accent-foreground:"] {
        assert!(css.contains(var), "missing {var} in {css}");
    }
}

#[tokio::test]
async fn backend_failure_falls_back_to_default_palette() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(THEME_ENDPOINT);
        then.status(500);
    });
    let router = edge(&server);

    let body = json_body(router.clone().oneshot(get("/theme")).await.unwrap()).await;
    assert_eq!(body["status"], "error");
    assert!(body["theme"].is_null());
    assert!(body["error"].as_str().unwrap().contains("HTTP 500"));

    let css = text_body(router.oneshot(get("/theme.css")).await.unwrap()).await;
    assert!(css.contains("--primary: 0 84% 60%;"));
    assert!(css.contains("--secondary: 217 91% 60%;"));
    assert!(css.contains("--accent: 258 90% 66%;"));
}

#[tokio::test]
async fn admin_pages_require_cookie() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(THEME_ENDPOINT);
        then.status(200).json_body(oakridge_theme("#0f766e"));
    });
    let router = edge(&server);

    let res = router.clone().oneshot(get("/admin/settings")).await.unwrap();
    assert_eq!(res.status().as_u16(), 307);
    assert_eq!(res.headers()["location"], "/admin/login");

    let res = router.clone().oneshot(get("/admin/login")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await["page"], "admin/login");

    let req = Request::builder()
        .uri("/admin/settings")
        .header("host", OAKRIDGE)
        .header("cookie", "admin-token=demo")
        .body(Body::empty())
        .unwrap();
    let res = router.oneshot(req).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await["page"], "admin/settings");
}

#[tokio::test]
async fn admin_refresh_picks_up_new_branding() {
    let server = MockServer::start();
    let mut before = server.mock(|when, then| {
        when.method(GET).path(THEME_ENDPOINT);
        then.status(200).json_body(oakridge_theme("#0f766e"));
    });
    let router = edge(&server);

    let body = json_body(router.clone().oneshot(get("/theme")).await.unwrap()).await;
    assert_eq!(body["theme"]["primary_color"], "#0f766e");

    before.delete();
    server.mock(|when, then| {
        when.method(GET).path(THEME_ENDPOINT);
        then.status(200).json_body(oakridge_theme("#000000"));
    });

    let refresh = |cookie: Option<&str>| {
        let mut req = Request::builder()
            .method("POST")
            .uri("/admin/theme/refresh")
            .header("host", OAKRIDGE);
        if let Some(c) = cookie {
            req = req.header("cookie", c);
        }
        req.body(Body::empty()).unwrap()
    };

    let res = router.clone().oneshot(refresh(None)).await.unwrap();
    assert_eq!(res.status().as_u16(), 307);

    let res = router.clone().oneshot(refresh(Some("admin-token=demo"))).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["theme"]["primary_color"], "#000000");

    let css = text_body(router.oneshot(get("/theme.css")).await.unwrap()).await;
    assert!(css.contains("--primary: 0 0% 0%;"));
}

#[tokio::test]
async fn api_paths_are_left_to_the_backend() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(THEME_ENDPOINT);
        then.status(200).json_body(oakridge_theme("#0f766e"));
    });

    let res = edge(&server).oneshot(get("/api/courses")).await.unwrap();

    assert_eq!(res.status().as_u16(), 404);
    let body = json_body(res).await;
    assert_eq!(body["name"], "NotFound");
    assert!(body["message"].as_str().unwrap().contains("/api/courses"));
    mock.assert_hits(0);
}

#[tokio::test]
async fn unknown_page_is_not_found() {
    let server = MockServer::start();
    let res = edge(&server).oneshot(get("/nowhere")).await.unwrap();

    assert_eq!(res.status().as_u16(), 404);
    assert_eq!(json_body(res).await["className"], "not-found");
}

#[tokio::test]
async fn unseen_hosts_do_not_fan_out_to_the_backend() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(THEME_ENDPOINT);
        then.status(200).json_body(oakridge_theme("#0f766e"));
    });
    let app = CampusApp::new();
    app.set(THEME_MAX_SESSIONS, "8");
    let source = HttpThemeSource::new(server.base_url()).unwrap();
    let router = build_with(app, Arc::new(source)).router;

    for i in 0..100 {
        let req = Request::builder()
            .uri("/")
            .header("host", format!("junk{i}.campus.test"))
            .body(Body::empty())
            .unwrap();
        let res = router.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status().as_u16(), 200);
    }

    // eight tenant sessions plus one shared lookup
    mock.assert_hits(9);
}
