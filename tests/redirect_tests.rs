//! Redirect endpoint tests
//!
//! The hot path: `/{code}` → 302 with the merged query string, plus a visit
//! row for every known code.

mod common;

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};

use url_shortcuts::api::services::configure_routes;
use url_shortcuts::storage::SeaOrmStorage;

use common::{FakeIdentity, add_shortcut, build_state, setup_storage, test_config};

/// Visits are written by a detached task; poll until it lands
async fn wait_for_visits(storage: &SeaOrmStorage, shortcut_id: i64, expected: usize) -> usize {
    for _ in 0..50 {
        let found = storage.visits_for_shortcut(shortcut_id).await.unwrap().len();
        if found >= expected {
            return found;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    storage.visits_for_shortcut(shortcut_id).await.unwrap().len()
}

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_rt::test]
async fn test_known_code_merges_query() {
    let (_dir, storage) = setup_storage().await;
    let id = add_shortcut(&storage, "fb", "https://example.com/page?ref=x").await;
    let state = build_state(
        storage.clone(),
        &test_config(),
        Arc::new(FakeIdentity::verified("a@example.com")),
    );
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(state))
            .configure(configure_routes),
    )
    .await;

    let req = TestRequest::get()
        .uri("/fb?campaign=launch&utm_source=newsletter")
        .insert_header(("Referer", "https://news.example/"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp),
        "https://example.com/page?campaign=launch&ref=x&utm_campaign=dxe-io-fb&utm_source=newsletter"
    );

    assert_eq!(wait_for_visits(&storage, id, 1).await, 1);
    let visit = &storage.visits_for_shortcut(id).await.unwrap()[0];
    assert_eq!(visit.path, "/fb?campaign=launch&utm_source=newsletter");
    assert_eq!(visit.referer, "https://news.example/");
    assert_eq!(visit.utm_source, "newsletter");
}

#[actix_rt::test]
async fn test_scenario_without_request_query() {
    let (_dir, storage) = setup_storage().await;
    add_shortcut(&storage, "fb", "https://example.com/page?ref=x").await;
    let state = build_state(
        storage,
        &test_config(),
        Arc::new(FakeIdentity::verified("a@example.com")),
    );
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(state))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/fb?campaign=launch").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp),
        "https://example.com/page?campaign=launch&ref=x&utm_campaign=dxe-io-fb"
    );
}

#[actix_rt::test]
async fn test_unknown_code_falls_back_without_visit() {
    let (_dir, storage) = setup_storage().await;
    let state = build_state(
        storage.clone(),
        &test_config(),
        Arc::new(FakeIdentity::verified("a@example.com")),
    );
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(state))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/zzz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "https://fallback.example/zzz");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(storage.count_visits().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_multi_segment_code() {
    let (_dir, storage) = setup_storage().await;
    add_shortcut(&storage, "team/docs", "https://docs.example/").await;
    let state = build_state(
        storage,
        &test_config(),
        Arc::new(FakeIdentity::verified("a@example.com")),
    );
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(state))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/team/docs").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp),
        "https://docs.example/?utm_campaign=dxe-io-team%2Fdocs"
    );
}

#[actix_rt::test]
async fn test_code_change_is_visible_immediately() {
    let (_dir, storage) = setup_storage().await;
    let state = build_state(
        storage,
        &test_config(),
        Arc::new(FakeIdentity::verified("a@example.com")),
    );
    let id = state
        .shortcuts
        .create(
            url_shortcuts::services::ShortcutInput {
                code: "sale".to_string(),
                url: "https://shop.example/a".to_string(),
            },
            1,
        )
        .await
        .unwrap();
    let data = web::Data::from(state.clone());
    let app =
        test::init_service(App::new().app_data(data).configure(configure_routes)).await;

    // 预热缓存
    let resp = test::call_service(&app, TestRequest::get().uri("/sale").to_request()).await;
    assert!(location(&resp).starts_with("https://shop.example/a?"));

    state
        .shortcuts
        .update(
            id,
            url_shortcuts::services::ShortcutInput {
                code: "sale2".to_string(),
                url: "https://shop.example/b".to_string(),
            },
            1,
        )
        .await
        .unwrap();

    let resp = test::call_service(&app, TestRequest::get().uri("/sale").to_request()).await;
    assert_eq!(location(&resp), "https://fallback.example/sale");
    let resp = test::call_service(&app, TestRequest::get().uri("/sale2").to_request()).await;
    assert!(location(&resp).starts_with("https://shop.example/b?"));
}

#[actix_rt::test]
async fn test_healthz() {
    let (_dir, storage) = setup_storage().await;
    let state = build_state(
        storage,
        &test_config(),
        Arc::new(FakeIdentity::verified("a@example.com")),
    );
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(state))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/healthz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"OK");
}
