mod common;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use std::sync::Arc;

use link_shortener::db::{MemoryStore, UrlStore};
use link_shortener::models::stats::{CountryVisits, ReferrerVisits, Stats};
use link_shortener::models::visit::Visit;
use link_shortener::routes::init_routes;
use link_shortener::structs::url_request::ShortenResponse;

use common::{create_test_link, create_test_state};

#[actix_web::test]
async fn stats_for_link_without_visits() {
    let store = Arc::new(MemoryStore::new());
    create_test_link(&store, "0a1b2c3d", "https://example.com/").await;
    let app = test::init_service(
        App::new()
            .app_data(create_test_state(store.clone()))
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/urls/0a1b2c3d/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        serde_json::json!({ "by_country": [], "by_referrer": [], "total_visits": 0 })
    );
}

#[actix_web::test]
async fn stats_aggregate_recorded_visits() {
    let store = Arc::new(MemoryStore::new());
    let link = create_test_link(&store, "0a1b2c3d", "https://example.com/").await;
    let other = create_test_link(&store, "ffff0000", "https://other.example/").await;

    let visits = [
        (link.id, "Germany", "https://news.example/"),
        (link.id, "Germany", "https://blog.example/"),
        (link.id, "Japan", "https://news.example/"),
        (link.id, "", "https://news.example/"),
        (link.id, "Japan", ""),
        (link.id, "Germany", ""),
        (other.id, "France", "https://news.example/"),
    ];
    for (id, country, referrer) in visits {
        let visit = Visit::new(
            id,
            "127.0.0.1".into(),
            "curl/8.0".into(),
            country.into(),
            referrer.into(),
        );
        store.insert_visit(&visit).await.unwrap();
    }

    let app = test::init_service(
        App::new()
            .app_data(create_test_state(store.clone()))
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/urls/0a1b2c3d/stats").to_request();
    let stats: Stats = test::call_and_read_body_json(&app, req).await;

    assert_eq!(stats.total_visits, 6);
    assert_eq!(
        stats.countries,
        vec![
            CountryVisits { name: "Germany".into(), visits: 3 },
            CountryVisits { name: "Japan".into(), visits: 2 },
        ]
    );
    assert_eq!(
        stats.referrers,
        vec![
            ReferrerVisits { url: "https://news.example/".into(), visits: 3 },
            ReferrerVisits { url: "https://blog.example/".into(), visits: 1 },
        ]
    );
}

#[actix_web::test]
async fn stats_unknown_short_id_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(
        App::new()
            .app_data(create_test_state(store))
            .configure(init_routes),
    )
    .await;

    for uri in ["/urls/0a1b2c3d/stats", "/urls/not-an-id/stats"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri {}", uri);
    }
}

#[actix_web::test]
async fn shorten_visit_then_stats() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(
        App::new()
            .app_data(create_test_state(store.clone()))
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/urls/shorten")
        .set_form([("url", "https://example.com/landing")])
        .to_request();
    let created: ShortenResponse = test::call_and_read_body_json(&app, req).await;

    for (ip, referrer) in [
        ("81.2.69.142", "https://a.example/"),
        ("2.125.160.216", "https://a.example/"),
        ("89.160.20.112", "https://b.example/"),
    ] {
        let req = test::TestRequest::get()
            .uri(&format!("/s/{}", created.short_id))
            .insert_header(("X-IP", ip))
            .insert_header((header::REFERER, referrer))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/urls/{}/stats", created.short_id))
        .to_request();
    let stats: Stats = test::call_and_read_body_json(&app, req).await;

    assert_eq!(stats.total_visits, 3);
    assert_eq!(
        stats.countries,
        vec![
            CountryVisits { name: "United Kingdom".into(), visits: 2 },
            CountryVisits { name: "Sweden".into(), visits: 1 },
        ]
    );
    assert_eq!(
        stats.referrers,
        vec![
            ReferrerVisits { url: "https://a.example/".into(), visits: 2 },
            ReferrerVisits { url: "https://b.example/".into(), visits: 1 },
        ]
    );
}
