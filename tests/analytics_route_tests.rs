//! Route-level tests for the analytics endpoints, run against the real
//! router with a throwaway SQLite store.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::NaiveDateTime;
use serde_json::Value;
use std::path::PathBuf;
use std::{
    fs,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;
use url::Url;

use commit_pulse::db::models::{CommitRow, STORE_DATE_FORMAT};
use commit_pulse::router::{PulseState, pulse_router};
use commit_pulse::{CommitStore, RepoTarget};

async fn temp_store(tag: &str) -> (CommitStore, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "commit-pulse-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let store = CommitStore::connect(&format!("sqlite:{}", path.display()))
        .await
        .expect("connect store");
    store.init_schema().await.expect("init schema");
    (store, path)
}

fn app(store: CommitStore) -> Router {
    // The upstream target is never contacted by the analytics routes.
    let target = RepoTarget::new(
        Url::parse("http://127.0.0.1:9").expect("url"),
        "acme",
        "widget",
        "test-token",
    );
    pulse_router(PulseState::new(store, reqwest::Client::new(), target))
}

fn row(sha: &str, author: Option<&str>, date: &str) -> CommitRow {
    CommitRow {
        sha: sha.to_string(),
        committer: 1,
        message: "work".to_string(),
        date: NaiveDateTime::parse_from_str(date, STORE_DATE_FORMAT).expect("date"),
        author: author.map(str::to_owned),
    }
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&body).expect("json body");
    (status, value)
}

#[tokio::test]
async fn welcome_route() {
    let (store, path) = temp_store("welcome").await;
    let app = app(store);

    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Welcome".to_string()));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn top_committers_default_returns_all_five() {
    let (store, path) = temp_store("top-default").await;

    // Commit counts per author: 10, 8, 8, 3, 1.
    let mut rows = Vec::new();
    for (author, count) in [("ada", 10), ("grace", 8), ("linus", 8), ("margaret", 3), ("ken", 1)] {
        for i in 0..count {
            rows.push(row(
                &format!("{author}-{i}"),
                Some(author),
                &format!("2024-03-{:02} 12:00:00", i + 1),
            ));
        }
    }
    store.upsert_page(&rows).await.expect("seed");

    let app = app(store);
    let (status, body) = get_json(&app, "/committers").await;
    assert_eq!(status, StatusCode::OK);

    let tallies = body.as_array().expect("array");
    assert_eq!(tallies.len(), 5);
    assert_eq!(tallies[0]["author"], "ada");
    assert_eq!(tallies[0]["commits"], 10);

    let counts: Vec<i64> = tallies
        .iter()
        .map(|t| t["commits"].as_i64().expect("count"))
        .collect();
    assert_eq!(counts, vec![10, 8, 8, 3, 1]);

    let tied: Vec<&str> = tallies[1..3]
        .iter()
        .map(|t| t["author"].as_str().expect("author"))
        .collect();
    assert!(tied.contains(&"grace") && tied.contains(&"linus"));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn top_parameter_limits_result() {
    let (store, path) = temp_store("top-limit").await;
    let rows = vec![
        row("a1", Some("ada"), "2024-03-01 12:00:00"),
        row("a2", Some("ada"), "2024-03-02 12:00:00"),
        row("g1", Some("grace"), "2024-03-01 12:00:00"),
        row("k1", Some("ken"), "2024-03-01 12:00:00"),
    ];
    store.upsert_page(&rows).await.expect("seed");

    let app = app(store);
    let (status, body) = get_json(&app, "/committers?top=1").await;
    assert_eq!(status, StatusCode::OK);

    let tallies = body.as_array().expect("array");
    assert_eq!(tallies.len(), 1);
    assert_eq!(tallies[0]["author"], "ada");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn non_positive_top_is_rejected() {
    let (store, path) = temp_store("top-invalid").await;
    let app = app(store);

    for uri in ["/committers?top=0", "/committers?top=-3"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn non_numeric_top_is_rejected_by_the_extractor() {
    let (store, path) = temp_store("top-nan").await;
    let app = app(store);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/committers?top=abc")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn streak_route_reports_global_maximum() {
    let (store, path) = temp_store("streak").await;

    // ada: Jan 1-3 then Jan 5 -> best run 3. grace: one day.
    let rows = vec![
        row("a1", Some("ada"), "2024-01-01 09:00:00"),
        row("a2", Some("ada"), "2024-01-02 09:00:00"),
        row("a3", Some("ada"), "2024-01-03 09:00:00"),
        row("a4", Some("ada"), "2024-01-05 09:00:00"),
        row("g1", Some("grace"), "2024-01-01 10:00:00"),
    ];
    store.upsert_page(&rows).await.expect("seed");

    let app = app(store);
    let (status, body) = get_json(&app, "/committers/streak").await;
    assert_eq!(status, StatusCode::OK);

    let streaks = body.as_array().expect("array");
    assert_eq!(streaks.len(), 1);
    assert_eq!(streaks[0]["author"], "ada");
    assert_eq!(streaks[0]["streak"], 3);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn heatmap_route_buckets_boundary_hours() {
    let (store, path) = temp_store("heatmap").await;

    // All on Monday 2024-03-04 except one Wednesday commit.
    let rows = vec![
        row("m1", Some("ada"), "2024-03-04 00:15:00"),
        row("m2", Some("ada"), "2024-03-04 23:45:00"),
        row("m3", Some("ada"), "2024-03-04 03:00:00"),
        row("w1", Some("ada"), "2024-03-06 13:00:00"),
    ];
    store.upsert_page(&rows).await.expect("seed");

    let app = app(store);
    let (status, body) = get_json(&app, "/commits/heatmap").await;
    assert_eq!(status, StatusCode::OK);

    let days = body.as_array().expect("array");
    assert_eq!(days.len(), 2);

    assert_eq!(days[0]["day_of_week"], "Monday");
    assert_eq!(days[0]["22-00"], 2);
    assert_eq!(days[0]["01-03"], 1);
    assert_eq!(days[1]["day_of_week"], "Wednesday");
    assert_eq!(days[1]["13-15"], 1);

    assert!(days.iter().all(|d| d["day_of_week"] != "Tuesday"));

    let _ = fs::remove_file(&path);
}
