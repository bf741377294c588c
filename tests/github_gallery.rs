//! End-to-end gallery loads over real HTTP.
//!
//! A local axum server stands in for the GitHub API, serving
//! `fixtures/repos.json` and per-repository language breakdowns, so these
//! tests exercise the reqwest client, the listing filter, selection,
//! concurrent enrichment and rendering together.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use simple_folio::config::FolioConfig;
use simple_folio::dom::Document;
use simple_folio::gallery::{GalleryLoader, GalleryState};
use simple_folio::github::{FetchError, GitHubClient, RepoSource};
use simple_folio::reveal::{RevealObserver, VISIBLE_CLASS};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const REPOS_FIXTURE: &str = include_str!("../fixtures/repos.json");

// ---------------------------------------------------------------------------
// Mock GitHub
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Recorded {
    listing_queries: Vec<HashMap<String, String>>,
    accept_headers: Vec<String>,
    user_agents: Vec<String>,
    language_requests: Vec<String>,
}

struct MockGitHub {
    base: String,
    recorded: Mutex<Recorded>,
}

async fn list_repos(
    State(mock): State<Arc<MockGitHub>>,
    Path(account): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    {
        let mut recorded = mock.recorded.lock().unwrap();
        recorded.listing_queries.push(query);
        let header_value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        recorded.accept_headers.push(header_value(header::ACCEPT));
        recorded.user_agents.push(header_value(header::USER_AGENT));
    }

    match account.as_str() {
        "octocat" => {
            let body = REPOS_FIXTURE.replace("{base}", &mock.base);
            let repos: serde_json::Value = serde_json::from_str(&body).unwrap();
            Json(repos).into_response()
        }
        "nobody" => Json(json!([])).into_response(),
        "limited" => (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "API rate limit exceeded" })),
        )
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn languages(
    State(mock): State<Arc<MockGitHub>>,
    Path((_owner, name)): Path<(String, String)>,
) -> Response {
    mock.recorded
        .lock()
        .unwrap()
        .language_requests
        .push(name.clone());

    match name.as_str() {
        "folio" => Json(json!({ "Shell": 310, "Rust": 48210, "HTML": 2200 })).into_response(),
        "engine" => Json(json!({ "C": 1200, "C++": 90000, "CMake": 400 })).into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn spawn_mock() -> Arc<MockGitHub> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let mock = Arc::new(MockGitHub {
        base: format!("http://{addr}"),
        recorded: Mutex::new(Recorded::default()),
    });

    let app = Router::new()
        .route("/users/:account/repos", get(list_repos))
        .route("/repos/:owner/:name/languages", get(languages))
        .with_state(mock.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    mock
}

fn config_for(mock: &MockGitHub, account: &str) -> FolioConfig {
    let mut config = FolioConfig::default();
    config.github.account = account.to_string();
    config.github.api_base = mock.base.clone();
    config
}

fn gallery_doc() -> (Document, simple_folio::dom::NodeId) {
    let mut doc = Document::new();
    let container = doc.append_new(doc.body(), "div");
    doc.set_id(container, "projects-list");
    (doc, container)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recent_repositories_render_as_cards() {
    let mock = spawn_mock().await;
    let config = config_for(&mock, "octocat");
    let client = GitHubClient::new(&config.github.api_base).unwrap();
    let (mut doc, container) = gallery_doc();
    let mut observer = RevealObserver::default();

    let mut loader = GalleryLoader::new(&config, &client);
    let state = loader.load(&mut doc, Some(&mut observer)).await;

    // fork and archived repos are filtered out
    assert_eq!(state, Some(GalleryState::Populated(3)));
    let names: Vec<&str> = loader.repos().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["folio", "engine", "broken-langs"]);

    let folio = &loader.repos()[0];
    assert_eq!(folio.languages, vec!["Rust", "HTML", "Shell"]);
    assert_eq!(folio.image, "https://opengraph.githubassets.com/1/octocat/folio");

    let engine = &loader.repos()[1];
    assert_eq!(engine.languages, vec!["C", "C++", "CMake"]);
    assert_eq!(engine.description, "No description available yet.");
    assert_eq!(engine.live_link(), None);

    let broken = &loader.repos()[2];
    assert!(broken.languages.is_empty());
    assert_eq!(broken.updated_at.as_deref(), Some("2022-06-30T12:00:00Z"));

    let html = doc.inner_html(container);
    assert!(!html.contains("skeleton"));
    assert!(html.contains("Updated Mar 2024"));
    assert!(html.contains("Updated Nov 2023"));
    assert!(html.contains("Updated Jun 2022"));
    assert!(html.contains(r#"href="https://octocat.example""#));
    assert_eq!(html.matches("Live link").count(), 1);
    assert!(html.contains("Multi-lang"));

    for card in doc.child_elements(container) {
        assert!(observer.is_observing(card));
        assert!(!doc.has_class(card, VISIBLE_CLASS));
    }

    let recorded = mock.recorded.lock().unwrap();
    let query = &recorded.listing_queries[0];
    assert_eq!(query.get("sort").map(String::as_str), Some("updated"));
    assert_eq!(query.get("per_page").map(String::as_str), Some("50"));
    assert_eq!(query.get("type").map(String::as_str), Some("owner"));
    assert_eq!(recorded.accept_headers[0], "application/vnd.github+json");
    assert!(recorded.user_agents[0].starts_with("simple-folio/"));

    let mut requested = recorded.language_requests.clone();
    requested.sort();
    assert_eq!(requested, vec!["broken-langs", "engine", "folio"]);
}

#[tokio::test]
async fn featured_repositories_keep_curated_order() {
    let mock = spawn_mock().await;
    let mut config = config_for(&mock, "octocat");
    config.github.featured = vec![
        "ENGINE".to_string(),
        "missing".to_string(),
        "Folio".to_string(),
        "dotfiles-fork".to_string(),
    ];
    let client = GitHubClient::new(&config.github.api_base).unwrap();
    let (mut doc, _) = gallery_doc();

    let mut loader = GalleryLoader::new(&config, &client);
    let state = loader.load(&mut doc, None).await;

    assert_eq!(state, Some(GalleryState::Populated(2)));
    let names: Vec<&str> = loader.repos().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["engine", "folio"]);
    for card in loader.cards() {
        assert!(doc.has_class(*card, VISIBLE_CLASS));
    }
}

#[tokio::test]
async fn rate_limited_listing_shows_error_card() {
    let mock = spawn_mock().await;
    let config = config_for(&mock, "limited");
    let client = GitHubClient::new(&config.github.api_base).unwrap();
    let (mut doc, container) = gallery_doc();

    let state = GalleryLoader::new(&config, &client)
        .load(&mut doc, None)
        .await;

    assert_eq!(state, Some(GalleryState::Error));
    let html = doc.inner_html(container);
    assert!(html.contains("Could not load recent projects"));
    assert!(!html.contains("skeleton"));
}

#[tokio::test]
async fn listing_status_error_carries_status() {
    let mock = spawn_mock().await;
    let client = GitHubClient::new(&mock.base).unwrap();

    let err = client.list_repos("limited", 50).await.unwrap_err();

    match err {
        FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 403),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn account_without_repositories_is_empty() {
    let mock = spawn_mock().await;
    let config = config_for(&mock, "nobody");
    let client = GitHubClient::new(&config.github.api_base).unwrap();
    let (mut doc, container) = gallery_doc();

    let state = GalleryLoader::new(&config, &client)
        .load(&mut doc, None)
        .await;

    assert_eq!(state, Some(GalleryState::Empty));
    assert!(doc
        .inner_html(container)
        .contains("No projects to show right now."));
}

#[tokio::test]
async fn unreachable_api_shows_error_card() {
    // Bind and immediately drop to get a port nobody is listening on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut config = FolioConfig::default();
    config.github.api_base = base;
    let client = GitHubClient::new(&config.github.api_base).unwrap();
    let (mut doc, container) = gallery_doc();

    let state = GalleryLoader::new(&config, &client)
        .load(&mut doc, None)
        .await;

    assert_eq!(state, Some(GalleryState::Error));
    assert!(doc.inner_html(container).contains("error-card"));
}
