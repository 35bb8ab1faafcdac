// Shared primitives for one-time server bootstrapping across integration tests.
// Each test binary compiles this module and uses only some of the helpers.

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    // `Arc` shares data between threads; `OnceLock` writes a value only once.
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};
use survival_server::ServerConfig;
use survival_server::domain::tuning::ArenaTuning;

// Base URL of the game server wired to the fake progress service.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// Base URL of a game server whose progress service is unreachable.
static ORPHAN_SERVER_URL: OnceLock<String> = OnceLock::new();

// Scores and coin credits the fake progress service has received.
static SCORES: Mutex<Vec<(String, f64)>> = Mutex::new(Vec::new());
static COINS: Mutex<Vec<(String, u64)>> = Mutex::new(Vec::new());

// Small arena so enemies reach the player within a second or two.
pub const ARENA_SIZE: f32 = 300.0;

// Ensure the test server and its fake upstream are running and return the server base URL.
pub fn ensure_server() -> &'static str {
    SERVER_URL.get_or_init(|| {
        let upstream = spawn_on_ephemeral_port(|listener| async move {
            axum::serve(listener, fake_progress_service())
                .await
                .expect("fake upstream failed");
        });
        spawn_game_server(upstream)
    })
}

// A server pointed at a port nothing listens on, for upstream failure paths.
#[allow(dead_code)]
pub fn ensure_orphan_server() -> &'static str {
    ORPHAN_SERVER_URL.get_or_init(|| spawn_game_server("http://127.0.0.1:9".to_string()))
}

#[allow(dead_code)]
pub fn ws_url(base_url: &str, username: &str) -> String {
    let host = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");
    format!("ws://{host}/ws?username={username}")
}

/// Scores recorded for `username` so far.
#[allow(dead_code)]
pub fn scores_for(username: &str) -> Vec<f64> {
    SCORES
        .lock()
        .expect("scores mutex poisoned")
        .iter()
        .filter(|(name, _)| name == username)
        .map(|(_, secs)| *secs)
        .collect()
}

fn spawn_game_server(upstream_url: String) -> String {
    spawn_on_ephemeral_port(move |listener| async move {
        let config = ServerConfig {
            progress_service_url: upstream_url,
            upstream_timeout: Duration::from_millis(500),
            arena: ArenaTuning {
                width: ARENA_SIZE,
                height: ARENA_SIZE,
            },
            tick_interval: Duration::from_millis(1000 / 60),
            hud_interval: Duration::from_millis(100),
        };
        survival_server::run(listener, config)
            .await
            .expect("server failed");
    })
}

// Spawn an OS thread with its own runtime so the server outlives individual test runtimes.
fn spawn_on_ephemeral_port<F, Fut>(serve: F) -> String
where
    F: FnOnce(tokio::net::TcpListener) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()>,
{
    let published_url = Arc::new(OnceLock::<String>::new());
    let published_url_thread = Arc::clone(&published_url);
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("test runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind ephemeral test port");
            let addr = listener.local_addr().expect("get local addr");
            let _ = published_url_thread.set(format!("http://{}", addr));
            serve(listener).await;
        });
    });
    wait_for_url_and_readiness(published_url)
}

// Wait for URL publication and then wait for the socket to accept TCP connections.
fn wait_for_url_and_readiness(published_url: Arc<OnceLock<String>>) -> String {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return base_url;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

fn fake_progress_service() -> Router {
    Router::new()
        .route("/scores", get(list_scores).post(record_score))
        .route("/api/coins/add", post(add_coins))
        .route("/api/shop/user", get(equipped_skins))
        .route("/api/shop/items", get(shop_items))
}

async fn list_scores() -> Json<Value> {
    Json(json!([
        {"id": 1, "username": "ace", "survival_time": 93.25, "created_at": "2025-01-02"},
        {"id": 2, "username": "rookie", "survival_time": 12.5, "created_at": "2025-01-03"}
    ]))
}

async fn record_score(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let username = body["username"].as_str().unwrap_or("Anonymous").to_string();
    let survival_time = body["survival_time"].as_f64().unwrap_or(0.0);
    if survival_time <= 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid survival time"})),
        );
    }
    SCORES
        .lock()
        .expect("scores mutex poisoned")
        .push((username.clone(), survival_time));
    (
        StatusCode::CREATED,
        Json(json!({"id": 3, "username": username, "survival_time": survival_time})),
    )
}

async fn add_coins(Json(body): Json<Value>) -> Json<Value> {
    let username = body["username"].as_str().unwrap_or("Anonymous").to_string();
    let coins = body["coins"].as_u64().unwrap_or(0);
    let mut credits = COINS.lock().expect("coins mutex poisoned");
    credits.push((username.clone(), coins));
    let total: u64 = credits
        .iter()
        .filter(|(name, _)| *name == username)
        .map(|(_, c)| *c)
        .sum();
    Json(json!({"success": true, "coins": total}))
}

async fn equipped_skins(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    // Only "skinned" players have anything equipped.
    if query.get("username").map(String::as_str) == Some("skinned") {
        return Json(json!({"player_skin": "knight", "enemy_skin": "default"}));
    }
    Json(json!({"player_skin": "default", "enemy_skin": null}))
}

async fn shop_items() -> Json<Value> {
    Json(json!([
        {"key": "knight", "img": "/static/skins/knight.png", "price": 50},
        {"key": "ghost", "img": "/static/skins/ghost.png", "price": 75}
    ]))
}
