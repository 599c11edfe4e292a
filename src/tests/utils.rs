use crate::app::App;
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// Initialize a fresh test DB using the production schema
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "job_map_test_{}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        NEXT_DB.fetch_add(1, Ordering::Relaxed)
    ));
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}

/// An app over a fresh database with no directory configured.
pub fn init_test_app() -> App {
    let db = init_test_db();
    let config = AppConfig {
        db_path: db.path().to_string(),
        ..AppConfig::default()
    };
    App::new(&config, db).expect("Failed to build app")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn read_body(resp: &mut Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}

pub fn read_json(resp: &mut Response) -> serde_json::Value {
    serde_json::from_str(&read_body(resp)).expect("response is not JSON")
}
