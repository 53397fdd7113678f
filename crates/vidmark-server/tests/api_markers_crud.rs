use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use vidmark_db::{create_pool, run_migrations, DbPool, DbRuntimeSettings};
use vidmark_server::{app, config::StaticFilesConfig, AppState};
use vidmark_store::MarkerStore;

fn setup_app() -> (axum::Router, DbPool, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = dir.path().join("markers.db");
    let pool = create_pool(db_path.to_str().unwrap(), DbRuntimeSettings::default())
        .expect("pool creation should succeed");
    {
        let conn = pool.get().expect("should get a connection");
        run_migrations(&conn).expect("migrations should succeed");
    }

    let state = AppState {
        store: MarkerStore::new(pool.clone()),
        static_files: StaticFilesConfig {
            public_dir: "test-no-public".to_string(),
            assets_dir: "test-no-assets".to_string(),
        },
    };

    (app(state), pool, dir)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_returns_ok() {
    let (app, _pool, _dir) = setup_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn full_marker_lifecycle() {
    let (app, _pool, _dir) = setup_app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/markers",
            &json!({"id": "m1", "url": "https://youtu.be/x", "seconds": 75}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["message"], "Marker created successfully");
    assert_eq!(created["id"], "m1");

    // List shows the new marker with a server-assigned timestamp
    let response = app.clone().oneshot(get_request("/markers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let markers = body_json(response).await;
    assert_eq!(markers.as_array().unwrap().len(), 1);
    assert_eq!(markers[0]["id"], "m1");
    assert_eq!(markers[0]["seconds"], 75);
    assert_eq!(markers[0]["title"], Value::Null);
    let created_at = markers[0]["created"].as_str().unwrap().to_string();
    assert!(!created_at.is_empty());

    // Update replaces the mutable fields only
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/markers/m1",
            &json!({"title": "Intro", "url": "https://youtu.be/x", "seconds": 90, "note": null}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["message"], "Marker updated successfully");
    assert_eq!(updated["id"], "m1");

    let response = app.clone().oneshot(get_request("/markers")).await.unwrap();
    let markers = body_json(response).await;
    assert_eq!(markers[0]["seconds"], 90);
    assert_eq!(markers[0]["title"], "Intro");
    assert_eq!(markers[0]["created"], created_at.as_str());

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/markers/m1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["message"], "Marker deleted successfully");
    assert_eq!(deleted["id"], "m1");

    let response = app.clone().oneshot(get_request("/markers")).await.unwrap();
    let markers = body_json(response).await;
    assert!(markers.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_accepts_missing_title_and_note() {
    let (app, pool, _dir) = setup_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/markers",
            &json!({"id": "m1", "url": "https://example.com/v", "seconds": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let conn = pool.get().unwrap();
    let (title, note): (Option<String>, Option<String>) = conn
        .query_row(
            "SELECT title, note FROM video_markers WHERE id = 'm1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(title, None);
    assert_eq!(note, None);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let (app, pool, _dir) = setup_app();

    {
        let conn = pool.get().unwrap();
        for (id, created) in [
            ("oldest", "2026-01-01T00:00:00.000Z"),
            ("newest", "2026-03-01T00:00:00.000Z"),
            ("middle", "2026-02-01T00:00:00.000Z"),
        ] {
            conn.execute(
                "INSERT INTO video_markers (id, url, seconds, created)
                 VALUES (?1, 'https://example.com/v', 1, ?2)",
                rusqlite::params![id, created],
            )
            .unwrap();
        }
    }

    let response = app.oneshot(get_request("/markers")).await.unwrap();
    let markers = body_json(response).await;
    let ids: Vec<&str> = markers
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn update_of_missing_id_returns_success_shape() {
    let (app, _pool, _dir) = setup_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/markers/no-such-id",
            &json!({"url": "https://example.com/v", "seconds": 10}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Marker updated successfully");
    assert_eq!(json["id"], "no-such-id");
}

#[tokio::test]
async fn delete_of_missing_id_returns_success_shape() {
    let (app, _pool, _dir) = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/markers/no-such-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Marker deleted successfully");
    assert_eq!(json["id"], "no-such-id");
}
