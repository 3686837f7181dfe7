//! HTTP-level integration tests for the video ingestion pipeline,
//! exercising the all-or-nothing contract with a mock media store.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, post_multipart_auth, register_and_login, MockMediaStore, Part,
};
use cliphub_db::repositories::VideoRepo;
use cliphub_storage::AssetKind;
use sqlx::PgPool;
use tempfile::TempDir;

/// Build an app wired to the given mock store, returning both.
fn test_app(pool: PgPool, staging: &TempDir) -> (axum::Router, Arc<MockMediaStore>) {
    let store = Arc::new(MockMediaStore::new());
    let app = common::build_test_app(pool, store.clone(), staging.path().to_path_buf());
    (app, store)
}

/// Number of entries (request subdirectories or stray files) left in the
/// staging root.
fn staging_entries(staging: &TempDir) -> usize {
    std::fs::read_dir(staging.path()).map(|d| d.count()).unwrap_or(0)
}

/// A complete submission without a thumbnail creates exactly one record:
/// primary locator set, empty thumbnail, publication defaulted to true.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ingest_happy_path_without_thumbnail(pool: PgPool) {
    let staging = TempDir::new().unwrap();
    let (app, store) = test_app(pool.clone(), &staging);
    let (user_id, token, _) = register_and_login(app.clone(), "creator").await;

    let parts = [
        Part::Text("title", "T"),
        Part::Text("description", "D"),
        Part::File("video", "clip.mp4", b"fake video bytes"),
    ];
    let response = post_multipart_auth(app, "/api/v1/videos", &parts, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["video_url"], store.locator(0).unwrap().as_str());
    assert_eq!(json["data"]["thumbnail_url"], "");
    assert_eq!(json["data"]["is_published"], true);
    assert_eq!(json["data"]["owner_id"], user_id);

    let count = VideoRepo::count(&pool).await.unwrap();
    assert_eq!(count, 1, "exactly one record must exist");
    assert_eq!(store.attempt_count(), 1, "only the primary is uploaded");
    assert_eq!(staging_entries(&staging), 0, "staging area must be swept");
}

/// A submission with a thumbnail uploads both assets in order and stores
/// both locators.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ingest_with_thumbnail(pool: PgPool) {
    let staging = TempDir::new().unwrap();
    let (app, store) = test_app(pool.clone(), &staging);
    let (_, token, _) = register_and_login(app.clone(), "thumbed").await;

    let parts = [
        Part::Text("title", "T"),
        Part::Text("description", "D"),
        Part::Text("isPublished", "false"),
        Part::File("video", "clip.mp4", b"fake video bytes"),
        Part::File("thumbnail", "thumb.png", b"fake image bytes"),
    ];
    let response = post_multipart_auth(app, "/api/v1/videos", &parts, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["video_url"], store.locator(0).unwrap().as_str());
    assert_eq!(
        json["data"]["thumbnail_url"],
        store.locator(1).unwrap().as_str()
    );
    assert_eq!(json["data"]["is_published"], false);

    assert_eq!(store.attempt_count(), 2);
    assert_eq!(staging_entries(&staging), 0);
}

/// An empty title fails fast: no upload is attempted, nothing persisted.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ingest_empty_title(pool: PgPool) {
    let staging = TempDir::new().unwrap();
    let (app, store) = test_app(pool.clone(), &staging);
    let (_, token, _) = register_and_login(app.clone(), "untitled").await;

    let parts = [
        Part::Text("title", ""),
        Part::Text("description", "D"),
        Part::File("video", "clip.mp4", b"fake video bytes"),
    ];
    let response = post_multipart_auth(app, "/api/v1/videos", &parts, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_FIELD");

    assert_eq!(store.attempt_count(), 0, "no upload may be attempted");
    assert_eq!(VideoRepo::count(&pool).await.unwrap(), 0);
    assert_eq!(staging_entries(&staging), 0, "staged file must be swept");
}

/// A submission without the primary file is rejected with MISSING_ASSET.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ingest_missing_video(pool: PgPool) {
    let staging = TempDir::new().unwrap();
    let (app, store) = test_app(pool.clone(), &staging);
    let (_, token, _) = register_and_login(app.clone(), "fileless").await;

    let parts = [Part::Text("title", "T"), Part::Text("description", "D")];
    let response = post_multipart_auth(app, "/api/v1/videos", &parts, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_ASSET");

    assert_eq!(store.attempt_count(), 0);
    assert_eq!(VideoRepo::count(&pool).await.unwrap(), 0);
}

/// A primary upload failure creates nothing and attempts nothing further.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ingest_primary_upload_failure(pool: PgPool) {
    let staging = TempDir::new().unwrap();
    let (app, store) = test_app(pool.clone(), &staging);
    let (_, token, _) = register_and_login(app.clone(), "unlucky").await;

    store.fail_kind(AssetKind::Video);

    let parts = [
        Part::Text("title", "T"),
        Part::Text("description", "D"),
        Part::File("video", "clip.mp4", b"fake video bytes"),
        Part::File("thumbnail", "thumb.png", b"fake image bytes"),
    ];
    let response = post_multipart_auth(app, "/api/v1/videos", &parts, &token).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPLOAD_FAILED");

    assert_eq!(
        store.attempt_count(),
        1,
        "the secondary must not be attempted after a primary failure"
    );
    assert_eq!(VideoRepo::count(&pool).await.unwrap(), 0);
    assert_eq!(staging_entries(&staging), 0);
}

/// A thumbnail failure after a successful primary upload still fails the
/// whole request: no record is created (all-or-nothing).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ingest_secondary_upload_failure(pool: PgPool) {
    let staging = TempDir::new().unwrap();
    let (app, store) = test_app(pool.clone(), &staging);
    let (_, token, _) = register_and_login(app.clone(), "halfway").await;

    store.fail_kind(AssetKind::Image);

    let parts = [
        Part::Text("title", "T"),
        Part::Text("description", "D"),
        Part::File("video", "clip.mp4", b"fake video bytes"),
        Part::File("thumbnail", "thumb.png", b"fake image bytes"),
    ];
    let response = post_multipart_auth(app, "/api/v1/videos", &parts, &token).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPLOAD_FAILED");

    assert_eq!(store.attempt_count(), 2, "primary then secondary");
    assert_eq!(
        VideoRepo::count(&pool).await.unwrap(),
        0,
        "no record even though the primary upload succeeded"
    );
    assert_eq!(staging_entries(&staging), 0);
}

/// Ingestion requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ingest_without_token(pool: PgPool) {
    let staging = TempDir::new().unwrap();
    let (app, store) = test_app(pool.clone(), &staging);

    let parts = [
        Part::Text("title", "T"),
        Part::Text("description", "D"),
        Part::File("video", "clip.mp4", b"fake video bytes"),
    ];
    let response = post_multipart_auth(app, "/api/v1/videos", &parts, "not-a-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.attempt_count(), 0);
}
