use axum::body::Body;
use axum::http::{header, Request, Response};
use http_body_util::BodyExt;
use uuid::Uuid;

use carbontrack_api::auth::jwt::{create_access_token, create_refresh_token};
use carbontrack_api::config::Config;
use carbontrack_api::db::create_lazy_pool;
use carbontrack_api::routes::create_router;
use carbontrack_api::AppState;

/// Router over a pool that never connects unless a handler reaches the
/// database. Only routes that answer before touching storage are tested.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, AppState) {
    let config = Config::test_default();
    let database_url = config.database_url.clone();
    create_test_app_with_database(&database_url, config)
}

#[allow(dead_code)]
pub fn create_test_app_with_database(database_url: &str, config: Config) -> (axum::Router, AppState) {
    let db = create_lazy_pool(database_url).expect("Failed to build lazy pool");
    let state = AppState::new(db, config).expect("Failed to build state");
    (create_router(state.clone()), state)
}

/// A migrated database for tests that need real rows, taken from
/// `TEST_DATABASE_URL`. `None` when the variable is not set.
#[allow(dead_code)]
pub async fn create_db_test_app() -> Option<(axum::Router, AppState)> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = carbontrack_api::db::create_pool(&url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let mut config = Config::test_default();
    config.database_url = url;
    let state = AppState::new(pool, config).expect("Failed to build state");
    Some((create_router(state.clone()), state))
}

/// Skip the test with a message when no test database is configured.
#[macro_export]
macro_rules! require_database {
    () => {
        match crate::common::create_db_test_app().await {
            Some(app) => app,
            None => {
                eprintln!("Skipping: TEST_DATABASE_URL not set");
                return;
            }
        }
    };
}

#[allow(dead_code)]
pub fn access_token(state: &AppState) -> String {
    create_access_token(Uuid::new_v4(), "test@example.com", &state.config)
        .expect("Failed to sign access token")
}

#[allow(dead_code)]
pub fn refresh_token(state: &AppState) -> String {
    create_refresh_token(Uuid::new_v4(), "test@example.com", &state.config)
        .expect("Failed to sign refresh token")
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    let mut request = json_request(method, uri, body);
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );
    request
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
