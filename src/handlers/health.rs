use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::time::Duration;

use crate::AppState;

/// Readiness gives up on the database after this long, well before the
/// pool's own acquire timeout.
const READY_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

impl HealthReport {
    fn new(status: &'static str, database: Option<&'static str>) -> Self {
        Self {
            status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database,
        }
    }
}

/// Liveness only; never touches the database.
pub async fn health_check() -> Json<HealthReport> {
    Json(HealthReport::new("ok", None))
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.db);
    let db_ok = matches!(
        tokio::time::timeout(READY_CHECK_TIMEOUT, ping).await,
        Ok(Ok(1))
    );

    if db_ok {
        (StatusCode::OK, Json(HealthReport::new("ready", Some("ok"))))
    } else {
        tracing::warn!("Readiness check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthReport::new("not_ready", Some("failed"))),
        )
    }
}
