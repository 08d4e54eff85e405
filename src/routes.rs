use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::config::Config;
use crate::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Auth routes with per-IP rate limiting
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/api/estimate", post(handlers::footprints::estimate))
        .route(
            "/api/suggestions",
            get(handlers::suggestions::list_suggestions),
        )
        .route("/api/news", get(handlers::news::get_news))
        .merge(auth_routes);

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        .route("/api/auth/password", post(handlers::auth::update_password))
        .route("/api/auth/logout", post(handlers::auth::logout))
        // Footprints
        .route(
            "/api/footprints",
            get(handlers::footprints::list_footprints).post(handlers::footprints::create_footprint),
        )
        .route(
            "/api/footprints/batch",
            post(handlers::footprints::create_batch),
        )
        .route(
            "/api/footprints/bulk-delete",
            post(handlers::footprints::bulk_delete),
        )
        .route(
            "/api/footprints/series/:series_id",
            delete(handlers::footprints::delete_series),
        )
        .route(
            "/api/footprints/:id",
            get(handlers::footprints::get_footprint).delete(handlers::footprints::delete_footprint),
        )
        .route(
            "/api/footprints/:id/complete",
            post(handlers::footprints::complete_footprint),
        )
        // Stats
        .route("/api/stats/points", get(handlers::stats::get_points))
        .route("/api/stats/monthly", get(handlers::stats::get_monthly))
        .route("/api/stats/summary", get(handlers::stats::get_summary))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(&config.cors_extra_origins)
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
