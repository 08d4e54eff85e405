use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::AppState;

const NEWS_QUERY: &str =
    r#"+"climate change" OR +"carbon emissions" OR +"sustainability""#;
const PAGE_SIZE: &str = "8";

/// Proxy a climate headline search so the API key never reaches the browser.
/// The upstream JSON is passed through untouched.
pub async fn get_news(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let api_key = state
        .config
        .news_api_key
        .as_deref()
        .ok_or_else(|| AppError::Unavailable("News feed is not configured".into()))?;

    let response = state
        .http
        .get(&state.config.news_api_url)
        .query(&[
            ("q", NEWS_QUERY),
            ("searchIn", "title"),
            ("language", "en"),
            ("sortBy", "relevancy"),
            ("pageSize", PAGE_SIZE),
            ("apiKey", api_key),
        ])
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "News request failed");
            AppError::Upstream("News service unreachable".into())
        })?;

    if !response.status().is_success() {
        let status = response.status();
        tracing::warn!(status = %status, "News service returned an error");
        return Err(AppError::Upstream(format!("News service returned {status}")));
    }

    let body = response.json::<Value>().await.map_err(|e| {
        tracing::warn!(error = %e, "News response was not JSON");
        AppError::Upstream("News service returned an invalid response".into())
    })?;

    Ok(Json(body))
}
