use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::services::suggestions::{category_suggestions, parse_category, OffsetSuggestion};

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub category: &'static str,
    pub suggestions: &'static [OffsetSuggestion],
}

pub async fn list_suggestions(
    Query(query): Query<SuggestionQuery>,
) -> AppResult<Json<SuggestionResponse>> {
    let category = match query.category.as_deref() {
        Some(raw) => parse_category(raw)?,
        None => None,
    };

    Ok(Json(SuggestionResponse {
        category: category.map_or("default", |c| c.as_str()),
        suggestions: category_suggestions(category),
    }))
}
