use axum::{extract::State, Extension, Json};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::footprint::{FootprintEntry, FootprintSummary, PointsSummary};
use crate::services::{monthly_progress, total_points};
use crate::AppState;

async fn user_entries(db: &sqlx::PgPool, user_id: Uuid) -> AppResult<Vec<FootprintEntry>> {
    let entries = sqlx::query_as::<_, FootprintEntry>(
        "SELECT * FROM footprint_entries WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(entries)
}

pub async fn get_points(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<PointsSummary>> {
    let entries = user_entries(&state.db, auth_user.id).await?;

    Ok(Json(PointsSummary {
        total_points: total_points(&entries),
        completed_entries: entries.iter().filter(|e| e.completed).count(),
        total_entries: entries.len(),
    }))
}

pub async fn get_monthly(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<BTreeMap<String, f64>>> {
    let entries = user_entries(&state.db, auth_user.id).await?;
    Ok(Json(monthly_progress(&entries)))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<FootprintSummary>> {
    let entries = user_entries(&state.db, auth_user.id).await?;
    Ok(Json(summarize(&entries)))
}

fn summarize(entries: &[FootprintEntry]) -> FootprintSummary {
    let mut by_category = BTreeMap::new();
    for entry in entries {
        *by_category
            .entry(entry.activity_type.category())
            .or_insert(0.0) += entry.carbon_kg;
    }

    FootprintSummary {
        entry_count: entries.len(),
        completed_count: entries.iter().filter(|e| e.completed).count(),
        total_carbon_kg: entries.iter().map(|e| e.carbon_kg).sum(),
        total_points: total_points(entries),
        by_category,
        monthly: monthly_progress(entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::activity::{Activity, ActivityCategory};
    use crate::services::points::tests::entry;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_summary_groups_by_category() {
        let jan = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 5, 12, 0, 0).unwrap();

        let mut flight = entry(230.0, true, jan);
        flight.activity_type = Activity::Flight;
        let mut bus = entry(2.0, false, feb);
        bus.activity_type = Activity::Bus;
        let mut meat = entry(5.0, true, feb);
        meat.activity_type = Activity::Meat;

        let summary = summarize(&[flight, bus, meat]);

        assert_eq!(summary.entry_count, 3);
        assert_eq!(summary.completed_count, 2);
        assert_eq!(summary.total_carbon_kg, 237.0);
        assert_eq!(summary.total_points, 150);
        assert_eq!(summary.by_category[&ActivityCategory::Transport], 232.0);
        assert_eq!(summary.by_category[&ActivityCategory::Food], 5.0);
        assert!(!summary.by_category.contains_key(&ActivityCategory::Energy));
        assert_eq!(summary.monthly["2024-01"], 230.0);
        assert_eq!(summary.monthly["2024-02"], 7.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.entry_count, 0);
        assert_eq!(summary.total_points, 0);
        assert!(summary.by_category.is_empty());
        assert!(summary.monthly.is_empty());
    }
}
