use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::footprint::{
    BatchCreateRequest, BatchCreateResponse, BulkDeleteRequest, CreateFootprintRequest,
    CreateFootprintResponse, EstimateRequest, EstimateResponse, FootprintEntry, FootprintQuery,
};
use crate::services::activity::Activity;
use crate::services::footprints::{plan_batch, BatchPlan, PlannedEntry};
use crate::services::{estimate_carbon, suggest_offsets};
use crate::AppState;

async fn insert_seed(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: Uuid,
    id: Uuid,
    planned: &PlannedEntry,
) -> AppResult<FootprintEntry> {
    let series_id = planned.recurrence_frequency.map(|_| id);

    let entry = sqlx::query_as::<_, FootprintEntry>(
        r#"
        INSERT INTO footprint_entries
            (id, user_id, activity_type, details, carbon_kg, suggested_offsets, entry_date,
             is_recurring, recurrence_frequency, recurrence_end_date, series_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(planned.activity)
    .bind(&planned.details)
    .bind(planned.carbon_kg)
    .bind(&planned.suggested_offsets)
    .bind(planned.entry_date)
    .bind(planned.is_recurring)
    .bind(planned.recurrence_frequency)
    .bind(planned.recurrence_end_date)
    .bind(series_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(entry)
}

/// All siblings of one seed in a single statement. Siblings are plain
/// entries that only point back at the seed through `series_id`.
async fn insert_occurrences(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: Uuid,
    series_id: Uuid,
    planned: &PlannedEntry,
) -> AppResult<u64> {
    if planned.occurrences.is_empty() {
        return Ok(0);
    }
    let ids: Vec<Uuid> = planned.occurrences.iter().map(|_| Uuid::new_v4()).collect();

    let result = sqlx::query(
        r#"
        INSERT INTO footprint_entries
            (id, user_id, activity_type, details, carbon_kg, suggested_offsets, entry_date,
             series_id)
        SELECT occ.id, $3, $4, $5, $6, $7, occ.entry_date, $8
        FROM UNNEST($1::uuid[], $2::date[]) AS occ(id, entry_date)
        "#,
    )
    .bind(&ids)
    .bind(&planned.occurrences)
    .bind(user_id)
    .bind(planned.activity)
    .bind(&planned.details)
    .bind(planned.carbon_kg)
    .bind(&planned.suggested_offsets)
    .bind(series_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Write a fully planned batch in one transaction. Returns the seed rows.
async fn persist_plan(
    state: &AppState,
    user_id: Uuid,
    plan: &BatchPlan,
) -> AppResult<Vec<FootprintEntry>> {
    let mut tx = state.db.begin().await?;
    let mut seeds = Vec::with_capacity(plan.entries.len());

    for planned in &plan.entries {
        let seed = insert_seed(&mut tx, user_id, Uuid::new_v4(), planned).await?;
        if let Some(series_id) = seed.series_id {
            let inserted = insert_occurrences(&mut tx, user_id, series_id, planned).await?;
            tracing::debug!(series_id = %series_id, inserted, "Occurrences inserted");
        }
        seeds.push(seed);
    }

    tx.commit().await?;
    Ok(seeds)
}

fn log_recurrence_error(user_id: Uuid, plan: &BatchPlan) -> Option<String> {
    plan.recurrence_error.as_ref().map(|e| {
        tracing::warn!(user_id = %user_id, error = %e, "Recurrence not expanded");
        e.to_string()
    })
}

pub async fn create_footprint(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateFootprintRequest>,
) -> AppResult<(StatusCode, Json<CreateFootprintResponse>)> {
    let today = Utc::now().date_naive();
    let plan = plan_batch(std::slice::from_ref(&body), today)?;
    let recurrence_error = log_recurrence_error(auth_user.id, &plan);

    let entry = persist_plan(&state, auth_user.id, &plan)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Planned entry was not inserted")))?;

    tracing::info!(
        user_id = %auth_user.id,
        entry_id = %entry.id,
        activity = %entry.activity_type,
        carbon_kg = entry.carbon_kg,
        "Footprint entry created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateFootprintResponse {
            entry,
            occurrences_created: plan.occurrence_count(),
            recurrence_error,
        }),
    ))
}

pub async fn create_batch(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<BatchCreateRequest>,
) -> AppResult<(StatusCode, Json<BatchCreateResponse>)> {
    body.validate()?;

    let today = Utc::now().date_naive();
    let plan = plan_batch(&body.items, today)?;
    let recurrence_error = log_recurrence_error(auth_user.id, &plan);

    let entries = persist_plan(&state, auth_user.id, &plan).await?;

    tracing::info!(
        user_id = %auth_user.id,
        entries = entries.len(),
        occurrences = plan.occurrence_count(),
        "Footprint batch created"
    );

    Ok((
        StatusCode::CREATED,
        Json(BatchCreateResponse {
            entries,
            occurrences_created: plan.occurrence_count(),
            recurrence_error,
        }),
    ))
}

pub async fn list_footprints(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<FootprintQuery>,
) -> AppResult<Json<Vec<FootprintEntry>>> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if end < start {
            return Err(AppError::Validation(
                "end_date must not be before start_date".into(),
            ));
        }
    }

    let entries = sqlx::query_as::<_, FootprintEntry>(
        r#"
        SELECT * FROM footprint_entries
        WHERE user_id = $1
          AND ($2::date IS NULL OR entry_date >= $2)
          AND ($3::date IS NULL OR entry_date <= $3)
          AND ($4::activity_type IS NULL OR activity_type = $4)
        ORDER BY entry_date DESC, created_at DESC
        "#,
    )
    .bind(auth_user.id)
    .bind(query.start_date)
    .bind(query.end_date)
    .bind(query.activity_type)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}

pub async fn get_footprint(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FootprintEntry>> {
    let entry = sqlx::query_as::<_, FootprintEntry>(
        "SELECT * FROM footprint_entries WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Footprint entry not found".into()))?;

    Ok(Json(entry))
}

/// Marking an already completed entry again keeps its first `completed_at`.
pub async fn complete_footprint(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FootprintEntry>> {
    let entry = sqlx::query_as::<_, FootprintEntry>(
        r#"
        UPDATE footprint_entries
        SET completed = true, completed_at = COALESCE(completed_at, NOW())
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Footprint entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn delete_footprint(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let result = sqlx::query("DELETE FROM footprint_entries WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Footprint entry not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Ids that don't exist or belong to someone else are skipped silently.
pub async fn bulk_delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<BulkDeleteRequest>,
) -> AppResult<Json<serde_json::Value>> {
    body.validate()?;

    let result =
        sqlx::query("DELETE FROM footprint_entries WHERE user_id = $1 AND id = ANY($2)")
            .bind(auth_user.id)
            .bind(&body.ids)
            .execute(&state.db)
            .await?;

    Ok(Json(serde_json::json!({ "deleted": result.rows_affected() })))
}

pub async fn delete_series(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(series_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query(
        "DELETE FROM footprint_entries WHERE user_id = $1 AND series_id = $2",
    )
    .bind(auth_user.id)
    .bind(series_id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Series not found".into()));
    }

    Ok(Json(serde_json::json!({ "deleted": result.rows_affected() })))
}

pub async fn estimate(Json(body): Json<EstimateRequest>) -> AppResult<Json<EstimateResponse>> {
    let activity: Activity = body.activity_type.parse()?;
    let carbon_kg = estimate_carbon(activity, &body.details)?;

    Ok(Json(EstimateResponse {
        activity_type: activity,
        category: activity.category(),
        carbon_kg,
        suggested_offsets: suggest_offsets(carbon_kg),
    }))
}
