use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use crate::services::activity::{Activity, ActivityCategory};
use crate::services::recurrence::RecurrenceFrequency;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FootprintEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: Activity,
    pub details: serde_json::Value,
    pub carbon_kg: f64,
    pub suggested_offsets: Vec<String>,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    pub recurrence_end_date: Option<NaiveDate>,
    pub series_id: Option<Uuid>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

fn empty_details() -> serde_json::Value {
    serde_json::json!({})
}

/// One activity submission. `activity_type` and `recurrence_frequency` stay
/// untyped here so that bad values surface as carbon validation errors
/// rather than generic body rejections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFootprintRequest {
    pub activity_type: String,
    #[serde(default = "empty_details")]
    pub details: serde_json::Value,
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_frequency: Option<String>,
    pub recurrence_end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BatchCreateRequest {
    #[validate(length(min = 1, max = 100, message = "A batch must hold 1-100 entries"))]
    pub items: Vec<CreateFootprintRequest>,
}

#[derive(Debug, Serialize)]
pub struct CreateFootprintResponse {
    pub entry: FootprintEntry,
    pub occurrences_created: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchCreateResponse {
    pub entries: Vec<FootprintEntry>,
    pub occurrences_created: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FootprintQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub activity_type: Option<Activity>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, max = 500, message = "Provide 1-500 ids"))]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub activity_type: String,
    #[serde(default = "empty_details")]
    pub details: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub activity_type: Activity,
    pub category: ActivityCategory,
    pub carbon_kg: f64,
    pub suggested_offsets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PointsSummary {
    pub total_points: i64,
    pub completed_entries: usize,
    pub total_entries: usize,
}

#[derive(Debug, Serialize)]
pub struct FootprintSummary {
    pub entry_count: usize,
    pub completed_count: usize,
    pub total_carbon_kg: f64,
    pub total_points: i64,
    pub by_category: BTreeMap<ActivityCategory, f64>,
    pub monthly: BTreeMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item() -> CreateFootprintRequest {
        serde_json::from_value(json!({"activity_type": "bus"})).unwrap()
    }

    #[test]
    fn test_create_request_defaults() {
        let request = item();
        assert_eq!(request.details, json!({}));
        assert!(!request.is_recurring);
        assert_eq!(request.entry_date, None);
    }

    #[test]
    fn test_batch_size_bounds() {
        let empty = BatchCreateRequest { items: Vec::new() };
        assert!(empty.validate().is_err());

        let full = BatchCreateRequest {
            items: vec![item(); 100],
        };
        assert!(full.validate().is_ok());

        let over = BatchCreateRequest {
            items: vec![item(); 101],
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_bulk_delete_bounds() {
        assert!(BulkDeleteRequest { ids: Vec::new() }.validate().is_err());
        assert!(BulkDeleteRequest {
            ids: vec![Uuid::nil()]
        }
        .validate()
        .is_ok());
    }
}
