//! Turns submitted entries into rows ready to insert. Everything here runs
//! before the database is touched, so a batch either plans completely or
//! fails without side effects.

use chrono::NaiveDate;
use serde_json::Value;

use super::activity::Activity;
use super::carbon::estimate_carbon;
use super::offsets::suggest_offsets;
use super::recurrence::{expand_recurrence, RecurrenceFrequency, RecurrenceRule};
use crate::error::{AppError, AppResult, CarbonError};
use crate::models::footprint::CreateFootprintRequest;

/// How far from today an entry_date may lie, in either direction.
pub const ENTRY_DATE_WINDOW_DAYS: i64 = 366;

#[derive(Debug, Clone)]
pub struct PlannedEntry {
    pub activity: Activity,
    pub details: Value,
    pub carbon_kg: f64,
    pub suggested_offsets: Vec<String>,
    pub entry_date: NaiveDate,
    pub is_recurring: bool,
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    pub recurrence_end_date: Option<NaiveDate>,
    /// Sibling dates; siblings copy carbon_kg and offsets from this entry.
    pub occurrences: Vec<NaiveDate>,
}

#[derive(Debug)]
pub struct BatchPlan {
    pub entries: Vec<PlannedEntry>,
    /// Set when any recurrence rule in the batch was invalid. The seed
    /// entries are still planned as one-off entries, with no occurrences.
    pub recurrence_error: Option<CarbonError>,
}

impl BatchPlan {
    pub fn occurrence_count(&self) -> usize {
        self.entries.iter().map(|e| e.occurrences.len()).sum()
    }
}

fn for_item(err: CarbonError, index: usize, batch: bool) -> CarbonError {
    if !batch {
        return err;
    }
    match err {
        CarbonError::InvalidActivity(m) => CarbonError::InvalidActivity(format!("item {index}: {m}")),
        CarbonError::InvalidDetails(m) => CarbonError::InvalidDetails(format!("item {index}: {m}")),
        CarbonError::InvalidRecurrenceRule(m) => {
            CarbonError::InvalidRecurrenceRule(format!("item {index}: {m}"))
        }
    }
}

fn plan_entry(item: &CreateFootprintRequest, today: NaiveDate) -> AppResult<PlannedEntry> {
    let activity: Activity = item.activity_type.parse()?;
    let carbon_kg = estimate_carbon(activity, &item.details)?;

    let entry_date = item.entry_date.unwrap_or(today);
    if (entry_date - today).num_days().abs() > ENTRY_DATE_WINDOW_DAYS {
        return Err(AppError::Validation(
            "entry_date must be within one year of today".into(),
        ));
    }

    Ok(PlannedEntry {
        activity,
        details: item.details.clone(),
        carbon_kg,
        suggested_offsets: suggest_offsets(carbon_kg),
        entry_date,
        is_recurring: item.is_recurring,
        recurrence_frequency: None,
        recurrence_end_date: item.recurrence_end_date.filter(|_| item.is_recurring),
        occurrences: Vec::new(),
    })
}

/// Estimate every item, then expand recurrences. Any estimation or
/// validation failure rejects the whole batch. A bad recurrence rule only
/// cancels expansion; the seeds are kept.
pub fn plan_batch(items: &[CreateFootprintRequest], today: NaiveDate) -> AppResult<BatchPlan> {
    let batch = items.len() > 1;

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let planned = plan_entry(item, today).map_err(|e| match e {
            AppError::Carbon(c) => AppError::Carbon(for_item(c, index, batch)),
            AppError::Validation(m) if batch => AppError::Validation(format!("item {index}: {m}")),
            other => other,
        })?;
        entries.push(planned);
    }

    let mut recurrence_error = None;
    for (index, (entry, item)) in entries.iter_mut().zip(items).enumerate() {
        if !item.is_recurring {
            continue;
        }
        let expanded = RecurrenceRule::parse(
            item.recurrence_frequency.as_deref(),
            item.recurrence_end_date,
        )
        .and_then(|rule| Ok((rule.frequency, expand_recurrence(entry.entry_date, &rule)?)));

        match expanded {
            Ok((frequency, dates)) => {
                entry.recurrence_frequency = Some(frequency);
                entry.occurrences = dates;
            }
            Err(e) => {
                recurrence_error.get_or_insert(for_item(e, index, batch));
            }
        }
    }

    // Without siblings no seed may claim a series
    if recurrence_error.is_some() {
        for entry in &mut entries {
            entry.is_recurring = false;
            entry.recurrence_frequency = None;
            entry.recurrence_end_date = None;
            entry.occurrences.clear();
        }
    }

    Ok(BatchPlan {
        entries,
        recurrence_error,
    })
}
