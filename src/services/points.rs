use std::collections::BTreeMap;

use crate::models::footprint::FootprintEntry;

/// Points awarded for a single entry are capped at this value.
pub const MAX_POINTS_PER_ENTRY: f64 = 100.0;
const POINTS_PER_KG: f64 = 10.0;

/// `floor(min(carbon_kg × 10, 100))` for a completed entry, 0 otherwise.
pub fn compute_points(entry: &FootprintEntry) -> i64 {
    if !entry.completed {
        return 0;
    }
    (entry.carbon_kg * POINTS_PER_KG)
        .min(MAX_POINTS_PER_ENTRY)
        .max(0.0)
        .floor() as i64
}

pub fn total_points(entries: &[FootprintEntry]) -> i64 {
    entries.iter().map(compute_points).sum()
}

/// Summed carbon_kg per creation month (UTC), keyed "YYYY-MM".
pub fn monthly_progress(entries: &[FootprintEntry]) -> BTreeMap<String, f64> {
    let mut months = BTreeMap::new();
    for entry in entries {
        *months
            .entry(entry.created_at.format("%Y-%m").to_string())
            .or_insert(0.0) += entry.carbon_kg;
    }
    months
}
