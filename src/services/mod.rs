//! Pure, synchronous carbon logic. Nothing in here touches the database or
//! awaits, so every function is safe to call from any request task.

pub mod activity;
pub mod carbon;
pub mod factors;
pub mod footprints;
pub mod offsets;
pub mod points;
pub mod recurrence;
pub mod suggestions;

pub use carbon::{estimate_carbon, estimate_carbon_str};
pub use offsets::suggest_offsets;
pub use points::{compute_points, monthly_progress, total_points};
pub use recurrence::expand_recurrence;
