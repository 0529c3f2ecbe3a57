use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// CumulativePoint
// ---------------------------------------------------------------------------

/// One day of the dense cumulative series: the running total of all record
/// amounts dated on or before `date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub total: f64,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregated view of the full record list, recomputed on every read.
///
/// The JSON shape (snake_case keys) is what the site's chart pages consume
/// directly.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    /// Signed sum over all records, itemized amounts flattened by summation.
    pub total_funds: f64,
    /// Per-person totals over split records; group-wide amounts appear under
    /// the literal `"Groupe"` key, never distributed to individuals.
    pub person_totals: HashMap<String, f64>,
    /// Per-activity totals over the original records (an itemized amount
    /// counts as one activity instance even though it splits across people).
    pub activity_totals: HashMap<String, f64>,
    pub activity_counts: HashMap<String, usize>,
    /// Same as the activity maps, keyed by the coarse category label.
    pub kind_totals: HashMap<String, f64>,
    pub kind_counts: HashMap<String, usize>,
    /// Daily running totals from the campaign start through today (capped at
    /// the campaign end); empty before the campaign starts.
    pub cumulative: Vec<CumulativePoint>,
}
