//! Record list queries: the detailed, filterable table of every collecte.

use std::cell::RefCell;
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Amount, FundraisingRecord};
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// RecordFilter
// ---------------------------------------------------------------------------

/// Filters for the record list page. All criteria are combined with AND;
/// `None` leaves a criterion out.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Exact match on the activity label.
    pub activity: Option<String>,
    /// Exact match on the coarse category label.
    pub kind: Option<String>,
    /// Name that must appear among the record's contributors.
    pub person: Option<String>,
    /// Earliest date, inclusive.
    pub from: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub until: Option<NaiveDate>,
    /// Case-insensitive substring matched against every textual field and
    /// the amount.
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// RecordQuery
// ---------------------------------------------------------------------------

/// Query interface for the stored record list.
pub struct RecordQuery<'a> {
    store: &'a RefCell<RecordStore>,
}

impl<'a> RecordQuery<'a> {
    /// Create a `RecordQuery` bound to the given store.
    pub fn new(store: &'a RefCell<RecordStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<FundraisingRecord>> {
        self.store.borrow_mut().load()
    }

    /// All records, most recent first (the list page default).
    pub fn all(&self) -> Result<Vec<FundraisingRecord>> {
        let mut records = self.load()?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    /// Records matching `filter`, most recent first.
    pub fn search(&self, filter: &RecordFilter) -> Result<Vec<FundraisingRecord>> {
        let mut records = self.load()?;
        records.retain(|record| matches(record, filter));
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Distinct activity labels, sorted, for the filter dropdown.
    pub fn activities(&self) -> Result<Vec<String>> {
        let records = self.load()?;
        let set: BTreeSet<String> = records.into_iter().map(|r| r.activity).collect();
        Ok(set.into_iter().collect())
    }

    /// Distinct coarse category labels, sorted.
    pub fn kinds(&self) -> Result<Vec<String>> {
        let records = self.load()?;
        let set: BTreeSet<String> = records.into_iter().map(|r| r.kind).collect();
        Ok(set.into_iter().collect())
    }

    /// Distinct contributor names, sorted. Multi-person entries contribute
    /// each listed name.
    pub fn people(&self) -> Result<Vec<String>> {
        let records = self.load()?;
        let set: BTreeSet<String> = records.iter().flat_map(|r| r.names()).collect();
        Ok(set.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

fn matches(record: &FundraisingRecord, filter: &RecordFilter) -> bool {
    if let Some(activity) = &filter.activity {
        if record.activity != *activity {
            return false;
        }
    }
    if let Some(kind) = &filter.kind {
        if record.kind != *kind {
            return false;
        }
    }
    if let Some(person) = &filter.person {
        if !record.names().iter().any(|name| name == person) {
            return false;
        }
    }
    if let Some(from) = filter.from {
        if record.date < from {
            return false;
        }
    }
    if let Some(until) = filter.until {
        if record.date > until {
            return false;
        }
    }
    if let Some(term) = &filter.search {
        let term = term.to_lowercase();
        if !term.is_empty() && !haystack(record).to_lowercase().contains(&term) {
            return false;
        }
    }
    true
}

/// Every field of the record as one searchable string, matching the list
/// page's search-everything behavior.
fn haystack(record: &FundraisingRecord) -> String {
    let amount = match &record.amount {
        Amount::Scalar(v) => v.to_string(),
        Amount::Itemized(values) => values
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(","),
    };
    format!(
        "{} {} {} {} {} {}",
        record.date, record.who, record.kind, record.activity, record.details, amount
    )
}
