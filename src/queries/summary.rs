//! Aggregated views over the record list: totals, breakdowns and the dense
//! cumulative series.
//!
//! Every method recomputes from the full record list; nothing is cached
//! incrementally. The reference date is always an explicit parameter so the
//! output is fully deterministic for a fixed record list and a fixed
//! "today".

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::config::Campaign;
use crate::error::Result;
use crate::models::{CumulativePoint, FundraisingRecord, Summary};
use crate::split::split_records;
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// SummaryQuery
// ---------------------------------------------------------------------------

/// Aggregation interface over the stored record list.
pub struct SummaryQuery<'a> {
    store: &'a RefCell<RecordStore>,
    campaign: &'a Campaign,
}

impl<'a> SummaryQuery<'a> {
    /// Create a `SummaryQuery` bound to the given store and campaign.
    pub fn new(store: &'a RefCell<RecordStore>, campaign: &'a Campaign) -> Self {
        Self { store, campaign }
    }

    fn load(&self) -> Result<Vec<FundraisingRecord>> {
        self.store.borrow_mut().load()
    }

    /// The full summary consumed by the dashboard pages.
    pub fn summary(&self, today: NaiveDate) -> Result<Summary> {
        let records = self.load()?;
        let split = split_records(&records);

        let mut summary = Summary {
            total_funds: records.iter().map(|r| r.amount.total()).sum(),
            cumulative: cumulative_series(&records, self.campaign, today),
            ..Summary::default()
        };

        for row in &split {
            *summary.person_totals.entry(row.who.clone()).or_insert(0.0) += row.amount;
        }

        for record in &records {
            let total = record.amount.total();
            *summary
                .activity_totals
                .entry(record.activity.clone())
                .or_insert(0.0) += total;
            *summary
                .activity_counts
                .entry(record.activity.clone())
                .or_insert(0) += 1;
            *summary.kind_totals.entry(record.kind.clone()).or_insert(0.0) += total;
            *summary.kind_counts.entry(record.kind.clone()).or_insert(0) += 1;
        }

        Ok(summary)
    }

    /// Signed sum over all records, itemized amounts flattened by summation.
    pub fn total_funds(&self) -> Result<f64> {
        let records = self.load()?;
        Ok(records.iter().map(|r| r.amount.total()).sum())
    }

    /// Per-person totals over split records, the leaderboard input.
    ///
    /// Group-wide amounts stay under the literal `"Groupe"` key.
    pub fn person_totals(&self) -> Result<HashMap<String, f64>> {
        let records = self.load()?;
        let mut totals = HashMap::new();
        for row in split_records(&records) {
            *totals.entry(row.who).or_insert(0.0) += row.amount;
        }
        Ok(totals)
    }

    /// Daily running totals from the campaign start through `today`.
    pub fn cumulative(&self, today: NaiveDate) -> Result<Vec<CumulativePoint>> {
        let records = self.load()?;
        Ok(cumulative_series(&records, self.campaign, today))
    }

    /// One dense daily series per contributor, for the per-child chart
    /// toggle. Built over split records, so shared entries contribute each
    /// person's own share.
    pub fn person_cumulative(
        &self,
        today: NaiveDate,
    ) -> Result<HashMap<String, Vec<CumulativePoint>>> {
        let records = self.load()?;
        let split = split_records(&records);

        let mut by_person: HashMap<String, BTreeMap<NaiveDate, f64>> = HashMap::new();
        for row in &split {
            *by_person
                .entry(row.who.clone())
                .or_default()
                .entry(row.date)
                .or_insert(0.0) += row.amount;
        }

        Ok(by_person
            .into_iter()
            .map(|(name, by_day)| (name, running_series(&by_day, self.campaign, today)))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Series construction
// ---------------------------------------------------------------------------

/// Build the dense cumulative series over original records (flattened
/// amounts).
fn cumulative_series(
    records: &[FundraisingRecord],
    campaign: &Campaign,
    today: NaiveDate,
) -> Vec<CumulativePoint> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *by_day.entry(record.date).or_insert(0.0) += record.amount.total();
    }
    running_series(&by_day, campaign, today)
}

/// One entry per calendar day from the campaign start through
/// `min(today, campaign end)`; days without transactions repeat the prior
/// total. Amounts dated before the campaign start are folded into the first
/// entry.
fn running_series(
    by_day: &BTreeMap<NaiveDate, f64>,
    campaign: &Campaign,
    today: NaiveDate,
) -> Vec<CumulativePoint> {
    if today < campaign.start {
        return Vec::new();
    }
    let end = today.min(campaign.end);

    let mut total: f64 = by_day.range(..campaign.start).map(|(_, v)| v).sum();
    let mut series = Vec::new();
    for date in campaign.start.iter_days() {
        if date > end {
            break;
        }
        total += by_day.get(&date).copied().unwrap_or(0.0);
        series.push(CumulativePoint { date, total });
    }
    series
}
