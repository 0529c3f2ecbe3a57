//! Monthly objectives table: per-person per-month totals graded against the
//! campaign objective, with best/worst performer sets per elapsed month.
//!
//! Built from split records only, bounded by the campaign window. Group
//! entries are not part of the table: the objective is per child. Retired
//! people keep their history but are excluded from every ranking
//! computation, so removing a retired person never changes anyone else's
//! rank.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;

use crate::config::{Campaign, GROUP_LABEL};
use crate::error::Result;
use crate::models::{
    FundraisingRecord, MonthCell, MonthKey, MonthResult, ObjectiveLevel, PersonRow, Standings,
};
use crate::split::split_records;
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// RankingQuery
// ---------------------------------------------------------------------------

/// Ranking interface over the stored record list.
pub struct RankingQuery<'a> {
    store: &'a RefCell<RecordStore>,
    campaign: &'a Campaign,
    retired: &'a HashSet<String>,
}

impl<'a> RankingQuery<'a> {
    /// Create a `RankingQuery` bound to the given store, campaign and
    /// retired-name set.
    pub fn new(
        store: &'a RefCell<RecordStore>,
        campaign: &'a Campaign,
        retired: &'a HashSet<String>,
    ) -> Self {
        Self {
            store,
            campaign,
            retired,
        }
    }

    fn monthly_table(&self) -> Result<BTreeMap<String, BTreeMap<MonthKey, f64>>> {
        let records = self.store.borrow_mut().load()?;
        Ok(monthly_totals(&records, self.campaign))
    }

    /// The full objectives table for rendering.
    pub fn standings(&self, today: NaiveDate) -> Result<Standings> {
        let table = self.monthly_table()?;
        let months = self.campaign.months();
        let current = MonthKey::of(today);

        // Active people first, then retired, alphabetical within each group.
        let mut names: Vec<&String> = table.keys().collect();
        names.sort_by_key(|name| (self.retired.contains(*name), (*name).clone()));

        let rows = names
            .iter()
            .map(|name| {
                let amounts = &table[*name];
                let cells = months
                    .iter()
                    .map(|&month| {
                        let amount = amounts.get(&month).copied().unwrap_or(0.0);
                        let level = if month > current {
                            ObjectiveLevel::Pending
                        } else {
                            ObjectiveLevel::grade(amount, self.campaign.monthly_objective)
                        };
                        MonthCell {
                            month,
                            amount,
                            level,
                        }
                    })
                    .collect();
                PersonRow {
                    name: (*name).clone(),
                    retired: self.retired.contains(*name),
                    months: cells,
                }
            })
            .collect();

        let mut results = BTreeMap::new();
        for &month in &months {
            if month > current {
                continue;
            }
            results.insert(month, rank_month(&table, self.retired, month));
        }

        Ok(Standings {
            months,
            rows,
            results,
        })
    }

    /// One person's total for one campaign month (0 when they logged
    /// nothing).
    pub fn monthly_total(&self, person: &str, month: MonthKey) -> Result<f64> {
        let table = self.monthly_table()?;
        Ok(table
            .get(person)
            .and_then(|amounts| amounts.get(&month))
            .copied()
            .unwrap_or(0.0))
    }

    /// The month's best performers, or `None` for a future month.
    pub fn best(&self, month: MonthKey, today: NaiveDate) -> Result<Option<BTreeSet<String>>> {
        if month > MonthKey::of(today) {
            return Ok(None);
        }
        let table = self.monthly_table()?;
        Ok(Some(rank_month(&table, self.retired, month).best))
    }

    /// The month's worst performers, or `None` for a future month.
    pub fn worst(&self, month: MonthKey, today: NaiveDate) -> Result<Option<BTreeSet<String>>> {
        if month > MonthKey::of(today) {
            return Ok(None);
        }
        let table = self.monthly_table()?;
        Ok(Some(rank_month(&table, self.retired, month).worst))
    }
}

// ---------------------------------------------------------------------------
// Table construction
// ---------------------------------------------------------------------------

/// Per-person per-month totals from split records, bounded by the campaign
/// window. Group entries are excluded: the table tracks children only.
fn monthly_totals(
    records: &[FundraisingRecord],
    campaign: &Campaign,
) -> BTreeMap<String, BTreeMap<MonthKey, f64>> {
    let mut table: BTreeMap<String, BTreeMap<MonthKey, f64>> = BTreeMap::new();
    for row in split_records(records) {
        if row.who == GROUP_LABEL {
            continue;
        }
        let amounts = table.entry(row.who).or_default();
        if campaign.contains(row.date) {
            *amounts.entry(MonthKey::of(row.date)).or_insert(0.0) += row.amount;
        }
    }
    table
}

/// Best/worst sets for one elapsed month, over ranking-eligible people only.
fn rank_month(
    table: &BTreeMap<String, BTreeMap<MonthKey, f64>>,
    retired: &HashSet<String>,
    month: MonthKey,
) -> MonthResult {
    let eligible: Vec<(&String, f64)> = table
        .iter()
        .filter(|(name, _)| !retired.contains(*name))
        .map(|(name, amounts)| (name, amounts.get(&month).copied().unwrap_or(0.0)))
        .collect();

    let Some(max) = eligible.iter().map(|(_, v)| *v).reduce(f64::max) else {
        return MonthResult::default();
    };
    let min = eligible
        .iter()
        .map(|(_, v)| *v)
        .reduce(f64::min)
        .unwrap_or(max);

    let best = if max > 0.0 {
        eligible
            .iter()
            .filter(|(_, v)| *v == max)
            .map(|(name, _)| (*name).clone())
            .collect()
    } else {
        BTreeSet::new()
    };
    let worst = eligible
        .iter()
        .filter(|(_, v)| *v == min)
        .map(|(name, _)| (*name).clone())
        .collect();

    MonthResult { best, worst }
}
