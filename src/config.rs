use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::models::MonthKey;

/// File name of the persisted record list inside the data directory.
pub const STORE_FILE: &str = "records.json";

/// File name of the stored login passphrase inside the data directory.
pub const AUTH_FILE: &str = "pissenlits_auth";

/// Shared passphrase of the troop site login screen.
pub const DEFAULT_PASSPHRASE: &str = "Sapins!";

/// `Qui` value marking a group-wide entry not attributable to one child.
pub const GROUP_LABEL: &str = "Groupe";

/// Directory (relative to a site base URL) holding the gallery photos.
pub const PHOTOS_DIR: &str = "photos";

/// Manifest file listing the gallery photos, generated at build time.
pub const MANIFEST_FILE: &str = "photos.json";

/// Bundled snapshot of the record list, used whenever no local store file
/// exists or the local file cannot be read.
pub const SEED_JSON: &str = include_str!("../data/seed.json");

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("pissenlits-sdk")
    } else {
        PathBuf::from(".pissenlits-data")
    }
}

/// Today's date on the local clock.
///
/// Read once at the SDK boundary; every aggregation function takes the
/// reference date as an explicit parameter.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Campaign
// ---------------------------------------------------------------------------

/// The fundraising campaign window and its per-child monthly objective.
///
/// Defaults to the 2025-2026 campaign: September 1st 2025 through
/// June 30th 2026, 100 € per child per month.
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub monthly_objective: f64,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid campaign start"),
            end: NaiveDate::from_ymd_opt(2026, 6, 30).expect("valid campaign end"),
            monthly_objective: 100.0,
        }
    }
}

impl Campaign {
    /// Whether `date` falls inside the campaign window (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every calendar month of the campaign, first to last, inclusive.
    pub fn months(&self) -> Vec<MonthKey> {
        let mut months = Vec::new();
        let mut current = MonthKey::of(self.start);
        let last = MonthKey::of(self.end);
        while current <= last {
            months.push(current);
            current = current.next();
        }
        months
    }
}
