use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// MonthKey
// ---------------------------------------------------------------------------

/// A calendar month, ordered chronologically and rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following calendar month.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid month key: {s}"))?;
        let year: i32 = year.parse().map_err(|_| format!("invalid month key: {s}"))?;
        let month: u32 = month.parse().map_err(|_| format!("invalid month key: {s}"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("invalid month key: {s}"));
        }
        Ok(Self { year, month })
    }
}

// Serialized as the `YYYY-MM` string so month-keyed maps stay plain JSON
// objects.
impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ObjectiveLevel
// ---------------------------------------------------------------------------

/// Progress of a monthly amount against the campaign objective; drives the
/// color coding of the objectives table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveLevel {
    /// At or above the objective.
    Met,
    /// At least three quarters of the objective.
    Near,
    /// At least half of the objective.
    Halfway,
    /// At least a quarter of the objective.
    Started,
    /// Below a quarter of the objective, including zero and negative.
    Behind,
    /// Month not reached yet; no amount is rendered.
    Pending,
}

impl ObjectiveLevel {
    /// Grade `amount` against `objective`. Never returns [`Pending`]; future
    /// months are handled by the caller before any amount is graded.
    ///
    /// [`Pending`]: ObjectiveLevel::Pending
    pub fn grade(amount: f64, objective: f64) -> Self {
        if amount >= objective {
            ObjectiveLevel::Met
        } else if amount >= objective * 0.75 {
            ObjectiveLevel::Near
        } else if amount >= objective * 0.5 {
            ObjectiveLevel::Halfway
        } else if amount >= objective * 0.25 {
            ObjectiveLevel::Started
        } else {
            ObjectiveLevel::Behind
        }
    }
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

/// One month of one person's row in the objectives table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCell {
    pub month: MonthKey,
    pub amount: f64,
    pub level: ObjectiveLevel,
}

/// One person's row: their amount and grade for every campaign month.
///
/// Retired people keep their full history but sort after active people and
/// never appear in a month's best/worst sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRow {
    pub name: String,
    pub retired: bool,
    pub months: Vec<MonthCell>,
}

/// Best and worst performer sets for one past-or-current month.
///
/// `best` holds everyone tied at the month's maximum when that maximum is
/// strictly positive; an all-zero month has no best. `worst` holds everyone
/// tied at the minimum, zero included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthResult {
    pub best: BTreeSet<String>,
    pub worst: BTreeSet<String>,
}

/// The full monthly objectives table.
#[derive(Debug, Clone, Serialize)]
pub struct Standings {
    /// Every campaign month, first to last.
    pub months: Vec<MonthKey>,
    /// Person rows, active people first (alphabetical), then retired people
    /// (alphabetical).
    pub rows: Vec<PersonRow>,
    /// Ranking outcome per month. Future months have no entry: they are
    /// pending, not zero.
    pub results: BTreeMap<MonthKey, MonthResult>,
}
