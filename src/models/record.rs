use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::GROUP_LABEL;

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Stable synthetic identifier assigned to a record when it is created.
///
/// The historical dataset identified records by their (date, who, activity)
/// triple, which is not unique; records loaded without an `id` field get a
/// fresh one on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A record's amount: one figure for the whole entry, or one figure per
/// listed contributor.
///
/// Serialized untagged so the wire format stays `number | number[]`, exactly
/// as the dataset has always stored it. Amounts may be negative (expenses
/// and refunds against the group total).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Scalar(f64),
    Itemized(Vec<f64>),
}

impl Amount {
    /// Flattened value: the scalar itself, or the sum of the itemized list.
    pub fn total(&self) -> f64 {
        match self {
            Amount::Scalar(v) => *v,
            Amount::Itemized(values) => values.iter().sum(),
        }
    }

    pub fn is_itemized(&self) -> bool {
        matches!(self, Amount::Itemized(_))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Scalar(value)
    }
}

impl From<Vec<f64>> for Amount {
    fn from(values: Vec<f64>) -> Self {
        Amount::Itemized(values)
    }
}

// ---------------------------------------------------------------------------
// FundraisingRecord
// ---------------------------------------------------------------------------

/// One logged contribution event.
///
/// Field names follow the historical French dataset columns on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundraisingRecord {
    #[serde(default = "RecordId::new")]
    pub id: RecordId,
    /// Calendar date of the event; the chronological ordering key.
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// A single name, a comma-separated list of names, or the literal
    /// `"Groupe"` for a group-wide entry.
    #[serde(rename = "Qui")]
    pub who: String,
    /// Coarse category label (the dataset's historical `Nom` column),
    /// e.g. "Bar Pi".
    #[serde(rename = "Nom")]
    pub kind: String,
    /// Finer-grained label than `kind`, e.g. "Bar Pi #1".
    #[serde(rename = "Activité")]
    pub activity: String,
    #[serde(rename = "Détails", default)]
    pub details: String,
    #[serde(rename = "Montant")]
    pub amount: Amount,
}

impl FundraisingRecord {
    /// Create a record with a fresh id.
    pub fn new(
        date: NaiveDate,
        who: impl Into<String>,
        kind: impl Into<String>,
        activity: impl Into<String>,
        details: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            date,
            who: who.into(),
            kind: kind.into(),
            activity: activity.into(),
            details: details.into(),
            amount: amount.into(),
        }
    }

    /// The trimmed, non-empty contributor names parsed from `who`.
    pub fn names(&self) -> Vec<String> {
        self.who
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Whether this is a group-wide entry (`who == "Groupe"`).
    pub fn is_group(&self) -> bool {
        self.who == GROUP_LABEL
    }
}

// ---------------------------------------------------------------------------
// IndividualRecord
// ---------------------------------------------------------------------------

/// One row per (record, person) pair after splitting.
///
/// Ephemeral: recomputed on every aggregation pass, never persisted. `id`
/// refers back to the parent record.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualRecord {
    pub id: RecordId,
    pub date: NaiveDate,
    pub who: String,
    pub kind: String,
    pub activity: String,
    pub details: String,
    pub amount: f64,
}
