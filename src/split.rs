//! Expansion of multi-contributor records into one row per person.
//!
//! A record whose `who` lists several names is split either equally (scalar
//! amount divided by the name count) or positionally (itemized amount list
//! zipped to the names). Malformed combinations are recovered locally and
//! logged, never surfaced as errors.

use log::warn;

use crate::models::{Amount, FundraisingRecord, IndividualRecord};

/// Round to currency granularity (2 decimal places).
///
/// Equal splitting rounds each share, so the shares can drift from the
/// original amount by a sub-cent discrepancy; this is accepted, not
/// corrected.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Expand every record into one [`IndividualRecord`] per contributor.
///
/// Output order follows input record order, then name order within each
/// record. A record whose `who` parses to no names contributes nothing.
pub fn split_records(records: &[FundraisingRecord]) -> Vec<IndividualRecord> {
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        split_into(record, &mut out);
    }
    out
}

fn split_into(record: &FundraisingRecord, out: &mut Vec<IndividualRecord>) {
    let names = record.names();

    if names.is_empty() {
        warn!(
            "record {} ({}) lists no contributor, skipping",
            record.id, record.activity
        );
        return;
    }

    let shares: Vec<f64> = match (&record.amount, names.len()) {
        (Amount::Scalar(value), 1) => vec![*value],
        (Amount::Itemized(values), 1) => {
            if values.len() > 1 {
                warn!(
                    "record {} ({}) has {} amounts for a single contributor, keeping the first",
                    record.id,
                    record.activity,
                    values.len()
                );
            }
            vec![values.first().copied().unwrap_or(0.0)]
        }
        (Amount::Scalar(value), count) => {
            let share = round_cents(value / count as f64);
            vec![share; count]
        }
        (Amount::Itemized(values), count) if values.len() == count => values.clone(),
        (Amount::Itemized(values), count) => {
            // Length mismatch: fall back to an equal split of the list's sum
            // rather than dropping or misassigning anything.
            warn!(
                "record {} ({}) has {} amounts for {} contributors, splitting the total equally",
                record.id,
                record.activity,
                values.len(),
                count
            );
            let share = round_cents(values.iter().sum::<f64>() / count as f64);
            vec![share; count]
        }
    };

    for (name, amount) in names.into_iter().zip(shares) {
        out.push(IndividualRecord {
            id: record.id,
            date: record.date,
            who: name,
            kind: record.kind.clone(),
            activity: record.activity.clone(),
            details: record.details.clone(),
            amount,
        });
    }
}
