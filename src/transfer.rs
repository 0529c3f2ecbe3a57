//! Bulk import and export of the record list.
//!
//! Import is all-or-nothing: the document must parse to a JSON array, and
//! the stored list is only replaced once the whole document has been
//! accepted. Export produces the pretty-printed JSON the site offers as a
//! dated download.

use chrono::NaiveDate;

use crate::error::{PissenlitsError, Result};
use crate::models::FundraisingRecord;

/// A serialized record list ready to be offered as a file download.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    /// Suggested download name, dated with the export day.
    pub filename: String,
    /// Pretty-printed JSON array of every stored record.
    pub json: String,
}

/// Parse a bulk-import document.
///
/// Rejects anything that is not a JSON array before any record is built, so
/// a failed import can never leave a partial list behind.
pub fn parse_import(json: &str) -> Result<Vec<FundraisingRecord>> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|_| PissenlitsError::ImportNotArray)?;
    if !value.is_array() {
        return Err(PissenlitsError::ImportNotArray);
    }
    Ok(serde_json::from_value(value)?)
}

/// Serialize `records` for download, named after `today`.
pub fn export(records: &[FundraisingRecord], today: NaiveDate) -> Result<Export> {
    Ok(Export {
        filename: format!("pissenlits-data-{}.json", today.format("%Y-%m-%d")),
        json: serde_json::to_string_pretty(records)?,
    })
}
