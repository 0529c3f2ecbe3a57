//! Tests for the record store: seed fallback, persistence, refresh
//! ordering, and bulk import/export.

use std::fs;
use std::time::Duration;

use pissenlits_sdk::models::FundraisingRecord;
use pissenlits_sdk::{PissenlitsError, PissenlitsSdk, RecordId};

mod common;
use common::{date, sample_seed, sdk_with_seed};

// ---------------------------------------------------------------------------
// Seed fallback
// ---------------------------------------------------------------------------

#[test]
fn missing_store_file_serves_the_seed() {
    let (sdk, _tmp) = sdk_with_seed(&sample_seed());
    assert_eq!(sdk.records().count().unwrap(), 5);
}

#[test]
fn corrupt_store_file_falls_back_to_the_seed() {
    let (sdk, tmp) = sdk_with_seed(&sample_seed());
    fs::write(tmp.path().join("records.json"), "{not json").unwrap();
    assert_eq!(sdk.records().count().unwrap(), 5);
}

#[test]
fn wrong_shape_store_file_falls_back_to_the_seed() {
    let (sdk, tmp) = sdk_with_seed(&sample_seed());
    fs::write(tmp.path().join("records.json"), r#"{"records": []}"#).unwrap();
    assert_eq!(sdk.records().count().unwrap(), 5);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

fn new_record() -> FundraisingRecord {
    FundraisingRecord::new(
        date(2025, 12, 14),
        "Garance",
        "Vente de gâteaux",
        "Marché de Noël",
        "Cougnous",
        58.0,
    )
}

#[test]
fn add_record_persists_across_instances() {
    let (sdk, tmp) = sdk_with_seed(&sample_seed());
    let record = new_record();
    sdk.add_record(record.clone()).unwrap();
    assert_eq!(sdk.records().count().unwrap(), 6);
    drop(sdk);

    // A fresh session over the same data directory reads the saved file,
    // ids included.
    let sdk = PissenlitsSdk::builder()
        .data_dir(tmp.path())
        .latency(Duration::ZERO)
        .seed_json("[]")
        .build()
        .unwrap();
    let records = sdk.records().all().unwrap();
    assert_eq!(records.len(), 6);
    assert!(records.iter().any(|r| r.id == record.id));
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let (sdk, tmp) = sdk_with_seed(&sample_seed());
    sdk.add_record(new_record()).unwrap();
    assert!(tmp.path().join("records.json").exists());
    assert!(!tmp.path().join("records.json.tmp").exists());
}

#[test]
fn remove_record_deletes_exactly_one_by_id() {
    let (sdk, _tmp) = sdk_with_seed(&sample_seed());
    let record = new_record();
    sdk.add_record(record.clone()).unwrap();

    let removed = sdk.remove_record(record.id).unwrap();
    assert_eq!(removed.activity, "Marché de Noël");
    assert_eq!(sdk.records().count().unwrap(), 5);
}

#[test]
fn remove_record_with_unknown_id_is_an_error() {
    let (sdk, _tmp) = sdk_with_seed(&sample_seed());
    let result = sdk.remove_record(RecordId::new());
    assert!(matches!(result, Err(PissenlitsError::RecordNotFound(_))));
    assert_eq!(sdk.records().count().unwrap(), 5);
}

// ---------------------------------------------------------------------------
// Refresh ordering
// ---------------------------------------------------------------------------

#[test]
fn reads_are_served_from_the_session_cache_until_refresh() {
    let (sdk, tmp) = sdk_with_seed(&sample_seed());
    assert_eq!(sdk.records().count().unwrap(), 5);

    // The store file changes under the session; the cache keeps serving the
    // old list until a refresh invalidates it.
    fs::write(tmp.path().join("records.json"), "[]").unwrap();
    assert_eq!(sdk.records().count().unwrap(), 5);

    assert_eq!(sdk.refresh().unwrap(), 0);
    assert_eq!(sdk.records().count().unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Bulk import / export
// ---------------------------------------------------------------------------

#[test]
fn import_replaces_the_whole_list() {
    let (sdk, _tmp) = sdk_with_seed(&sample_seed());
    let json = serde_json::json!([
        { "Date": "2026-01-10", "Qui": "Alix", "Nom": "Bar Pi",
          "Activité": "Bar Pi #3", "Détails": "", "Montant": 12 }
    ])
    .to_string();

    assert_eq!(sdk.import_json(&json).unwrap(), 1);
    let records = sdk.records().all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].activity, "Bar Pi #3");
}

#[test]
fn import_rejects_non_array_documents_before_any_mutation() {
    let (sdk, _tmp) = sdk_with_seed(&sample_seed());

    for bad in [r#"{"Date": "2026-01-10"}"#, "42", "\"collectes\"", "pas du json"] {
        let result = sdk.import_json(bad);
        assert!(
            matches!(result, Err(PissenlitsError::ImportNotArray)),
            "{bad:?} was accepted"
        );
    }
    assert_eq!(sdk.records().count().unwrap(), 5);
}

#[test]
fn import_rejects_malformed_elements_and_keeps_the_stored_list() {
    let (sdk, _tmp) = sdk_with_seed(&sample_seed());
    let result = sdk.import_json(r#"[{"Date": "pas une date"}]"#);
    assert!(result.is_err());
    assert_eq!(sdk.records().count().unwrap(), 5);
}

#[test]
fn export_is_pretty_printed_and_dated() {
    let (sdk, _tmp) = sdk_with_seed(&sample_seed());
    let export = sdk.export_json().unwrap();

    assert!(export.filename.starts_with("pissenlits-data-"));
    assert!(export.filename.ends_with(".json"));
    assert!(export.json.contains('\n'));

    let roundtrip: Vec<FundraisingRecord> = serde_json::from_str(&export.json).unwrap();
    let mut stored = sdk.records().all().unwrap();
    stored.sort_by_key(|r| r.date);
    let mut reparsed = roundtrip;
    reparsed.sort_by_key(|r| r.date);
    assert_eq!(reparsed, stored);
}
