//! End-to-end exercise of the SDK over the bundled seed dataset.
//!
//! Builds a full session in a temporary data directory and walks through
//! every public surface: record queries, summary, objectives, mutations,
//! bulk transfer, refresh and the login gate.

use std::time::Duration;

use pissenlits_sdk::models::{FundraisingRecord, MonthKey};
use pissenlits_sdk::PissenlitsSdk;

mod common;
use common::date;

#[test]
fn full_session_over_the_bundled_seed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tmp = tempfile::tempdir().unwrap();
    let sdk = PissenlitsSdk::builder()
        .data_dir(tmp.path())
        .latency(Duration::ZERO)
        .base_url("/site-pis")
        .build()
        .unwrap();
    let today = date(2026, 1, 15);

    // -- Record list --------------------------------------------------------
    let records = sdk.records().all().unwrap();
    assert_eq!(records.len(), 12);
    // Most recent first.
    assert!(records.windows(2).all(|w| w[0].date >= w[1].date));

    let activities = sdk.records().activities().unwrap();
    assert!(activities.contains(&"Bar Pi #1".to_string()));
    let people = sdk.records().people().unwrap();
    assert!(people.contains(&"Capucine".to_string()));
    assert!(people.contains(&"Groupe".to_string()));

    // -- Summary ------------------------------------------------------------
    let summary = sdk.summary().summary(today).unwrap();
    assert!((summary.total_funds - 875.8).abs() < 1e-6);
    assert!((summary.person_totals["Groupe"] - 246.1).abs() < 1e-6);
    assert!((summary.person_totals["Alix"] - 80.0).abs() < 1e-6);
    assert_eq!(summary.kind_counts["Bar Pi"], 2);

    // Sept 1 2025 through Jan 15 2026, one point per day.
    assert_eq!(summary.cumulative.len(), 30 + 31 + 30 + 31 + 15);
    assert!((summary.cumulative.last().unwrap().total - 875.8).abs() < 1e-6);

    // -- Monthly objectives ---------------------------------------------------
    let standings = sdk.rankings().standings(today).unwrap();
    assert_eq!(standings.months.len(), 10);
    assert_eq!(standings.rows.len(), 8);
    assert!(standings.rows.iter().all(|row| row.name != "Groupe"));
    // Five elapsed months are ranked, the rest are pending.
    assert_eq!(standings.results.len(), 5);

    let september = &standings.results[&MonthKey::new(2025, 9)];
    assert!(september.best.contains("Eliott"));
    assert_eq!(september.best.len(), 1);
    assert_eq!(september.worst.len(), 4);

    // -- Mutations ------------------------------------------------------------
    let record = FundraisingRecord::new(
        date(2026, 1, 10),
        "Garance",
        "Bar Pi",
        "Bar Pi #3",
        "",
        33.0,
    );
    sdk.add_record(record.clone()).unwrap();
    assert_eq!(sdk.records().count().unwrap(), 13);
    sdk.remove_record(record.id).unwrap();
    assert_eq!(sdk.records().count().unwrap(), 12);

    // -- Bulk transfer --------------------------------------------------------
    let export = sdk.export_json().unwrap();
    assert!(export.filename.starts_with("pissenlits-data-"));
    assert_eq!(sdk.import_json(&export.json).unwrap(), 12);
    assert_eq!(sdk.records().count().unwrap(), 12);

    // -- Refresh --------------------------------------------------------------
    assert_eq!(sdk.refresh().unwrap(), 12);

    // -- Login gate -----------------------------------------------------------
    assert!(!sdk.auth().is_authenticated());
    assert!(sdk.auth().login("Sapins!").unwrap());
    assert!(sdk.auth().is_authenticated());
    sdk.auth().logout().unwrap();

    // -- Gallery URLs ---------------------------------------------------------
    let gallery = sdk.gallery();
    assert_eq!(gallery.manifest_url(), "/site-pis/photos/photos.json");

    // -- Display & close ------------------------------------------------------
    let display = format!("{sdk}");
    assert!(display.contains("PissenlitsSdk"));
    sdk.close();
}
