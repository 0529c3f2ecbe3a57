//! Shared test fixtures for the Pissenlits SDK integration tests.
//!
//! Provides `sdk_with_seed()` which builds an SDK over a temporary data
//! directory with zero artificial latency, seeded from the given JSON text.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::time::Duration;

use chrono::NaiveDate;
use pissenlits_sdk::PissenlitsSdk;
use tempfile::TempDir;

/// Build an SDK over a fresh temporary data directory.
///
/// Returns `(PissenlitsSdk, TempDir)`. The caller must keep the `TempDir`
/// alive for the duration of the test so the data directory is not deleted
/// prematurely.
pub fn sdk_with_seed(seed: &str) -> (PissenlitsSdk, TempDir) {
    let _ = env_logger::builder().is_test(true).try_init();

    let tmp_dir = tempfile::tempdir().unwrap();
    let sdk = PissenlitsSdk::builder()
        .data_dir(tmp_dir.path())
        .latency(Duration::ZERO)
        .seed_json(seed)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A small fixed dataset covering single, shared and group entries.
pub fn sample_seed() -> String {
    serde_json::json!([
        {
            "Date": "2025-09-01",
            "Qui": "Groupe",
            "Nom": "Caisse",
            "Activité": "Fond de caisse",
            "Détails": "",
            "Montant": 330
        },
        {
            "Date": "2025-09-13",
            "Qui": "Alix, Basile",
            "Nom": "Bar Pi",
            "Activité": "Bar Pi #1",
            "Détails": "Premier bar de l'année",
            "Montant": 80
        },
        {
            "Date": "2025-09-18",
            "Qui": "Groupe",
            "Nom": "Caisse",
            "Activité": "Achat gobelets",
            "Détails": "",
            "Montant": -35
        },
        {
            "Date": "2025-10-04",
            "Qui": "Capucine, Eliott",
            "Nom": "Lavage de voitures",
            "Activité": "Lavage de voitures #1",
            "Détails": "Parking du Delhaize",
            "Montant": [38, 27.5]
        },
        {
            "Date": "2025-10-11",
            "Qui": "Alix",
            "Nom": "Bar Pi",
            "Activité": "Bar Pi #2",
            "Détails": "",
            "Montant": 51.5
        }
    ])
    .to_string()
}
