//! Tests for the record splitter: equal-share, itemized and recovery
//! semantics.

use pissenlits_sdk::models::FundraisingRecord;
use pissenlits_sdk::split::split_records;

mod common;
use common::date;

fn record(who: &str, amount: impl Into<pissenlits_sdk::Amount>) -> FundraisingRecord {
    FundraisingRecord::new(date(2025, 9, 13), who, "Bar Pi", "Bar Pi #1", "", amount)
}

// ---------------------------------------------------------------------------
// Single contributor
// ---------------------------------------------------------------------------

#[test]
fn single_name_keeps_scalar_amount() {
    let rows = split_records(&[record("Alix", 42.5)]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].who, "Alix");
    assert_eq!(rows[0].amount, 42.5);
}

#[test]
fn single_name_unwraps_one_element_list() {
    let rows = split_records(&[record("Alix", vec![42.5])]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, 42.5);
}

#[test]
fn single_name_with_longer_list_takes_first_element() {
    let rows = split_records(&[record("Alix", vec![10.0, 20.0])]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, 10.0);
}

#[test]
fn group_entry_stays_one_row_under_group_name() {
    let rows = split_records(&[record("Groupe", 330.0)]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].who, "Groupe");
    assert_eq!(rows[0].amount, 330.0);
}

// ---------------------------------------------------------------------------
// Itemized split
// ---------------------------------------------------------------------------

#[test]
fn itemized_amounts_zip_to_names_by_position() {
    let rows = split_records(&[record("Alix, Basile, Capucine", vec![38.0, 27.5, -4.0])]);
    assert_eq!(rows.len(), 3);
    assert_eq!((rows[0].who.as_str(), rows[0].amount), ("Alix", 38.0));
    assert_eq!((rows[1].who.as_str(), rows[1].amount), ("Basile", 27.5));
    assert_eq!((rows[2].who.as_str(), rows[2].amount), ("Capucine", -4.0));
}

#[test]
fn names_are_trimmed_around_commas() {
    let rows = split_records(&[record("Alix ,  Basile,Capucine ", vec![1.0, 2.0, 3.0])]);
    let names: Vec<&str> = rows.iter().map(|r| r.who.as_str()).collect();
    assert_eq!(names, vec!["Alix", "Basile", "Capucine"]);
}

// ---------------------------------------------------------------------------
// Equal split
// ---------------------------------------------------------------------------

#[test]
fn scalar_amount_splits_equally_with_cent_rounding() {
    let rows = split_records(&[record("Alix, Basile, Capucine", 100.0)]);
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.amount, 33.33);
    }
}

#[test]
fn equal_split_shares_sum_within_rounding_tolerance() {
    let amounts = [100.0, 86.4, 51.5, -35.0, 0.1];
    for amount in amounts {
        let rows = split_records(&[record("Alix, Basile, Capucine", amount)]);
        let sum: f64 = rows.iter().map(|r| r.amount).sum();
        assert!(
            (sum - amount).abs() < 3.0 * 0.005,
            "shares of {amount} sum to {sum}"
        );
    }
}

#[test]
fn negative_scalar_splits_equally() {
    let rows = split_records(&[record("Alix, Basile", -35.0)]);
    assert_eq!(rows[0].amount, -17.5);
    assert_eq!(rows[1].amount, -17.5);
}

// ---------------------------------------------------------------------------
// Mismatch recovery
// ---------------------------------------------------------------------------

#[test]
fn length_mismatch_falls_back_to_equal_split_of_list_sum() {
    // 3 names, 2 amounts: each share is round((10 + 20) / 3, 2).
    let rows = split_records(&[record("Alix, Basile, Capucine", vec![10.0, 20.0])]);
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.amount, 10.0);
    }
}

#[test]
fn mismatch_fallback_rounds_to_cents() {
    let rows = split_records(&[record("Alix, Basile, Capucine", vec![50.0, 50.0])]);
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.amount, 33.33);
    }
}

// ---------------------------------------------------------------------------
// Edge cases and ordering
// ---------------------------------------------------------------------------

#[test]
fn empty_who_yields_no_rows() {
    let rows = split_records(&[record("  ", 10.0), record(",,", 10.0)]);
    assert!(rows.is_empty());
}

#[test]
fn output_follows_record_order_then_name_order() {
    let rows = split_records(&[
        record("Basile", 1.0),
        record("Alix, Capucine", vec![2.0, 3.0]),
        record("Eliott", 4.0),
    ]);
    let names: Vec<&str> = rows.iter().map(|r| r.who.as_str()).collect();
    assert_eq!(names, vec!["Basile", "Alix", "Capucine", "Eliott"]);
}

#[test]
fn rows_keep_parent_record_fields() {
    let parent = record("Alix, Basile", 10.0);
    let rows = split_records(&[parent.clone()]);
    for row in &rows {
        assert_eq!(row.id, parent.id);
        assert_eq!(row.date, parent.date);
        assert_eq!(row.kind, "Bar Pi");
        assert_eq!(row.activity, "Bar Pi #1");
    }
}
