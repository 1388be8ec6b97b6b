//! Tests for possession domain models.

use super::*;
use crate::errors::{Error, ValidationError};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn laptop() -> Possession {
    Possession {
        owner: "John Doe".to_string(),
        label: "Laptop".to_string(),
        initial_value: dec!(1000),
        start_date: date(2020, 1, 1),
        end_date: None,
        amortization_rate: Some(dec!(0.1)),
        asset_type: AssetType::Standard,
        type_specific_fields: Default::default(),
    }
}

// Test AssetType serialization
#[test]
fn test_asset_type_serialization() {
    assert_eq!(
        serde_json::to_string(&AssetType::Standard).unwrap(),
        "\"STANDARD\""
    );
    assert_eq!(serde_json::to_string(&AssetType::Flow).unwrap(), "\"FLOW\"");
    assert_eq!(
        serde_json::to_string(&AssetType::RealEstate).unwrap(),
        "\"REAL_ESTATE\""
    );
}

#[test]
fn test_asset_type_unknown_tag_is_preserved() {
    let kind: AssetType = serde_json::from_str("\"CRYPTO\"").unwrap();
    assert_eq!(kind, AssetType::Custom("CRYPTO".to_string()));
    assert_eq!(serde_json::to_string(&kind).unwrap(), "\"CRYPTO\"");
}

#[test]
fn test_asset_type_known_tags_are_case_insensitive() {
    let kind: AssetType = serde_json::from_str("\"equity\"").unwrap();
    assert_eq!(kind, AssetType::Equity);
}

#[test]
fn test_possession_deserializes_with_defaults() {
    let possession: Possession = serde_json::from_value(json!({
        "owner": "John Doe",
        "label": "Savings",
        "initialValue": 2500.5,
        "startDate": "2023-05-01"
    }))
    .unwrap();

    assert_eq!(possession.initial_value, dec!(2500.5));
    assert_eq!(possession.end_date, None);
    assert_eq!(possession.amortization_rate, None);
    assert_eq!(possession.asset_type, AssetType::Standard);
    assert!(possession.type_specific_fields.is_empty());
}

#[test]
fn test_possession_accepts_timestamp_end_date() {
    let possession: Possession = serde_json::from_value(json!({
        "owner": "John Doe",
        "label": "Car",
        "initialValue": 8000,
        "startDate": "2019-03-10T00:00:00.000Z",
        "endDate": "2024-08-01T14:22:05.120Z",
        "amortizationRate": 0.2
    }))
    .unwrap();

    assert_eq!(possession.start_date, date(2019, 3, 10));
    assert_eq!(possession.end_date, Some(date(2024, 8, 1)));

    let round_trip = serde_json::to_value(&possession).unwrap();
    assert_eq!(round_trip["endDate"], json!("2024-08-01"));
}

#[test]
fn test_active_window_excludes_end_date() {
    let mut possession = laptop();
    possession.end_date = Some(date(2021, 6, 1));

    assert!(!possession.is_active_at(date(2019, 12, 31)));
    assert!(possession.is_active_at(date(2020, 1, 1)));
    assert!(possession.is_active_at(date(2021, 5, 31)));
    assert!(!possession.is_active_at(date(2021, 6, 1)));
    assert!(!possession.is_active_at(date(2030, 1, 1)));
}

#[test]
fn test_close_transitions_open_to_closed() {
    let mut possession = laptop();
    assert_eq!(possession.state(), PossessionState::Open);

    possession.close(date(2022, 3, 15)).unwrap();

    assert_eq!(possession.state(), PossessionState::Closed);
    assert_eq!(possession.end_date, Some(date(2022, 3, 15)));
}

#[test]
fn test_second_close_fails_and_keeps_first_end_date() {
    let mut possession = laptop();
    possession.close(date(2022, 3, 15)).unwrap();

    let err = possession.close(date(2023, 1, 1)).unwrap_err();

    assert!(matches!(
        err,
        Error::AlreadyClosed { ref label, end_date } if label == "Laptop" && end_date == date(2022, 3, 15)
    ));
    assert_eq!(possession.end_date, Some(date(2022, 3, 15)));
}

#[test]
fn test_close_before_start_is_rejected() {
    let mut possession = laptop();
    let err = possession.close(date(2019, 1, 1)).unwrap_err();
    assert!(matches!(err, Error::InvalidDate(_)));
    assert!(possession.is_open());
}

#[test]
fn test_apply_patch_updates_fields_in_either_state() {
    let mut possession = laptop();
    possession.close(date(2022, 1, 1)).unwrap();

    possession
        .apply_patch(&PossessionPatch {
            initial_value: Some(dec!(1200)),
            amortization_rate: Some(dec!(0.25)),
            end_date: Some(date(2022, 2, 1)),
        })
        .unwrap();

    assert_eq!(possession.initial_value, dec!(1200));
    assert_eq!(possession.amortization_rate, Some(dec!(0.25)));
    assert_eq!(possession.end_date, Some(date(2022, 2, 1)));
}

#[test]
fn test_apply_patch_rejects_end_before_start_and_leaves_record() {
    let mut possession = laptop();
    let before = possession.clone();

    let err = possession
        .apply_patch(&PossessionPatch {
            initial_value: Some(dec!(5)),
            end_date: Some(date(2019, 1, 1)),
            ..Default::default()
        })
        .unwrap_err();

    assert!(matches!(err, Error::InvalidDate(_)));
    assert_eq!(possession, before);
}

#[test]
fn test_apply_patch_rejects_negative_value() {
    let mut possession = laptop();
    let err = possession
        .apply_patch(&PossessionPatch {
            initial_value: Some(dec!(-1)),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidInput(_))
    ));
}

#[test]
fn test_new_possession_defaults_owner_and_trims_label() {
    let new_possession: NewPossession = serde_json::from_value(json!({
        "label": "  Bike ",
        "initialValue": 300,
        "startDate": "2024-02-01"
    }))
    .unwrap();

    let possession = new_possession.into_possession().unwrap();

    assert_eq!(possession.owner, "John Doe");
    assert_eq!(possession.label, "Bike");
    assert!(possession.is_open());
}

#[test]
fn test_new_possession_requires_label() {
    let new_possession = NewPossession {
        owner: Some("Jane".to_string()),
        label: "   ".to_string(),
        initial_value: dec!(10),
        start_date: date(2024, 1, 1),
        amortization_rate: None,
        asset_type: AssetType::Standard,
        type_specific_fields: Default::default(),
    };
    let err = new_possession.into_possession().unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingField(ref f)) if f == "label"
    ));
}

#[test]
fn test_find_by_label_prefers_open_record() {
    let mut old = laptop();
    old.close(date(2021, 1, 1)).unwrap();
    let mut current = laptop();
    current.start_date = date(2021, 2, 1);
    let other_owner = Possession {
        owner: "Jane".to_string(),
        ..laptop()
    };
    let possessions = vec![old, current.clone(), other_owner];

    let found = find_by_label(&possessions, "John Doe", "Laptop").unwrap();
    assert_eq!(found, &current);
    assert_eq!(position_by_label(&possessions, "John Doe", "Laptop", None), Some(1));
    assert!(find_by_label(&possessions, "John Doe", "Phone").is_none());
}

#[test]
fn test_select_by_label_reaches_closed_record_behind_reused_label() {
    let mut old = laptop();
    old.close(date(2021, 1, 1)).unwrap();
    let mut current = laptop();
    current.start_date = date(2021, 2, 1);
    let possessions = vec![old.clone(), current.clone()];

    assert_eq!(
        select_by_label(&possessions, "John Doe", "Laptop", Some(old.start_date)),
        Some(&old)
    );
    assert_eq!(
        position_by_label(&possessions, "John Doe", "Laptop", Some(date(2021, 2, 1))),
        Some(1)
    );
    assert!(select_by_label(&possessions, "John Doe", "Laptop", Some(date(2019, 1, 1))).is_none());
}

#[test]
fn test_find_by_label_falls_back_to_latest_closed() {
    let mut first = laptop();
    first.close(date(2020, 6, 1)).unwrap();
    let mut second = laptop();
    second.start_date = date(2021, 1, 1);
    second.close(date(2021, 6, 1)).unwrap();
    let possessions = vec![second.clone(), first];

    assert_eq!(
        find_by_label(&possessions, "John Doe", "Laptop"),
        Some(&second)
    );
}
