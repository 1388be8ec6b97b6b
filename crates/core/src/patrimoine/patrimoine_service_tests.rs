//! Tests for patrimoine aggregation and the patrimoine service.

use super::*;
use crate::errors::{Error, Result};
use crate::possessions::{AssetType, Possession, PossessionPatch, PossessionRepositoryTrait};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockPossessionRepository {
    possessions: Vec<Possession>,
}

#[async_trait]
impl PossessionRepositoryTrait for MockPossessionRepository {
    fn list(&self, owner: Option<&str>) -> Result<Vec<Possession>> {
        Ok(self
            .possessions
            .iter()
            .filter(|p| owner.map_or(true, |o| p.owner == o))
            .cloned()
            .collect())
    }

    async fn append(&self, _possession: Possession) -> Result<Possession> {
        unimplemented!()
    }

    async fn apply_patch(
        &self,
        _owner: &str,
        _label: &str,
        _started_on: Option<NaiveDate>,
        _patch: PossessionPatch,
    ) -> Result<Possession> {
        unimplemented!()
    }

    async fn close(&self, _owner: &str, _label: &str, _as_of: NaiveDate) -> Result<Possession> {
        unimplemented!()
    }

    async fn delete(&self, _owner: &str, _label: &str) -> Result<()> {
        unimplemented!()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn possession(
    owner: &str,
    label: &str,
    initial_value: Decimal,
    start_date: NaiveDate,
    amortization_rate: Option<Decimal>,
) -> Possession {
    Possession {
        owner: owner.to_string(),
        label: label.to_string(),
        initial_value,
        start_date,
        end_date: None,
        amortization_rate,
        asset_type: AssetType::Standard,
        type_specific_fields: Default::default(),
    }
}

/// Laptop worth 800 on 2022-01-01, cash worth 200, and a car sold in 2021.
fn snapshot() -> Vec<Possession> {
    let laptop = possession("John Doe", "Laptop", dec!(1000), date(2020, 1, 1), Some(dec!(0.1)));
    let cash = possession("John Doe", "Cash", dec!(200), date(2021, 1, 1), None);
    let mut car = possession("John Doe", "Car", dec!(500), date(2019, 1, 1), None);
    car.end_date = Some(date(2021, 6, 1));
    vec![laptop, cash, car]
}

fn service(possessions: Vec<Possession>) -> PatrimoineService {
    PatrimoineService::new(
        Arc::new(MockPossessionRepository { possessions }),
        PatrimoineAggregator::default(),
    )
}

// ============================================================================
// Aggregator
// ============================================================================

#[test]
fn test_total_sums_active_possessions_only() {
    let aggregator = PatrimoineAggregator::default();
    let total = aggregator.total_at(&snapshot(), date(2022, 1, 1)).unwrap();
    assert_eq!(total, dec!(1000));
}

#[test]
fn test_total_of_empty_snapshot_is_zero() {
    let aggregator = PatrimoineAggregator::default();
    assert_eq!(
        aggregator.total_at(&[], date(2022, 1, 1)).unwrap(),
        Decimal::ZERO
    );
}

#[test]
fn test_total_before_any_start_is_zero() {
    let aggregator = PatrimoineAggregator::default();
    assert_eq!(
        aggregator.total_at(&snapshot(), date(2010, 1, 1)).unwrap(),
        Decimal::ZERO
    );
}

#[test]
fn test_breakdown_lists_active_possessions() {
    let aggregator = PatrimoineAggregator::default();
    let response = aggregator.breakdown_at(&snapshot(), date(2022, 1, 1)).unwrap();

    assert_eq!(response.date, date(2022, 1, 1));
    assert_eq!(response.total_value, dec!(1000));
    let labels: Vec<&str> = response
        .possessions
        .iter()
        .map(|v| v.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Laptop", "Cash"]);
    assert_eq!(response.possessions[0].value, dec!(800));
}

#[test]
fn test_series_is_ascending_and_stops_before_end() {
    let aggregator = PatrimoineAggregator::default();
    let series = aggregator
        .series_over(&snapshot(), date(2020, 1, 1), date(2020, 1, 25), 10)
        .unwrap();

    let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![date(2020, 1, 1), date(2020, 1, 11), date(2020, 1, 21)]
    );
    // Laptop at full value plus the car
    assert_eq!(series[0].total_value, dec!(1500));
}

#[test]
fn test_series_points_match_single_date_totals() {
    let aggregator = PatrimoineAggregator::default();
    let possessions = snapshot();
    let series = aggregator
        .series_over(&possessions, date(2020, 6, 1), date(2023, 6, 1), 90)
        .unwrap();

    for point in series {
        assert_eq!(
            point.total_value,
            aggregator.total_at(&possessions, point.date).unwrap()
        );
    }
}

#[test]
fn test_series_single_day_range() {
    let aggregator = PatrimoineAggregator::default();
    let series = aggregator
        .series_over(&snapshot(), date(2022, 1, 1), date(2022, 1, 1), 30)
        .unwrap();
    assert_eq!(
        series,
        vec![PatrimoinePoint {
            date: date(2022, 1, 1),
            total_value: dec!(1000),
        }]
    );
}

#[test]
fn test_series_rejects_inverted_range_and_zero_step() {
    let aggregator = PatrimoineAggregator::default();
    assert!(matches!(
        aggregator.series_over(&snapshot(), date(2022, 1, 2), date(2022, 1, 1), 1),
        Err(Error::InvalidRange(_))
    ));
    assert!(matches!(
        aggregator.series_over(&snapshot(), date(2022, 1, 1), date(2022, 2, 1), 0),
        Err(Error::InvalidRange(_))
    ));
}

#[test]
fn test_total_overflow_is_reported_not_panicked() {
    let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
    let possessions = vec![
        possession("John Doe", "Vault", huge, date(2020, 1, 1), None),
        possession("John Doe", "Mine", huge, date(2020, 1, 1), None),
    ];
    let aggregator = PatrimoineAggregator::default();

    assert!(matches!(
        aggregator.total_at(&possessions, date(2021, 1, 1)),
        Err(Error::InvalidRange(_))
    ));
    assert!(matches!(
        aggregator.breakdown_at(&possessions, date(2021, 1, 1)),
        Err(Error::InvalidRange(_))
    ));
    assert!(matches!(
        aggregator.series_over(&possessions, date(2020, 6, 1), date(2021, 6, 1), 30),
        Err(Error::InvalidRange(_))
    ));

    // A single record still fits
    assert_eq!(
        aggregator.total_at(&possessions[..1], date(2021, 1, 1)).unwrap(),
        huge
    );

    let service = service(possessions);
    assert!(matches!(
        service.get_patrimoine(None, date(2021, 1, 1)),
        Err(Error::InvalidRange(_))
    ));
}

// ============================================================================
// Service
// ============================================================================

#[test]
fn test_get_patrimoine_filters_by_owner() {
    let mut possessions = snapshot();
    possessions.push(possession("Jane", "Boat", dec!(5000), date(2020, 1, 1), None));
    let service = service(possessions);

    let john = service
        .get_patrimoine(Some("John Doe"), date(2022, 1, 1))
        .unwrap();
    let everyone = service.get_patrimoine(None, date(2022, 1, 1)).unwrap();

    assert_eq!(john.total_value, dec!(1000));
    assert_eq!(everyone.total_value, dec!(6000));
}

#[test]
fn test_get_patrimoine_range_delegates_to_aggregator() {
    let service = service(snapshot());
    let series = service
        .get_patrimoine_range(Some("John Doe"), date(2021, 1, 1), date(2021, 12, 31), 30)
        .unwrap();

    assert_eq!(series.first().map(|p| p.date), Some(date(2021, 1, 1)));
    assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    assert!(series.last().unwrap().date <= date(2021, 12, 31));
}

#[test]
fn test_get_possession_value_includes_closed_records() {
    let service = service(snapshot());

    let laptop = service
        .get_possession_value("John Doe", "Laptop", date(2022, 1, 1))
        .unwrap();
    assert_eq!(laptop.value, dec!(800));

    let car = service
        .get_possession_value("John Doe", "Car", date(2024, 1, 1))
        .unwrap();
    assert_eq!(car.value, dec!(500));
}

#[test]
fn test_get_possession_value_unknown_label() {
    let service = service(snapshot());
    let err = service
        .get_possession_value("John Doe", "Yacht", date(2022, 1, 1))
        .unwrap_err();
    assert!(matches!(err, Error::RecordNotFound { ref label, .. } if label == "Yacht"));

    let other_owner = service
        .get_possession_value("Jane", "Laptop", date(2022, 1, 1))
        .unwrap_err();
    assert!(matches!(other_owner, Error::RecordNotFound { .. }));
}
