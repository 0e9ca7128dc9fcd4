//! Aggregate invariants for the sales ledger.
//!
//! After every mutation, `today_total` must equal the sum of totals of the
//! sales dated today, no matter how the mutations are interleaved.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use proptest::prelude::*;
use shopbook_engine::{SaleDraft, SaleRecord, SalesLedger};

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap()
}

fn today() -> NaiveDate {
    now().date_naive()
}

fn date_string(offset_days: i64) -> String {
    (today() + Duration::days(offset_days))
        .format("%Y-%m-%d")
        .to_string()
}

fn expected_total(ledger: &SalesLedger) -> f64 {
    let today = date_string(0);
    ledger
        .sales()
        .iter()
        .filter(|s| s.date == today)
        .map(|s| s.total)
        .sum()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "today_total {actual} != expected {expected}"
    );
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn today_yesterday_tomorrow() {
    let mut ledger = SalesLedger::new();

    ledger.add_sale_at(SaleDraft::new(date_string(0), 25.5), now());
    ledger.add_sale_at(SaleDraft::new(date_string(-1), 100.0), now());
    ledger.add_sale_at(SaleDraft::new(date_string(1), 40.0), now());

    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.today_total(), 25.5);
}

#[test]
fn load_then_add_then_clear() {
    let mut ledger = SalesLedger::new();
    let records: Vec<SaleRecord> = serde_json::from_value(serde_json::json!([
        {"id": "a", "timestamp": "2024-06-15T08:00:00.000Z", "date": date_string(0), "total": 10},
        {"id": "b", "timestamp": "2024-06-15T09:00:00.000Z", "date": date_string(0), "total": 5}
    ]))
    .unwrap();

    ledger.load_sales_at(records, today());
    assert_eq!(ledger.today_total(), 15.0);
    assert_eq!(ledger.sales()[0].id, "a");
    assert_eq!(ledger.sales()[1].id, "b");

    ledger.add_sale_at(SaleDraft::new(date_string(0), 2.5), now());
    assert_eq!(ledger.today_total(), 17.5);

    ledger.clear_sales();
    assert!(ledger.is_empty());
    assert_eq!(ledger.today_total(), 0.0);
}

#[test]
fn stored_totals_are_not_trusted() {
    let mut ledger = SalesLedger::new();
    let stored = SaleRecord {
        id: "old".into(),
        timestamp: "2024-06-14T08:00:00.000Z".into(),
        date: date_string(-1),
        total: 70.0,
        ..Default::default()
    };
    ledger.load_sales_at(vec![stored], today());
    assert_eq!(ledger.today_total(), 0.0);
}

#[test]
fn loaded_ids_are_never_rewritten() {
    let mut ledger = SalesLedger::new();
    let stored = SaleRecord {
        id: "sale_1718000000000_abc123def".into(),
        timestamp: "2024-06-10T06:13:20.000Z".into(),
        date: date_string(0),
        total: 1.0,
        ..Default::default()
    };
    ledger.load_sales_at(vec![stored.clone()], today());
    ledger.add_sale_at(SaleDraft::new(date_string(0), 1.0), now());

    assert_eq!(ledger.sales()[0], stored);
    assert_ne!(ledger.sales()[1].id, stored.id);
}

// ============================================================================
// Property Tests
// ============================================================================

#[derive(Debug, Clone)]
enum Mutation {
    Add { offset: i64, total: f64 },
    Load(Vec<(i64, f64)>),
    Clear,
}

fn arb_sale() -> impl Strategy<Value = (i64, f64)> {
    (-2i64..=2, 0u32..100_000).prop_map(|(offset, cents)| (offset, cents as f64 / 100.0))
}

fn arb_mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        4 => arb_sale().prop_map(|(offset, total)| Mutation::Add { offset, total }),
        2 => prop::collection::vec(arb_sale(), 0..20).prop_map(Mutation::Load),
        1 => Just(Mutation::Clear),
    ]
}

proptest! {
    #[test]
    fn prop_today_total_matches_todays_sales(
        mutations in prop::collection::vec(arb_mutation(), 1..40)
    ) {
        let mut ledger = SalesLedger::new();

        for (step, mutation) in mutations.into_iter().enumerate() {
            match mutation {
                Mutation::Add { offset, total } => {
                    ledger.add_sale_at(SaleDraft::new(date_string(offset), total), now());
                }
                Mutation::Load(sales) => {
                    let records = sales
                        .into_iter()
                        .enumerate()
                        .map(|(i, (offset, total))| SaleRecord {
                            id: format!("loaded-{step}-{i}"),
                            timestamp: "2024-06-15T00:00:00.000Z".into(),
                            date: date_string(offset),
                            total,
                            ..Default::default()
                        })
                        .collect();
                    ledger.load_sales_at(records, today());
                }
                Mutation::Clear => ledger.clear_sales(),
            }

            assert_close(ledger.today_total(), expected_total(&ledger));
        }
    }

    #[test]
    fn prop_load_is_idempotent(sales in prop::collection::vec(arb_sale(), 0..30)) {
        let records: Vec<SaleRecord> = sales
            .into_iter()
            .enumerate()
            .map(|(i, (offset, total))| SaleRecord {
                id: format!("s{i}"),
                date: date_string(offset),
                total,
                ..Default::default()
            })
            .collect();

        let mut ledger = SalesLedger::new();
        ledger.load_sales_at(records.clone(), today());
        let once = ledger.clone();
        ledger.load_sales_at(records, today());

        prop_assert_eq!(ledger, once);
    }
}
