mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::strategies::*;
use matreq_core::backend::InMemoryBackend;
use matreq_core::config::MatreqConfig;
use matreq_core::models::Row;
use matreq_core::orders::{format_partner_number, group_rows, OrderCreator};
use matreq_core::MasterDataEnricher;
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn run_orders(rows: Vec<Row>) -> (matreq_core::OrderCreationSummary, InMemoryBackend) {
    let backend = InMemoryBackend::new();
    let creator = OrderCreator::new(Arc::new(MatreqConfig::default()));
    let summary = runtime().block_on(creator.create_orders(&backend, rows, "proptest"));
    (summary, backend)
}

proptest! {
    /// Property: partner formatting is idempotent
    #[test]
    fn partner_formatting_is_idempotent(value in partner_strategy()) {
        let once = format_partner_number(&value);
        prop_assert_eq!(format_partner_number(&once), once.clone());
        if !once.is_empty() && once.bytes().all(|b| b.is_ascii_digit()) {
            prop_assert!(once.len() >= 10);
        }
    }

    /// Property: enrichment keeps length, order and row numbers
    #[test]
    fn enrichment_preserves_rows(ids in prop::collection::vec(equipment_id_strategy(), 0..20)) {
        let rows: Vec<Row> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| Row::new(i as u32 + 1, id.clone(), "M-1", 1.0))
            .collect();
        let enricher = MasterDataEnricher::new(Arc::new(MatreqConfig::default()));
        let backend = InMemoryBackend::new();
        let enriched = runtime().block_on(enricher.enrich(&backend, rows.clone()));

        prop_assert_eq!(enriched.len(), rows.len());
        for (before, after) in rows.iter().zip(&enriched) {
            prop_assert_eq!(before.row_number, after.row_number);
            if before.equipment_id.trim().is_empty() {
                prop_assert_eq!(after.status.to_string(), "Error: No Equipment ID");
                prop_assert!(after.enrichment.is_empty());
            }
        }
    }

    /// Property: counters add up and every input row comes back once, in order
    #[test]
    fn order_counters_add_up(rows in enriched_rows_strategy()) {
        let expected_groups = group_rows(&rows).len();
        let (summary, _) = run_orders(rows.clone());

        prop_assert_eq!(summary.groups_processed, expected_groups);
        prop_assert_eq!(summary.orders_created + summary.orders_failed, summary.groups_processed);
        let numbers: Vec<u32> = summary.rows.iter().map(|r| r.row_number).collect();
        let expected: Vec<u32> = rows.iter().map(|r| r.row_number).collect();
        prop_assert_eq!(numbers, expected);
    }

    /// Property: rows sharing a group key end with the same order number and status
    #[test]
    fn group_members_share_outcome(rows in enriched_rows_strategy()) {
        let (summary, _) = run_orders(rows);
        let mut outcomes: HashMap<(String, String, String), (String, String)> = HashMap::new();

        for row in &summary.rows {
            if row.status.failure_reason() == Some("Equipment does not exist") {
                continue;
            }
            let key = (
                row.enrichment.augru.clone(),
                row.enrichment.sold_to.clone(),
                row.enrichment.ship_to.clone(),
            );
            let outcome = (row.sales_order.clone(), row.status.to_string());
            let first = outcomes.entry(key).or_insert_with(|| outcome.clone());
            prop_assert_eq!(&*first, &outcome);
        }
    }

    /// Property: item numbers run 000010, 000020, ... over included rows only
    #[test]
    fn item_numbers_step_by_ten(rows in enriched_rows_strategy()) {
        let (_, backend) = run_orders(rows);
        for request in backend.submitted_orders() {
            for (position, item) in request.items.iter().enumerate() {
                prop_assert_eq!(&item.item_number, &format!("{:06}", (position + 1) * 10));
                prop_assert!(item.target_quantity > 0.0);
                prop_assert!(!item.material.is_empty());
            }
            prop_assert_eq!(request.items.len(), request.schedules.len());
        }
    }
}
