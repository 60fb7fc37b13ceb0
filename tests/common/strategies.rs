use proptest::prelude::*;
use proptest::strategy::Just;

use matreq_core::models::{Enrichment, Row, RowStatus};

/// Small key alphabet so generated rows actually share groups
pub fn key_part_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("1".to_string()),
        Just("2".to_string()),
        Just("A1".to_string()),
    ]
}

/// Material quantity, including excluded (non-positive) values
pub fn quantity_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(-1.0), 0.5f64..500.0]
}

/// Material number, sometimes blank
pub fn material_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("  ".to_string()), "M-[0-9]{1,4}"]
}

/// Partner numbers as they arrive from spreadsheets and config
pub fn partner_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        " {0,2}[0-9]{1,10} {0,2}",
        "[A-Z][0-9A-Z]{1,9}",
    ]
}

/// Equipment ids, sometimes blank
pub fn equipment_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("   ".to_string()), "[0-9]{1,8}"]
}

/// One enriched row; `failed` rows carry an error status
pub fn enriched_row_strategy(
) -> impl Strategy<Value = (String, String, String, String, f64, bool)> {
    (
        key_part_strategy(),
        key_part_strategy(),
        key_part_strategy(),
        material_strategy(),
        quantity_strategy(),
        prop::bool::weighted(0.15),
    )
}

/// Enriched rows numbered from 1
pub fn enriched_rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(enriched_row_strategy(), 1..25).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(index, (augru, sold_to, ship_to, material, qty, failed))| {
                let enrichment = Enrichment {
                    plant: "US01".to_string(),
                    sales_org: "US01".to_string(),
                    dist_channel: "99".to_string(),
                    division: "01".to_string(),
                    sold_to,
                    ship_to,
                    augru,
                    ..Enrichment::default()
                };
                let status = if failed {
                    RowStatus::failed("Equipment does not exist")
                } else {
                    RowStatus::Ready
                };
                Row::new(index as u32 + 1, format!("{}", 10_000 + index), material, qty)
                    .with_enrichment(enrichment)
                    .with_status(status)
            })
            .collect()
    })
}
