//! Partitioning of enriched rows into order groups.

use std::collections::HashMap;
use std::fmt;

use crate::models::Row;

/// Rows sharing a key are submitted as one sales order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub augru: String,
    pub sold_to: String,
    pub ship_to: String,
}

impl GroupKey {
    pub fn for_row(row: &Row) -> Self {
        Self {
            augru: row.enrichment.augru.clone(),
            sold_to: row.enrichment.sold_to.clone(),
            ship_to: row.enrichment.ship_to.clone(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.augru, self.sold_to, self.ship_to)
    }
}

/// One order group: its key and the positions of its rows in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderGroup {
    pub key: GroupKey,
    pub row_indices: Vec<usize>,
}

/// Group order-eligible rows by key, in first-seen key order.
///
/// Rows already carrying an error status are skipped.
pub fn group_rows(rows: &[Row]) -> Vec<OrderGroup> {
    let mut groups: Vec<OrderGroup> = Vec::new();
    let mut positions: HashMap<GroupKey, usize> = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        if !row.is_order_eligible() {
            continue;
        }
        let key = GroupKey::for_row(row);
        match positions.get(&key) {
            Some(&position) => groups[position].row_indices.push(index),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(OrderGroup {
                    key,
                    row_indices: vec![index],
                });
            }
        }
    }

    groups
}
