//! Create-order payload construction for one order group.

use tracing::debug;

use super::grouping::OrderGroup;
use crate::backend::{
    OrderHeader, OrderHeaderFlags, OrderItem, OrderItemFlags, OrderPartner, SalesOrderRequest,
    ScheduleLine, ScheduleLineFlags,
};
use crate::config::BusinessConfig;
use crate::constants::{flags, partner_roles, widths, FIRST_SCHEDULE_LINE, ITEM_NUMBER_STEP};
use crate::models::{Enrichment, LineExclusion, Row};
use crate::utils::format::{is_all_digits, truncate_chars, zero_pad};

/// Normalize a customer number for the partner table.
///
/// Numeric values are left-padded to the backend key width; anything else is
/// passed through trimmed.
pub fn format_partner_number(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        String::new()
    } else if is_all_digits(trimmed) {
        zero_pad(trimmed, widths::PARTNER_NUMBER)
    } else {
        trimmed.to_string()
    }
}

/// Six-digit item number of the `position`-th included line (0-based)
pub fn item_number(position: usize) -> String {
    let number = (position as u32 + 1) * ITEM_NUMBER_STEP;
    zero_pad(&number.to_string(), widths::ITEM_NUMBER)
}

/// Payload for one group plus the row bookkeeping behind it
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOrder {
    pub request: SalesOrderRequest,
    /// Row indices that became line items, in item order
    pub included: Vec<usize>,
    /// Row indices left out of the payload
    pub excluded: Vec<(usize, LineExclusion)>,
}

/// Builds create-order requests from order groups
#[derive(Debug, Clone)]
pub struct OrderRequestBuilder<'a> {
    business: &'a BusinessConfig,
    requester: String,
}

impl<'a> OrderRequestBuilder<'a> {
    pub fn new(business: &'a BusinessConfig, requester: &str) -> Self {
        Self {
            business,
            requester: truncate_chars(requester, widths::PURCHASE_ORDER_REF),
        }
    }

    /// Build the request for `group`. Header and partners come from the
    /// group's first row.
    ///
    /// `rows` must be the slice the group was formed from; indices outside
    /// it are skipped.
    pub fn build(&self, group: &OrderGroup, rows: &[Row]) -> GroupOrder {
        let members: Vec<(usize, &Row)> = group
            .row_indices
            .iter()
            .filter_map(|&index| rows.get(index).map(|row| (index, row)))
            .collect();
        let fallback = Enrichment::default();
        let first = members
            .first()
            .map(|(_, row)| &row.enrichment)
            .unwrap_or(&fallback);
        let (header, header_flags) = self.header(first);

        let partners = vec![
            OrderPartner {
                role: partner_roles::SOLD_TO.to_string(),
                number: format_partner_number(&group.key.sold_to),
            },
            OrderPartner {
                role: partner_roles::SHIP_TO.to_string(),
                number: format_partner_number(&group.key.ship_to),
            },
        ];

        let mut request = SalesOrderRequest {
            header,
            header_flags,
            partners,
            items: Vec::new(),
            item_flags: Vec::new(),
            schedules: Vec::new(),
            schedule_flags: Vec::new(),
        };
        let mut included = Vec::new();
        let mut excluded = Vec::new();

        for (index, row) in members {
            if let Some(reason) = row.line_exclusion() {
                debug!(
                    row_number = row.row_number,
                    group_key = %group.key,
                    reason = reason.as_str(),
                    "Row excluded from order lines"
                );
                excluded.push((index, reason));
                continue;
            }

            let number = item_number(included.len());
            self.push_line(&mut request, &number, row);
            included.push(index);
        }

        GroupOrder {
            request,
            included,
            excluded,
        }
    }

    fn header(&self, enrichment: &Enrichment) -> (OrderHeader, OrderHeaderFlags) {
        let order_reason = Some(enrichment.augru.clone()).filter(|augru| !augru.is_empty());

        let header = OrderHeader {
            document_type: self.business.sales_document_type.clone(),
            sales_org: enrichment.sales_org.clone(),
            dist_channel: zero_pad(&enrichment.dist_channel, widths::SALES_AREA_CODE),
            division: zero_pad(&enrichment.division, widths::SALES_AREA_CODE),
            purchase_order_ref: self.requester.clone(),
            order_reason: order_reason.clone(),
        };
        let header_flags = OrderHeaderFlags {
            update_flag: flags::INSERT.to_string(),
            document_type: flags::SET.to_string(),
            sales_org: flags::SET.to_string(),
            dist_channel: flags::SET.to_string(),
            division: flags::SET.to_string(),
            purchase_order_ref: flags::SET.to_string(),
            order_reason: order_reason.map(|_| flags::SET.to_string()),
        };
        (header, header_flags)
    }

    fn push_line(&self, request: &mut SalesOrderRequest, number: &str, row: &Row) {
        let batch = row.batch().map(|b| b.trim().to_string());

        request.items.push(OrderItem {
            item_number: number.to_string(),
            material: row.material.trim().to_string(),
            plant: row.enrichment.plant.clone(),
            target_quantity: row.material_qty,
            reference: truncate_chars(&row.equipment_id, widths::EQUIPMENT_REF),
            batch: batch.clone(),
        });
        request.item_flags.push(OrderItemFlags {
            item_number: number.to_string(),
            update_flag: flags::INSERT.to_string(),
            material: flags::SET.to_string(),
            plant: flags::SET.to_string(),
            target_quantity: flags::SET.to_string(),
            reference: flags::SET.to_string(),
            batch: batch.map(|_| flags::SET.to_string()),
        });
        request.schedules.push(ScheduleLine {
            item_number: number.to_string(),
            schedule_line: FIRST_SCHEDULE_LINE.to_string(),
            requested_quantity: row.material_qty,
        });
        request.schedule_flags.push(ScheduleLineFlags {
            item_number: number.to_string(),
            schedule_line: FIRST_SCHEDULE_LINE.to_string(),
            update_flag: flags::INSERT.to_string(),
            requested_quantity: flags::SET.to_string(),
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::RowStatus;
    use crate::orders::grouping::group_rows;

    pub(crate) fn enriched_row(n: u32, material: &str, qty: f64) -> Row {
        let enrichment = Enrichment {
            plant: "US01".to_string(),
            sales_org: "US01".to_string(),
            dist_channel: "99".to_string(),
            division: "1".to_string(),
            sold_to: "1".to_string(),
            ship_to: "2".to_string(),
            augru: "A1".to_string(),
            ..Enrichment::default()
        };
        Row::new(n, format!("EQ-{n:03}-LONG-IDENTIFIER"), material, qty)
            .with_enrichment(enrichment)
            .with_status(RowStatus::Ready)
    }

    /// Request for a single one-line group
    pub(crate) fn minimal_request() -> SalesOrderRequest {
        let business = BusinessConfig::default();
        let rows = vec![enriched_row(1, "M-1", 1.0)];
        let groups = group_rows(&rows);
        OrderRequestBuilder::new(&business, "tester")
            .build(&groups[0], &rows)
            .request
    }

    #[test]
    fn test_format_partner_number() {
        assert_eq!(format_partner_number(" 166 "), "0000000166");
        assert_eq!(format_partner_number("0000000166"), "0000000166");
        assert_eq!(format_partner_number("M0001001E"), "M0001001E");
        assert_eq!(format_partner_number("   "), "");
    }

    #[test]
    fn test_item_numbers() {
        assert_eq!(item_number(0), "000010");
        assert_eq!(item_number(1), "000020");
        assert_eq!(item_number(99), "001000");
    }

    #[test]
    fn test_build_group_request() {
        let business = BusinessConfig::default();
        let rows = vec![
            enriched_row(1, " M-1 ", 2.0).with_batch("B7"),
            enriched_row(2, "M-2", 0.0),
            enriched_row(3, "M-3", 5.0),
        ];
        let groups = group_rows(&rows);
        let order = OrderRequestBuilder::new(&business, &"R".repeat(40)).build(&groups[0], &rows);

        let header = &order.request.header;
        assert_eq!(header.document_type, "ZMTQ");
        assert_eq!(header.division, "01");
        assert_eq!(header.dist_channel, "99");
        assert_eq!(header.purchase_order_ref.len(), 35);
        assert_eq!(header.order_reason.as_deref(), Some("A1"));
        assert_eq!(order.request.header_flags.update_flag, "I");
        assert_eq!(order.request.header_flags.order_reason.as_deref(), Some("X"));

        assert_eq!(order.request.partners[0].role, "AG");
        assert_eq!(order.request.partners[0].number, "0000000001");
        assert_eq!(order.request.partners[1].role, "WE");
        assert_eq!(order.request.partners[1].number, "0000000002");

        assert_eq!(order.included, vec![0, 2]);
        assert_eq!(order.excluded, vec![(1, LineExclusion::NonPositiveQuantity)]);

        let items = &order.request.items;
        assert_eq!(items[0].item_number, "000010");
        assert_eq!(items[0].material, "M-1");
        assert_eq!(items[0].reference, "EQ-001-LONG-");
        assert_eq!(items[0].batch.as_deref(), Some("B7"));
        assert_eq!(items[1].item_number, "000020");
        assert_eq!(items[1].batch, None);

        assert_eq!(order.request.item_flags[0].batch.as_deref(), Some("X"));
        assert_eq!(order.request.item_flags[1].batch, None);
        assert_eq!(order.request.schedules.len(), 2);
        assert_eq!(order.request.schedules[1].schedule_line, "0001");
        assert_eq!(order.request.schedules[1].requested_quantity, 5.0);
    }

    #[test]
    fn test_no_order_reason_without_augru() {
        let business = BusinessConfig::default();
        let mut row = enriched_row(1, "M-1", 1.0);
        row.enrichment.augru.clear();
        let rows = vec![row];
        let groups = group_rows(&rows);
        let order = OrderRequestBuilder::new(&business, "tester").build(&groups[0], &rows);

        assert_eq!(order.request.header.order_reason, None);
        assert_eq!(order.request.header_flags.order_reason, None);
        let value = serde_json::to_value(&order.request).unwrap();
        assert!(value["ORDER_HEADER_IN"].get("ORD_REASON").is_none());
    }

    #[test]
    fn test_all_rows_excluded() {
        let business = BusinessConfig::default();
        let rows = vec![enriched_row(1, "", 1.0), enriched_row(2, "M-2", -1.0)];
        let groups = group_rows(&rows);
        let order = OrderRequestBuilder::new(&business, "tester").build(&groups[0], &rows);
        assert!(order.request.items.is_empty());
        assert_eq!(order.request.partners.len(), 2);
        assert_eq!(order.excluded.len(), 2);
    }

    #[test]
    fn test_indices_outside_rows_are_skipped() {
        let business = BusinessConfig::default();
        let rows = vec![enriched_row(1, "M-1", 1.0), enriched_row(2, "M-2", 2.0)];
        let groups = group_rows(&rows);

        let order = OrderRequestBuilder::new(&business, "tester").build(&groups[0], &rows[..1]);
        assert_eq!(order.included, vec![0]);
        assert_eq!(order.request.items.len(), 1);
        assert!(order.excluded.is_empty());
    }
}
