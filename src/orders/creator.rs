//! Submission of order groups and interpretation of the backend responses.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::builder::{GroupOrder, OrderRequestBuilder};
use super::grouping::{group_rows, OrderGroup};
use crate::backend::{SalesOrderRequest, SapBackend};
use crate::config::MatreqConfig;
use crate::constants::status;
use crate::error::{BackendError, MatreqResult};
use crate::models::Row;

/// Result of one `create_orders` run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCreationSummary {
    pub orders_created: usize,
    pub orders_failed: usize,
    pub groups_processed: usize,
    /// Rows that stayed in a group but contributed no line item
    pub lines_excluded: usize,
    /// Every input row, in input order
    pub rows: Vec<Row>,
}

/// Groups enriched rows and creates one sales order per group
#[derive(Debug, Clone)]
pub struct OrderCreator {
    config: Arc<MatreqConfig>,
}

impl OrderCreator {
    pub fn new(config: Arc<MatreqConfig>) -> Self {
        Self { config }
    }

    /// Create orders for all eligible rows.
    ///
    /// Groups are submitted one after another; a failing group marks only its
    /// own rows. Rows already in error are returned unchanged.
    pub async fn create_orders(
        &self,
        backend: &dyn SapBackend,
        mut rows: Vec<Row>,
        requester: &str,
    ) -> OrderCreationSummary {
        let run_id = Uuid::new_v4();
        let groups = group_rows(&rows);
        crate::log_order!(info, "STARTED",
            run_id: run_id,
            rows: rows.len(),
            groups: groups.len(),
            backend: backend.backend_name()
        );

        let builder = OrderRequestBuilder::new(&self.config.business, requester);
        let mut orders_created = 0;
        let mut orders_failed = 0;
        let mut lines_excluded = 0;

        for group in &groups {
            let order = builder.build(group, &rows);
            lines_excluded += order.excluded.len();

            match self.process_group(backend, &order).await {
                Ok(order_number) => {
                    orders_created += 1;
                    crate::log_order!(info, "CREATED",
                        run_id: run_id,
                        group_key: group.key.to_string(),
                        order_number: order_number,
                        lines: order.included.len()
                    );
                    apply_outcome(&mut rows, group, |row| row.record_sales_order(&order_number));
                }
                Err(error) => {
                    orders_failed += 1;
                    let reason = error.status_reason();
                    crate::log_order!(warn, "FAILED",
                        run_id: run_id,
                        group_key: group.key.to_string(),
                        reason: reason
                    );
                    apply_outcome(&mut rows, group, |row| row.record_order_failure(&reason));
                }
            }
        }

        crate::log_order!(info, "COMPLETED",
            run_id: run_id,
            orders_created: orders_created,
            orders_failed: orders_failed,
            lines_excluded: lines_excluded
        );

        OrderCreationSummary {
            orders_created,
            orders_failed,
            groups_processed: groups.len(),
            lines_excluded,
            rows,
        }
    }

    async fn process_group(
        &self,
        backend: &dyn SapBackend,
        order: &GroupOrder,
    ) -> MatreqResult<String> {
        let order_number = self.submit(backend, &order.request).await?;
        backend.commit().await?;
        Ok(order_number)
    }

    /// Submit one request and return the confirmed order number
    async fn submit(
        &self,
        backend: &dyn SapBackend,
        request: &SalesOrderRequest,
    ) -> MatreqResult<String> {
        debug!(
            items = request.items.len(),
            sales_org = %request.header.sales_org,
            "Submitting sales order"
        );
        let response = backend.submit_order(request).await?;

        if let Some(message) = response.first_failure() {
            let text = message.text.trim();
            let text = if text.is_empty() { status::UNKNOWN_ERROR } else { text };
            return Err(BackendError::rejected(text).into());
        }

        let order_number = response.order_number.trim();
        if order_number.is_empty() {
            warn!(
                messages = response.messages.len(),
                "Create-order call returned no order number"
            );
            return Err(BackendError::rejected(status::NO_ORDER_NUMBER).into());
        }
        Ok(order_number.to_string())
    }
}

fn apply_outcome(rows: &mut [Row], group: &OrderGroup, mut update: impl FnMut(&mut Row)) {
    for &index in &group.row_indices {
        if let Some(row) = rows.get_mut(index) {
            update(row);
        }
    }
}
