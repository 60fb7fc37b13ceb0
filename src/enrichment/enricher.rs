//! Master-data enrichment of uploaded rows.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::backend::{CostCenterQuery, SapBackend};
use crate::config::MatreqConfig;
use crate::constants::{status, widths};
use crate::error::MatreqResult;
use crate::models::{Enrichment, EnrichmentBuilder, OrderReason, Row, RowStatus};
use crate::utils::format::zero_pad;

/// Counts of one enrichment run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnrichmentStats {
    pub total: usize,
    pub ready: usize,
    pub failed: usize,
}

impl EnrichmentStats {
    pub fn from_rows(rows: &[Row]) -> Self {
        let ready = rows.iter().filter(|r| r.status == RowStatus::Ready).count();
        let failed = rows.iter().filter(|r| r.status.is_failed()).count();
        Self {
            total: rows.len(),
            ready,
            failed,
        }
    }
}

/// Resolves equipment, plant and cost-center master data for uploaded rows
#[derive(Debug, Clone)]
pub struct MasterDataEnricher {
    config: Arc<MatreqConfig>,
}

impl MasterDataEnricher {
    pub fn new(config: Arc<MatreqConfig>) -> Self {
        Self { config }
    }

    /// Enrich every row, in order.
    ///
    /// Never fails: each row comes back either `Ready` with its master data or
    /// with an `Error: ...` status and no derived fields.
    pub async fn enrich(&self, backend: &dyn SapBackend, rows: Vec<Row>) -> Vec<Row> {
        let run_id = Uuid::new_v4();
        crate::log_enrichment!(info, "STARTED",
            run_id: run_id,
            rows: rows.len(),
            backend: backend.backend_name()
        );

        let mut enriched = Vec::with_capacity(rows.len());
        for mut row in rows {
            self.enrich_row(backend, &mut row).await;
            enriched.push(row);
        }

        let stats = EnrichmentStats::from_rows(&enriched);
        crate::log_enrichment!(info, "COMPLETED",
            run_id: run_id,
            total: stats.total,
            ready: stats.ready,
            failed: stats.failed
        );

        enriched
    }

    async fn enrich_row(&self, backend: &dyn SapBackend, row: &mut Row) {
        row.enrichment = Enrichment::default();
        let equipment_id = row.equipment_id.trim().to_string();
        if equipment_id.is_empty() {
            row.mark_failed(status::NO_EQUIPMENT_ID);
            return;
        }

        match self.resolve(backend, &equipment_id).await {
            Ok(enrichment) => {
                debug!(
                    row_number = row.row_number,
                    plant = %enrichment.plant,
                    sales_org = %enrichment.sales_org,
                    augru = %enrichment.augru,
                    "Row enriched"
                );
                row.mark_enriched(enrichment);
            }
            Err(error) => {
                debug!(
                    row_number = row.row_number,
                    equipment_id = %equipment_id,
                    error = %error,
                    "Row enrichment failed"
                );
                row.mark_failed(error.status_reason());
            }
        }
    }

    async fn resolve(
        &self,
        backend: &dyn SapBackend,
        equipment_id: &str,
    ) -> MatreqResult<Enrichment> {
        let master_data = backend
            .equipment_details(&zero_pad(equipment_id, widths::EQUIPMENT_ID))
            .await?;

        let sales_area = self.config.resolve_sales_area(&master_data.plant);
        let builder = Enrichment::builder(master_data).sales_area(sales_area);
        let order_reason = self.lookup_order_reason(backend, &builder).await;

        builder.order_reason(order_reason).build()
    }

    /// Order reason from cost-center master data. Lookup failures are logged
    /// and read as "no order reason".
    async fn lookup_order_reason(
        &self,
        backend: &dyn SapBackend,
        builder: &EnrichmentBuilder,
    ) -> OrderReason {
        let cost_center = &builder.master_data().cost_center;
        let sales_org = builder
            .current_sales_area()
            .map(|area| area.sales_org.as_str())
            .unwrap_or_default();
        if cost_center.is_empty() || sales_org.is_empty() {
            return OrderReason::default();
        }

        let business = &self.config.business;
        let query = CostCenterQuery {
            cost_center: zero_pad(cost_center, widths::COST_CENTER),
            sales_org: sales_org.to_string(),
            dist_channel: business.distribution_channel.clone(),
            division: business.division.clone(),
            controlling_area: business.controlling_area.clone(),
            language: business.cost_center_language.clone(),
        };

        match backend.cost_center_info(&query).await {
            Ok(records) => records
                .into_iter()
                .next()
                .map(|record| OrderReason {
                    augru: record.augru.trim().to_string(),
                    description: record.description.trim().to_string(),
                })
                .unwrap_or_default(),
            Err(error) => {
                warn!(
                    cost_center = %query.cost_center,
                    sales_org = %query.sales_org,
                    error = %error,
                    "Cost center lookup failed, continuing without order reason"
                );
                OrderReason::default()
            }
        }
    }
}
