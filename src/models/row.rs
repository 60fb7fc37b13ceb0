//! Uploaded row as it moves through enrichment and order creation.

use crate::models::enrichment::Enrichment;
use crate::models::status::RowStatus;
use crate::utils::serde::{
    deserialize_lenient_string, deserialize_optional_text, deserialize_quantity,
};
use serde::{Deserialize, Serialize};

/// One line of an uploaded material list.
///
/// The upload columns (`equipment_id`, `material`, `material_qty`, `batch`)
/// are set once; [`Enrichment`] fields, `status` and `sales_order` are filled
/// in by the pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// 1-based position in the upload
    #[serde(default)]
    pub row_number: u32,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub equipment_id: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub material: String,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub material_qty: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub batch: Option<String>,
    #[serde(flatten)]
    pub enrichment: Enrichment,
    #[serde(default)]
    pub status: RowStatus,
    #[serde(default)]
    pub sales_order: String,
}

/// Why a row contributes no line item to its group's order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineExclusion {
    MissingMaterial,
    NonPositiveQuantity,
}

impl LineExclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineExclusion::MissingMaterial => "no material",
            LineExclusion::NonPositiveQuantity => "quantity not a positive number",
        }
    }
}

impl Row {
    pub fn new(
        row_number: u32,
        equipment_id: impl Into<String>,
        material: impl Into<String>,
        material_qty: f64,
    ) -> Self {
        Self {
            row_number,
            equipment_id: equipment_id.into(),
            material: material.into(),
            material_qty,
            batch: None,
            enrichment: Enrichment::default(),
            status: RowStatus::Pending,
            sales_order: String::new(),
        }
    }

    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        let batch = batch.into();
        self.batch = (!batch.trim().is_empty()).then_some(batch);
        self
    }

    pub fn with_enrichment(mut self, enrichment: Enrichment) -> Self {
        self.enrichment = enrichment;
        self
    }

    pub fn with_status(mut self, status: RowStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach finished master data and mark the row ready for ordering
    pub fn mark_enriched(&mut self, enrichment: Enrichment) {
        self.enrichment = enrichment;
        self.status = RowStatus::Ready;
    }

    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = RowStatus::failed(reason);
    }

    /// Rows that failed enrichment are passed through order creation untouched
    pub fn is_order_eligible(&self) -> bool {
        !self.status.is_failed()
    }

    pub fn record_sales_order(&mut self, order_number: &str) {
        self.sales_order = order_number.to_string();
        self.status = RowStatus::Created;
    }

    pub fn record_order_failure(&mut self, reason: &str) {
        self.sales_order.clear();
        self.status = RowStatus::failed(reason);
    }

    /// Non-empty batch, if any
    pub fn batch(&self) -> Option<&str> {
        self.batch.as_deref().filter(|b| !b.trim().is_empty())
    }

    /// Whether this row is left out of the order payload
    pub fn line_exclusion(&self) -> Option<LineExclusion> {
        if self.material.trim().is_empty() {
            Some(LineExclusion::MissingMaterial)
        } else if !self.material_qty.is_finite() || self.material_qty <= 0.0 {
            Some(LineExclusion::NonPositiveQuantity)
        } else {
            None
        }
    }
}
