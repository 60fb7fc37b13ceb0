//! Test data builders for rows and scripted backends.

use matreq_core::backend::{CostCenterRecord, InMemoryBackend};
use matreq_core::models::{Enrichment, EquipmentMasterData, Row, RowStatus};

/// Builder for uploaded or already-enriched rows
pub struct RowBuilder {
    row_number: u32,
    equipment_id: String,
    material: String,
    material_qty: f64,
    batch: Option<String>,
    enrichment: Option<Enrichment>,
    status: RowStatus,
}

impl RowBuilder {
    pub fn new(row_number: u32) -> Self {
        Self {
            row_number,
            equipment_id: format!("{}", 10_000_000 + row_number),
            material: format!("MAT-{row_number:03}"),
            material_qty: 1.0,
            batch: None,
            enrichment: None,
            status: RowStatus::Pending,
        }
    }

    pub fn equipment(mut self, equipment_id: &str) -> Self {
        self.equipment_id = equipment_id.to_string();
        self
    }

    pub fn material(mut self, material: &str) -> Self {
        self.material = material.to_string();
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.material_qty = quantity;
        self
    }

    pub fn batch(mut self, batch: &str) -> Self {
        self.batch = Some(batch.to_string());
        self
    }

    /// Mark the row enriched for the given group key
    pub fn enriched(mut self, augru: &str, sold_to: &str, ship_to: &str) -> Self {
        self.enrichment = Some(Enrichment {
            plant: "US01".to_string(),
            cost_center: "4711".to_string(),
            company_code: "1000".to_string(),
            sales_org: "US01".to_string(),
            dist_channel: "99".to_string(),
            division: "01".to_string(),
            sold_to: sold_to.to_string(),
            ship_to: ship_to.to_string(),
            augru: augru.to_string(),
            cost_center_text: String::new(),
        });
        self.status = RowStatus::Ready;
        self
    }

    pub fn failed(mut self, reason: &str) -> Self {
        self.status = RowStatus::failed(reason);
        self
    }

    pub fn build(self) -> Row {
        let mut row = Row::new(
            self.row_number,
            self.equipment_id,
            self.material,
            self.material_qty,
        )
        .with_status(self.status);
        if let Some(batch) = self.batch {
            row = row.with_batch(batch);
        }
        if let Some(enrichment) = self.enrichment {
            row = row.with_enrichment(enrichment);
        }
        row
    }
}

pub fn equipment(plant: &str, cost_center: &str) -> EquipmentMasterData {
    EquipmentMasterData {
        plant: plant.to_string(),
        cost_center: cost_center.to_string(),
        company_code: "1000".to_string(),
    }
}

pub fn cost_center(augru: &str, description: &str) -> CostCenterRecord {
    CostCenterRecord {
        augru: augru.to_string(),
        description: description.to_string(),
    }
}

/// Backend knowing two equipment numbers in plant US01, one with an order
/// reason on its cost center
pub fn plant_backend() -> InMemoryBackend {
    InMemoryBackend::new()
        .with_equipment("10000001", equipment("US01", "4711"))
        .with_equipment("10000002", equipment("us65", "4712"))
        .with_cost_center("4711", vec![cost_center("Z01", "Line maintenance")])
}
