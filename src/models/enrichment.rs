//! Master data attached to a row by the enricher.
//!
//! An [`Enrichment`] is assembled in named stages through
//! [`EnrichmentBuilder`]: equipment master data first, then the plant-derived
//! sales area, then the optional order reason. The enricher only writes the
//! finished record onto a row, so a row is either fully enriched or carries
//! no derived fields at all.

use crate::error::{MatreqError, MatreqResult};
use crate::utils::serde::deserialize_lenient_string;
use serde::{Deserialize, Serialize};

/// Equipment master data returned by the equipment lookup
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquipmentMasterData {
    pub plant: String,
    pub cost_center: String,
    pub company_code: String,
}

/// Sales attributes derived from the plant table and fixed constants
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesArea {
    pub sales_org: String,
    pub dist_channel: String,
    pub division: String,
    pub sold_to: String,
    pub ship_to: String,
}

/// Order reason resolved from cost-center master data
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderReason {
    pub augru: String,
    pub description: String,
}

/// Derived fields of a row, flattened into the row on the wire
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub plant: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub cost_center: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub company_code: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub sales_org: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub dist_channel: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub division: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub sold_to: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub ship_to: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub augru: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub cost_center_text: String,
}

impl Enrichment {
    pub fn builder(master_data: EquipmentMasterData) -> EnrichmentBuilder {
        EnrichmentBuilder::new(master_data)
    }

    pub fn is_empty(&self) -> bool {
        self == &Enrichment::default()
    }
}

/// Staged construction of an [`Enrichment`]
#[derive(Debug, Clone)]
pub struct EnrichmentBuilder {
    master_data: EquipmentMasterData,
    sales_area: Option<SalesArea>,
    order_reason: Option<OrderReason>,
}

impl EnrichmentBuilder {
    pub fn new(master_data: EquipmentMasterData) -> Self {
        Self {
            master_data,
            sales_area: None,
            order_reason: None,
        }
    }

    pub fn master_data(&self) -> &EquipmentMasterData {
        &self.master_data
    }

    pub fn sales_area(mut self, sales_area: SalesArea) -> Self {
        self.sales_area = Some(sales_area);
        self
    }

    pub fn current_sales_area(&self) -> Option<&SalesArea> {
        self.sales_area.as_ref()
    }

    pub fn order_reason(mut self, order_reason: OrderReason) -> Self {
        self.order_reason = Some(order_reason);
        self
    }

    /// Finish the record. The sales area is required; a missing order reason
    /// reads as empty.
    pub fn build(self) -> MatreqResult<Enrichment> {
        let sales_area = self.sales_area.ok_or_else(|| {
            MatreqError::Enrichment(format!(
                "sales area not resolved for plant '{}'",
                self.master_data.plant
            ))
        })?;
        let order_reason = self.order_reason.unwrap_or_default();

        Ok(Enrichment {
            plant: self.master_data.plant,
            cost_center: self.master_data.cost_center,
            company_code: self.master_data.company_code,
            sales_org: sales_area.sales_org,
            dist_channel: sales_area.dist_channel,
            division: sales_area.division,
            sold_to: sales_area.sold_to,
            ship_to: sales_area.ship_to,
            augru: order_reason.augru,
            cost_center_text: order_reason.description,
        })
    }
}
