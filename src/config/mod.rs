//! # Material Request Configuration
//!
//! Read-only lookup tables and business constants consumed by the enrichment
//! and order-creation stages:
//!
//! - **System registry**: SAP system id -> application server host, system
//!   number and display description
//! - **Plant table**: plant -> sales organisation, sold-to and ship-to
//! - **Business constants**: distribution channel, division, controlling area,
//!   sales document type, cost-center lookup language
//! - **Session**: session expiry window
//!
//! The built-in [`Default`] mirrors the standard landscape. Deployments
//! override it through [`ConfigManager`] (TOML files plus environment
//! variables); once loaded the configuration is immutable and shared as
//! `Arc<MatreqConfig>`.
//!
//! ```rust
//! use matreq_core::config::MatreqConfig;
//!
//! let config = MatreqConfig::default();
//! let area = config.resolve_sales_area("us01");
//! assert_eq!(area.sales_org, "US01");
//! assert_eq!(area.sold_to, "166");
//! ```

pub mod error;
pub mod loader;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

use crate::models::SalesArea;

/// Root configuration structure mirroring `config/matreq.toml`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatreqConfig {
    /// SAP systems offered at logon, in display order
    pub systems: Vec<SapSystemConfig>,

    /// Plant-derived sales attributes
    pub plants: Vec<PlantConfig>,

    /// Fixed business rule values
    pub business: BusinessConfig,

    /// Session lifetime
    pub session: SessionConfig,

    /// Connection defaults applied to every logon
    pub connection: ConnectionConfig,
}

/// One SAP application server entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SapSystemConfig {
    pub id: String,
    pub host: String,
    pub system_number: String,
    pub description: String,
}

/// Plant to sales organisation mapping
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlantConfig {
    pub plant: String,
    pub sales_org: String,
    #[serde(default)]
    pub sold_to: String,
    #[serde(default)]
    pub ship_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub distribution_channel: String,
    pub division: String,
    pub controlling_area: String,
    pub sales_document_type: String,
    /// Language key passed to the cost-center lookup
    pub cost_center_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub expiry_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Logon language for RFC connections
    pub language: String,
}

/// Entry of the system dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemSummary {
    pub id: String,
    pub description: String,
}

impl Default for MatreqConfig {
    fn default() -> Self {
        Self {
            systems: vec![
                SapSystemConfig::new("DEV", "sap-dev.company.com", "00", "Development"),
                SapSystemConfig::new("QAS", "sap-qas.company.com", "00", "Quality"),
                SapSystemConfig::new("PRD", "sap-prd.company.com", "00", "Production"),
            ],
            plants: vec![
                PlantConfig::new("US01", "US01", "166", "M0001001E"),
                PlantConfig::new("US65", "US65", "1", "M0001001XI"),
            ],
            business: BusinessConfig::default(),
            session: SessionConfig::default(),
            connection: ConnectionConfig::default(),
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            distribution_channel: "99".to_string(),
            division: "01".to_string(),
            controlling_area: "1000".to_string(),
            sales_document_type: "ZMTQ".to_string(),
            cost_center_language: "E".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { expiry_hours: 8 }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            language: "EN".to_string(),
        }
    }
}

impl SapSystemConfig {
    pub fn new(id: &str, host: &str, system_number: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            host: host.to_string(),
            system_number: system_number.to_string(),
            description: description.to_string(),
        }
    }
}

impl PlantConfig {
    pub fn new(plant: &str, sales_org: &str, sold_to: &str, ship_to: &str) -> Self {
        Self {
            plant: plant.to_string(),
            sales_org: sales_org.to_string(),
            sold_to: sold_to.to_string(),
            ship_to: ship_to.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn expiry(&self) -> Duration {
        Duration::hours(i64::from(self.expiry_hours))
    }

    /// Expiry timestamp for a session created at `created_at`
    pub fn expires_at(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + self.expiry()
    }
}

impl MatreqConfig {
    /// Look up a system by id, ignoring case
    pub fn sap_system(&self, system_id: &str) -> Option<&SapSystemConfig> {
        let wanted = system_id.trim();
        if wanted.is_empty() {
            return None;
        }
        self.systems
            .iter()
            .find(|system| system.id.eq_ignore_ascii_case(wanted))
    }

    /// Systems for the logon dropdown, in declared order
    pub fn available_systems(&self) -> Vec<SystemSummary> {
        self.systems
            .iter()
            .map(|system| SystemSummary {
                id: system.id.clone(),
                description: system.description.clone(),
            })
            .collect()
    }

    /// Look up a plant entry, ignoring case
    pub fn plant(&self, plant: &str) -> Option<&PlantConfig> {
        if plant.is_empty() {
            return None;
        }
        self.plants
            .iter()
            .find(|entry| entry.plant.eq_ignore_ascii_case(plant))
    }

    /// Derive the sales area for a plant.
    ///
    /// Unknown plants are not an error: the sales organisation falls back to
    /// the uppercased plant code and both partners to empty strings.
    pub fn resolve_sales_area(&self, plant: &str) -> SalesArea {
        let plant_upper = plant.to_uppercase();
        let (sales_org, sold_to, ship_to) = match self.plant(&plant_upper) {
            Some(entry) => (
                entry.sales_org.clone(),
                entry.sold_to.clone(),
                entry.ship_to.clone(),
            ),
            None => (plant_upper, String::new(), String::new()),
        };

        SalesArea {
            sales_org,
            dist_channel: self.business.distribution_channel.clone(),
            division: self.business.division.clone(),
            sold_to,
            ship_to,
        }
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.systems.is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "systems",
                "at least one SAP system must be configured",
            ));
        }

        let mut seen = HashSet::new();
        for system in &self.systems {
            if system.id.trim().is_empty() {
                return Err(ConfigurationError::invalid_value(
                    "systems.id",
                    system.id.clone(),
                    "system id cannot be empty",
                ));
            }
            if system.host.trim().is_empty() {
                return Err(ConfigurationError::invalid_value(
                    "systems.host",
                    system.host.clone(),
                    format!("host missing for system {}", system.id),
                ));
            }
            if !seen.insert(system.id.to_uppercase()) {
                return Err(ConfigurationError::invalid_value(
                    "systems.id",
                    system.id.clone(),
                    "duplicate system id",
                ));
            }
        }

        let mut plants = HashSet::new();
        for entry in &self.plants {
            if !plants.insert(entry.plant.to_uppercase()) {
                return Err(ConfigurationError::invalid_value(
                    "plants.plant",
                    entry.plant.clone(),
                    "duplicate plant entry",
                ));
            }
        }

        let business = [
            ("business.distribution_channel", &self.business.distribution_channel),
            ("business.division", &self.business.division),
            ("business.controlling_area", &self.business.controlling_area),
            ("business.sales_document_type", &self.business.sales_document_type),
            ("business.cost_center_language", &self.business.cost_center_language),
        ];
        for (field, value) in business {
            if value.trim().is_empty() {
                return Err(ConfigurationError::invalid_value(
                    field,
                    value.clone(),
                    "business constant cannot be empty",
                ));
            }
        }

        if self.session.expiry_hours == 0 {
            return Err(ConfigurationError::invalid_value(
                "session.expiry_hours",
                "0",
                "session expiry must be at least one hour",
            ));
        }

        Ok(())
    }
}
