#![allow(clippy::doc_markdown)] // Allow technical terms like SAP, BAPI in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Material Request Core
//!
//! Turns uploaded equipment/material lists into SAP sales orders.
//!
//! ## Pipeline
//!
//! 1. [`enrichment::MasterDataEnricher`] resolves each row's equipment master
//!    data, derives the sales area from the plant table and looks up the
//!    order reason of the row's cost center.
//! 2. [`orders::OrderCreator`] groups enriched rows by
//!    `(augru, sold_to, ship_to)`, submits one create-order call per group and
//!    writes the resulting order number (or error) back onto every row.
//!
//! Every row ends with exactly one status (`Ready`, `Created` or
//! `Error: <reason>`); a failing row or group never aborts the batch.
//!
//! ## Module Organization
//!
//! - [`backend`] - `SapBackend` / `SapConnector` collaborators, RFC mapping and an
//!   in-memory backend
//! - [`config`] - System registry, plant table and business constants
//! - [`enrichment`] - Master-data enrichment stage
//! - [`orders`] - Grouping, payload construction and order submission
//! - [`service`] - Connection-scoped facade used by front ends
//! - [`error`] - Structured error handling
//! - [`logging`] - Tracing setup and pipeline logging macros
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use matreq_core::backend::{InMemoryBackend, InMemoryConnector, SapCredentials};
//! use matreq_core::config::MatreqConfig;
//! use matreq_core::models::Row;
//! use matreq_core::service::MaterialRequestService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = Arc::new(InMemoryConnector::new(InMemoryBackend::new()));
//! let service = MaterialRequestService::new(Arc::new(MatreqConfig::default()), connector);
//! let credentials = SapCredentials::new("JDOE", "secret", "100");
//!
//! let rows = vec![Row::new(1, "10000123", "M-100", 4.0)];
//! let enriched = service.enrich_rows("DEV", &credentials, rows).await?;
//! let summary = service.create_orders("DEV", &credentials, enriched).await?;
//! println!("{} orders created", summary.orders_created);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod constants;
pub mod enrichment;
pub mod error;
pub mod locations;
pub mod logging;
pub mod models;
pub mod orders;
pub mod service;
pub mod utils;

pub use config::{ConfigManager, MatreqConfig};
pub use enrichment::MasterDataEnricher;
pub use error::{BackendError, MatreqError, MatreqResult};
pub use models::{Enrichment, Row, RowStatus};
pub use orders::{OrderCreationSummary, OrderCreator};
pub use service::MaterialRequestService;
