//! # Master-Data Enrichment
//!
//! First pipeline stage. Each uploaded row is resolved against the backend
//! (equipment master data, cost-center order reason) and the plant table of
//! the loaded configuration. Failures are recorded on the row itself; the
//! stage never aborts a batch.

pub mod enricher;

pub use enricher::{EnrichmentStats, MasterDataEnricher};
