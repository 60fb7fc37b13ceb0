//! # Pipeline Models
//!
//! Request-scoped records handled by the pipeline. Nothing here is persisted;
//! rows are created per upload or create-order call and dropped with the
//! response.

pub mod enrichment;
pub mod row;
pub mod status;

pub use enrichment::{Enrichment, EnrichmentBuilder, EquipmentMasterData, OrderReason, SalesArea};
pub use row::{LineExclusion, Row};
pub use status::RowStatus;
