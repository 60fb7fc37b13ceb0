//! # Backend Collaborators
//!
//! The pipeline talks to the ERP backend only through [`SapBackend`]; how the
//! calls reach the backend is up to the implementation:
//!
//! - [`rfc::RfcBackend`] maps the typed calls onto remote function modules
//!   over any [`rfc::RfcCaller`] transport
//! - [`in_memory::InMemoryBackend`] answers from scripted data for tests and
//!   local runs
//!
//! Connections are opened by a [`SapConnector`] and owned exclusively by one
//! pipeline invocation.

pub mod connection;
pub mod in_memory;
pub mod rfc;
pub mod types;

use async_trait::async_trait;

use crate::error::BackendResult;
use crate::models::EquipmentMasterData;

pub use connection::{ConnectionParams, SapCredentials};
pub use in_memory::{InMemoryBackend, InMemoryConnector};
pub use rfc::{RfcBackend, RfcCaller};
pub use types::{
    CostCenterQuery, CostCenterRecord, DeliveryLocation, OrderHeader, OrderHeaderFlags, OrderItem,
    OrderItemFlags, OrderPartner, ReturnMessage, SalesOrderRequest, SalesOrderResponse,
    ScheduleLine, ScheduleLineFlags, Severity,
};

/// One open connection to the ERP backend
#[async_trait]
pub trait SapBackend: Send + Sync {
    /// Equipment master data for an equipment number already padded to 18
    /// characters.
    ///
    /// Values are returned trimmed. A lookup the backend refuses comes back
    /// as [`crate::error::BackendError::Rejected`] carrying the backend's
    /// message.
    async fn equipment_details(&self, equipment_id: &str) -> BackendResult<EquipmentMasterData>;

    /// Cost-center records for the given query, possibly empty
    async fn cost_center_info(&self, query: &CostCenterQuery)
        -> BackendResult<Vec<CostCenterRecord>>;

    /// Submit one create-order call without committing it
    async fn submit_order(&self, request: &SalesOrderRequest) -> BackendResult<SalesOrderResponse>;

    /// Commit the pending backend transaction
    async fn commit(&self) -> BackendResult<()>;

    /// Ship-to locations registered for a (formatted) customer number
    async fn customer_locations(&self, partner: &str) -> BackendResult<Vec<DeliveryLocation>>;

    /// Release the connection. Called exactly once, after the last call.
    async fn close(&self) -> BackendResult<()> {
        Ok(())
    }

    /// Name used in logs
    fn backend_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Opens backend connections
#[async_trait]
pub trait SapConnector: Send + Sync {
    async fn connect(&self, params: &ConnectionParams) -> BackendResult<Box<dyn SapBackend>>;
}
