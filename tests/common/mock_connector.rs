//! Connector wrapper that records the order of backend calls.
//!
//! Wraps an [`InMemoryBackend`] so integration tests can assert on the
//! sequence of calls a service operation made, including the final close.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use matreq_core::backend::{
    ConnectionParams, CostCenterQuery, CostCenterRecord, DeliveryLocation, InMemoryBackend,
    SalesOrderRequest, SalesOrderResponse, SapBackend, SapConnector,
};
use matreq_core::error::BackendResult;
use matreq_core::models::EquipmentMasterData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Connect(String),
    EquipmentDetails(String),
    CostCenterInfo(String),
    SubmitOrder(usize),
    Commit,
    CustomerLocations(String),
    Close,
}

#[derive(Debug, Clone)]
pub struct RecordingConnector {
    inner: InMemoryBackend,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingConnector {
    pub fn new(inner: InMemoryBackend) -> Self {
        Self {
            inner,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn backend(&self) -> &InMemoryBackend {
        &self.inner
    }
}

#[async_trait]
impl SapConnector for RecordingConnector {
    async fn connect(&self, params: &ConnectionParams) -> BackendResult<Box<dyn SapBackend>> {
        self.calls
            .lock()
            .push(RecordedCall::Connect(params.system_id.clone()));
        Ok(Box::new(RecordingBackend {
            inner: self.inner.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct RecordingBackend {
    inner: InMemoryBackend,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingBackend {
    fn record(&self, call: RecordedCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl SapBackend for RecordingBackend {
    async fn equipment_details(&self, equipment_id: &str) -> BackendResult<EquipmentMasterData> {
        self.record(RecordedCall::EquipmentDetails(equipment_id.to_string()));
        self.inner.equipment_details(equipment_id).await
    }

    async fn cost_center_info(
        &self,
        query: &CostCenterQuery,
    ) -> BackendResult<Vec<CostCenterRecord>> {
        self.record(RecordedCall::CostCenterInfo(query.cost_center.clone()));
        self.inner.cost_center_info(query).await
    }

    async fn submit_order(&self, request: &SalesOrderRequest) -> BackendResult<SalesOrderResponse> {
        self.record(RecordedCall::SubmitOrder(request.items.len()));
        self.inner.submit_order(request).await
    }

    async fn commit(&self) -> BackendResult<()> {
        self.record(RecordedCall::Commit);
        self.inner.commit().await
    }

    async fn customer_locations(&self, partner: &str) -> BackendResult<Vec<DeliveryLocation>> {
        self.record(RecordedCall::CustomerLocations(partner.to_string()));
        self.inner.customer_locations(partner).await
    }

    async fn close(&self) -> BackendResult<()> {
        self.record(RecordedCall::Close);
        self.inner.close().await
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}
