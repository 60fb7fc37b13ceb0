//! # In-Memory Backend
//!
//! Scripted [`SapBackend`] for tests and local runs. Equipment and cost-center
//! answers are looked up from maps, create-order responses are taken from a
//! queue (falling back to sequential order numbers), and every call is
//! recorded so tests can assert on the exact payloads the pipeline produced.
//!
//! Clones share state, so a test can keep one handle while the pipeline owns
//! the connection.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::connection::ConnectionParams;
use super::types::{
    CostCenterQuery, CostCenterRecord, DeliveryLocation, SalesOrderRequest, SalesOrderResponse,
};
use super::{SapBackend, SapConnector};
use crate::constants::widths;
use crate::error::{BackendError, BackendResult};
use crate::models::EquipmentMasterData;
use crate::utils::format::zero_pad;

const FIRST_GENERATED_ORDER_NUMBER: u64 = 4_500_000_001;

#[derive(Debug, Default)]
struct InMemoryState {
    equipment: HashMap<String, BackendResult<EquipmentMasterData>>,
    cost_centers: HashMap<String, BackendResult<Vec<CostCenterRecord>>>,
    order_responses: VecDeque<BackendResult<SalesOrderResponse>>,
    commit_failure: Option<BackendError>,
    locations: HashMap<String, Vec<DeliveryLocation>>,
    next_order_number: u64,

    equipment_lookups: Vec<String>,
    cost_center_queries: Vec<CostCenterQuery>,
    submitted_orders: Vec<SalesOrderRequest>,
    commits: usize,
    close_calls: usize,
}

/// Scripted backend connection
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register master data for an equipment number (padded on insert)
    pub fn with_equipment(self, equipment_id: &str, data: EquipmentMasterData) -> Self {
        self.state
            .lock()
            .equipment
            .insert(zero_pad(equipment_id, widths::EQUIPMENT_ID), Ok(data));
        self
    }

    /// Make the lookup of one equipment number fail
    pub fn with_equipment_error(self, equipment_id: &str, error: BackendError) -> Self {
        self.state
            .lock()
            .equipment
            .insert(zero_pad(equipment_id, widths::EQUIPMENT_ID), Err(error));
        self
    }

    /// Register cost-center records (cost center padded on insert)
    pub fn with_cost_center(self, cost_center: &str, records: Vec<CostCenterRecord>) -> Self {
        self.state
            .lock()
            .cost_centers
            .insert(zero_pad(cost_center, widths::COST_CENTER), Ok(records));
        self
    }

    pub fn with_cost_center_error(self, cost_center: &str, error: BackendError) -> Self {
        self.state
            .lock()
            .cost_centers
            .insert(zero_pad(cost_center, widths::COST_CENTER), Err(error));
        self
    }

    /// Queue the answer for the next create-order call
    pub fn with_order_response(self, response: BackendResult<SalesOrderResponse>) -> Self {
        self.state.lock().order_responses.push_back(response);
        self
    }

    pub fn with_commit_failure(self, error: BackendError) -> Self {
        self.state.lock().commit_failure = Some(error);
        self
    }

    pub fn with_locations(self, partner: &str, locations: Vec<DeliveryLocation>) -> Self {
        self.state
            .lock()
            .locations
            .insert(partner.to_string(), locations);
        self
    }

    pub fn equipment_lookups(&self) -> Vec<String> {
        self.state.lock().equipment_lookups.clone()
    }

    pub fn cost_center_queries(&self) -> Vec<CostCenterQuery> {
        self.state.lock().cost_center_queries.clone()
    }

    pub fn submitted_orders(&self) -> Vec<SalesOrderRequest> {
        self.state.lock().submitted_orders.clone()
    }

    pub fn commit_count(&self) -> usize {
        self.state.lock().commits
    }

    pub fn close_count(&self) -> usize {
        self.state.lock().close_calls
    }
}

#[async_trait]
impl SapBackend for InMemoryBackend {
    async fn equipment_details(&self, equipment_id: &str) -> BackendResult<EquipmentMasterData> {
        let mut state = self.state.lock();
        state.equipment_lookups.push(equipment_id.to_string());
        state.equipment.get(equipment_id).cloned().unwrap_or_else(|| {
            Err(BackendError::rejected(format!(
                "Equipment {} does not exist",
                equipment_id.trim_start_matches('0')
            )))
        })
    }

    async fn cost_center_info(
        &self,
        query: &CostCenterQuery,
    ) -> BackendResult<Vec<CostCenterRecord>> {
        let mut state = self.state.lock();
        state.cost_center_queries.push(query.clone());
        state
            .cost_centers
            .get(&query.cost_center)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn submit_order(&self, request: &SalesOrderRequest) -> BackendResult<SalesOrderResponse> {
        let mut state = self.state.lock();
        state.submitted_orders.push(request.clone());
        if let Some(response) = state.order_responses.pop_front() {
            return response;
        }
        if state.next_order_number == 0 {
            state.next_order_number = FIRST_GENERATED_ORDER_NUMBER;
        }
        let number = state.next_order_number;
        state.next_order_number += 1;
        Ok(SalesOrderResponse::created(number.to_string()))
    }

    async fn commit(&self) -> BackendResult<()> {
        let mut state = self.state.lock();
        if let Some(error) = state.commit_failure.clone() {
            return Err(error);
        }
        state.commits += 1;
        Ok(())
    }

    async fn customer_locations(&self, partner: &str) -> BackendResult<Vec<DeliveryLocation>> {
        Ok(self
            .state
            .lock()
            .locations
            .get(partner)
            .cloned()
            .unwrap_or_default())
    }

    async fn close(&self) -> BackendResult<()> {
        self.state.lock().close_calls += 1;
        Ok(())
    }
}

/// Connector handing out clones of one [`InMemoryBackend`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnector {
    backend: InMemoryBackend,
    logon_failure: Option<BackendError>,
    logons: Arc<Mutex<Vec<ConnectionParams>>>,
}

impl InMemoryConnector {
    pub fn new(backend: InMemoryBackend) -> Self {
        Self {
            backend,
            logon_failure: None,
            logons: Arc::default(),
        }
    }

    /// Refuse every logon with `error`
    pub fn with_logon_failure(mut self, error: BackendError) -> Self {
        self.logon_failure = Some(error);
        self
    }

    pub fn backend(&self) -> &InMemoryBackend {
        &self.backend
    }

    /// Parameters of every logon attempt, in order
    pub fn logons(&self) -> Vec<ConnectionParams> {
        self.logons.lock().clone()
    }
}

#[async_trait]
impl SapConnector for InMemoryConnector {
    async fn connect(&self, params: &ConnectionParams) -> BackendResult<Box<dyn SapBackend>> {
        self.logons.lock().push(params.clone());
        match &self.logon_failure {
            Some(error) => Err(error.clone()),
            None => Ok(Box::new(self.backend.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generated_order_numbers_follow_queue() {
        let backend = InMemoryBackend::new()
            .with_order_response(Ok(SalesOrderResponse::rejected("Credit block")));
        let request = crate::orders::builder::tests::minimal_request();

        let first = backend.submit_order(&request).await.unwrap();
        assert_eq!(first.first_failure().unwrap().text, "Credit block");

        let second = backend.submit_order(&request).await.unwrap();
        let third = backend.submit_order(&request).await.unwrap();
        assert_eq!(second.order_number, "4500000001");
        assert_eq!(third.order_number, "4500000002");
        assert_eq!(backend.submitted_orders().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_equipment_is_rejected() {
        let backend = InMemoryBackend::new();
        let err = backend
            .equipment_details("000000000000000042")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Equipment 42 does not exist");
    }

    #[tokio::test]
    async fn test_clones_share_recorded_calls() {
        let backend = InMemoryBackend::new();
        let connection = backend.clone();
        connection.commit().await.unwrap();
        connection.close().await.unwrap();
        assert_eq!(backend.commit_count(), 1);
        assert_eq!(backend.close_count(), 1);
    }
}
