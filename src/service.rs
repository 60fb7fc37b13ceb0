//! # Material Request Service
//!
//! Entry point for an HTTP (or any other) front end. Each operation resolves
//! the target system, opens one backend connection with the operator's
//! credentials, runs a single pipeline stage and closes the connection again,
//! whatever the stage's outcome.

use std::sync::Arc;

use tracing::{info, warn};

use crate::backend::{ConnectionParams, DeliveryLocation, SapBackend, SapConnector, SapCredentials};
use crate::config::{MatreqConfig, SystemSummary};
use crate::enrichment::MasterDataEnricher;
use crate::error::{MatreqError, MatreqResult};
use crate::locations;
use crate::models::Row;
use crate::orders::{format_partner_number, OrderCreationSummary, OrderCreator};

pub struct MaterialRequestService {
    config: Arc<MatreqConfig>,
    connector: Arc<dyn SapConnector>,
    enricher: MasterDataEnricher,
    creator: OrderCreator,
}

impl std::fmt::Debug for MaterialRequestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialRequestService")
            .field("systems", &self.config.systems.len())
            .field("plants", &self.config.plants.len())
            .finish()
    }
}

impl MaterialRequestService {
    pub fn new(config: Arc<MatreqConfig>, connector: Arc<dyn SapConnector>) -> Self {
        Self {
            enricher: MasterDataEnricher::new(config.clone()),
            creator: OrderCreator::new(config.clone()),
            config,
            connector,
        }
    }

    pub fn config(&self) -> &MatreqConfig {
        &self.config
    }

    /// Systems an operator can log on to, in configured order
    pub fn available_systems(&self) -> Vec<SystemSummary> {
        self.config.available_systems()
    }

    /// Try a logon with `credentials`.
    ///
    /// Refused logons yield `Ok(false)`; an unknown system id is an error.
    pub async fn verify_credentials(
        &self,
        system_id: &str,
        credentials: &SapCredentials,
    ) -> MatreqResult<bool> {
        let params = ConnectionParams::resolve(&self.config, system_id, credentials)?;
        match self.connector.connect(&params).await {
            Ok(backend) => {
                close(backend).await;
                info!(system_id = %params.system_id, user = %params.user, "Credentials verified");
                Ok(true)
            }
            Err(error) => {
                warn!(
                    system_id = %params.system_id,
                    user = %params.user,
                    error = %error,
                    "Logon refused"
                );
                Ok(false)
            }
        }
    }

    /// Run master-data enrichment over `rows`
    pub async fn enrich_rows(
        &self,
        system_id: &str,
        credentials: &SapCredentials,
        rows: Vec<Row>,
    ) -> MatreqResult<Vec<Row>> {
        let backend = self.open(system_id, credentials).await?;
        let enriched = self.enricher.enrich(backend.as_ref(), rows).await;
        close(backend).await;
        Ok(enriched)
    }

    /// Group `rows` and create sales orders. The logged-on user is the
    /// requester.
    pub async fn create_orders(
        &self,
        system_id: &str,
        credentials: &SapCredentials,
        rows: Vec<Row>,
    ) -> MatreqResult<OrderCreationSummary> {
        if rows.is_empty() {
            return Err(MatreqError::InvalidInput("No rows provided".to_string()));
        }

        let backend = self.open(system_id, credentials).await?;
        let summary = self
            .creator
            .create_orders(backend.as_ref(), rows, &credentials.user)
            .await;
        close(backend).await;
        Ok(summary)
    }

    /// Ship-to locations of a sold-to customer
    pub async fn delivery_locations(
        &self,
        system_id: &str,
        credentials: &SapCredentials,
        sold_to: &str,
    ) -> MatreqResult<Vec<DeliveryLocation>> {
        if format_partner_number(sold_to).is_empty() {
            return Err(MatreqError::InvalidInput(
                "sold_to parameter required".to_string(),
            ));
        }

        let backend = self.open(system_id, credentials).await?;
        let result = locations::delivery_locations(backend.as_ref(), sold_to).await;
        close(backend).await;
        result
    }

    async fn open(
        &self,
        system_id: &str,
        credentials: &SapCredentials,
    ) -> MatreqResult<Box<dyn SapBackend>> {
        let params = ConnectionParams::resolve(&self.config, system_id, credentials)?;
        let backend = self.connector.connect(&params).await?;
        Ok(backend)
    }
}

async fn close(backend: Box<dyn SapBackend>) {
    if let Err(error) = backend.close().await {
        warn!(error = %error, "Failed to close backend connection");
    }
}
