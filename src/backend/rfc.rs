//! Remote function module mapping.
//!
//! [`RfcBackend`] turns the typed [`SapBackend`] calls into function-module
//! invocations with the backend's parameter names and parses the returned
//! structures. The wire transport is pluggable through [`RfcCaller`]; this
//! module only knows the payload shapes.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::types::{
    CostCenterQuery, CostCenterRecord, DeliveryLocation, ReturnMessage, SalesOrderRequest,
    SalesOrderResponse, Severity,
};
use super::SapBackend;
use crate::constants::{flags, functions, status};
use crate::error::{BackendError, BackendResult};
use crate::models::EquipmentMasterData;

/// Transport that executes one remote function call
#[async_trait]
pub trait RfcCaller: Send + Sync {
    /// Call `function` with named parameters and return its exports and
    /// tables as a JSON object
    async fn call(&self, function: &str, params: Value) -> BackendResult<Value>;

    async fn close(&self) -> BackendResult<()> {
        Ok(())
    }
}

/// [`SapBackend`] over a remote function transport
#[derive(Debug)]
pub struct RfcBackend<C> {
    caller: C,
}

impl<C: RfcCaller> RfcBackend<C> {
    pub fn new(caller: C) -> Self {
        Self { caller }
    }

    pub fn caller(&self) -> &C {
        &self.caller
    }
}

#[async_trait]
impl<C: RfcCaller> SapBackend for RfcBackend<C> {
    async fn equipment_details(&self, equipment_id: &str) -> BackendResult<EquipmentMasterData> {
        let result = self
            .caller
            .call(functions::EQUIPMENT_DETAILS, json!({ "EQUIPMENT": equipment_id }))
            .await?;

        if let Some(message) = return_failure(result.get("RETURN")) {
            return Err(BackendError::rejected(message));
        }

        let data = result
            .get("DATA_GENERAL_EXP")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(EquipmentMasterData {
            plant: first_text(&data, &["PLANPLANT", "MAINTPLANT"]),
            cost_center: first_text(&data, &["COSTCENTER"]),
            company_code: first_text(&data, &["COMPANYCODE", "BUKRS"]),
        })
    }

    async fn cost_center_info(
        &self,
        query: &CostCenterQuery,
    ) -> BackendResult<Vec<CostCenterRecord>> {
        let params = serde_json::to_value(query)
            .map_err(|e| BackendError::malformed(format!("cost center query: {e}")))?;
        let result = self.caller.call(functions::COST_CENTER, params).await?;

        Ok(table(&result, "T_COST_CENTER")
            .iter()
            .filter_map(Value::as_object)
            .map(|record| CostCenterRecord {
                augru: text(record, "AUG"),
                description: text(record, "LTEXT"),
            })
            .collect())
    }

    async fn submit_order(&self, request: &SalesOrderRequest) -> BackendResult<SalesOrderResponse> {
        let params = serde_json::to_value(request)
            .map_err(|e| BackendError::malformed(format!("sales order request: {e}")))?;
        let result = self.caller.call(functions::SALES_ORDER_CREATE, params).await?;

        let order_number = result
            .as_object()
            .map(|exports| text(exports, "SALESDOCUMENT"))
            .unwrap_or_default();

        let messages = table(&result, "RETURN")
            .iter()
            .filter_map(Value::as_object)
            .map(|entry| {
                ReturnMessage::new(
                    Severity::from_code(&text(entry, "TYPE")),
                    text(entry, "MESSAGE"),
                )
            })
            .collect();

        debug!(order_number = %order_number, "Sales order create call returned");

        Ok(SalesOrderResponse {
            order_number,
            messages,
        })
    }

    async fn commit(&self) -> BackendResult<()> {
        let result = self
            .caller
            .call(functions::TRANSACTION_COMMIT, json!({ "WAIT": flags::SET }))
            .await?;

        match return_failure(result.get("RETURN")) {
            Some(message) => Err(BackendError::rejected(message)),
            None => Ok(()),
        }
    }

    async fn customer_locations(&self, partner: &str) -> BackendResult<Vec<DeliveryLocation>> {
        let result = self
            .caller
            .call(
                functions::CUSTOMER_LIST,
                json!({
                    "IDRANGE": [{ "SIGN": "I", "OPTION": "EQ", "LOW": partner }]
                }),
            )
            .await?;

        Ok(table(&result, "ADDRESSDATA")
            .iter()
            .filter_map(Value::as_object)
            .map(|address| DeliveryLocation {
                partner: text(address, "CUSTOMER"),
                name: text(address, "NAME"),
                city: text(address, "CITY"),
            })
            .collect())
    }

    async fn close(&self) -> BackendResult<()> {
        self.caller.close().await
    }
}

/// Trimmed text of a field; numbers are rendered, anything else is empty
fn text(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// First non-empty field among `keys`
fn first_text(record: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text(record, key))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn table<'a>(result: &'a Value, name: &str) -> &'a [Value] {
    result
        .get(name)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Message of an error/abort entry in a `RETURN` structure or table
fn return_failure(ret: Option<&Value>) -> Option<String> {
    let entries: Vec<&Map<String, Value>> = match ret {
        Some(Value::Object(entry)) => vec![entry],
        Some(Value::Array(entries)) => entries.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .find(|entry| Severity::from_code(&text(entry, "TYPE")).is_failure())
        .map(|entry| {
            let message = text(entry, "MESSAGE");
            if message.is_empty() {
                status::UNKNOWN_ERROR.to_string()
            } else {
                message
            }
        })
}
