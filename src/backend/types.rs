//! Request and response payloads exchanged with the ERP backend.
//!
//! Field names serialize to the backend's parameter and structure names so a
//! transport can hand the JSON straight to the remote function.

use serde::{Deserialize, Serialize};

/// Parameters of the cost-center lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostCenterQuery {
    #[serde(rename = "P_COSTCENTER")]
    pub cost_center: String,
    #[serde(rename = "P_SALESORG")]
    pub sales_org: String,
    #[serde(rename = "P_DIST_CHANNEL")]
    pub dist_channel: String,
    #[serde(rename = "P_DIVISION")]
    pub division: String,
    #[serde(rename = "P_CONTROLLING_AREA")]
    pub controlling_area: String,
    #[serde(rename = "P_LANGUAGE")]
    pub language: String,
}

/// One record of the cost-center lookup result table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostCenterRecord {
    pub augru: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderHeader {
    #[serde(rename = "DOC_TYPE")]
    pub document_type: String,
    #[serde(rename = "SALES_ORG")]
    pub sales_org: String,
    #[serde(rename = "DISTR_CHAN")]
    pub dist_channel: String,
    #[serde(rename = "DIVISION")]
    pub division: String,
    #[serde(rename = "PURCH_NO_C")]
    pub purchase_order_ref: String,
    #[serde(rename = "ORD_REASON", skip_serializing_if = "Option::is_none")]
    pub order_reason: Option<String>,
}

/// Change indicators for [`OrderHeader`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderHeaderFlags {
    #[serde(rename = "UPDATEFLAG")]
    pub update_flag: String,
    #[serde(rename = "DOC_TYPE")]
    pub document_type: String,
    #[serde(rename = "SALES_ORG")]
    pub sales_org: String,
    #[serde(rename = "DISTR_CHAN")]
    pub dist_channel: String,
    #[serde(rename = "DIVISION")]
    pub division: String,
    #[serde(rename = "PURCH_NO_C")]
    pub purchase_order_ref: String,
    #[serde(rename = "ORD_REASON", skip_serializing_if = "Option::is_none")]
    pub order_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPartner {
    #[serde(rename = "PARTN_ROLE")]
    pub role: String,
    #[serde(rename = "PARTN_NUMB")]
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    #[serde(rename = "ITM_NUMBER")]
    pub item_number: String,
    #[serde(rename = "MATERIAL")]
    pub material: String,
    #[serde(rename = "PLANT")]
    pub plant: String,
    #[serde(rename = "TARGET_QTY")]
    pub target_quantity: f64,
    /// Equipment reference
    #[serde(rename = "REF_1")]
    pub reference: String,
    #[serde(rename = "BATCH", skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemFlags {
    #[serde(rename = "ITM_NUMBER")]
    pub item_number: String,
    #[serde(rename = "UPDATEFLAG")]
    pub update_flag: String,
    #[serde(rename = "MATERIAL")]
    pub material: String,
    #[serde(rename = "PLANT")]
    pub plant: String,
    #[serde(rename = "TARGET_QTY")]
    pub target_quantity: String,
    #[serde(rename = "REF_1")]
    pub reference: String,
    #[serde(rename = "BATCH", skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleLine {
    #[serde(rename = "ITM_NUMBER")]
    pub item_number: String,
    #[serde(rename = "SCHED_LINE")]
    pub schedule_line: String,
    #[serde(rename = "REQ_QTY")]
    pub requested_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleLineFlags {
    #[serde(rename = "ITM_NUMBER")]
    pub item_number: String,
    #[serde(rename = "SCHED_LINE")]
    pub schedule_line: String,
    #[serde(rename = "UPDATEFLAG")]
    pub update_flag: String,
    #[serde(rename = "REQ_QTY")]
    pub requested_quantity: String,
}

/// Complete create-order call for one order group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesOrderRequest {
    #[serde(rename = "ORDER_HEADER_IN")]
    pub header: OrderHeader,
    #[serde(rename = "ORDER_HEADER_INX")]
    pub header_flags: OrderHeaderFlags,
    #[serde(rename = "ORDER_PARTNERS")]
    pub partners: Vec<OrderPartner>,
    #[serde(rename = "ORDER_ITEMS_IN")]
    pub items: Vec<OrderItem>,
    #[serde(rename = "ORDER_ITEMS_INX")]
    pub item_flags: Vec<OrderItemFlags>,
    #[serde(rename = "ORDER_SCHEDULES_IN")]
    pub schedules: Vec<ScheduleLine>,
    #[serde(rename = "ORDER_SCHEDULES_INX")]
    pub schedule_flags: Vec<ScheduleLineFlags>,
}

/// Message severity of a backend return entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Warning,
    Information,
    Error,
    Abort,
    Unknown,
}

impl Severity {
    /// Map a one-letter message type (`S`, `W`, `I`, `E`, `A`)
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "S" => Severity::Success,
            "W" => Severity::Warning,
            "I" => Severity::Information,
            "E" => Severity::Error,
            "A" => Severity::Abort,
            _ => Severity::Unknown,
        }
    }

    /// Error and abort messages fail the call
    pub fn is_failure(&self) -> bool {
        matches!(self, Severity::Error | Severity::Abort)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnMessage {
    pub severity: Severity,
    pub text: String,
}

impl ReturnMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesOrderResponse {
    pub order_number: String,
    pub messages: Vec<ReturnMessage>,
}

impl SalesOrderResponse {
    pub fn created(order_number: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into(),
            messages: Vec::new(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            order_number: String::new(),
            messages: vec![ReturnMessage::error(message)],
        }
    }

    pub fn with_message(mut self, message: ReturnMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// First error or abort message, if any
    pub fn first_failure(&self) -> Option<&ReturnMessage> {
        self.messages.iter().find(|m| m.severity.is_failure())
    }
}

/// Ship-to location of a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryLocation {
    pub partner: String,
    pub name: String,
    pub city: String,
}
