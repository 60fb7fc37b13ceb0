//! Row status carried through the pipeline.
//!
//! On the wire a status is plain text (`""`, `"Ready"`, `"Created"`,
//! `"Error: <reason>"`) so the web layer and spreadsheet exports can show it
//! as-is. Inside the crate it is an enum so eligibility checks never depend on
//! string matching scattered across modules.

use crate::constants::status;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RowStatus {
    /// Not yet enriched
    #[default]
    Pending,
    /// Enriched and eligible for order creation
    Ready,
    /// Part of a sales order the backend created
    Created,
    /// Terminal failure with its reason
    Failed(String),
    /// Status text this crate does not produce, kept verbatim
    Other(String),
}

impl RowStatus {
    pub fn failed(reason: impl Into<String>) -> Self {
        RowStatus::Failed(reason.into())
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RowStatus::Failed(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            RowStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStatus::Pending => Ok(()),
            RowStatus::Ready => f.write_str(status::READY),
            RowStatus::Created => f.write_str(status::CREATED),
            RowStatus::Failed(reason) => write!(f, "{}{reason}", status::ERROR_PREFIX),
            RowStatus::Other(text) => f.write_str(text),
        }
    }
}

impl From<String> for RowStatus {
    fn from(text: String) -> Self {
        match text.as_str() {
            "" => RowStatus::Pending,
            status::READY => RowStatus::Ready,
            status::CREATED => RowStatus::Created,
            _ => match text.strip_prefix(status::ERROR_PREFIX) {
                Some(reason) => RowStatus::Failed(reason.to_string()),
                None => RowStatus::Other(text),
            },
        }
    }
}

impl From<RowStatus> for String {
    fn from(status: RowStatus) -> Self {
        status.to_string()
    }
}
