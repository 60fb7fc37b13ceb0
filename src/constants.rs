//! # Pipeline Constants
//!
//! Field widths, backend function names and fixed codes used when talking to
//! the ERP backend. Business values that differ per deployment (distribution
//! channel, division, document type ...) live in [`crate::config`] instead.

/// Row status texts
pub mod status {
    pub const READY: &str = "Ready";
    pub const CREATED: &str = "Created";
    pub const ERROR_PREFIX: &str = "Error: ";

    pub const NO_EQUIPMENT_ID: &str = "No Equipment ID";
    pub const NO_ORDER_NUMBER: &str = "No sales order number returned";
    pub const UNKNOWN_ERROR: &str = "Unknown error";
}

/// Fixed widths of backend key fields
pub mod widths {
    pub const EQUIPMENT_ID: usize = 18;
    pub const COST_CENTER: usize = 10;
    pub const PARTNER_NUMBER: usize = 10;
    pub const ITEM_NUMBER: usize = 6;
    pub const SALES_AREA_CODE: usize = 2;
    pub const PURCHASE_ORDER_REF: usize = 35;
    pub const EQUIPMENT_REF: usize = 12;
}

/// Backend function modules
pub mod functions {
    pub const EQUIPMENT_DETAILS: &str = "BAPI_EQUI_DETAILS";
    pub const COST_CENTER: &str = "Z_MATREQ_COST_CENTER";
    pub const SALES_ORDER_CREATE: &str = "BAPI_SALESORDER_CREATEFROMDAT2";
    pub const TRANSACTION_COMMIT: &str = "BAPI_TRANSACTION_COMMIT";
    pub const CUSTOMER_LIST: &str = "BAPI_CUSTOMER_GETLIST";
}

/// Partner roles on a sales order
pub mod partner_roles {
    pub const SOLD_TO: &str = "AG";
    pub const SHIP_TO: &str = "WE";
}

/// Change indicator values
pub mod flags {
    pub const SET: &str = "X";
    pub const INSERT: &str = "I";
}

pub const ITEM_NUMBER_STEP: u32 = 10;
pub const FIRST_SCHEDULE_LINE: &str = "0001";
