//! # Order Grouping and Creation
//!
//! Second pipeline stage. Enriched rows are partitioned by
//! `(augru, sold_to, ship_to)`, each group becomes one create-order request,
//! and the backend's answer is written back onto every row of the group.

pub mod builder;
pub mod creator;
pub mod grouping;

pub use builder::{format_partner_number, item_number, GroupOrder, OrderRequestBuilder};
pub use creator::{OrderCreationSummary, OrderCreator};
pub use grouping::{group_rows, GroupKey, OrderGroup};
