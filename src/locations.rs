//! Delivery location lookup for a sold-to customer.

use tracing::debug;

use crate::backend::{DeliveryLocation, SapBackend};
use crate::error::{MatreqError, MatreqResult};
use crate::orders::format_partner_number;

/// Ship-to locations registered for `sold_to`
pub async fn delivery_locations(
    backend: &dyn SapBackend,
    sold_to: &str,
) -> MatreqResult<Vec<DeliveryLocation>> {
    let partner = format_partner_number(sold_to);
    if partner.is_empty() {
        return Err(MatreqError::InvalidInput(
            "sold_to parameter required".to_string(),
        ));
    }

    let locations = backend.customer_locations(&partner).await?;
    debug!(partner = %partner, count = locations.len(), "Delivery locations resolved");
    Ok(locations)
}
