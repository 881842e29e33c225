//! Handler for `record`.

use crate::adapter::inbound::cli::output;
use crate::domain::{Basket, ProductId};
use crate::error::Result;
use crate::port::inbound::recommendation::Recommendations;

/// Record one completed order.
///
/// # Errors
/// Returns [`DomainError::EmptyBasket`](crate::domain::DomainError::EmptyBasket)
/// when no products are given.
pub async fn execute<R: Recommendations>(service: &R, products: &[ProductId]) -> Result<()> {
    let basket = Basket::try_new(products.iter().copied())?;

    if !service.is_enabled() {
        output::warning("Recommendations are disabled, order not recorded");
        return Ok(());
    }

    service.record_co_purchase(&basket.to_vec()).await;

    output::success(&format!("Recorded order of {} products", basket.len()));
    output::count("Pairs", basket.len() * (basket.len() - 1));
    Ok(())
}
