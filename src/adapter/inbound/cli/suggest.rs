//! Handler for `suggest`.

use crate::adapter::inbound::cli::output;
use crate::application::recommendation::RecommenderService;
use crate::domain::{Basket, ProductId};
use crate::error::Result;
use crate::port::inbound::recommendation::Recommendations;
use crate::port::outbound::affinity::AffinityStore;
use crate::port::outbound::catalog::Catalog;

/// Print the products most often bought with `products`.
///
/// # Errors
/// Returns an error when no products are given.
pub async fn execute<S: AffinityStore, C: Catalog>(
    service: &RecommenderService<S, C>,
    products: &[ProductId],
    limit: Option<usize>,
) -> Result<()> {
    let basket = Basket::try_new(products.iter().copied())?;
    let limit = limit.unwrap_or(service.config().max_results);

    if !service.is_enabled() {
        output::warning("Recommendations are disabled");
        return Ok(());
    }

    let suggestions = service.suggest(&basket.to_vec(), limit).await;
    if suggestions.is_empty() {
        output::warning("No co-purchase data for these products");
        return Ok(());
    }

    output::section("Frequently bought together");
    for (index, product) in suggestions.iter().enumerate() {
        output::product(Some(index + 1), product);
    }
    Ok(())
}
