//! Handler for `clear`.

use crate::adapter::inbound::cli::output;
use crate::domain::ProductId;
use crate::error::Result;
use crate::port::inbound::recommendation::Recommendations;

/// Clear the given products' scores, or every catalog product's.
pub async fn execute<R: Recommendations>(service: &R, products: &[ProductId]) -> Result<()> {
    if !service.is_enabled() {
        output::warning("Recommendations are disabled, nothing cleared");
        return Ok(());
    }

    let cleared = if products.is_empty() {
        service.clear_catalog().await
    } else {
        service.clear_all(products).await
    };

    output::count("Cleared", cleared);
    output::success("Affinity data cleared");
    Ok(())
}
