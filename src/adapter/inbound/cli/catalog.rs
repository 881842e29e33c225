//! Handlers for `catalog add` and `catalog list`.

use crate::adapter::inbound::cli::command::CatalogAddArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::Product;
use crate::error::Result;
use crate::infrastructure::bootstrap::open_catalog;
use crate::infrastructure::config::settings::Config;

/// Build the product described by `catalog add` arguments.
#[must_use]
pub fn product_from_args(args: CatalogAddArgs) -> Product {
    let mut product = Product::new(args.id, args.name, args.price);
    if let Some(slug) = args.slug {
        product = product.with_slug(slug);
    }
    if args.unavailable {
        product = product.unavailable();
    }
    product
}

/// Add or replace a product.
///
/// # Errors
/// Returns an error if the catalog cannot be opened or written.
pub fn execute_add(config: &Config, args: CatalogAddArgs) -> Result<()> {
    let catalog = open_catalog(&config.store)?;
    let product = product_from_args(args);

    catalog.save(product.clone())?;

    output::success(&format!("Saved product {}", product.id));
    output::product(None, &product);
    Ok(())
}

/// List every product.
///
/// # Errors
/// Returns an error if the catalog cannot be opened or read.
pub async fn execute_list(config: &Config) -> Result<()> {
    let catalog = open_catalog(&config.store)?;
    let products = catalog.list().await?;

    output::section("Catalog");
    for product in &products {
        output::product(None, product);
    }
    output::count("Products", products.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductId;
    use rust_decimal_macros::dec;

    fn args() -> CatalogAddArgs {
        CatalogAddArgs {
            id: ProductId::new(7),
            name: "Cast Iron Teapot".into(),
            price: dec!(42.50),
            slug: None,
            unavailable: false,
        }
    }

    #[test]
    fn derives_slug_from_name() {
        let product = product_from_args(args());

        assert_eq!(product.slug, "cast-iron-teapot");
        assert!(product.available);
    }

    #[test]
    fn explicit_slug_and_availability_win() {
        let product = product_from_args(CatalogAddArgs {
            slug: Some("teapot".into()),
            unavailable: true,
            ..args()
        });

        assert_eq!(product.slug, "teapot");
        assert!(!product.available);
    }
}
