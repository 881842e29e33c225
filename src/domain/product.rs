//! Catalog product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product as returned by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// URL-friendly identifier used by the storefront.
    pub slug: String,
    pub price: Decimal,
    pub available: bool,
}

impl Product {
    /// Create an available product, deriving the slug from the name.
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            id,
            name,
            slug,
            price,
            available: true,
        }
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// Lowercase ASCII slug with runs of other characters collapsed to `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Green Tea  (Loose Leaf)"), "green-tea-loose-leaf");
        assert_eq!(slugify("  --Mug--"), "mug");
    }

    #[test]
    fn new_product_is_available_with_derived_slug() {
        let product = Product::new(ProductId::new(1), "Black Tea", dec!(4.50));
        assert!(product.available);
        assert_eq!(product.slug, "black-tea");
        assert!(!product.unavailable().available);
    }
}
