//! Deduplicated product sets.
//!
//! A [`Basket`] is the set of distinct products in one order or one query.
//! Quantities are discarded on construction: a product bought three times in
//! the same order counts once.

use std::collections::BTreeSet;

use super::error::DomainError;
use super::id::ProductId;

/// Sorted, deduplicated set of products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    products: BTreeSet<ProductId>,
}

impl Basket {
    /// Build a basket from any sequence of product IDs, dropping repeats.
    pub fn new(products: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            products: products.into_iter().collect(),
        }
    }

    /// Build a basket that must contain at least one product.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyBasket`] when `products` is empty.
    pub fn try_new(products: impl IntoIterator<Item = ProductId>) -> Result<Self, DomainError> {
        let basket = Self::new(products);
        if basket.is_empty() {
            return Err(DomainError::EmptyBasket);
        }
        Ok(basket)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains(&id)
    }

    /// The only product of a single-product basket.
    #[must_use]
    pub fn single(&self) -> Option<ProductId> {
        if self.products.len() == 1 {
            self.products.first().copied()
        } else {
            None
        }
    }

    /// Products in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.products.iter().copied()
    }

    /// Products in ascending order, collected.
    #[must_use]
    pub fn to_vec(&self) -> Vec<ProductId> {
        self.iter().collect()
    }

    /// Every ordered pair `(a, b)` with `a != b`.
    ///
    /// A basket of `n` products yields `n * (n - 1)` pairs.
    pub fn ordered_pairs(&self) -> impl Iterator<Item = (ProductId, ProductId)> + '_ {
        self.iter()
            .flat_map(move |a| self.iter().filter(move |b| *b != a).map(move |b| (a, b)))
    }
}
