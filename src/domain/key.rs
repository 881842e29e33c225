//! Store key namespacing.
//!
//! Every co-purchase map lives under a [`StoreKey`]. Persistent keys are
//! derived from a product ID; transient keys hold one query's aggregate and
//! are unique per call so concurrent identical queries never share state.

use std::fmt;

use super::basket::Basket;
use super::id::ProductId;

const AFFINITY_PREFIX: &str = "product:";
const AFFINITY_SUFFIX: &str = ":purchased_with";
const TRANSIENT_PREFIX: &str = "tmp:";

/// Key identifying one score map in the affinity store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey(String);

impl StoreKey {
    /// Key holding all co-purchase data about `product`.
    #[must_use]
    pub fn affinity(product: ProductId) -> Self {
        Self(format!("{AFFINITY_PREFIX}{product}{AFFINITY_SUFFIX}"))
    }

    /// Fresh key for the aggregate of one multi-product query.
    ///
    /// The sorted product list keeps the key readable in the store; the
    /// UUID suffix makes it unique to this call.
    #[must_use]
    pub fn transient(basket: &Basket) -> Self {
        let ids = basket
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("-");
        Self(format!(
            "{TRANSIENT_PREFIX}{ids}:{}",
            uuid::Uuid::new_v4().simple()
        ))
    }

    /// Wrap a raw key read back from a store backend.
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for keys minted by [`StoreKey::transient`].
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.0.starts_with(TRANSIENT_PREFIX)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
