//! Ranked affinity entries.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::id::ProductId;

/// One ranked entry of an affinity map: a product and its co-purchase score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Suggestion {
    pub product: ProductId,
    pub score: u64,
}

impl Suggestion {
    #[must_use]
    pub const fn new(product: ProductId, score: u64) -> Self {
        Self { product, score }
    }

    /// Rank order: score descending, then product ascending.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.product.cmp(&other.product))
    }
}

/// Sort a score map into rank order and keep the top `limit` entries.
#[must_use]
pub fn top_k(scores: HashMap<ProductId, u64>, limit: usize) -> Vec<Suggestion> {
    let mut ranked: Vec<Suggestion> = scores
        .into_iter()
        .map(|(product, score)| Suggestion::new(product, score))
        .collect();
    ranked.sort_by(Suggestion::rank_cmp);
    ranked.truncate(limit);
    ranked
}
