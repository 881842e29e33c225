//! Domain validation errors.
//!
//! These errors are returned where a caller-facing API requires input the
//! engine itself would otherwise treat as "no signal".

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Product identifiers are unsigned integers.
    #[error("invalid product id '{value}'")]
    InvalidProductId {
        /// The text that failed to parse.
        value: String,
    },

    /// The operation needs at least one product.
    #[error("basket must contain at least one product")]
    EmptyBasket,
}
