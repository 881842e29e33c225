//! Store-agnostic domain types for the co-purchase index.

pub mod basket;
pub mod error;
pub mod id;
pub mod key;
pub mod product;
pub mod suggestion;

pub use basket::Basket;
pub use error::DomainError;
pub use id::ProductId;
pub use key::StoreKey;
pub use product::Product;
pub use suggestion::Suggestion;
