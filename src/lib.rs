//! Affinity - product co-purchase recommendations.
//!
//! Records which products are bought together and answers "customers who
//! bought these also bought..." queries from per-product score maps.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Product IDs, baskets, store keys, suggestions
//! - **`port`** - The `Recommendations` use-case trait and the
//!   `AffinityStore` / `Catalog` traits the service depends on
//! - **`application`** - `RecommenderService`, which fails open: an
//!   unreachable store disables it, a failed call yields an empty result
//! - **`adapter`** - In-memory and SQLite stores and catalogs, and the CLI
//! - **`infrastructure`** - TOML configuration, logging, backend wiring
//!
//! # Example
//!
//! ```no_run
//! use affinity::adapter::outbound::memory::{MemoryAffinityStore, MemoryCatalog};
//! use affinity::application::recommendation::{RecommenderConfig, RecommenderService};
//! use affinity::domain::ProductId;
//! use affinity::port::inbound::recommendation::Recommendations;
//!
//! # async fn demo() {
//! let service = RecommenderService::connect(
//!     MemoryAffinityStore::new(),
//!     MemoryCatalog::new(),
//!     RecommenderConfig::default(),
//! )
//! .await;
//!
//! let order = [ProductId::new(1), ProductId::new(2)];
//! service.record_co_purchase(&order).await;
//! let ranked = service.suggest_ids(&[ProductId::new(1)], 4).await;
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
