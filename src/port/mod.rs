//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!        CLI ───────▶│  Recommendations        │
//!                    │  (application service)  │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌─────────────┐               ┌─────────────┐
//!          │AffinityStore│               │   Catalog   │
//!          │   Adapter   │               │   Adapter   │
//!          └─────────────┘               └─────────────┘
//! ```

pub mod inbound;
pub mod outbound;
