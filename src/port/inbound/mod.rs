//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`recommendation`]: Co-purchase recording and suggestion use cases
//!   driven by order completion, page renders and the CLI.

pub mod recommendation;
