//! Adapters connecting the application to the outside world.
//!
//! - [`inbound`]: The `affinity` command line
//! - [`outbound`]: Affinity store and catalog implementations

pub mod inbound;
pub mod outbound;
