//! Infrastructure layer.
//!
//! Configuration loading, logging setup, backend selection and service
//! wiring.

pub mod backend;
pub mod bootstrap;
pub mod config;
