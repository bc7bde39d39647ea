//! Terrapin API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! the liveness watchdog) so integration tests and the binary entrypoint
//! can both use them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod watchdog;
