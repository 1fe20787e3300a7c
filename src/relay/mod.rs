//! Time-estimate relay: upstream LLM client, reply parsing and the HTTP
//! server wrapping both.

pub mod client;
pub mod error;
pub mod estimate;
pub mod server;

pub use client::estimate_blocking;
pub use error::RelayError;
pub use estimate::{fallback_estimate, Estimate};
pub use server::run_server;
