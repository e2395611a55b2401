// === PUBLIC CONTRACT ===
// Only the contract module should be public for other modules to consume
pub mod contract;

pub use contract::{error, model};

// === MODULE WIRING ===
pub mod module;
pub use module::GreenlightData;

// === INTERNAL MODULES ===
// Exposed for transport adapters and tests. Prefer `contract` for stable APIs.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
