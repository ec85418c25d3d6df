//! Host-SPI subsystem
//!
//! The fixed provider callback set a host engine binds to, plus the concrete
//! implementation wiring compiler, planner, and executor together.

mod errors;
mod provider;

pub use errors::{ProviderError, ProviderResult};
pub use provider::{AdminOps, SearchIndexProvider, TableProvider};
