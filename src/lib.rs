//! searchgate - predicate-pushdown federation adapter for search-index clusters
//!
//! Lets a SQL-style host engine push filter predicates down into a remote
//! search cluster and stream matching rows back, split by split:
//!
//! 1. [`query`] compiles per-column constraints into one merged query document
//! 2. [`split`] plans the scan into opaque, resumable split descriptors
//! 3. [`scan`] executes one split as a paged scroll/scan session
//!
//! The cluster itself sits behind the [`client::SearchClient`] trait; hosts
//! bind to the [`provider::TableProvider`] SPI.

pub mod client;
pub mod config;
pub mod observability;
pub mod provider;
pub mod query;
pub mod scan;
pub mod split;
