//! Scan Executor subsystem
//!
//! Runs one split as a cursor-based paging protocol over a server-side scan
//! session: open, pull pages until an empty one, close. One session per
//! split, one sequential owner per session, no retries.

mod errors;
mod executor;
mod row;
mod stream;

pub use errors::{ScanError, ScanResult};
pub use executor::ScanExecutor;
pub use row::ScanRow;
pub use stream::{DocumentStream, StreamState};
