//! Split Planner subsystem
//!
//! Turns one compiled query into one or more resumable scan units. A split
//! descriptor is opaque and self-contained: its framed scan request can be
//! handed to an executor in another process and decoded byte-identically.

mod codec;
mod descriptor;
mod errors;
mod planner;
mod request;

pub use codec::{checksum, decode_frame, encode_frame, CodecError, CodecResult};
pub use descriptor::{SplitDescriptor, TableIdentity};
pub use errors::{PlanError, PlanResult};
pub use planner::SplitPlanner;
pub use request::{ScanRequest, WIRE_VERSION};
