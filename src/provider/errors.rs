//! Provider error type
//!
//! Unified error surface for the host-facing SPI, wrapping the subsystem
//! taxonomies without flattening them: the host can still read each
//! subsystem's error code.

use thiserror::Error;

use crate::client::ClientError;
use crate::query::PredicateError;
use crate::scan::ScanError;
use crate::split::PlanError;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Host-facing provider errors
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Predicate compilation failed
    #[error(transparent)]
    Predicate(#[from] PredicateError),

    /// Split planning failed
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Split execution failed
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A cluster call outside the plan/scan path failed
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ProviderError {
    /// Returns the wrapped subsystem's error code
    pub fn code(&self) -> &'static str {
        match self {
            ProviderError::Predicate(e) => e.code(),
            ProviderError::Plan(e) => e.code(),
            ProviderError::Scan(e) => e.code(),
            ProviderError::Client(ClientError::Mapping { .. }) => "MAPPING_ERROR",
            ProviderError::Client(_) => "IO_ERROR",
        }
    }
}
