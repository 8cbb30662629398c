//! Claim-type compaction core — data model, configuration and errors shared
//! by the mapper and the session token adapter.

pub mod claims;
pub mod config;
pub mod error;

pub use claims::{Claim, Identity, Principal, DEFAULT_NAME_CLAIM_TYPE, DEFAULT_ROLE_CLAIM_TYPE};
pub use config::{CompactionMapping, MappingConfig, MappingEntry};
pub use error::{CtError, Result};

/// Reject empty or all-whitespace identifiers.
#[doc(hidden)]
pub fn require_identifier(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CtError::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
