//! Claim-type mapper — bidirectional compaction table for claim-type
//! identifiers.
//!
//! - [`ClaimTypeTable`]: immutable, validated pair of lookup tables
//! - [`ClaimTypeMapper`]: shared holder whose table is swapped atomically

pub mod mapper;
pub mod table;

pub use mapper::ClaimTypeMapper;
pub use table::ClaimTypeTable;
