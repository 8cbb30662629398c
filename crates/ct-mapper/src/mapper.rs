//! Shared claim-type mapper with atomic whole-table replacement.

use crate::table::ClaimTypeTable;
use ct_core::{Claim, CompactionMapping, MappingConfig, Result};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug)]
struct Live {
    table: Arc<ClaimTypeTable>,
    generation: u64,
}

/// Claim-type compaction codec shared across concurrent token requests.
///
/// Lookups clone the current table `Arc` under a short read lock and run
/// against that snapshot. `add_mappings` and `replace_mappings` validate a
/// complete new table before swapping it in, so readers observe either the
/// old pair of tables or the new one, never a mix.
#[derive(Debug)]
pub struct ClaimTypeMapper {
    live: RwLock<Live>,
}

impl ClaimTypeMapper {
    pub fn new<I, M>(mappings: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<CompactionMapping>,
    {
        let table = ClaimTypeTable::build(mappings)?;
        tracing::debug!(entries = table.len(), "claim type mapper built");
        Ok(Self::from_table(table))
    }

    pub fn from_table(table: ClaimTypeTable) -> Self {
        Self {
            live: RwLock::new(Live {
                table: Arc::new(table),
                generation: 0,
            }),
        }
    }

    pub fn from_config(config: &MappingConfig) -> Result<Self> {
        Self::new(config.to_mappings())
    }

    /// Merge more pairs into the mapper. On error nothing changes.
    pub fn add_mappings<I, M>(&self, additional: I) -> Result<()>
    where
        I: IntoIterator<Item = M>,
        M: Into<CompactionMapping>,
    {
        let additional: Vec<CompactionMapping> = additional.into_iter().map(Into::into).collect();
        let mut live = self.live.write();
        let next = live.table.merged(additional)?;
        Self::swap(&mut live, next, "claim type mappings added");
        Ok(())
    }

    /// Replace every pair. The new set is validated in full before the
    /// swap; on error the previous table stays live.
    pub fn replace_mappings<I, M>(&self, mappings: I) -> Result<()>
    where
        I: IntoIterator<Item = M>,
        M: Into<CompactionMapping>,
    {
        let next = ClaimTypeTable::build(mappings)?;
        let mut live = self.live.write();
        Self::swap(&mut live, next, "claim type mappings replaced");
        Ok(())
    }

    pub fn replace_from_config(&self, config: &MappingConfig) -> Result<()> {
        self.replace_mappings(config.to_mappings())
    }

    fn swap(live: &mut Live, next: ClaimTypeTable, message: &'static str) {
        live.table = Arc::new(next);
        live.generation += 1;
        tracing::debug!(
            entries = live.table.len(),
            generation = live.generation,
            "{}",
            message
        );
    }

    /// Current table generation, for use across a whole principal.
    pub fn snapshot(&self) -> Arc<ClaimTypeTable> {
        Arc::clone(&self.live.read().table)
    }

    /// Number of successful add/replace operations since construction.
    pub fn generation(&self) -> u64 {
        self.live.read().generation
    }

    pub fn compact_type(&self, identifier: &str) -> Result<String> {
        self.snapshot().compact_type(identifier).map(str::to_owned)
    }

    pub fn expand_type(&self, identifier: &str) -> Result<String> {
        self.snapshot().expand_type(identifier).map(str::to_owned)
    }

    pub fn compact_claim(&self, claim: Claim) -> Result<Claim> {
        self.snapshot().compact_claim(claim)
    }

    pub fn expand_claim(&self, claim: Claim) -> Result<Claim> {
        self.snapshot().expand_claim(claim)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn mappings(&self) -> Vec<CompactionMapping> {
        self.snapshot().mappings()
    }
}

impl Default for ClaimTypeMapper {
    fn default() -> Self {
        Self::from_table(ClaimTypeTable::empty())
    }
}
