//! Validated compaction/expansion table pair.

use ct_core::{require_identifier, Claim, CompactionMapping, CtError, Result};
use std::collections::HashMap;

/// Two lookup tables built together from one mapping set.
///
/// Invariant: `expansion` is the exact inverse of `compaction`. Tables are
/// only ever produced by [`ClaimTypeTable::build`] and
/// [`ClaimTypeTable::merged`], which validate a whole set before returning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimTypeTable {
    /// expanded -> compact
    compaction: HashMap<String, String>,
    /// compact -> expanded
    expansion: HashMap<String, String>,
}

impl ClaimTypeTable {
    /// Table with no entries; every lookup passes through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from a mapping set.
    pub fn build<I, M>(mappings: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<CompactionMapping>,
    {
        let mut table = Self::empty();
        table.insert_all(mappings)?;
        Ok(table)
    }

    /// New table over the union of `self` and `additional`. `self` is left
    /// as it was whether or not the merge succeeds.
    pub fn merged<I, M>(&self, additional: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<CompactionMapping>,
    {
        let mut table = self.clone();
        table.insert_all(additional)?;
        Ok(table)
    }

    fn insert_all<I, M>(&mut self, mappings: I) -> Result<()>
    where
        I: IntoIterator<Item = M>,
        M: Into<CompactionMapping>,
    {
        let mappings = mappings.into_iter();
        let (lower, _) = mappings.size_hint();
        self.compaction.reserve(lower);
        self.expansion.reserve(lower);
        for mapping in mappings {
            self.insert(mapping.into())?;
        }
        Ok(())
    }

    fn insert(&mut self, mapping: CompactionMapping) -> Result<()> {
        require_identifier(&mapping.expanded, "expanded claim type")?;
        require_identifier(&mapping.compact, "compact claim type")?;

        if self.compaction.contains_key(&mapping.expanded) {
            return Err(CtError::DuplicateExpandedKey {
                expanded: mapping.expanded,
            });
        }
        if let Some(existing) = self.expansion.get(&mapping.compact) {
            return Err(CtError::AmbiguousCompactAlias {
                compact: mapping.compact,
                existing: existing.clone(),
                expanded: mapping.expanded,
            });
        }

        self.compaction
            .insert(mapping.expanded.clone(), mapping.compact.clone());
        self.expansion.insert(mapping.compact, mapping.expanded);
        Ok(())
    }

    /// Alias for `identifier`, or `identifier` itself when it has none.
    pub fn compact_type<'a>(&'a self, identifier: &'a str) -> Result<&'a str> {
        require_identifier(identifier, "claim type")?;
        Ok(self
            .compaction
            .get(identifier)
            .map(String::as_str)
            .unwrap_or(identifier))
    }

    /// Expanded form of `identifier`, or `identifier` itself when it is not
    /// a known alias.
    pub fn expand_type<'a>(&'a self, identifier: &'a str) -> Result<&'a str> {
        require_identifier(identifier, "claim type")?;
        Ok(self
            .expansion
            .get(identifier)
            .map(String::as_str)
            .unwrap_or(identifier))
    }

    /// Rewrite the claim's type to its alias. All other fields are kept.
    pub fn compact_claim(&self, claim: Claim) -> Result<Claim> {
        Self::rewrite_claim(&self.compaction, claim)
    }

    /// Rewrite the claim's type to its expanded form. All other fields are
    /// kept.
    pub fn expand_claim(&self, claim: Claim) -> Result<Claim> {
        Self::rewrite_claim(&self.expansion, claim)
    }

    /// Expanded form of `identifier`, or `identifier` itself when it is not
    /// a known alias. Blank identifiers are a miss rather than an error, for
    /// reading back identities whose shape was already accepted upstream.
    pub fn expand_passthrough<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.expansion
            .get(identifier)
            .map(String::as_str)
            .unwrap_or(identifier)
    }

    /// Claim counterpart of [`ClaimTypeTable::expand_passthrough`].
    pub fn expand_claim_passthrough(&self, mut claim: Claim) -> Claim {
        if let Some(expanded) = self.expansion.get(&claim.claim_type) {
            claim.claim_type = expanded.clone();
        }
        claim
    }

    fn rewrite_claim(lookup: &HashMap<String, String>, mut claim: Claim) -> Result<Claim> {
        require_identifier(&claim.claim_type, "claim type")?;
        if let Some(mapped) = lookup.get(&claim.claim_type) {
            claim.claim_type = mapped.clone();
        }
        Ok(claim)
    }

    pub fn contains_expanded(&self, identifier: &str) -> bool {
        self.compaction.contains_key(identifier)
    }

    pub fn contains_compact(&self, identifier: &str) -> bool {
        self.expansion.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.compaction.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compaction.is_empty()
    }

    /// Configured pairs sorted by expanded identifier.
    pub fn mappings(&self) -> Vec<CompactionMapping> {
        let mut mappings: Vec<_> = self
            .compaction
            .iter()
            .map(|(expanded, compact)| CompactionMapping::new(expanded.as_str(), compact.as_str()))
            .collect();
        mappings.sort_by(|a, b| a.expanded.cmp(&b.expanded));
        mappings
    }
}
