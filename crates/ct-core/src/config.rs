//! Mapping configuration — turns a configuration document into plain
//! (expanded, compact) pairs.

use crate::error::{CtError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One expanded claim type and the alias it compacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompactionMapping {
    pub expanded: String,
    pub compact: String,
}

impl CompactionMapping {
    pub fn new(expanded: impl Into<String>, compact: impl Into<String>) -> Self {
        Self {
            expanded: expanded.into(),
            compact: compact.into(),
        }
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for CompactionMapping {
    fn from((expanded, compact): (A, B)) -> Self {
        Self::new(expanded, compact)
    }
}

/// Raw `from`/`to` entry as it appears in a configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// Claim-type mapping section of the host configuration.
///
/// ```json
/// { "claimTypes": [ { "from": "http://.../upn", "to": "upn" } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingConfig {
    #[serde(default)]
    pub claim_types: Vec<MappingEntry>,
}

impl MappingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|e| match e {
            CtError::Serialization(err) => {
                CtError::Config(format!("{}: {}", path.display(), err))
            }
            other => other,
        })
    }

    pub fn from_mappings(mappings: &[CompactionMapping]) -> Self {
        Self {
            claim_types: mappings
                .iter()
                .map(|m| MappingEntry {
                    from: Some(m.expanded.clone()),
                    to: Some(m.compact.clone()),
                })
                .collect(),
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Usable pairs in document order. Entries with a missing or blank
    /// `from` or `to` are skipped.
    pub fn to_mappings(&self) -> Vec<CompactionMapping> {
        let mut mappings = Vec::with_capacity(self.claim_types.len());
        for (idx, entry) in self.claim_types.iter().enumerate() {
            let from = entry.from.as_deref().map(str::trim).filter(|s| !s.is_empty());
            let to = entry.to.as_deref().map(str::trim).filter(|s| !s.is_empty());
            match (from, to) {
                (Some(from), Some(to)) => mappings.push(CompactionMapping::new(from, to)),
                _ => tracing::warn!(
                    index = idx,
                    from = ?entry.from,
                    to = ?entry.to,
                    "skipping claim type mapping without both from and to"
                ),
            }
        }
        mappings
    }
}
