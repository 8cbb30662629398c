//! Compacting decorator around a [`TokenProvider`].

use crate::provider::{SessionToken, TokenProvider};
use chrono::{DateTime, Utc};
use ct_core::{require_identifier, CompactionMapping, CtError, Identity, MappingConfig, Principal, Result};
use ct_mapper::{ClaimTypeMapper, ClaimTypeTable};
use std::sync::Arc;

/// Rewrites claim types to their aliases on the way into a token and back
/// to their expanded form on the way out.
///
/// Create and validate are exact inverses for claim types as long as both
/// run against the same mapping generation.
pub struct CompactingTokenAdapter<P> {
    provider: P,
    mapper: Arc<ClaimTypeMapper>,
}

impl<P: TokenProvider> CompactingTokenAdapter<P> {
    pub fn new(provider: P, mapper: Arc<ClaimTypeMapper>) -> Self {
        Self { provider, mapper }
    }

    pub fn with_mappings<I, M>(provider: P, mappings: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<CompactionMapping>,
    {
        Ok(Self::new(provider, Arc::new(ClaimTypeMapper::new(mappings)?)))
    }

    pub fn from_config(provider: P, config: &MappingConfig) -> Result<Self> {
        Ok(Self::new(provider, Arc::new(ClaimTypeMapper::from_config(config)?)))
    }

    pub fn mapper(&self) -> &Arc<ClaimTypeMapper> {
        &self.mapper
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Swap in the mappings from a reloaded configuration. Tokens issued
    /// under the previous mappings keep whatever aliases they carry.
    pub fn reload(&self, config: &MappingConfig) -> Result<()> {
        self.mapper.replace_from_config(config)
    }

    /// Compact every identity of `principal` and hand it to the provider.
    pub fn create_session_token(
        &self,
        principal: &Principal,
        context: Option<&str>,
        endpoint_id: &str,
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    ) -> Result<SessionToken> {
        require_identifier(endpoint_id, "endpoint id")?;

        let table = self.mapper.snapshot();
        let identities = principal
            .identities
            .iter()
            .map(|identity| compact_identity(&table, identity))
            .collect::<Result<Vec<_>>>()?;
        let compacted = Principal::new(identities);

        let token = self
            .provider
            .create_token(&compacted, context, endpoint_id, valid_from, valid_to)?;
        tracing::trace!(
            endpoint_id,
            identities = compacted.identities.len(),
            bytes = token.len(),
            "session token created"
        );
        Ok(token)
    }

    /// Let the provider read `token`, then expand every identity it returns.
    pub fn validate_session_token(&self, token: &SessionToken) -> Result<Vec<Identity>> {
        if token.is_empty() {
            return Err(CtError::InvalidArgument("session token must not be empty".into()));
        }

        let identities = self.provider.validate_token(token)?;
        let table = self.mapper.snapshot();
        let expanded = identities
            .into_iter()
            .map(|identity| expand_identity(&table, identity))
            .collect::<Vec<_>>();
        tracing::trace!(identities = expanded.len(), "session token validated");
        Ok(expanded)
    }
}

fn compact_identity(table: &ClaimTypeTable, identity: &Identity) -> Result<Identity> {
    let claims = identity
        .claims
        .iter()
        .cloned()
        .map(|claim| table.compact_claim(claim))
        .collect::<Result<Vec<_>>>()?;
    Ok(Identity {
        claims,
        name_claim_type: table.compact_type(&identity.name_claim_type)?.to_owned(),
        role_claim_type: table.compact_type(&identity.role_claim_type)?.to_owned(),
        authentication_type: identity.authentication_type.clone(),
        label: identity.label.clone(),
    })
}

/// Identities already accepted by the provider are never rejected here:
/// blank types are left as they are.
fn expand_identity(table: &ClaimTypeTable, identity: Identity) -> Identity {
    let Identity {
        claims,
        name_claim_type,
        role_claim_type,
        authentication_type,
        label,
    } = identity;
    let claims = claims
        .into_iter()
        .map(|claim| table.expand_claim_passthrough(claim))
        .collect();
    Identity {
        claims,
        name_claim_type: table.expand_passthrough(&name_claim_type).to_owned(),
        role_claim_type: table.expand_passthrough(&role_claim_type).to_owned(),
        authentication_type,
        label,
    }
}

impl<P: TokenProvider> TokenProvider for CompactingTokenAdapter<P> {
    fn create_token(
        &self,
        principal: &Principal,
        context: Option<&str>,
        endpoint_id: &str,
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    ) -> anyhow::Result<SessionToken> {
        self.create_session_token(principal, context, endpoint_id, valid_from, valid_to)
            .map_err(into_anyhow)
    }

    fn validate_token(&self, token: &SessionToken) -> anyhow::Result<Vec<Identity>> {
        self.validate_session_token(token).map_err(into_anyhow)
    }
}

/// Provider failures go back out exactly as they came in.
fn into_anyhow(err: CtError) -> anyhow::Error {
    match err {
        CtError::Provider(inner) => inner,
        other => other.into(),
    }
}
