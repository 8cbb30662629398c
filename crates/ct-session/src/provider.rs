use chrono::{DateTime, Utc};
use ct_core::{Identity, Principal};
use std::sync::Arc;

/// Serialized session token. Its contents belong to the provider that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(Vec<u8>);

impl SessionToken {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for SessionToken {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Produces session tokens from principals and recovers identities from
/// tokens. Format, signing and encryption are entirely up to the
/// implementation.
pub trait TokenProvider: Send + Sync {
    /// Serialize `principal` into a token valid for `endpoint_id` between
    /// `valid_from` and `valid_to`.
    fn create_token(
        &self,
        principal: &Principal,
        context: Option<&str>,
        endpoint_id: &str,
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    ) -> anyhow::Result<SessionToken>;

    /// Read a token back. Fails for malformed, expired or tampered tokens.
    fn validate_token(&self, token: &SessionToken) -> anyhow::Result<Vec<Identity>>;
}

impl<P: TokenProvider + ?Sized> TokenProvider for Arc<P> {
    fn create_token(
        &self,
        principal: &Principal,
        context: Option<&str>,
        endpoint_id: &str,
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    ) -> anyhow::Result<SessionToken> {
        (**self).create_token(principal, context, endpoint_id, valid_from, valid_to)
    }

    fn validate_token(&self, token: &SessionToken) -> anyhow::Result<Vec<Identity>> {
        (**self).validate_token(token)
    }
}

impl<P: TokenProvider + ?Sized> TokenProvider for Box<P> {
    fn create_token(
        &self,
        principal: &Principal,
        context: Option<&str>,
        endpoint_id: &str,
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    ) -> anyhow::Result<SessionToken> {
        (**self).create_token(principal, context, endpoint_id, valid_from, valid_to)
    }

    fn validate_token(&self, token: &SessionToken) -> anyhow::Result<Vec<Identity>> {
        (**self).validate_token(token)
    }
}
