//! Plain JSON session token provider.
//!
//! Carries no signature or encryption: meant for tests, benchmarks and local
//! development, or as the inner layer of a provider that seals the bytes.

use crate::provider::{SessionToken, TokenProvider};
use chrono::{DateTime, Duration, Utc};
use ct_core::{Identity, Principal};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Malformed session token: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Session token expired at {valid_to}")]
    Expired { valid_to: DateTime<Utc> },
    #[error("Session token not valid before {valid_from}")]
    NotYetValid { valid_from: DateTime<Utc> },
    #[error("Invalid validity window: {valid_from} is not before {valid_to}")]
    InvalidWindow {
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    },
}

/// Decoded token contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTokenBody {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub endpoint_id: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub identities: Vec<Identity>,
}

/// Serializes principals to JSON and checks the validity window on read.
#[derive(Debug, Clone)]
pub struct JsonTokenProvider {
    pub clock_skew: Duration,
}

impl JsonTokenProvider {
    pub fn new() -> Self {
        Self {
            clock_skew: Duration::minutes(5),
        }
    }

    pub fn with_clock_skew(mut self, skew: Duration) -> Self {
        self.clock_skew = skew;
        self
    }

    /// Decode without checking the validity window.
    pub fn decode(token: &SessionToken) -> Result<SessionTokenBody, TokenError> {
        Ok(serde_json::from_slice(token.as_bytes())?)
    }

    fn check_window(&self, body: &SessionTokenBody, now: DateTime<Utc>) -> Result<(), TokenError> {
        let skew = self.clock_skew.max(Duration::zero());
        let latest = now.checked_add_signed(skew).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let earliest = now.checked_sub_signed(skew).unwrap_or(DateTime::<Utc>::MIN_UTC);
        if latest < body.valid_from {
            return Err(TokenError::NotYetValid {
                valid_from: body.valid_from,
            });
        }
        if earliest > body.valid_to {
            return Err(TokenError::Expired {
                valid_to: body.valid_to,
            });
        }
        Ok(())
    }
}

impl Default for JsonTokenProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenProvider for JsonTokenProvider {
    fn create_token(
        &self,
        principal: &Principal,
        context: Option<&str>,
        endpoint_id: &str,
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    ) -> anyhow::Result<SessionToken> {
        if valid_from >= valid_to {
            return Err(TokenError::InvalidWindow { valid_from, valid_to }.into());
        }
        let body = SessionTokenBody {
            id: Uuid::new_v4(),
            context: context.map(str::to_owned),
            endpoint_id: endpoint_id.to_owned(),
            valid_from,
            valid_to,
            identities: principal.identities.clone(),
        };
        Ok(SessionToken::from_bytes(serde_json::to_vec(&body)?))
    }

    fn validate_token(&self, token: &SessionToken) -> anyhow::Result<Vec<Identity>> {
        let body = Self::decode(token)?;
        self.check_window(&body, Utc::now())?;
        Ok(body.identities)
    }
}
