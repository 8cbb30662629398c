use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name designator used when an identity is built without an explicit one.
pub const DEFAULT_NAME_CLAIM_TYPE: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
/// Role designator used when an identity is built without an explicit one.
pub const DEFAULT_ROLE_CLAIM_TYPE: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

const STRING_VALUE_TYPE: &str = "http://www.w3.org/2001/XMLSchema#string";
const LOCAL_AUTHORITY: &str = "LOCAL AUTHORITY";

/// A single assertion about an identity.
///
/// Only `claim_type` is subject to compaction; every other field travels
/// through the codec untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
    pub value_type: String,
    pub issuer: String,
    pub original_issuer: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
            value_type: STRING_VALUE_TYPE.into(),
            issuer: LOCAL_AUTHORITY.into(),
            original_issuer: LOCAL_AUTHORITY.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }

    /// Set the issuer; the original issuer follows unless set afterwards.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();
        self.original_issuer = issuer.clone();
        self.issuer = issuer;
        self
    }

    pub fn with_original_issuer(mut self, original_issuer: impl Into<String>) -> Self {
        self.original_issuer = original_issuer.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// An ordered set of claims plus the designators naming which claim type
/// carries the identity's name and which carries its roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub claims: Vec<Claim>,
    pub name_claim_type: String,
    pub role_claim_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Identity {
    pub fn new(claims: Vec<Claim>) -> Self {
        Self {
            claims,
            name_claim_type: DEFAULT_NAME_CLAIM_TYPE.into(),
            role_claim_type: DEFAULT_ROLE_CLAIM_TYPE.into(),
            authentication_type: None,
            label: None,
        }
    }

    pub fn with_designators(
        mut self,
        name_claim_type: impl Into<String>,
        role_claim_type: impl Into<String>,
    ) -> Self {
        self.name_claim_type = name_claim_type.into();
        self.role_claim_type = role_claim_type.into();
        self
    }

    pub fn with_authentication_type(mut self, authentication_type: impl Into<String>) -> Self {
        self.authentication_type = Some(authentication_type.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claims.push(claim);
        self
    }

    /// First claim of the given type, in claim order.
    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.claim_type == claim_type)
    }

    /// Value of the first claim matching the name designator.
    pub fn name(&self) -> Option<&str> {
        self.find_first(&self.name_claim_type).map(|c| c.value.as_str())
    }

    /// Values of every claim matching the role designator.
    pub fn roles(&self) -> Vec<&str> {
        self.claims
            .iter()
            .filter(|c| c.claim_type == self.role_claim_type)
            .map(|c| c.value.as_str())
            .collect()
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// The authenticated subject: an ordered list of identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub identities: Vec<Identity>,
}

impl Principal {
    pub fn new(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    pub fn from_identity(identity: Identity) -> Self {
        Self { identities: vec![identity] }
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identities.push(identity);
        self
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// All claims across all identities, identity order first.
    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.identities.iter().flat_map(|i| i.claims.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl From<Vec<Identity>> for Principal {
    fn from(identities: Vec<Identity>) -> Self {
        Self::new(identities)
    }
}
