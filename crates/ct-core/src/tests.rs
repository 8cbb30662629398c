use crate::*;
use std::io::Write;

const UPN: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/upn";
const NAME_ID: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";

// ========== Claims ==========

#[test]
fn test_claim_defaults() {
    let claim = Claim::new(UPN, "bob@example.com");
    assert_eq!(claim.claim_type, UPN);
    assert_eq!(claim.issuer, claim.original_issuer);
    assert!(claim.properties.is_empty());
}

#[test]
fn test_claim_issuer_builders() {
    let claim = Claim::new(UPN, "bob")
        .with_issuer("sts")
        .with_original_issuer("upstream-idp")
        .with_value_type("urn:custom")
        .with_property("k", "v");
    assert_eq!(claim.issuer, "sts");
    assert_eq!(claim.original_issuer, "upstream-idp");
    assert_eq!(claim.value_type, "urn:custom");
    assert_eq!(claim.properties.get("k").map(String::as_str), Some("v"));
}

#[test]
fn test_claim_serializes_type_field() {
    let json = serde_json::to_value(Claim::new("t", "v")).unwrap();
    assert_eq!(json["type"], "t");
    assert!(json.get("properties").is_none());
}

#[test]
fn test_identity_default_designators() {
    let identity = Identity::default();
    assert_eq!(identity.name_claim_type, DEFAULT_NAME_CLAIM_TYPE);
    assert_eq!(identity.role_claim_type, DEFAULT_ROLE_CLAIM_TYPE);
}

#[test]
fn test_identity_name_and_roles() {
    let identity = Identity::new(vec![
        Claim::new(DEFAULT_ROLE_CLAIM_TYPE, "admin"),
        Claim::new(DEFAULT_NAME_CLAIM_TYPE, "bob"),
        Claim::new(DEFAULT_ROLE_CLAIM_TYPE, "ops"),
    ]);
    assert_eq!(identity.name(), Some("bob"));
    assert_eq!(identity.roles(), vec!["admin", "ops"]);
}

#[test]
fn test_identity_custom_designators() {
    let identity = Identity::new(vec![Claim::new(UPN, "bob@example.com")])
        .with_designators(UPN, "group");
    assert_eq!(identity.name(), Some("bob@example.com"));
    assert!(identity.roles().is_empty());
}

#[test]
fn test_principal_claims_in_order() {
    let principal = Principal::from_identity(Identity::new(vec![
        Claim::new(NAME_ID, "u1"),
        Claim::new(UPN, "a@b"),
    ]))
    .with_identity(Identity::new(vec![Claim::new("x", "y")]));
    let types: Vec<_> = principal.claims().map(|c| c.claim_type.as_str()).collect();
    assert_eq!(types, vec![NAME_ID, UPN, "x"]);
    assert_eq!(principal.identities().len(), 2);
}

// ========== Errors ==========

#[test]
fn test_require_identifier() {
    assert!(require_identifier("a", "claim type").is_ok());
    assert!(matches!(require_identifier("", "claim type"), Err(CtError::InvalidArgument(_))));
    assert!(matches!(require_identifier(" \t\n", "claim type"), Err(CtError::InvalidArgument(_))));
}

#[test]
fn test_error_display() {
    let errors = vec![
        CtError::InvalidArgument("x".into()),
        CtError::DuplicateExpandedKey { expanded: "a".into() },
        CtError::AmbiguousCompactAlias {
            compact: "x".into(),
            existing: "a".into(),
            expanded: "b".into(),
        },
        CtError::Config("bad".into()),
    ];
    for err in errors {
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn test_provider_error_is_transparent() {
    let err = CtError::from(anyhow::anyhow!("token expired"));
    assert_eq!(err.to_string(), "token expired");
}

// ========== Config ==========

#[test]
fn test_config_parse() {
    let json = format!(
        r#"{{"claimTypes":[{{"from":"{NAME_ID}","to":"ni"}},{{"from":"{UPN}","to":"upn"}}]}}"#
    );
    let config = MappingConfig::from_json_str(&json).unwrap();
    let mappings = config.to_mappings();
    assert_eq!(
        mappings,
        vec![CompactionMapping::new(NAME_ID, "ni"), CompactionMapping::new(UPN, "upn")]
    );
}

#[test]
fn test_config_skips_incomplete_entries() {
    let json = r#"{"claimTypes":[{"from":"a"},{"to":"b"},{"from":"  ","to":"c"},{"from":"d","to":"e"}]}"#;
    let mappings = MappingConfig::from_json_str(json).unwrap().to_mappings();
    assert_eq!(mappings, vec![CompactionMapping::new("d", "e")]);
}

#[test]
fn test_config_trims_values() {
    let json = r#"{"claimTypes":[{"from":" a ","to":"\tb"}]}"#;
    let mappings = MappingConfig::from_json_str(json).unwrap().to_mappings();
    assert_eq!(mappings, vec![CompactionMapping::new("a", "b")]);
}

#[test]
fn test_config_empty_document() {
    let config = MappingConfig::from_json_str("{}").unwrap();
    assert!(config.to_mappings().is_empty());
}

#[test]
fn test_config_malformed() {
    assert!(matches!(
        MappingConfig::from_json_str("{not json"),
        Err(CtError::Serialization(_))
    ));
}

#[test]
fn test_config_roundtrip_through_json() {
    let mappings = vec![CompactionMapping::new(UPN, "upn"), ("a", "b").into()];
    let json = MappingConfig::from_mappings(&mappings).to_json_string().unwrap();
    let parsed = MappingConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed.to_mappings(), mappings);
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"claimTypes":[{{"from":"{UPN}","to":"upn"}}]}}"#).unwrap();
    let config = MappingConfig::from_file(file.path()).unwrap();
    assert_eq!(config.to_mappings(), vec![CompactionMapping::new(UPN, "upn")]);
}

#[test]
fn test_config_from_file_malformed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[1, 2").unwrap();
    match MappingConfig::from_file(file.path()) {
        Err(CtError::Config(msg)) => assert!(msg.contains(&file.path().display().to_string())),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_config_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        MappingConfig::from_file(dir.path().join("missing.json")),
        Err(CtError::Io(_))
    ));
}
