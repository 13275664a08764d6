//! Configuration loading and validation tests

use preapprove::config::{load_config, load_config_from_str};
use preapprove::error::ConfigError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_full_config_round_trip_through_a_file() {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(
        file,
        r#"
ldap_server = "ldaps://ldap.corp.example.com"
base_dn = "dc=corp,dc=example,dc=com"

[preapprovals]
managers = ["dave", "erin"]
groups = ["eng"]
projects = ["ceph", "rhel"]
"#
    )
    .unwrap();

    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.ldap_server, "ldaps://ldap.corp.example.com");
    assert_eq!(config.base_dn, "dc=corp,dc=example,dc=com");
    assert_eq!(config.preapprovals.managers, vec!["dave", "erin"]);
    assert_eq!(config.preapprovals.groups, vec!["eng"]);
    assert_eq!(config.preapprovals.projects, vec!["ceph", "rhel"]);
}

#[test]
fn test_explicit_config_path_must_exist() {
    let result = load_config(Some("/nonexistent/preapprove.toml"));
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_base_dn_defaults_when_omitted() {
    let config = load_config_from_str(r#"ldap_server = "ldap://ldap.example.com""#).unwrap();
    assert_eq!(config.base_dn, "dc=example,dc=com");
}

#[test]
fn test_allow_lists_default_to_empty() {
    let config = load_config_from_str(r#"ldap_server = "ldap://ldap.example.com""#).unwrap();
    assert!(config.preapprovals.managers.is_empty());
    assert!(config.preapprovals.groups.is_empty());
    assert!(config.preapprovals.projects.is_empty());
}

#[test]
fn test_server_is_required() {
    let result = load_config_from_str("[preapprovals]\ngroups = [\"eng\"]\n");
    assert!(matches!(result, Err(ConfigError::Missing { field }) if field == "ldap_server"));
}

#[test]
fn test_non_ldap_scheme_rejected() {
    let result = load_config_from_str(r#"ldap_server = "http://ldap.example.com""#);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}
