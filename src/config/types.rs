//! Configuration types for preapprove
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory server URI (e.g., `ldaps://ldap.corp.example.com`)
    pub ldap_server: String,

    /// Base DN the subtree search is scoped to
    pub base_dn: String,

    /// The three allow-lists
    pub preapprovals: PreapprovalConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ldap_server: String::new(),
            base_dn: "dc=example,dc=com".to_string(),
            preapprovals: PreapprovalConfig::default(),
        }
    }
}

/// Allow-list configuration
///
/// Missing keys default to empty lists; an empty list makes the
/// corresponding check vacuously false.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreapprovalConfig {
    /// Pre-approved manager identifiers
    pub managers: Vec<String>,

    /// Pre-approved group identifiers
    pub groups: Vec<String>,

    /// Pre-approved project/product/subproduct/component identifiers
    pub projects: Vec<String>,
}
