//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (PREAPPROVE_*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "preapprove.toml",
    ".preapprove.toml",
    "~/.config/preapprove/config.toml",
    "/etc/preapprove/config.toml",
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Defaults are handled by serde defaults on AppConfig

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with PREAPPROVE_ prefix
    // e.g., PREAPPROVE_LDAP_SERVER, PREAPPROVE_PREAPPROVALS__GROUPS
    // Double underscore (__) maps to nested keys (preapprovals.groups)
    builder = builder.add_source(
        Environment::with_prefix("PREAPPROVE")
            .separator("__")
            .try_parsing(true),
    );

    // Build and deserialize
    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.ldap_server.is_empty() {
        return Err(ConfigError::Missing {
            field: "ldap_server".to_string(),
        });
    }

    if !config.ldap_server.starts_with("ldap://") && !config.ldap_server.starts_with("ldaps://") {
        return Err(ConfigError::Invalid {
            message: format!(
                "ldap_server must start with ldap:// or ldaps://, got: {}",
                config.ldap_server
            ),
        });
    }

    if config.base_dn.is_empty() {
        return Err(ConfigError::Invalid {
            message: "base_dn must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from_str_basic() {
        let toml = r#"
ldap_server = "ldaps://ldap.example.com"
base_dn = "dc=example,dc=com"

[preapprovals]
managers = ["dave"]
groups = ["eng"]
projects = ["ceph"]
"#;

        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.ldap_server, "ldaps://ldap.example.com");
        assert_eq!(config.base_dn, "dc=example,dc=com");
        assert_eq!(config.preapprovals.managers, vec!["dave"]);
        assert_eq!(config.preapprovals.groups, vec!["eng"]);
        assert_eq!(config.preapprovals.projects, vec!["ceph"]);
    }

    #[test]
    fn test_missing_preapproval_keys_default_to_empty() {
        let toml = r#"
ldap_server = "ldap://ldap.example.com"
"#;

        let config = load_config_from_str(toml).unwrap();
        assert!(config.preapprovals.managers.is_empty());
        assert!(config.preapprovals.groups.is_empty());
        assert!(config.preapprovals.projects.is_empty());
    }

    #[test]
    fn test_missing_server_error() {
        let result = load_config_from_str("");
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_invalid_server_scheme_error() {
        let toml = r#"
ldap_server = "https://not-ldap.example.com"
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_empty_base_dn_error() {
        let toml = r#"
ldap_server = "ldap://ldap.example.com"
base_dn = ""
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
