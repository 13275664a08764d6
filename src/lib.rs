//! Pre-approval checker
//!
//! Determines whether an identity is automatically entitled to access a
//! restricted resource, based on organizational metadata in an LDAP
//! directory. Three independent signals are checked against configured
//! allow-lists:
//!
//! - **Management chain** - any transitive manager is pre-approved
//! - **Group membership** - any directory group is pre-approved
//! - **Project affiliation** - any product/subproduct/project/component is pre-approved
//!
//! The final verdict is the logical OR of the three. An identity absent
//! from the directory is an error, never a negative verdict.
//!
//! ## Example Configuration
//!
//! ```toml
//! ldap_server = "ldaps://ldap.corp.example.com"
//! base_dn = "dc=example,dc=com"
//!
//! [preapprovals]
//! managers = ["dave"]
//! groups = ["eng"]
//! projects = ["ceph"]
//! ```

pub mod approval;
pub mod config;
pub mod directory;
pub mod error;

// Re-export main types
pub use approval::{ApprovalChecker, Preapprovals, Rationale, Verdict};
pub use config::{AppConfig, load_config};
pub use directory::{DirectoryClient, DirectoryEntry, LdapDirectoryClient};
pub use error::{AppError, Result};
