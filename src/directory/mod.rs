//! Directory module
//!
//! Normalized access to the LDAP directory: single-identity lookups,
//! management-chain resolution, and DN component extraction.

pub mod client;
pub mod dn;
pub mod entry;

pub use client::{DEFAULT_MAX_CHAIN_DEPTH, DirectoryClient, LdapDirectoryClient};
pub use dn::{RdnLookup, parse_dn, rdn_value};
pub use entry::DirectoryEntry;
