//! Directory client
//!
//! Performs single-identity attribute lookups against the LDAP directory
//! and recursive management-chain resolution. The connection is synchronous
//! (`ldap3::LdapConn`); one invocation performs a handful of sequential
//! round-trips and nothing else, so there is no async runtime here.

use crate::directory::entry::{DirectoryEntry, REQUESTED_ATTRS};
use crate::error::{DirectoryError, DirectoryResult};
use ldap3::{LdapConn, Scope, SearchEntry, ldap_escape};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Attribute the identity filter matches on.
const IDENTITY_ATTR: &str = "uid";

/// Hop bound for management-chain resolution.
///
/// Real hierarchies are nowhere near this deep; hitting the bound means the
/// directory contains a cycle or malformed manager references.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 50;

/// Single-identity attribute lookups against a directory service.
///
/// The seam between the approval checker and the network: tests substitute
/// an in-memory implementation.
pub trait DirectoryClient {
    /// Fetch the directory entry for one identity.
    ///
    /// Zero matches is a [`DirectoryError::NotFound`]; the identity does
    /// not exist. Multiple matches are resolved deterministically by taking
    /// the first result, with a warning.
    fn lookup(&mut self, identity: &str) -> DirectoryResult<DirectoryEntry>;

    /// Resolve the ordered management chain for an identity: root first,
    /// direct manager last, the identity itself excluded. An identity with
    /// no manager yields an empty chain.
    ///
    /// Resolution walks manager references one lookup at a time, bounded by
    /// `max_depth` hops and a visited set; a cycle or over-deep chain fails
    /// with [`DirectoryError::ChainTooDeep`] rather than looping.
    fn management_chain(
        &mut self,
        identity: &str,
        max_depth: usize,
    ) -> DirectoryResult<Vec<String>> {
        let mut chain: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(identity.to_string());

        let mut current = identity.to_string();
        loop {
            let entry = self.lookup(&current)?;
            let Some(manager) = entry.manager_identifier() else {
                break;
            };
            if chain.len() >= max_depth || !seen.insert(manager.clone()) {
                return Err(DirectoryError::ChainTooDeep {
                    identity: identity.to_string(),
                    limit: max_depth,
                });
            }
            debug!(of = %current, manager = %manager, "resolved manager");
            chain.push(manager.clone());
            current = manager;
        }

        // Collected direct-manager-first; the contract is root-first.
        chain.reverse();
        Ok(chain)
    }
}

/// LDAP-backed directory client.
pub struct LdapDirectoryClient {
    conn: LdapConn,
    base_dn: String,
}

impl LdapDirectoryClient {
    /// Connect to the directory service.
    ///
    /// Connection failure is fatal for the whole invocation; directory
    /// availability is a precondition, not a transient fault this client
    /// manages.
    pub fn connect(server: &str, base_dn: &str) -> DirectoryResult<Self> {
        debug!(server = %server, "connecting to directory");
        let conn = LdapConn::new(server)?;
        Ok(Self {
            conn,
            base_dn: base_dn.to_string(),
        })
    }
}

impl DirectoryClient for LdapDirectoryClient {
    fn lookup(&mut self, identity: &str) -> DirectoryResult<DirectoryEntry> {
        let filter = format!("({}={})", IDENTITY_ATTR, ldap_escape(identity));
        debug!(base = %self.base_dn, filter = %filter, "directory search");

        let (results, _res) = self
            .conn
            .search(
                &self.base_dn,
                Scope::Subtree,
                &filter,
                REQUESTED_ATTRS.to_vec(),
            )?
            .success()?;

        if results.len() > 1 {
            warn!(
                identity = %identity,
                matches = results.len(),
                "multiple directory matches, using the first"
            );
        }
        let Some(first) = results.into_iter().next() else {
            return Err(DirectoryError::NotFound {
                identity: identity.to_string(),
            });
        };
        let entry = SearchEntry::construct(first);
        let attributes = normalize_attributes(entry.attrs, entry.bin_attrs);
        Ok(DirectoryEntry::new(identity, attributes))
    }
}

/// Merge binary attribute values into the text map.
///
/// `ldap3` splits values that are not valid UTF-8 into `bin_attrs`; the
/// entry invariant is that only text escapes the client, so those are
/// lossily decoded here.
fn normalize_attributes(
    mut attrs: HashMap<String, Vec<String>>,
    bin_attrs: HashMap<String, Vec<Vec<u8>>>,
) -> HashMap<String, Vec<String>> {
    for (name, values) in bin_attrs {
        let decoded = values
            .into_iter()
            .map(|v| String::from_utf8_lossy(&v).into_owned());
        attrs.entry(name).or_default().extend(decoded);
    }
    attrs
}
