//! Directory entry
//!
//! A normalized, read-only view over one identity's raw directory
//! attributes. Entries are constructed fresh per lookup, are immutable
//! afterwards, and live only for the duration of one check. By the time an
//! entry exists, every attribute value is text; binary values are decoded
//! by the client during construction.

use crate::directory::dn::{RdnLookup, rdn_value};
use std::collections::HashMap;
use tracing::warn;

/// Attribute holding the DN of the identity's manager (at most one value).
pub const ATTR_MANAGER: &str = "manager";
/// Attribute holding the DNs of groups the identity belongs to.
pub const ATTR_MEMBER_OF: &str = "memberOf";
/// Product affiliation attributes, in the order `projects()` concatenates them.
pub const ATTR_PRODUCT: &str = "product";
pub const ATTR_SUBPRODUCT: &str = "subProduct";
pub const ATTR_PROJECT: &str = "project";
pub const ATTR_COMPONENT: &str = "component";

/// The exact attribute set requested from the directory for a lookup.
pub const REQUESTED_ATTRS: &[&str] = &[
    ATTR_MEMBER_OF,
    ATTR_MANAGER,
    ATTR_PRODUCT,
    ATTR_SUBPRODUCT,
    ATTR_PROJECT,
    ATTR_COMPONENT,
];

/// RDN key identifying a person in a manager DN.
const MANAGER_RDN_KEY: &str = "uid";
/// RDN key identifying a group in a membership DN.
const GROUP_RDN_KEY: &str = "cn";

/// One identity's directory attributes, normalized to text.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    identity: String,
    attributes: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(identity: impl Into<String>, attributes: HashMap<String, Vec<String>>) -> Self {
        Self {
            identity: identity.into(),
            attributes,
        }
    }

    /// The identity this entry was looked up for.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    fn values(&self, attr: &str) -> &[String] {
        self.attributes.get(attr).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The manager's identifier, extracted from the `manager` attribute.
    ///
    /// `None` when the identity has no manager attribute, the attribute is
    /// empty, or the DN carries no `uid` component. A malformed DN also
    /// yields `None`, with a warning, so bad directory data degrades a
    /// single extraction instead of failing the lookup.
    pub fn manager_identifier(&self) -> Option<String> {
        let dn = self.values(ATTR_MANAGER).first()?;
        match rdn_value(dn, MANAGER_RDN_KEY) {
            RdnLookup::Found(uid) => Some(uid),
            RdnLookup::KeyAbsent => None,
            RdnLookup::Malformed => {
                warn!(
                    identity = %self.identity,
                    value = %dn,
                    "malformed manager DN, treating as no manager"
                );
                None
            }
        }
    }

    /// Group identifiers from the membership attribute, source order
    /// preserved. Values whose extraction fails are skipped.
    pub fn groups(&self) -> Vec<String> {
        self.values(ATTR_MEMBER_OF)
            .iter()
            .filter_map(|dn| match rdn_value(dn, GROUP_RDN_KEY) {
                RdnLookup::Found(cn) => Some(cn),
                RdnLookup::KeyAbsent => None,
                RdnLookup::Malformed => {
                    warn!(
                        identity = %self.identity,
                        value = %dn,
                        "malformed group DN, skipping"
                    );
                    None
                }
            })
            .collect()
    }

    /// All project-affiliation identifiers: products, then subproducts,
    /// then projects, then components. No deduplication.
    pub fn projects(&self) -> Vec<String> {
        [ATTR_PRODUCT, ATTR_SUBPRODUCT, ATTR_PROJECT, ATTR_COMPONENT]
            .iter()
            .flat_map(|attr| self.values(attr).iter().cloned())
            .collect()
    }
}
