//! Distinguished-name component extraction
//!
//! Directory entries reference other entries through distinguished names:
//! comma-separated `key=value` pairs such as
//! `uid=alice,ou=people,dc=example,dc=com`. The approval checks only care
//! about a single component (the `uid` of a manager, the `cn` of a group),
//! so this module extracts one RDN value by key.
//!
//! "Key not present" and "value not parseable as a DN" are distinct outcomes.
//! Callers that only want an identifier collapse both to "no identifier",
//! but the malformed case is observable so it can be logged instead of being
//! silently indistinguishable from a missing attribute.

/// Outcome of looking up one RDN key in a DN-shaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdnLookup {
    /// The key was present; its value.
    Found(String),
    /// The value parsed as a DN but no component used the requested key.
    KeyAbsent,
    /// The value is not a well-formed DN (a component without `=`).
    Malformed,
}

impl RdnLookup {
    /// Collapse to the extracted value, discarding the absent/malformed
    /// distinction.
    pub fn into_value(self) -> Option<String> {
        match self {
            RdnLookup::Found(value) => Some(value),
            RdnLookup::KeyAbsent | RdnLookup::Malformed => None,
        }
    }
}

/// Split a DN into ordered `(key, value)` pairs.
///
/// Keys are lowercased; surrounding whitespace on keys and values is
/// trimmed. Returns `None` if any component lacks a `=` separator.
pub fn parse_dn(dn: &str) -> Option<Vec<(String, String)>> {
    let mut components = Vec::new();
    for part in dn.split(',') {
        let (key, value) = part.split_once('=')?;
        components.push((
            key.trim().to_ascii_lowercase(),
            value.trim().to_string(),
        ));
    }
    Some(components)
}

/// Extract the value of the first RDN whose key matches `key`
/// (case-insensitive).
pub fn rdn_value(dn: &str, key: &str) -> RdnLookup {
    let Some(components) = parse_dn(dn) else {
        return RdnLookup::Malformed;
    };

    let key = key.to_ascii_lowercase();
    components
        .into_iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| RdnLookup::Found(v))
        .unwrap_or(RdnLookup::KeyAbsent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_extracts_uid_from_typical_dn() {
        assert_eq!(
            rdn_value("uid=alice,ou=people,dc=example,dc=com", "uid"),
            RdnLookup::Found("alice".to_string())
        );
    }

    #[test]
    fn test_extracts_cn_from_group_dn() {
        assert_eq!(
            rdn_value("cn=eng,dc=redhat,dc=com", "cn"),
            RdnLookup::Found("eng".to_string())
        );
    }

    #[test]
    fn test_key_lookup_is_case_insensitive() {
        assert_eq!(
            rdn_value("UID=alice,OU=people", "uid"),
            RdnLookup::Found("alice".to_string())
        );
        assert_eq!(
            rdn_value("uid=alice", "UID"),
            RdnLookup::Found("alice".to_string())
        );
    }

    #[test]
    fn test_first_matching_component_wins() {
        assert_eq!(
            rdn_value("ou=first,ou=second,dc=example", "ou"),
            RdnLookup::Found("first".to_string())
        );
    }

    #[test]
    fn test_whitespace_around_components_is_trimmed() {
        assert_eq!(
            rdn_value("uid = alice , ou = people", "uid"),
            RdnLookup::Found("alice".to_string())
        );
    }

    #[test]
    fn test_absent_key_is_distinct_from_malformed() {
        assert_eq!(
            rdn_value("ou=people,dc=example,dc=com", "uid"),
            RdnLookup::KeyAbsent
        );
        assert_eq!(rdn_value("not a dn at all", "uid"), RdnLookup::Malformed);
    }

    #[rstest]
    #[case("")]
    #[case("alice")]
    #[case("uid=alice,garbage")]
    fn test_malformed_dns(#[case] dn: &str) {
        assert_eq!(rdn_value(dn, "uid"), RdnLookup::Malformed);
    }

    #[test]
    fn test_into_value_collapses_non_found() {
        assert_eq!(
            RdnLookup::Found("x".to_string()).into_value(),
            Some("x".to_string())
        );
        assert_eq!(RdnLookup::KeyAbsent.into_value(), None);
        assert_eq!(RdnLookup::Malformed.into_value(), None);
    }

    #[test]
    fn test_parse_dn_preserves_component_order() {
        let parsed = parse_dn("uid=alice,ou=people,dc=example,dc=com").unwrap();
        let keys: Vec<&str> = parsed.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["uid", "ou", "dc", "dc"]);
    }
}
