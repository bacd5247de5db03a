//! Representation of the entity producing telemetry.
//!
//! A [`Resource`] names the process, service, or host that measurements are
//! recorded against. Meters hand it to their instruments through
//! [`MeterSharedState`](crate::metrics::MeterSharedState); it never takes
//! part in instrument identity.

use std::borrow::Cow;
use std::collections::{btree_map, BTreeMap};

/// An immutable set of attributes describing the telemetry producer.
///
/// Attributes are kept sorted by key, so iteration order is deterministic
/// regardless of construction order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resource {
    attrs: BTreeMap<Cow<'static, str>, Cow<'static, str>>,
}

impl Resource {
    /// Create a resource from key/value attribute pairs.
    ///
    /// Later values win when a key repeats.
    pub fn new<K, V>(attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        Resource {
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A resource with no attributes.
    pub fn empty() -> Self {
        Resource::default()
    }

    /// Create a new resource from this one and `other`.
    ///
    /// Attributes from `other` override this resource's values on key
    /// conflicts.
    pub fn merge(&self, other: &Resource) -> Resource {
        let mut attrs = self.attrs.clone();
        attrs.extend(other.attrs.clone());
        Resource { attrs }
    }

    /// The value recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(|v| v.as_ref())
    }

    /// The number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether this resource carries no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate over the attributes in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Cow<'static, str>, Cow<'static, str>> {
        self.attrs.iter()
    }
}

impl<'a> IntoIterator for &'a Resource {
    type Item = (&'a Cow<'static, str>, &'a Cow<'static, str>);
    type IntoIter = btree_map::Iter<'a, Cow<'static, str>, Cow<'static, str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_are_sorted_and_deduplicated() {
        let resource = Resource::new([
            ("service.name", "checkout"),
            ("host.name", "app-1"),
            ("service.name", "checkout-v2"),
        ]);
        assert_eq!(resource.len(), 2);
        assert_eq!(resource.get("service.name"), Some("checkout-v2"));
        let keys: Vec<_> = resource.iter().map(|(k, _)| k.as_ref()).collect();
        assert_eq!(keys, vec!["host.name", "service.name"]);
    }

    #[test]
    fn merge_prefers_incoming_values() {
        let base = Resource::new([("service.name", "checkout"), ("region", "eu-1")]);
        let overlay = Resource::new([("service.name", "checkout-v2")]);
        let merged = base.merge(&overlay);
        assert_eq!(merged.get("service.name"), Some("checkout-v2"));
        assert_eq!(merged.get("region"), Some("eu-1"));
        assert_eq!(merged.len(), 2);

        let mut entries = Vec::new();
        for (key, value) in &merged {
            entries.push((key.as_ref(), value.as_ref()));
        }
        assert_eq!(
            entries,
            vec![("region", "eu-1"), ("service.name", "checkout-v2")]
        );
    }

    #[test]
    fn empty_resource() {
        let resource = Resource::empty();
        assert!(resource.is_empty());
        assert_eq!(resource.get("service.name"), None);
    }
}
