//! Cross-process propagation surface.
//!
//! Providers expose the set of propagators they were configured with as a
//! [`ContextPropagators`] value. The wire formats themselves belong to the
//! crates implementing [`TextMapPropagator`]; this layer only carries the
//! configured set and the carrier fields it touches.

use std::fmt;
use std::slice;
use std::sync::Arc;

/// A propagator that reads and writes named fields on text-map carriers,
/// HTTP headers being the typical example.
pub trait TextMapPropagator: fmt::Debug {
    /// The carrier field names this propagator reads and writes.
    fn fields(&self) -> FieldIter<'_>;
}

/// An iterator over propagator field names.
#[derive(Debug)]
pub struct FieldIter<'a>(slice::Iter<'a, String>);

impl<'a> FieldIter<'a> {
    /// Create a new `FieldIter` from a slice of field names.
    pub fn new(fields: &'a [String]) -> Self {
        FieldIter(fields.iter())
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|field| field.as_str())
    }
}

/// The immutable set of propagators configured on a provider.
///
/// Cloning is cheap and shares the underlying set. The default value is the
/// empty set, which touches no carrier fields.
#[derive(Clone, Debug)]
pub struct ContextPropagators {
    inner: Arc<PropagatorSet>,
}

#[derive(Debug)]
struct PropagatorSet {
    propagators: Vec<Box<dyn TextMapPropagator + Send + Sync>>,
    fields: Vec<String>,
}

impl ContextPropagators {
    /// Compose a propagator set.
    ///
    /// The advertised fields are the union of the propagators' fields,
    /// deduplicated, first occurrence first.
    pub fn new(propagators: Vec<Box<dyn TextMapPropagator + Send + Sync>>) -> Self {
        let mut fields: Vec<String> = Vec::new();
        for propagator in &propagators {
            for field in propagator.fields() {
                if !fields.iter().any(|existing| existing == field) {
                    fields.push(field.to_string());
                }
            }
        }

        ContextPropagators {
            inner: Arc::new(PropagatorSet {
                propagators,
                fields,
            }),
        }
    }

    /// The carrier fields touched by any propagator in this set.
    pub fn fields(&self) -> FieldIter<'_> {
        FieldIter::new(&self.inner.fields)
    }

    /// The number of propagators in this set.
    pub fn len(&self) -> usize {
        self.inner.propagators.len()
    }

    /// Whether this set contains no propagators.
    pub fn is_empty(&self) -> bool {
        self.inner.propagators.is_empty()
    }
}

impl Default for ContextPropagators {
    fn default() -> Self {
        ContextPropagators::new(Vec::new())
    }
}

/// A propagator that touches no carrier fields.
#[derive(Clone, Debug, Default)]
pub struct NoopTextMapPropagator {
    _private: (),
}

impl NoopTextMapPropagator {
    /// Create a new no-op propagator.
    pub fn new() -> Self {
        NoopTextMapPropagator { _private: () }
    }
}

impl TextMapPropagator for NoopTextMapPropagator {
    fn fields(&self) -> FieldIter<'_> {
        FieldIter::new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestPropagator {
        fields: Vec<String>,
    }

    impl TestPropagator {
        fn new(fields: &[&str]) -> Self {
            TestPropagator {
                fields: fields.iter().map(|field| field.to_string()).collect(),
            }
        }
    }

    impl TextMapPropagator for TestPropagator {
        fn fields(&self) -> FieldIter<'_> {
            FieldIter::new(&self.fields)
        }
    }

    #[test]
    fn composite_merges_fields_in_order() {
        let propagators = ContextPropagators::new(vec![
            Box::new(TestPropagator::new(&["traceparent", "tracestate"])),
            Box::new(TestPropagator::new(&["baggage", "traceparent"])),
        ]);
        let fields: Vec<_> = propagators.fields().collect();
        assert_eq!(fields, vec!["traceparent", "tracestate", "baggage"]);
        assert_eq!(propagators.len(), 2);
    }

    #[test]
    fn default_set_is_empty() {
        let propagators = ContextPropagators::default();
        assert!(propagators.is_empty());
        assert_eq!(propagators.fields().count(), 0);
    }

    #[test]
    fn noop_propagator_has_no_fields() {
        let noop = NoopTextMapPropagator::new();
        assert_eq!(noop.fields().count(), 0);
    }

    #[test]
    fn clones_share_the_same_set() {
        let propagators =
            ContextPropagators::new(vec![Box::new(TestPropagator::new(&["traceparent"]))]);
        let cloned = propagators.clone();
        assert_eq!(
            propagators.fields().collect::<Vec<_>>(),
            cloned.fields().collect::<Vec<_>>()
        );
    }
}
