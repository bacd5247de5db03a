//! No-op trace implementation.
//!
//! Installed as part of the default provider when no other implementation is
//! configured. Intended to have minimal resource utilization and runtime
//! impact, so instrumented code can call it unconditionally.

use crate::trace::{BoxedTracer, Tracer, TracerProvider};
use crate::InstrumentationLibrary;

/// A no-op instance of a [`TracerProvider`].
#[derive(Clone, Debug, Default)]
pub struct NoopTracerProvider {
    _private: (),
}

impl NoopTracerProvider {
    /// Create a new no-op tracer provider.
    pub fn new() -> Self {
        NoopTracerProvider { _private: () }
    }
}

impl TracerProvider for NoopTracerProvider {
    fn tracer(&self, library: InstrumentationLibrary) -> BoxedTracer {
        BoxedTracer::new(Box::new(NoopTracer::new(library)))
    }
}

/// A no-op instance of a [`Tracer`]. Records nothing.
#[derive(Clone, Debug, Default)]
pub struct NoopTracer {
    library: InstrumentationLibrary,
}

impl NoopTracer {
    /// Create a new no-op tracer for `library`.
    pub fn new(library: InstrumentationLibrary) -> Self {
        NoopTracer { library }
    }
}

impl Tracer for NoopTracer {
    fn instrumentation_library(&self) -> &InstrumentationLibrary {
        &self.library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_tracer_keeps_library_identity() {
        let provider = NoopTracerProvider::new();
        let tracer = provider.tracer(InstrumentationLibrary::new("checkout", Some("1.2.0".into())));
        assert_eq!(tracer.instrumentation_library().name, "checkout");
        assert_eq!(
            tracer.instrumentation_library().version.as_deref(),
            Some("1.2.0")
        );
    }

    #[test]
    fn default_tracer_has_empty_library() {
        let tracer = NoopTracer::default();
        assert_eq!(tracer.instrumentation_library().name, "");
        assert!(tracer.instrumentation_library().version.is_none());
    }
}
