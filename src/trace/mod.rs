//! Tracing side of the provider capability set.
//!
//! This layer models vending and identity only: a [`TracerProvider`] hands
//! out [`BoxedTracer`] handles scoped to an instrumentation library, and a
//! [`Tracer`] reports which library it records for. Span recording belongs
//! to the crates implementing these traits; the no-op implementations in
//! [`noop`] are installed when nothing else is configured.

use std::fmt;

use crate::InstrumentationLibrary;

pub mod noop;

/// Vends tracers scoped to an instrumentation library.
pub trait TracerProvider: fmt::Debug {
    /// Returns a tracer recording on behalf of `library`.
    fn tracer(&self, library: InstrumentationLibrary) -> BoxedTracer;
}

/// The per-library tracing interface.
pub trait Tracer: fmt::Debug {
    /// The instrumentation library this tracer records for.
    fn instrumentation_library(&self) -> &InstrumentationLibrary;
}

/// A type-erased tracer handle, as returned by provider facades.
#[derive(Debug)]
pub struct BoxedTracer(Box<dyn Tracer + Send + Sync>);

impl BoxedTracer {
    /// Wrap a tracer implementation for type-erased use.
    pub fn new(tracer: Box<dyn Tracer + Send + Sync>) -> Self {
        BoxedTracer(tracer)
    }
}

impl Tracer for BoxedTracer {
    fn instrumentation_library(&self) -> &InstrumentationLibrary {
        self.0.instrumentation_library()
    }
}
