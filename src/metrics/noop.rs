//! # No-op Metrics Implementation
//!
//! This implementation backs the fallback provider handed out when no real
//! provider has been configured. It is expected to have minimal resource
//! utilization and runtime impact.
use std::sync::Arc;

use crate::metrics::{InstrumentCore, InstrumentDescriptor, Meter, MeterCore, MeterProvider};
use crate::{InstrumentationLibrary, Result};

/// A no-op instance of a `MeterProvider`.
#[derive(Debug, Default)]
pub struct NoopMeterProvider {
    _private: (),
}

impl NoopMeterProvider {
    /// Create a new no-op meter provider.
    pub fn new() -> Self {
        NoopMeterProvider { _private: () }
    }
}

impl MeterProvider for NoopMeterProvider {
    fn meter(&self, library: InstrumentationLibrary) -> Meter {
        Meter::new(library, Arc::new(NoopMeterCore::new()))
    }
}

/// A no-op meter core that accepts any instrument definition.
#[derive(Debug, Default)]
pub struct NoopMeterCore {
    _private: (),
}

impl NoopMeterCore {
    /// Create a new no-op meter core.
    pub fn new() -> Self {
        NoopMeterCore { _private: () }
    }
}

impl MeterCore for NoopMeterCore {
    fn new_instrument(
        &self,
        descriptor: InstrumentDescriptor,
    ) -> Result<Arc<dyn InstrumentCore + Send + Sync>> {
        Ok(Arc::new(NoopInstrument::new(descriptor)))
    }
}

/// A no-op instrument that remembers its descriptor and discards recordings.
#[derive(Clone, Debug)]
pub struct NoopInstrument {
    descriptor: InstrumentDescriptor,
}

impl NoopInstrument {
    /// Create a new no-op instrument for the given definition.
    pub fn new(descriptor: InstrumentDescriptor) -> Self {
        NoopInstrument { descriptor }
    }
}

impl InstrumentCore for NoopInstrument {
    fn descriptor(&self) -> &InstrumentDescriptor {
        &self.descriptor
    }
}
