//! Metrics side of the provider capability set.
//!
//! A [`MeterProvider`] vends [`Meter`]s scoped to an instrumentation
//! library. A meter is a thin handle over a [`MeterCore`], the seam a
//! metrics implementation supplies: instrument creation takes an
//! [`InstrumentDescriptor`] and yields an implementation-level
//! [`InstrumentCore`]. Aggregation and export stay on the implementation
//! side; this layer defines identity.
//!
//! Instrument identity is the business of [`InstrumentDescriptor`]: two
//! descriptors are interchangeable exactly when their identity attributes
//! match, regardless of which meter created them. The state a meter shares
//! with its instruments lives in [`MeterSharedState`] and never leaks into
//! identity.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::{InstrumentationLibrary, Resource, Result};

mod descriptor;
pub mod noop;

pub use descriptor::InstrumentDescriptor;

/// Units of measurement attached to instruments, e.g. `"ms"` or `"1"`.
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Unit(Cow<'static, str>);

impl Unit {
    /// Create a new unit from a unit name.
    pub fn new(unit: impl Into<Cow<'static, str>>) -> Self {
        Unit(unit.into())
    }

    /// The unit name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The kind of value an instrument records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstrumentValueType {
    /// 64-bit integer recordings.
    I64,
    /// 64-bit floating point recordings.
    F64,
}

/// A source of timestamps for measurement processing.
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current time.
    fn now(&self) -> SystemTime;
}

/// [`Clock`] backed by the operating system clock.
#[derive(Clone, Debug, Default)]
pub struct SystemClock {
    _private: (),
}

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        SystemClock { _private: () }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// State shared by every instrument created from the same meter: the clock
/// measurements are stamped with and the resource they are recorded against.
///
/// Cloning is cheap and shares the same state. Shared state is contextual
/// only; it never participates in instrument identity.
#[derive(Clone, Debug)]
pub struct MeterSharedState {
    inner: Arc<SharedStateInner>,
}

#[derive(Debug)]
struct SharedStateInner {
    clock: Box<dyn Clock>,
    resource: Resource,
}

impl MeterSharedState {
    /// Pair a clock with the resource instruments record against.
    pub fn new(clock: impl Clock + 'static, resource: Resource) -> Self {
        MeterSharedState {
            inner: Arc::new(SharedStateInner {
                clock: Box::new(clock),
                resource,
            }),
        }
    }

    /// The clock measurements are stamped with.
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// The resource measurements are recorded against.
    pub fn resource(&self) -> &Resource {
        &self.inner.resource
    }
}

impl Default for MeterSharedState {
    fn default() -> Self {
        MeterSharedState::new(SystemClock::new(), Resource::empty())
    }
}

/// Vends meters scoped to an instrumentation library.
pub trait MeterProvider: fmt::Debug {
    /// Returns a meter recording on behalf of `library`.
    fn meter(&self, library: InstrumentationLibrary) -> Meter;
}

/// The interface a metrics implementation supplies to back a [`Meter`].
pub trait MeterCore: fmt::Debug {
    /// Create the implementation-level instrument described by `descriptor`.
    fn new_instrument(
        &self,
        descriptor: InstrumentDescriptor,
    ) -> Result<Arc<dyn InstrumentCore + Send + Sync>>;
}

/// Implementation-level handle to a created instrument.
pub trait InstrumentCore: fmt::Debug {
    /// The descriptor this instrument was created from.
    fn descriptor(&self) -> &InstrumentDescriptor;
}

/// Provides access to instruments for recording measurements.
#[derive(Clone, Debug)]
pub struct Meter {
    library: InstrumentationLibrary,
    core: Arc<dyn MeterCore + Send + Sync>,
}

impl Meter {
    /// Create a named meter over a metrics implementation core.
    pub fn new(library: InstrumentationLibrary, core: Arc<dyn MeterCore + Send + Sync>) -> Self {
        Meter { library, core }
    }

    /// The instrumentation library this meter records for.
    pub fn instrumentation_library(&self) -> &InstrumentationLibrary {
        &self.library
    }

    /// Create the instrument described by `descriptor`.
    pub fn new_instrument(
        &self,
        descriptor: InstrumentDescriptor,
    ) -> Result<Arc<dyn InstrumentCore + Send + Sync>> {
        self.core.new_instrument(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;
    use crate::testing::ManualClock;

    #[test]
    fn shared_state_exposes_clock_and_resource() {
        let clock = ManualClock::new(UNIX_EPOCH);
        let resource = Resource::new([("service.name", "checkout")]);
        let state = MeterSharedState::new(clock.clone(), resource.clone());

        assert_eq!(state.clock().now(), UNIX_EPOCH);
        clock.advance(Duration::from_millis(250));
        assert_eq!(state.clock().now(), UNIX_EPOCH + Duration::from_millis(250));
        assert_eq!(state.resource(), &resource);
    }

    #[test]
    fn shared_state_clones_share_the_same_clock() {
        let clock = ManualClock::new(UNIX_EPOCH);
        let state = MeterSharedState::new(clock.clone(), Resource::empty());
        let cloned = state.clone();
        clock.advance(Duration::from_secs(1));
        assert_eq!(cloned.clock().now(), UNIX_EPOCH + Duration::from_secs(1));
    }

    #[test]
    fn unit_round_trips_name() {
        assert_eq!(Unit::new("ms").as_str(), "ms");
        assert_eq!(Unit::default().as_str(), "");
    }
}
