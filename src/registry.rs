//! The provider registry and its access facade.
//!
//! A [`ProviderRegistry`] owns a single slot for the active
//! [`TelemetryProvider`](crate::TelemetryProvider). The slot fills on first
//! access, either from the factory discovery selects or, with nothing
//! registered, the inert default provider. An explicit
//! [`ProviderRegistry::set_provider`] call replaces the
//! slot at any time. Occupied-slot reads are lock-free; only unresolved first
//! access serializes on a lock, so arbitrarily many threads can share one
//! registry cheaply.
//!
//! There is no process-wide instance. Applications own as many registries as
//! they need, typically one, and pass them where telemetry is created.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;

use crate::discovery::FactoryRegistry;
use crate::metrics::MeterProvider;
use crate::propagation::ContextPropagators;
use crate::provider::{DefaultProvider, SharedProvider};
use crate::trace::{BoxedTracer, TracerProvider};
use crate::{Error, InstrumentationLibrary, Result};

/// Holds at most one active telemetry provider and resolves it on demand.
///
/// Resolution runs at most one factory per successful first access, no
/// matter how many threads race for it, and every caller observes the same
/// installed provider until it is replaced. A resolution failure leaves the
/// slot empty and surfaces as [`Error::Configuration`]; the next access
/// retries discovery.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use telemetry_api::{DefaultProvider, ProviderRegistry, SharedProvider};
///
/// # fn main() -> telemetry_api::Result<()> {
/// let mut registry = ProviderRegistry::new();
/// registry.factories_mut().register(
///     "inert",
///     || -> telemetry_api::Result<SharedProvider> {
///         Ok(Arc::new(DefaultProvider::default()))
///     },
/// )?;
///
/// let first = registry.provider()?;
/// let second = registry.provider()?;
/// assert!(Arc::ptr_eq(&first, &second));
///
/// let tracer = registry.tracer("my-component")?;
/// # drop(tracer);
/// # Ok(())
/// # }
/// ```
pub struct ProviderRegistry {
    slot: ArcSwapOption<SharedProvider>,
    factories: FactoryRegistry,
    resolve_lock: Mutex<()>,
}

impl ProviderRegistry {
    /// Create a registry with no factories registered.
    ///
    /// Until a factory is registered or a provider installed, resolution
    /// installs the inert default provider.
    pub fn new() -> Self {
        ProviderRegistry::with_factories(FactoryRegistry::new())
    }

    /// Create a registry resolving from the given factory set.
    pub fn with_factories(factories: FactoryRegistry) -> Self {
        ProviderRegistry {
            slot: ArcSwapOption::empty(),
            factories,
            resolve_lock: Mutex::new(()),
        }
    }

    /// The factory set resolution selects from.
    pub fn factories(&self) -> &FactoryRegistry {
        &self.factories
    }

    /// Mutable access to the factory set, for registration and pinning.
    ///
    /// Requires exclusive access, which confines registration to setup code
    /// before the registry is shared.
    pub fn factories_mut(&mut self) -> &mut FactoryRegistry {
        &mut self.factories
    }

    /// The active provider, resolving it first if the slot is empty.
    ///
    /// Repeated calls return the same provider, by `Arc` identity, until
    /// [`set_provider`](ProviderRegistry::set_provider) replaces it.
    pub fn provider(&self) -> Result<SharedProvider> {
        if let Some(provider) = self.slot.load_full() {
            return Ok((*provider).clone());
        }
        self.resolve()
    }

    fn resolve(&self) -> Result<SharedProvider> {
        let _guard = match self.resolve_lock.lock() {
            Ok(guard) => guard,
            Err(err) => {
                tel_error!(name: "ProviderRegistry.LockPoisoned");
                return Err(err.into());
            }
        };
        // Another thread may have filled the slot while this one waited.
        if let Some(provider) = self.slot.load_full() {
            return Ok((*provider).clone());
        }

        let selected = match self.factories.select() {
            Ok(selected) => selected,
            Err(err) => {
                let reason = err.to_string();
                tel_warn!(name: "ProviderRegistry.DiscoveryFailed", reason = reason.as_str());
                return Err(err);
            }
        };
        let provider: SharedProvider = match selected {
            Some((name, factory)) => match factory.create() {
                Ok(provider) => {
                    tel_debug!(name: "ProviderRegistry.Resolved", factory = name);
                    provider
                }
                Err(err) => {
                    let reason = err.to_string();
                    tel_warn!(
                        name: "ProviderRegistry.FactoryFailed",
                        factory = name,
                        reason = reason.as_str()
                    );
                    return Err(Error::Configuration(format!(
                        "provider factory {name:?} failed: {reason}"
                    )));
                }
            },
            None => {
                tel_debug!(name: "ProviderRegistry.DefaultInstalled");
                Arc::new(DefaultProvider::default())
            }
        };
        self.slot.store(Some(Arc::new(provider.clone())));
        Ok(provider)
    }

    /// Install a provider, replacing whatever the slot holds.
    ///
    /// Never blocks behind a resolving thread. Callers keeping their own
    /// clone of the `Arc` will observe identity with later
    /// [`provider`](ProviderRegistry::provider) results.
    pub fn set_provider(&self, provider: SharedProvider) {
        self.slot.store(Some(Arc::new(provider)));
        tel_info!(name: "ProviderRegistry.ProviderSet");
    }

    /// Empty the slot so the next access resolves afresh.
    #[cfg(any(feature = "testing", test))]
    pub fn reset(&self) {
        self.slot.store(None);
    }

    /// The active provider's tracer provider.
    pub fn tracer_provider(&self) -> Result<Arc<dyn TracerProvider + Send + Sync>> {
        Ok(self.provider()?.tracer_provider())
    }

    /// A tracer recording for the named instrumentation library.
    pub fn tracer(&self, name: impl Into<Cow<'static, str>>) -> Result<BoxedTracer> {
        self.versioned_tracer(name, None)
    }

    /// A tracer recording for the named instrumentation library at a version.
    pub fn versioned_tracer(
        &self,
        name: impl Into<Cow<'static, str>>,
        version: Option<Cow<'static, str>>,
    ) -> Result<BoxedTracer> {
        let provider = self.provider()?;
        Ok(provider
            .tracer_provider()
            .tracer(InstrumentationLibrary::new(name, version)))
    }

    /// The active provider's meter provider.
    ///
    /// Meters are obtained from the returned provider; there is no shortcut
    /// vending them here.
    pub fn meter_provider(&self) -> Result<Arc<dyn MeterProvider + Send + Sync>> {
        Ok(self.provider()?.meter_provider())
    }

    /// The active provider's propagator set.
    pub fn propagators(&self) -> Result<ContextPropagators> {
        Ok(self.provider()?.propagators())
    }

    /// Replace the active provider's propagator set.
    pub fn set_propagators(&self, propagators: ContextPropagators) -> Result<()> {
        self.provider()?.set_propagators(propagators)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        ProviderRegistry::new()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("resolved", &self.slot.load().is_some())
            .field("factories", &self.factories)
            .finish()
    }
}
