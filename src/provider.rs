use std::fmt;
use std::mem;
use std::sync::{Arc, PoisonError, RwLock};

use crate::metrics::noop::NoopMeterProvider;
use crate::metrics::MeterProvider;
use crate::propagation::ContextPropagators;
use crate::trace::noop::NoopTracerProvider;
use crate::trace::TracerProvider;
use crate::Result;

/// The single object wiring together every telemetry signal.
///
/// A provider vends the tracer and meter providers instrumented code talks
/// to, and owns the propagator set carrying context across process
/// boundaries. The registry hands one provider to arbitrarily many callers,
/// so implementations must be safe to share across threads.
pub trait TelemetryProvider: fmt::Debug {
    /// The provider vending tracers.
    fn tracer_provider(&self) -> Arc<dyn TracerProvider + Send + Sync>;

    /// The provider vending meters.
    fn meter_provider(&self) -> Arc<dyn MeterProvider + Send + Sync>;

    /// The current propagator set.
    fn propagators(&self) -> ContextPropagators;

    /// Replace the propagator set.
    ///
    /// Propagators are the one late-bound piece of a provider; the signal
    /// providers are fixed at construction.
    fn set_propagators(&self, propagators: ContextPropagators) -> Result<()>;
}

/// A telemetry provider shared between a registry and its callers.
pub type SharedProvider = Arc<dyn TelemetryProvider + Send + Sync>;

/// A provider assembled from per-signal parts.
///
/// Parts left unset fall back to their no-op implementations, so
/// `DefaultProvider::default()` is the inert provider a registry serves
/// before anything real has been configured.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use telemetry_api::propagation::{ContextPropagators, NoopTextMapPropagator};
/// use telemetry_api::{DefaultProvider, SharedProvider, TelemetryProvider};
///
/// let provider: SharedProvider = Arc::new(
///     DefaultProvider::builder()
///         .with_propagators(ContextPropagators::new(vec![Box::new(
///             NoopTextMapPropagator::new(),
///         )]))
///         .build(),
/// );
/// assert_eq!(provider.propagators().len(), 1);
/// ```
#[derive(Debug)]
pub struct DefaultProvider {
    tracer_provider: Arc<dyn TracerProvider + Send + Sync>,
    meter_provider: Arc<dyn MeterProvider + Send + Sync>,
    propagators: RwLock<ContextPropagators>,
}

impl DefaultProvider {
    /// Start building a provider.
    pub fn builder() -> DefaultProviderBuilder {
        DefaultProviderBuilder::default()
    }
}

impl Default for DefaultProvider {
    fn default() -> Self {
        DefaultProvider::builder().build()
    }
}

impl TelemetryProvider for DefaultProvider {
    fn tracer_provider(&self) -> Arc<dyn TracerProvider + Send + Sync> {
        self.tracer_provider.clone()
    }

    fn meter_provider(&self) -> Arc<dyn MeterProvider + Send + Sync> {
        self.meter_provider.clone()
    }

    fn propagators(&self) -> ContextPropagators {
        // A poisoned cell still holds the last intact set.
        self.propagators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_propagators(&self, propagators: ContextPropagators) -> Result<()> {
        let mut current = self.propagators.write()?;
        let displaced = mem::replace(&mut *current, propagators);
        // The displaced set must drop outside the lock: a panicking
        // propagator drop would otherwise poison the cell.
        drop(current);
        drop(displaced);
        Ok(())
    }
}

/// A builder for [`DefaultProvider`].
#[derive(Debug, Default)]
pub struct DefaultProviderBuilder {
    tracer_provider: Option<Arc<dyn TracerProvider + Send + Sync>>,
    meter_provider: Option<Arc<dyn MeterProvider + Send + Sync>>,
    propagators: Option<ContextPropagators>,
}

impl DefaultProviderBuilder {
    /// The tracer provider this provider should serve.
    pub fn with_tracer_provider(
        mut self,
        tracer_provider: impl TracerProvider + Send + Sync + 'static,
    ) -> Self {
        self.tracer_provider = Some(Arc::new(tracer_provider));
        self
    }

    /// The meter provider this provider should serve.
    pub fn with_meter_provider(
        mut self,
        meter_provider: impl MeterProvider + Send + Sync + 'static,
    ) -> Self {
        self.meter_provider = Some(Arc::new(meter_provider));
        self
    }

    /// The initial propagator set.
    pub fn with_propagators(mut self, propagators: ContextPropagators) -> Self {
        self.propagators = Some(propagators);
        self
    }

    /// Assemble the provider, filling unset parts with no-op defaults.
    pub fn build(self) -> DefaultProvider {
        DefaultProvider {
            tracer_provider: self
                .tracer_provider
                .unwrap_or_else(|| Arc::new(NoopTracerProvider::new())),
            meter_provider: self
                .meter_provider
                .unwrap_or_else(|| Arc::new(NoopMeterProvider::new())),
            propagators: RwLock::new(self.propagators.unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::NoopTextMapPropagator;
    use crate::trace::Tracer;
    use crate::InstrumentationLibrary;

    #[test]
    fn default_provider_is_fully_inert() {
        let provider = DefaultProvider::default();
        let tracer = provider
            .tracer_provider()
            .tracer(InstrumentationLibrary::new("component", None));
        assert_eq!(tracer.instrumentation_library().name, "component");
        let meter = provider
            .meter_provider()
            .meter(InstrumentationLibrary::new("component", None));
        assert_eq!(meter.instrumentation_library().name, "component");
        assert!(provider.propagators().is_empty());
    }

    #[test]
    fn set_propagators_replaces_the_set() {
        let provider = DefaultProvider::default();
        provider
            .set_propagators(ContextPropagators::new(vec![Box::new(
                NoopTextMapPropagator::new(),
            )]))
            .expect("lock is never poisoned here");
        assert_eq!(provider.propagators().len(), 1);
    }

    #[test]
    fn a_poisoned_cell_keeps_serving_the_prior_set() {
        use std::panic::{self, AssertUnwindSafe};

        use crate::Error;

        let provider = DefaultProvider::default();
        provider
            .set_propagators(ContextPropagators::new(vec![Box::new(
                NoopTextMapPropagator::new(),
            )]))
            .expect("cell is not poisoned yet");

        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = provider.propagators.write().unwrap();
            panic!("poison the propagator cell");
        }));

        // Reads keep serving the intact prior set.
        assert_eq!(provider.propagators().len(), 1);

        // Writes report the poisoning and leave the set unchanged.
        let err = provider
            .set_propagators(ContextPropagators::default())
            .expect_err("writes observe the poisoning");
        assert!(matches!(err, Error::Other(_)));
        assert_eq!(provider.propagators().len(), 1);
    }

    #[test]
    fn builder_keeps_configured_parts() {
        use crate::metrics::noop::NoopMeterCore;
        use crate::metrics::Meter;
        use crate::trace::BoxedTracer;

        #[derive(Debug)]
        struct TaggingTracerProvider;

        #[derive(Debug)]
        struct TaggingTracer {
            library: InstrumentationLibrary,
        }

        impl Tracer for TaggingTracer {
            fn instrumentation_library(&self) -> &InstrumentationLibrary {
                &self.library
            }
        }

        impl TracerProvider for TaggingTracerProvider {
            fn tracer(&self, library: InstrumentationLibrary) -> BoxedTracer {
                BoxedTracer::new(Box::new(TaggingTracer {
                    library: InstrumentationLibrary::new(
                        format!("tagged::{}", library.name),
                        library.version,
                    ),
                }))
            }
        }

        #[derive(Debug)]
        struct TaggingMeterProvider;

        impl MeterProvider for TaggingMeterProvider {
            fn meter(&self, library: InstrumentationLibrary) -> Meter {
                Meter::new(
                    InstrumentationLibrary::new(
                        format!("tagged::{}", library.name),
                        library.version,
                    ),
                    Arc::new(NoopMeterCore::new()),
                )
            }
        }

        let provider = DefaultProvider::builder()
            .with_tracer_provider(TaggingTracerProvider)
            .with_meter_provider(TaggingMeterProvider)
            .build();
        let tracer = provider
            .tracer_provider()
            .tracer(InstrumentationLibrary::new("web", None));
        assert_eq!(tracer.instrumentation_library().name, "tagged::web");
        let meter = provider
            .meter_provider()
            .meter(InstrumentationLibrary::new("web", None));
        assert_eq!(meter.instrumentation_library().name, "tagged::web");
    }
}
