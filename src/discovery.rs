//! Provider discovery through explicitly registered factories.
//!
//! Discovery is deliberate rather than ambient: implementations are handed
//! to a [`FactoryRegistry`] by the embedding application, and resolution
//! picks from exactly that set. An optional pin, set directly or from the
//! [`PROVIDER_FACTORY_ENV`] environment variable, names the factory that
//! must win when several are registered.

use std::borrow::Cow;
use std::env;
use std::fmt;

use crate::{Error, Result, SharedProvider};

/// Environment variable naming the provider factory a registry must use.
pub const PROVIDER_FACTORY_ENV: &str = "TELEMETRY_PROVIDER_FACTORY";

/// Builds a telemetry provider on demand during resolution.
///
/// Any `Fn() -> Result<SharedProvider>` closure is a factory, so most
/// callers never implement this trait by hand.
pub trait ProviderFactory: Send + Sync {
    /// Construct the provider this factory was registered for.
    fn create(&self) -> Result<SharedProvider>;
}

impl<F> ProviderFactory for F
where
    F: Fn() -> Result<SharedProvider> + Send + Sync,
{
    fn create(&self) -> Result<SharedProvider> {
        self()
    }
}

/// An ordered collection of named provider factories.
///
/// Registration order is remembered: with no pin in place, the first
/// registered factory is the one resolution uses. Names are unique; a
/// rejected registration leaves the registry unchanged.
pub struct FactoryRegistry {
    factories: Vec<(Cow<'static, str>, Box<dyn ProviderFactory>)>,
    pinned: Option<Cow<'static, str>>,
}

impl FactoryRegistry {
    /// Create an empty registry with no pin.
    pub fn new() -> Self {
        FactoryRegistry {
            factories: Vec::new(),
            pinned: None,
        }
    }

    /// Register a factory under a unique, non-empty name.
    pub fn register(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        factory: impl ProviderFactory + 'static,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Precondition(
                "provider factory names must be non-empty".into(),
            ));
        }
        if self.factories.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::Precondition(format!(
                "provider factory {name:?} is already registered"
            )));
        }
        self.factories.push((name, Box::new(factory)));
        Ok(())
    }

    /// Pin resolution to the named factory.
    ///
    /// The name may refer to a factory registered later; it is checked at
    /// selection time, not here.
    pub fn pin(&mut self, name: impl Into<Cow<'static, str>>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Precondition(
                "the pinned factory name must be non-empty".into(),
            ));
        }
        self.pinned = Some(name);
        Ok(())
    }

    /// Pin resolution to the factory named by [`PROVIDER_FACTORY_ENV`].
    ///
    /// Unset or empty values leave the current pin untouched.
    pub fn pin_from_env(&mut self) {
        if let Some(name) = env::var(PROVIDER_FACTORY_ENV)
            .ok()
            .filter(|name| !name.is_empty())
        {
            self.pinned = Some(Cow::Owned(name));
        }
    }

    /// The currently pinned factory name, if any.
    pub fn pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    /// The registered factory names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|(name, _)| name.as_ref())
    }

    /// The number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no factory has been registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Pick the factory resolution should use.
    ///
    /// A pin selects its factory or fails if that name is not registered.
    /// Without a pin the first registered factory wins, and an empty
    /// registry selects nothing.
    pub fn select(&self) -> Result<Option<(&str, &dyn ProviderFactory)>> {
        if let Some(pinned) = &self.pinned {
            return match self
                .factories
                .iter()
                .find(|(name, _)| name == pinned)
            {
                Some((name, factory)) => Ok(Some((name.as_ref(), factory.as_ref()))),
                None => Err(Error::Configuration(format!(
                    "pinned provider factory {pinned:?} is not registered"
                ))),
            };
        }
        Ok(self
            .factories
            .first()
            .map(|(name, factory)| (name.as_ref(), factory.as_ref())))
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        FactoryRegistry::new()
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("factories", &self.names().collect::<Vec<_>>())
            .field("pinned", &self.pinned)
            .finish()
    }
}
