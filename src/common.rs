use std::borrow::Cow;
use std::sync::PoisonError;

use thiserror::Error;

/// Errors raised by registry, discovery, and provider operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Discovery was configured to use a provider implementation that cannot
    /// be located or constructed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An argument violated an operation's precondition. Raised before any
    /// state changes.
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// Other errors propagated from telemetry internals, e.g. poisoned locks.
    #[error("Telemetry error: {0}")]
    Other(String),
}

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Error::Other(err.to_string())
    }
}

/// Result type used by fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies the library or component on whose behalf telemetry is recorded.
///
/// Tracers and meters carry the library identity they were vended for, and
/// instrument descriptors keep it as contextual information outside their
/// equality contract.
#[non_exhaustive]
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct InstrumentationLibrary {
    /// Library name, usually a crate or package name.
    pub name: Cow<'static, str>,

    /// Library version, if any.
    pub version: Option<Cow<'static, str>>,
}

impl InstrumentationLibrary {
    /// Create a new instrumentation library identity.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        version: Option<Cow<'static, str>>,
    ) -> Self {
        InstrumentationLibrary {
            name: name.into(),
            version,
        }
    }
}
