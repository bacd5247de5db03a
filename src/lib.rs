//! Entry points for telemetry instrumentation.
//!
//! This crate is the seam between code that *records* telemetry and the
//! implementations that *process* it. It deliberately contains no pipeline:
//! what lives here is the [`ProviderRegistry`] that owns the active
//! [`TelemetryProvider`], the discovery layer that locates an implementation
//! on first use, and the identity model shared by every implementation,
//! instrumentation libraries, [`Resource`]s, and metric instrument
//! descriptors.
//!
//! Instrumented code depends on this crate alone. Applications pick an
//! implementation by registering provider factories with a registry (or by
//! installing a provider directly) and pass the registry to the code that
//! records.
//!
//! # Getting Started
//!
//! ```
//! use std::sync::Arc;
//! use telemetry_api::{DefaultProvider, ProviderRegistry, SharedProvider};
//!
//! # fn main() -> telemetry_api::Result<()> {
//! // Wire up the provider implementations the application ships with.
//! let mut registry = ProviderRegistry::new();
//! registry.factories_mut().register(
//!     "inert",
//!     || -> telemetry_api::Result<SharedProvider> {
//!         Ok(Arc::new(DefaultProvider::default()))
//!     },
//! )?;
//!
//! // Hand the registry to the code that records telemetry. The first
//! // access resolves the provider; later accesses reuse it.
//! let tracer = registry.tracer("my-component")?;
//! let meter_provider = registry.meter_provider()?;
//! # drop((tracer, meter_provider));
//! # Ok(())
//! # }
//! ```
//!
//! With no factory registered, the registry installs an inert provider on
//! first access, so instrumented code never has to care whether telemetry
//! was configured.
//!
//! # Picking a provider
//!
//! When several factories are registered, the first registration wins unless
//! a pin names another one. A pin is set programmatically through
//! [`FactoryRegistry::pin`] or taken from the `TELEMETRY_PROVIDER_FACTORY`
//! environment variable via [`FactoryRegistry::pin_from_env`]. A pin naming
//! an unregistered factory makes resolution fail with
//! [`Error::Configuration`] rather than silently falling back.
//!
//! # Instrument identity
//!
//! The [`metrics`] module carries the descriptor model implementations
//! deduplicate instruments with: [`metrics::InstrumentDescriptor`] compares
//! and hashes over its definition attributes only, never over the meter
//! state or library it was created under.
//!
//! # Crate Feature Flags
//!
//! The following feature flags are available:
//!
//! * `internal-logs`: Emits this crate's self-diagnostics through
//!   [`tracing`](https://crates.io/crates/tracing). Enabled by default.
//! * `testing`: Exposes the [`ProviderRegistry::reset`] seam and the manual
//!   clock for downstream test harnesses. Never enable it in production
//!   builds.
//!
//! # Supported Rust Versions
//!
//! This crate is built against the latest stable release. The minimum
//! supported version is 1.65. The current version is not guaranteed to build
//! on Rust versions earlier than the minimum supported version.
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![allow(clippy::needless_doctest_main)]
#![cfg_attr(
    docsrs,
    feature(doc_cfg, doc_auto_cfg),
    deny(rustdoc::broken_intra_doc_links)
)]
#![cfg_attr(test, deny(warnings))]

#[macro_use]
mod internal_logging;

pub mod metrics;
pub mod propagation;
pub mod trace;

mod common;
mod discovery;
mod provider;
mod registry;
mod resource;

#[cfg(any(feature = "testing", test))]
#[doc(hidden)]
pub mod testing;

pub use common::{Error, InstrumentationLibrary, Result};
pub use discovery::{FactoryRegistry, ProviderFactory, PROVIDER_FACTORY_ENV};
pub use provider::{DefaultProvider, DefaultProviderBuilder, SharedProvider, TelemetryProvider};
pub use registry::ProviderRegistry;
pub use resource::Resource;

#[cfg(feature = "internal-logs")]
#[doc(hidden)]
pub mod _private {
    pub use tracing::{debug, error, info, warn};
}
