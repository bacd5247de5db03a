#![allow(unused_macros)]
//! Self-diagnostic logging for telemetry internals.
//!
//! These macros report what the entry-point layer itself is doing (provider
//! resolution, explicit installs, discovery failures). They are not a
//! general-purpose logging facade: with the `internal-logs` feature they
//! forward to `tracing`, under `cfg(test)` they print to stdout so
//! `--nocapture` shows the flow, and otherwise they compile to nothing.

/// Log an informational message about a telemetry-internal operation.
///
/// # Example
/// ```
/// use telemetry_api::tel_info;
/// tel_info!(name: "ProviderRegistry.ProviderSet");
/// ```
#[macro_export]
macro_rules! tel_info {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::info!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(test)]
        {
            print!("tel_info: name={}\n", $name);
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::info!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name, $($key = $value),+);
        }

        #[cfg(test)]
        {
            print!("tel_info: name={}", $name);
            $(
                print!(", {}={}", stringify!($key), $value);
            )+
            print!("\n");
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

/// Log a warning about a telemetry-internal operation.
///
/// # Example
/// ```
/// use telemetry_api::tel_warn;
/// tel_warn!(name: "ProviderRegistry.FactoryFailed", factory = "otlp");
/// ```
#[macro_export]
macro_rules! tel_warn {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::warn!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(test)]
        {
            print!("tel_warn: name={}\n", $name);
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::warn!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name, $($key = $value),+);
        }

        #[cfg(test)]
        {
            print!("tel_warn: name={}", $name);
            $(
                print!(", {}={}", stringify!($key), $value);
            )+
            print!("\n");
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

/// Log a debug message about a telemetry-internal operation.
///
/// # Example
/// ```
/// use telemetry_api::tel_debug;
/// tel_debug!(name: "ProviderRegistry.Resolved", factory = "otlp");
/// ```
#[macro_export]
macro_rules! tel_debug {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::debug!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(test)]
        {
            print!("tel_debug: name={}\n", $name);
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::debug!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name, $($key = $value),+);
        }

        #[cfg(test)]
        {
            print!("tel_debug: name={}", $name);
            $(
                print!(", {}={}", stringify!($key), $value);
            )+
            print!("\n");
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

/// Log an error raised by a telemetry-internal operation.
///
/// # Example
/// ```
/// use telemetry_api::tel_error;
/// tel_error!(name: "ProviderRegistry.LockPoisoned");
/// ```
#[macro_export]
macro_rules! tel_error {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::error!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(test)]
        {
            print!("tel_error: name={}\n", $name);
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::error!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name, $($key = $value),+);
        }

        #[cfg(test)]
        {
            print!("tel_error: name={}", $name);
            $(
                print!(", {}={}", stringify!($key), $value);
            )+
            print!("\n");
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = ($name, $($value),+);
        }
    };
}
