//! Cross-platform logging shims.
//!
//! Web builds write to the browser console, native builds go through
//! `tracing`; the macros keep call sites identical on both targets.

#[cfg(target_arch = "wasm32")]
mod backend {
    pub fn info(msg: &str) {
        web_sys::console::log_1(&msg.into());
    }

    pub fn warn(msg: &str) {
        web_sys::console::warn_1(&msg.into());
    }

    pub fn error(msg: &str) {
        web_sys::console::error_1(&msg.into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    pub fn info(msg: &str) {
        tracing::info!("{msg}");
    }

    pub fn warn(msg: &str) {
        tracing::warn!("{msg}");
    }

    pub fn error(msg: &str) {
        tracing::error!("{msg}");
    }
}

pub use backend::{error, info, warn};

/// Install the native `tracing` subscriber. Call once from the host
/// binary before anything logs; verbosity comes from `RUST_LOG` when set.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("huddle_client=debug")),
        )
        .init();
}

/// The browser console needs no setup; kept so host call sites are
/// identical on both targets.
#[cfg(target_arch = "wasm32")]
pub fn init() {}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::info(&format!($($arg)*))
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::warn(&format!($($arg)*))
    };
}

/// Log an error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::error(&format!($($arg)*))
    };
}
