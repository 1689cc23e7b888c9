/// Conditional logging for development builds
///
/// The `log!` macro provides informational logging that is compiled out in
/// production (release) builds by default. Errors and warnings should use
/// `leptos::logging::error!` and `leptos::logging::warn!` directly.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// Arguments are still borrowed when logging is compiled out, so values that
/// exist only to be logged do not trip `unused_variables`.
///
/// Output goes through `leptos::logging`, so it lands in the browser console
/// on wasm32 and on stdout for native builds and unit tests.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::logging::log;
///
/// log!("Loaded {} stations", stations.len());
/// ```
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            leptos::logging::log!($($arg),+);
        }
        #[cfg(not(any(debug_assertions, feature = "console_logging")))]
        {
            let _ = ($(&$arg,)+);
        }
    };
}

pub(crate) use log;
