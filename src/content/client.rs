//! Per-call HTTP client construction.
//!
//! Every fetch operation builds its own [`reqwest::Client`] with the timeout
//! read from the settings at that moment and drops it before returning.
//! Nothing is pooled across calls.

use std::any::Any;
use std::panic::{AssertUnwindSafe, UnwindSafe, catch_unwind, set_hook, take_hook};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use super::error::FetchError;
use crate::user_agent;

/// Builds a short-lived client whose total request timeout is `timeout`.
///
/// Some sandboxed macOS environments panic while the builder reads system
/// proxy settings. That panic is caught and the build is retried with system
/// proxy lookup disabled and only the `*_PROXY` environment variables applied.
///
/// # Errors
///
/// Returns [`FetchError::ClientBuild`] when the builder rejects the
/// configuration.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    match try_build_client(timeout, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Build(source)) => Err(FetchError::ClientBuild { source }),
        Err(BuildClientFailure::Panic) => {
            warn!("HTTP client builder panicked reading system proxy settings; using env-proxy fallback");
            match try_build_client(timeout, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Build(source)) => Err(FetchError::ClientBuild { source }),
                Err(BuildClientFailure::Panic) => {
                    panic!("HTTP client builder panicked with system proxy lookup disabled")
                }
            }
        }
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

// The panic hook would still print the caught proxy panic to stderr, so it
// is swapped out for the duration of the guarded build.
static CLIENT_BUILD_PANIC_HOOK_LOCK: Mutex<()> = Mutex::new(());

fn try_build_client(
    timeout: Duration,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind_silent(AssertUnwindSafe(move || {
        #[cfg(test)]
        maybe_inject_client_build_panic(disable_system_proxy_lookup);

        let mut builder = base_client_builder(timeout);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn catch_unwind_silent<F, T>(operation: F) -> Result<T, Box<dyn Any + Send + 'static>>
where
    F: FnOnce() -> T + UnwindSafe,
{
    let _hook_guard = CLIENT_BUILD_PANIC_HOOK_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let previous_hook = take_hook();
    set_hook(Box::new(|_| {}));
    let outcome = catch_unwind(operation);
    set_hook(previous_hook);
    outcome
}

fn base_client_builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .timeout(timeout)
        .gzip(true)
        .user_agent(user_agent::default_user_agent())
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    for scheme in ["https", "http"] {
        let Some(proxy) = env_proxy_for_scheme(scheme) else {
            continue;
        };
        let resolved = if scheme == "https" {
            Proxy::https(&proxy)
        } else {
            Proxy::http(&proxy)
        };
        if let Ok(resolved) = resolved {
            builder = builder.proxy(resolved);
        }
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    let names: &[&str] = match scheme {
        "https" => &["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"],
        "http" => &["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"],
        _ => return None,
    };
    first_non_empty(names.iter().map(|name| std::env::var(name).ok()))
}

fn first_non_empty(values: impl Iterator<Item = Option<String>>) -> Option<String> {
    values
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
static CLIENT_BUILD_PANIC_INJECTION_COUNT: std::sync::atomic::AtomicUsize =
    std::sync::atomic::AtomicUsize::new(0);

#[cfg(test)]
fn inject_client_build_panics(count: usize) {
    CLIENT_BUILD_PANIC_INJECTION_COUNT.store(count, std::sync::atomic::Ordering::SeqCst);
}

#[cfg(test)]
fn maybe_inject_client_build_panic(disable_system_proxy_lookup: bool) {
    use std::sync::atomic::Ordering;

    if disable_system_proxy_lookup {
        return;
    }

    if CLIENT_BUILD_PANIC_INJECTION_COUNT
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
            if count > 0 { Some(count - 1) } else { None }
        })
        .is_ok()
    {
        panic!("injected HTTP client builder panic");
    }
}
