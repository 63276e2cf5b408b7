//! Shared utility functions.

use std::future::Future;

use tokio::runtime::Handle;

use crate::config;
use crate::fplog_debug;

/// Hand a future whose output nobody will observe to the ambient Tokio
/// runtime so it runs to completion.
///
/// Returns `false` (and drops the future) when detaching is disabled by
/// config or there is no runtime on this thread.
pub fn detach<F>(future: F, what: &'static str) -> bool
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    if !config::current().detach_discarded {
        fplog_debug!("{}: dropping discarded future (detach disabled)", what);
        return false;
    }
    match Handle::try_current() {
        Ok(handle) => {
            fplog_debug!("{}: detaching discarded future", what);
            drop(handle.spawn(future));
            true
        }
        Err(_) => {
            fplog_debug!("{}: no runtime, dropping discarded future", what);
            false
        }
    }
}
