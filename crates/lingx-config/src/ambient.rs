//! Process-wide default settings
//!
//! Server-side rendering helpers sometimes cannot thread settings through
//! every call. For those contexts a single ambient default can be installed
//! once at startup; it is immutable afterwards, and per-request mutation is
//! deliberately impossible. Everything else should take settings explicitly.

use crate::settings::ClientSettings;
use lingx_common::{LingxError, Result};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static AMBIENT: OnceCell<Arc<ClientSettings>> = OnceCell::new();

/// Install the ambient default settings. Fails if already installed.
pub fn set_ambient(settings: ClientSettings) -> Result<()> {
    AMBIENT
        .set(Arc::new(settings))
        .map_err(|_| LingxError::config("Ambient settings are already installed"))
}

/// Get the ambient default settings, if installed.
pub fn ambient() -> Option<Arc<ClientSettings>> {
    AMBIENT.get().cloned()
}
