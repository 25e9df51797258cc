//! Session store implementations.
//!
//! - `MemorySessionStore`: process memory only
//! - `RuntimeSessionStore`: file in the per-user runtime directory, so a
//!   session survives between CLI invocations but not an OS logout

mod memory;
mod runtime;

pub use memory::MemorySessionStore;
pub use runtime::RuntimeSessionStore;

use crate::paths::DeskPaths;
use std::sync::Arc;
use svcdesk_core::config::SessionStorageKind;
use svcdesk_core::session::SessionStore;

/// Builds the configured store.
///
/// Falls back to memory when the platform has no runtime directory.
pub fn open_session_store(kind: SessionStorageKind) -> Arc<dyn SessionStore> {
    match kind {
        SessionStorageKind::Memory => Arc::new(MemorySessionStore::new()),
        SessionStorageKind::Runtime => match DeskPaths::session_file() {
            Ok(path) => Arc::new(RuntimeSessionStore::open(path)),
            Err(e) => {
                tracing::warn!("[SessionStore] {}, keeping the session in memory only", e);
                Arc::new(MemorySessionStore::new())
            }
        },
    }
}
