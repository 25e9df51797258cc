//! Session store trait.

use super::model::{AccessToken, Session};
use std::sync::Arc;

/// Holder of the current session.
///
/// Implementations must make every mutation appear atomic: a reader sees
/// either the complete previous session or the complete new one. Snapshots
/// are handed out as `Arc<Session>` so a reader keeps a consistent value
/// even if the store is replaced while it works with it.
pub trait SessionStore: Send + Sync {
    /// Returns the current session, if any.
    fn get(&self) -> Option<Arc<Session>>;

    /// Replaces any prior session with `session`.
    fn set(&self, session: Session);

    /// Removes the current session. Irreversible; a no-op when empty.
    fn clear(&self);

    /// Clears the store only if it still holds a session with `token`.
    ///
    /// Returns `true` if this call removed the session. Used to collapse
    /// several rejected calls that carried the same credential into a
    /// single teardown.
    fn clear_if_current(&self, token: &AccessToken) -> bool;

    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
