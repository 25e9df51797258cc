//! Navigation signal sink backed by a channel.

use svcdesk_core::route::{Navigator, Route};
use tokio::sync::mpsc;

/// Forwards navigation signals to whoever owns the receiving end.
///
/// Signals sent after the receiver is dropped are logged and discarded.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!("[ChannelNavigator] Navigate to {}", route);
        if self.tx.send(route).is_err() {
            tracing::debug!("[ChannelNavigator] No listener for {}", route);
        }
    }
}
