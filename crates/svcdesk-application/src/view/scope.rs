use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Result of running a call inside a [`ViewScope`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The view was still active; the result was applied.
    Applied(T),
    /// The view was abandoned first; the result was dropped unapplied.
    Discarded,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded)
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Discarded => None,
        }
    }
}

/// Handle the navigation layer keeps to abandon a view.
#[derive(Debug, Clone)]
pub struct ViewHandle(CancellationToken);

impl ViewHandle {
    pub fn abandon(&self) {
        self.0.cancel();
    }

    pub fn is_abandoned(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// One activation of a view.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ViewHandle {
        ViewHandle(self.token.clone())
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Awaits `future` unless the view is abandoned first.
    pub async fn run<F: Future>(&self, future: F) -> Outcome<F::Output> {
        if self.token.is_cancelled() {
            return Outcome::Discarded;
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Outcome::Discarded,
            value = future => Outcome::Applied(value),
        }
    }
}
