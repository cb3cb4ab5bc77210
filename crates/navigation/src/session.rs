//! Authentication state as seen by the router.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

/// Synchronous "is the user logged in" signal read at each navigate-to.
pub trait AuthState: Send + Sync {
    fn is_logged_in(&self) -> bool;
}

impl<F> AuthState for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_logged_in(&self) -> bool {
        self()
    }
}

/// Observable login flag, shared between the auth screens and the navigator.
#[derive(Debug, Clone)]
pub struct Session {
    tx: Arc<watch::Sender<bool>>,
}

impl Session {
    pub fn new(logged_in: bool) -> Self {
        let (tx, _) = watch::channel(logged_in);
        Self { tx: Arc::new(tx) }
    }

    pub fn logged_out() -> Self {
        Self::new(false)
    }

    pub fn log_in(&self) {
        self.set(true);
    }

    pub fn log_out(&self) {
        self.set(false);
    }

    /// Receiver that observes every login state change.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    fn set(&self, logged_in: bool) {
        let changed = self.tx.send_if_modified(|current| {
            let changed = *current != logged_in;
            *current = logged_in;
            changed
        });
        if changed {
            debug!(logged_in, "session state changed");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::logged_out()
    }
}

impl AuthState for Session {
    fn is_logged_in(&self) -> bool {
        *self.tx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_in_and_out() {
        let session = Session::logged_out();
        assert!(!session.is_logged_in());
        session.log_in();
        assert!(session.is_logged_in());
        session.log_out();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn clones_share_state() {
        let session = Session::logged_out();
        let other = session.clone();
        other.log_in();
        assert!(session.is_logged_in());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let session = Session::logged_out();
        let mut rx = session.subscribe();
        session.log_in();
        rx.changed().await.expect("sender alive");
        assert!(*rx.borrow_and_update());
    }

    #[test]
    fn closures_are_auth_state() {
        let always = || true;
        assert!(always.is_logged_in());
    }
}
