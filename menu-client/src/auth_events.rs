//! Session-change notifications
//!
//! ```text
//! sign_in / sign_out ──▶ AuthEvents::emit ──▶ broadcast::Sender<AuthEvent>
//!                                                   │
//!                                  ┌────────────────┼────────────────┐
//!                                  ▼                ▼                ▼
//!                          AuthSubscription  AuthSubscription   (dropped = unsubscribed)
//! ```

use shared::AuthEvent;
use tokio::sync::broadcast;

use crate::config::DEFAULT_EVENT_CAPACITY;

/// Fan-out hub for [`AuthEvent`]s
#[derive(Debug, Clone)]
pub struct AuthEvents {
    tx: broadcast::Sender<AuthEvent>,
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }
}

impl AuthEvents {
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Notify every live subscription. No subscribers is not an error.
    pub fn emit(&self, event: AuthEvent) {
        let delivered = self.tx.send(event.clone()).unwrap_or(0);
        tracing::debug!(?event, delivered, "Auth event emitted");
    }

    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Live subscription to session changes
///
/// Dropping it (or calling [`AuthSubscription::unsubscribe`]) ends delivery.
#[derive(Debug)]
pub struct AuthSubscription {
    rx: broadcast::Receiver<AuthEvent>,
}

impl AuthSubscription {
    /// Next event, or `None` once the hub is gone
    ///
    /// A subscriber that fell behind skips the overwritten events.
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Auth subscription lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AuthUser;

    fn user(id: &str) -> AuthUser {
        AuthUser {
            id: id.to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn every_subscriber_sees_each_event() {
        let events = AuthEvents::default();
        let mut a = events.subscribe();
        let mut b = events.subscribe();

        events.emit(AuthEvent::SignedOut(user("u1")));

        assert_eq!(a.recv().await, Some(AuthEvent::SignedOut(user("u1"))));
        assert_eq!(b.recv().await, Some(AuthEvent::SignedOut(user("u1"))));
    }

    #[tokio::test]
    async fn unsubscribe_releases_the_receiver() {
        let events = AuthEvents::default();
        let sub = events.subscribe();
        assert_eq!(events.subscriber_count(), 1);
        sub.unsubscribe();
        assert_eq!(events.subscriber_count(), 0);

        // emitting with nobody listening is fine
        events.emit(AuthEvent::SignedIn(user("u1")));
    }

    #[tokio::test]
    async fn closed_hub_ends_the_stream() {
        let events = AuthEvents::default();
        let mut sub = events.subscribe();
        drop(events);
        assert_eq!(sub.recv().await, None);
    }
}
