//! Session gate
//!
//! Wraps the protected views. On mount the session is checked against the
//! auth service; without a live session the gate navigates to the login
//! view and admits nothing. While admitted a listener task follows
//! session-change events for the gate's user:
//!
//! ```text
//! mount ──▶ get_user ──┬─ None / Err ──▶ navigate(Login)
//!                      └─ Some(user) ──▶ admitted, spawn listener
//!                                             │
//!              SignedOut(user) ──▶ navigate(Login), stop
//!              SignedIn(user)  ──▶ loading = false
//!              teardown / drop ──▶ cancel token, stop
//! ```

use std::sync::Arc;

use menu_client::{AuthService, AuthSubscription};
use parking_lot::Mutex;
use shared::{AuthEvent, AuthUser, Route, Session};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::navigation::Navigator;

#[derive(Debug)]
struct GateState {
    loading: bool,
    user: Option<AuthUser>,
}

struct Listener {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Gate in front of the admin views
pub struct SessionGate {
    auth: Arc<dyn AuthService>,
    navigator: Arc<dyn Navigator>,
    state: Arc<Mutex<GateState>>,
    listener: Mutex<Option<Listener>>,
}

impl SessionGate {
    pub fn new(auth: Arc<dyn AuthService>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            auth,
            navigator,
            state: Arc::new(Mutex::new(GateState {
                loading: true,
                user: None,
            })),
            listener: Mutex::new(None),
        }
    }

    /// Check the session and admit or redirect
    ///
    /// Returns the admitted user. A locally expired session is refused
    /// without asking the backend.
    pub async fn mount(&self, session: Option<&Session>) -> Option<AuthUser> {
        self.teardown();
        self.state.lock().loading = true;

        let lookup = match session {
            Some(session) if session.is_expired() => Ok(None),
            Some(session) => self.auth.get_user(session).await,
            None => Ok(None),
        };

        match lookup {
            Ok(Some(user)) => {
                {
                    let mut state = self.state.lock();
                    state.loading = false;
                    state.user = Some(user.clone());
                }
                self.listen(user.clone());
                tracing::debug!(user_id = %user.id, "Session admitted");
                Some(user)
            }
            Ok(None) => {
                tracing::debug!("No live session, redirecting to login");
                self.reject();
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed, redirecting to login");
                self.reject();
                None
            }
        }
    }

    fn reject(&self) {
        {
            let mut state = self.state.lock();
            state.loading = false;
            state.user = None;
        }
        self.navigator.navigate(Route::Login);
    }

    fn listen(&self, user: AuthUser) {
        let subscription = self.auth.subscribe();
        let token = CancellationToken::new();
        let task = tokio::spawn(follow_session(
            subscription,
            user,
            token.clone(),
            self.state.clone(),
            self.navigator.clone(),
        ));
        *self.listener.lock() = Some(Listener { token, task });
    }

    /// Stop following session changes; later events cause no navigation
    pub fn teardown(&self) {
        if let Some(listener) = self.listener.lock().take() {
            listener.token.cancel();
            listener.task.abort();
        }
    }

    /// The session was rejected elsewhere: stop listening, drop the user
    /// and go to the login view
    pub fn close(&self) {
        self.teardown();
        self.reject();
    }

    pub fn is_admitted(&self) -> bool {
        self.state.lock().user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.state.lock().user.clone()
    }

    /// Whether a listener task is currently subscribed
    pub fn is_listening(&self) -> bool {
        self.listener
            .lock()
            .as_ref()
            .is_some_and(|l| !l.task.is_finished())
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn follow_session(
    mut subscription: AuthSubscription,
    user: AuthUser,
    token: CancellationToken,
    state: Arc<Mutex<GateState>>,
    navigator: Arc<dyn Navigator>,
) {
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            event = subscription.recv() => match event {
                Some(AuthEvent::SignedOut(other)) if other.id == user.id => {
                    if token.is_cancelled() {
                        break;
                    }
                    tracing::info!(user_id = %user.id, "Signed out, leaving admin views");
                    state.lock().user = None;
                    navigator.navigate(Route::Login);
                    break;
                }
                Some(AuthEvent::SignedIn(other)) if other.id == user.id => {
                    state.lock().loading = false;
                }
                Some(_) => {}
                None => break,
            },
        }
    }
}
