//! Admin login form

use std::sync::Arc;

use menu_client::{AuthService, ClientError};
use parking_lot::Mutex;
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::{Credentials, Route, Session};

use super::busy::BusyFlag;
use super::navigation::Navigator;
use crate::utils::validation::{MAX_EMAIL_LEN, MAX_PASSWORD_LEN, validate_required_text};

pub const CREDENTIALS_REQUIRED: &str = "E-posta ve şifre gereklidir.";

/// Rendered state of the login form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginFormView {
    pub email: String,
    /// Submit is disabled while true
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct FormState {
    email: String,
    error: Option<String>,
}

pub struct LoginForm {
    auth: Arc<dyn AuthService>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<FormState>,
    busy: BusyFlag,
}

impl LoginForm {
    pub fn new(auth: Arc<dyn AuthService>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            auth,
            navigator,
            state: Mutex::new(FormState::default()),
            busy: BusyFlag::default(),
        }
    }

    /// Exchange the credentials for a session and go to the dashboard
    ///
    /// On failure the backend's message is shown and returned.
    pub async fn submit(&self, credentials: &Credentials) -> AppResult<Session> {
        let _busy = self.busy.try_acquire()?;
        {
            let mut state = self.state.lock();
            state.email = credentials.email.clone();
            state.error = None;
        }

        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(self.fail(AppError::with_message(ErrorCode::RequiredField, CREDENTIALS_REQUIRED)));
        }
        validate_required_text(&credentials.email, "email", MAX_EMAIL_LEN)
            .and_then(|_| validate_required_text(&credentials.password, "password", MAX_PASSWORD_LEN))
            .map_err(|e| self.fail(e))?;

        match self.auth.sign_in_with_password(credentials).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "Admin logged in");
                self.navigator.navigate(Route::Dashboard);
                Ok(session)
            }
            Err(ClientError::Unauthorized(message)) => {
                tracing::warn!(email = %credentials.email, "Login rejected");
                Err(self.fail(AppError::invalid_credentials(message)))
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    fn fail(&self, err: AppError) -> AppError {
        self.state.lock().error = Some(err.message.clone());
        err
    }

    pub fn snapshot(&self) -> LoginFormView {
        let state = self.state.lock();
        LoginFormView {
            email: state.email.clone(),
            loading: self.busy.is_busy(),
            error: state.error.clone(),
        }
    }
}
