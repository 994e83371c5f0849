//! The auth store: at most one signed-in user, checked against the demo accounts.
//!
//! Passwords are accepted but never verified. Every operation except [`AuthStore::logout`]
//! waits out a fixed delay to stand in for a network round trip.

use crate::models::User;
use crate::notify::Notifier;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists with this email")]
    EmailTaken,
}

/// The two accounts every session starts with.
pub fn demo_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "John Smith".to_string(),
            email: "teacher@example.com".to_string(),
            is_teacher: true,
        },
        User {
            id: "2".to_string(),
            name: "Jane Doe".to_string(),
            email: "student@example.com".to_string(),
            is_teacher: false,
        },
    ]
}

pub struct AuthStore {
    accounts: Vec<User>,
    user: Option<User>,
    login_delay: Duration,
    fingerprint_delay: Duration,
    notifier: Notifier,
}

impl AuthStore {
    pub fn new(login_delay: Duration, fingerprint_delay: Duration, notifier: Notifier) -> Self {
        Self {
            accounts: demo_users(),
            user: None,
            login_delay,
            fingerprint_delay,
            notifier,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_teacher(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_teacher)
    }

    /// Signs in the account registered under `email`. The password is ignored.
    pub async fn login(&mut self, email: &str, _password: &str) -> Result<&User, AuthError> {
        sleep(self.login_delay).await;

        let Some(found) = self.accounts.iter().find(|u| u.email == email).cloned() else {
            debug!(email, "login rejected");
            return Err(self.fail(AuthError::InvalidCredentials));
        };

        info!(user = %found.id, "logged in");
        self.notifier.success("Logged in successfully");
        Ok(&*self.user.insert(found))
    }

    /// Creates an account and signs it in. Fails if `email` is already taken.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        _password: &str,
        is_teacher: bool,
    ) -> Result<&User, AuthError> {
        sleep(self.login_delay).await;

        if self.accounts.iter().any(|u| u.email == email) {
            debug!(email, "registration rejected");
            return Err(self.fail(AuthError::EmailTaken));
        }

        let user = User {
            id: (self.accounts.len() + 1).to_string(),
            name: name.to_string(),
            email: email.to_string(),
            is_teacher,
        };
        self.accounts.push(user.clone());

        info!(user = %user.id, is_teacher, "registered");
        self.notifier.success("Registered successfully");
        Ok(&*self.user.insert(user))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user.id, "logged out");
        }
        self.notifier.success("Logged out successfully");
    }

    /// Simulated biometric sign-in. Always resolves to the first demo account.
    pub async fn authenticate_with_fingerprint(&mut self) -> Result<&User, AuthError> {
        sleep(self.fingerprint_delay).await;

        let Some(teacher) = self.accounts.first().cloned() else {
            self.notifier.error("Fingerprint authentication failed");
            return Err(AuthError::InvalidCredentials);
        };

        info!(user = %teacher.id, "fingerprint login");
        self.notifier.success("Fingerprint authentication successful");
        Ok(&*self.user.insert(teacher))
    }

    fn fail(&self, error: AuthError) -> AuthError {
        self.notifier.error(error.to_string());
        error
    }
}
