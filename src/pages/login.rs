//! Login page state

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{PageError, PageResult};
use crate::utils::require_non_blank;

const MISSING_CREDENTIALS: &str = "Username or password missing";

/// Credentials typed into the login form plus the session flag
#[derive(Debug, Clone, Default)]
pub struct LoginPage {
    username: String,
    password: String,
    logged_in: bool,
    error_message: String,
}

/// Receipt returned when a password reset is requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordReset {
    /// Address the reset mail goes to
    pub email: String,
}

impl LoginPage {
    /// Create an empty, logged-out login page
    pub fn new() -> Self {
        Self::default()
    }

    /// Username typed so far
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password typed so far
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether the last login attempt succeeded
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Message left by the last failed login, empty otherwise
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Type a username, replacing any previous one
    pub fn enter_username(&mut self, username: &str) -> PageResult<()> {
        require_non_blank(username, "Username")?;
        self.username = username.to_string();
        Ok(())
    }

    /// Type a password, replacing any previous one
    pub fn enter_password(&mut self, password: &str) -> PageResult<()> {
        require_non_blank(password, "Password")?;
        self.password = password.to_string();
        Ok(())
    }

    /// Submit the form. Both fields must be filled in.
    pub fn submit_login(&mut self) -> PageResult<()> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            warn!("Login submitted with missing credentials");
            self.error_message = MISSING_CREDENTIALS.to_string();
            return Err(PageError::state(
                "both username and password must be provided before logging in",
            ));
        }

        self.error_message.clear();
        self.logged_in = true;
        info!(username = %self.username, "User logged in");
        Ok(())
    }

    /// Drop the session and clear both fields, whatever the current state
    pub fn logout(&mut self) {
        if self.logged_in {
            info!(username = %self.username, "User logged out");
        }
        self.logged_in = false;
        self.username.clear();
        self.password.clear();
    }

    /// Loose email check: an '@' and a '.' somewhere
    pub fn validate_email_format(email: &str) -> bool {
        email.contains('@') && email.contains('.')
    }

    /// Ask for a reset mail to be sent to `email`
    pub fn request_password_reset(&self, email: &str) -> PageResult<PasswordReset> {
        if !Self::validate_email_format(email) {
            return Err(PageError::validation("invalid email format"));
        }
        info!(%email, "Password reset requested");
        Ok(PasswordReset { email: email.to_string() })
    }
}
