//! Signup, login and logout handlers.
//!
//! Validation happens before any request is built; a form that fails it
//! never reaches the transport.

use api::{ApiClient, ApiError, LoginRequest, SignupRequest, Transport};
use store::{KeyValueStore, SessionStore};

use crate::navigation::Destination;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("All fields are required.")]
    MissingSignupFields,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Email and password are required.")]
    MissingCredentials,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Raw values of the signup form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

impl SignupForm {
    /// Build the request body, trimming username and email.
    pub fn validate(&self) -> Result<SignupRequest, AuthError> {
        let username = self.username.trim();
        let email = self.email.trim();
        if username.is_empty()
            || email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
            || self.role.is_empty()
        {
            return Err(AuthError::MissingSignupFields);
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            role: self.role.clone(),
        })
    }
}

/// A created account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupOutcome {
    pub cid: String,
}

impl SignupOutcome {
    pub fn confirmation(&self) -> String {
        format!("Account created! Your CID: {}", self.cid)
    }

    /// Signup always continues to the login page.
    pub fn next(&self) -> Destination {
        Destination::Login
    }
}

pub async fn signup<T: Transport>(
    api: &ApiClient<T>,
    form: &SignupForm,
) -> Result<SignupOutcome, AuthError> {
    let request = form.validate()?;
    let response = api.signup(&request).await?;
    let cid = response.cid();
    tracing::info!(role = %request.role, "account created");
    Ok(SignupOutcome { cid })
}

/// Raw values of the login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, AuthError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Authenticate, persist the returned session and pick the landing page.
pub async fn login<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T>,
    sessions: &SessionStore<S>,
    form: &LoginForm,
) -> Result<Destination, AuthError> {
    let request = form.validate()?;
    let response = api.login(&request).await?;
    let session = response.to_session();
    sessions.save(&session);
    tracing::info!(role = %session.role, "logged in");
    Ok(Destination::landing_for(&session.role))
}

/// Forget the session. The caller navigates to the returned page.
pub fn logout<S: KeyValueStore>(sessions: &SessionStore<S>) -> Destination {
    sessions.clear();
    tracing::info!("logged out");
    Destination::Login
}
