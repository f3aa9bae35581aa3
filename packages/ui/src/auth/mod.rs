//! Authentication: form handlers and the session context.

mod flow;
mod provider;

pub use flow::{login, logout, signup, AuthError, LoginForm, SignupForm, SignupOutcome};
pub use provider::{use_role_guard, use_session, LogoutButton, SessionProvider, SessionState};
