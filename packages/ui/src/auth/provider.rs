//! Session context and hooks for the UI.

use dioxus::prelude::*;
use store::{Access, Role, Session};

use crate::navigation::{redirect, Destination};
use crate::storage::make_session_store;

/// Session as seen by the components of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub session: Session,
}

impl SessionState {
    /// Read the persisted session (page entry).
    pub fn load() -> Self {
        Self {
            session: make_session_store().read(),
        }
    }

    pub fn username(&self) -> &str {
        &self.session.username
    }

    pub fn cid(&self) -> &str {
        &self.session.cid
    }
}

/// Get the current session state.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Provider component that loads the session once when the page mounts.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let state = use_signal(SessionState::load);
    use_context_provider(|| state);

    rsx! {
        {children}
    }
}

/// Guard a page. Returns the session when the stored role matches,
/// otherwise redirects to login and returns `None`.
pub fn use_role_guard(expected: Role) -> Option<Session> {
    use_hook(move || match make_session_store().require_role(expected) {
        Access::Granted(session) => Some(session),
        Access::Denied => {
            redirect(Destination::Login);
            None
        }
    })
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut state = use_session();

    let onclick = move |_| {
        let destination = super::logout(&make_session_store());
        state.set(SessionState::default());
        redirect(destination);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
