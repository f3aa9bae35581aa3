//! Page-level navigation targets.

use store::Role;

/// A page the portal can send the user to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Login,
    Signup,
    Dashboard(Role),
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Login => "/login",
            Destination::Signup => "/signup",
            Destination::Dashboard(Role::Patient) => "/patient",
            Destination::Dashboard(Role::Hospital) => "/hospital",
        }
    }

    /// Dashboard for a role string returned by login.
    pub fn landing_for(role: &str) -> Self {
        Destination::Dashboard(Role::landing_for(role))
    }
}

/// Full page load to `destination`.
///
/// Session state is re-read at page entry, so a hard navigation is used
/// rather than a router push.
pub fn redirect(destination: Destination) {
    tracing::debug!(path = destination.path(), "redirecting");
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(destination.path());
        }
    }
}

/// Blocking confirmation dialog.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!(%message, "alert");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_routes_by_role() {
        assert_eq!(Destination::landing_for("patient").path(), "/patient");
        assert_eq!(Destination::landing_for("hospital").path(), "/hospital");
        assert_eq!(Destination::landing_for("clinic").path(), "/hospital");
    }
}
