//! Shared UI for the MedSync portal: auth flows, dashboard controllers and
//! the components both dashboards render.
//!
//! Controllers in [`auth`] and [`dashboard`] are plain async code over an
//! [`api::ApiClient`], so they run under tests with a
//! [`api::MockTransport`]. Components wire them to Dioxus signals.

pub mod auth;
pub use auth::{use_role_guard, use_session, LogoutButton, SessionProvider, SessionState};

pub mod components;
pub use components::{
    DashboardSidebar, HospitalCardView, ListingView, PatientCardView, ReportCardView,
};

pub mod dashboard;

mod navigation;
pub use navigation::{alert, redirect, Destination};

mod storage;
pub use storage::{client_config, make_api, make_session_store};

pub mod tabs;
pub use tabs::{Tab, TabController};
