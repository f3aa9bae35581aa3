//! Presentational components shared by both dashboards.

mod cards;
pub use cards::{HospitalCardView, PatientCardView, ReportCardView};

mod listing;
pub use listing::ListingView;

mod sidebar;
pub use sidebar::DashboardSidebar;
