//! Patient dashboard: the patient's own reports, grouped by hospital.

use std::future::Future;

use api::{ApiClient, Transport};
use store::{Report, Session};

use super::{cards, log_listing, CardFields, DetailPanel, Listing, ReportCard};
use crate::tabs::{Tab, TabController};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatientTab {
    Reports,
    Hospitals,
    HospitalDetail,
    Profile,
}

impl Tab for PatientTab {
    fn id(&self) -> &'static str {
        match self {
            PatientTab::Reports => "reports",
            PatientTab::Hospitals => "hospitals",
            PatientTab::HospitalDetail => "hospital_view",
            PatientTab::Profile => "profile",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PatientTab::Reports => "My Reports",
            PatientTab::Hospitals => "Hospitals",
            PatientTab::HospitalDetail => "Hospital",
            PatientTab::Profile => "Profile",
        }
    }

    fn in_sidebar(&self) -> bool {
        !matches!(self, PatientTab::HospitalDetail)
    }

    fn has_loader(&self) -> bool {
        matches!(self, PatientTab::Reports | PatientTab::Hospitals)
    }
}

/// Panels a patient page declares, and which of them load at page entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientViews {
    pub tabs: Vec<PatientTab>,
    pub eager: Vec<PatientTab>,
}

impl Default for PatientViews {
    fn default() -> Self {
        Self {
            tabs: vec![
                PatientTab::Reports,
                PatientTab::Hospitals,
                PatientTab::HospitalDetail,
                PatientTab::Profile,
            ],
            eager: vec![PatientTab::Reports, PatientTab::Hospitals],
        }
    }
}

impl PatientViews {
    /// Tab state for this page; `None` when no tab is declared.
    pub fn controller(&self) -> Option<TabController<PatientTab>> {
        let (first, rest) = self.tabs.split_first()?;
        Some(rest.iter().fold(TabController::new(*first), |tabs, tab| tabs.with(*tab)))
    }

    /// Eager loads restricted to declared tabs, in declaration order.
    pub fn entry_loads(&self) -> Vec<PatientTab> {
        self.tabs
            .iter()
            .copied()
            .filter(|tab| tab.has_loader() && self.eager.contains(tab))
            .collect()
    }
}

/// Distinct hospital names in order of first appearance.
pub fn distinct_hospitals(reports: &[Report]) -> Vec<String> {
    let mut hospitals: Vec<String> = Vec::new();
    for report in reports {
        if !hospitals.contains(&report.hospital_name) {
            hospitals.push(report.hospital_name.clone());
        }
    }
    hospitals
}

/// Reports whose hospital name is exactly `hospital`.
pub fn reports_from<'a>(reports: &'a [Report], hospital: &'a str) -> impl Iterator<Item = &'a Report> {
    reports.iter().filter(move |report| report.hospital_name == hospital)
}

/// Data side of the patient dashboard.
#[derive(Clone, Debug)]
pub struct PatientDashboard<T: Transport> {
    api: ApiClient<T>,
    session: Session,
    views: PatientViews,
}

impl<T: Transport> PatientDashboard<T> {
    pub fn new(api: ApiClient<T>, session: Session, views: PatientViews) -> Self {
        Self { api, session, views }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn views(&self) -> &PatientViews {
        &self.views
    }

    /// Every report of the patient, with hospital names.
    pub async fn load_all_reports(&self) -> Listing<ReportCard> {
        let result = self
            .api
            .patient_reports()
            .await
            .map(|reports| cards(&self.api, &reports, CardFields::WITH_HOSPITAL));
        log_listing("patient reports", &result);
        Listing::from_result(result)
    }

    pub async fn load_hospital_list(&self) -> Listing<String> {
        let result = self
            .api
            .patient_reports()
            .await
            .map(|reports| distinct_hospitals(&reports));
        log_listing("hospital list", &result);
        Listing::from_result(result)
    }

    /// Switch to the hospital detail panel and fetch that hospital's reports.
    pub fn open_hospital(
        &self,
        tabs: &mut TabController<PatientTab>,
        name: &str,
    ) -> impl Future<Output = DetailPanel<ReportCard>> + '_ {
        tabs.show(PatientTab::HospitalDetail);
        self.hospital_reports(name.to_string())
    }

    pub async fn hospital_reports(&self, name: String) -> DetailPanel<ReportCard> {
        let result = self.api.patient_reports().await.map(|reports| {
            reports_from(&reports, &name)
                .map(|report| ReportCard::new(report, &self.api, CardFields::BARE))
                .collect::<Vec<_>>()
        });
        log_listing("hospital reports", &result);
        DetailPanel {
            listing: Listing::from_result(result),
            title: name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{client, report};
    use api::{Method, MockTransport};
    use serde_json::json;

    fn dashboard(transport: &MockTransport) -> PatientDashboard<MockTransport> {
        PatientDashboard::new(client(transport), Session::default(), PatientViews::default())
    }

    fn reports_json() -> serde_json::Value {
        json!([
            {"filename": "f1", "original_name": "x-ray.png", "hospital_name": "St. Mary's", "patient_cid": "C1", "uploaded_at": "2024-01-05"},
            {"filename": "f2", "original_name": "blood.pdf", "hospital_name": "General", "patient_cid": "C1", "uploaded_at": "2024-02-01"},
            {"filename": "f3", "original_name": "mri.dcm", "hospital_name": "St. Mary's", "patient_cid": "C1", "uploaded_at": "2024-03-10"}
        ])
    }

    #[test]
    fn test_distinct_hospitals_keep_first_appearance() {
        let reports = vec![
            report("1", "A", "C", ""),
            report("2", "B", "C", ""),
            report("3", "A", "C", ""),
            report("4", "C", "C", ""),
        ];
        assert_eq!(distinct_hospitals(&reports), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_entry_loads_follow_declared_views() {
        let views = PatientViews {
            tabs: vec![PatientTab::Hospitals, PatientTab::Profile],
            eager: vec![PatientTab::Reports, PatientTab::Hospitals],
        };
        assert_eq!(views.entry_loads(), vec![PatientTab::Hospitals]);
        let tabs = views.controller().unwrap();
        assert_eq!(tabs.active(), PatientTab::Hospitals);
        assert!(!tabs.supports(PatientTab::Reports));

        let empty = PatientViews {
            tabs: Vec::new(),
            eager: Vec::new(),
        };
        assert!(empty.controller().is_none());
    }

    #[tokio::test]
    async fn test_load_all_reports_renders_cards() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/patient/reports", 200, reports_json());

        let listing = dashboard(&transport).load_all_reports().await;

        let items = listing.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "x-ray.png");
        assert_eq!(items[0].hospital.as_deref(), Some("St. Mary's"));
        assert_eq!(items[0].uploaded_at, "2024-01-05");
        assert_eq!(items[0].download_url, "http://backend.test/download/f1");
        assert_eq!(items[0].patient_cid, None);
    }

    #[tokio::test]
    async fn test_load_hospital_list() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/patient/reports", 200, reports_json());

        let listing = dashboard(&transport).load_hospital_list().await;
        assert_eq!(listing, Listing::Ready(vec!["St. Mary's".to_string(), "General".to_string()]));
    }

    #[tokio::test]
    async fn test_open_hospital_filters_exactly() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/patient/reports", 200, reports_json());
        let dash = dashboard(&transport);
        let mut tabs = dash.views().controller().unwrap();

        let panel = dash.open_hospital(&mut tabs, "St. Mary's").await;

        assert!(tabs.is_active(PatientTab::HospitalDetail));
        assert_eq!(panel.title, "St. Mary's");
        let titles: Vec<_> = panel.listing.items().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["x-ray.png", "mri.dcm"]);
        assert!(panel.listing.items().iter().all(|c| c.hospital.is_none()));

        let none = dash.hospital_reports("st. mary's".to_string()).await;
        assert!(none.listing.items().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_renders_message() {
        let dash = dashboard(&MockTransport::offline());

        assert_eq!(dash.load_all_reports().await, Listing::Failed("Network Error".to_string()));
        assert_eq!(dash.load_hospital_list().await, Listing::Failed("Network Error".to_string()));
        let panel = dash.hospital_reports("General".to_string()).await;
        assert_eq!(panel.title, "General");
        assert_eq!(panel.listing.error(), Some("Network Error"));
    }

    #[tokio::test]
    async fn test_server_error_message_is_shown() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/patient/reports", 401, json!({"error": "Token expired"}));

        let listing = dashboard(&transport).load_all_reports().await;
        assert_eq!(listing.error(), Some("Token expired"));
    }
}
