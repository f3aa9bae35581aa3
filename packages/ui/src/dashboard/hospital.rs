//! Hospital dashboard: reports this hospital uploaded, grouped by patient,
//! and the upload form.

use std::collections::BTreeMap;
use std::future::Future;

use api::{ApiClient, ApiError, Transport, UploadFile};
use store::{Report, Session};

use super::{cards, log_listing, newest_first, CardFields, DetailPanel, Listing, ReportCard};
use crate::tabs::{Tab, TabController};

/// Grouping key for reports without a patient CID.
pub const UNKNOWN_CID: &str = "Unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HospitalTab {
    Patients,
    PatientDetail,
    Upload,
    Profile,
}

impl Tab for HospitalTab {
    fn id(&self) -> &'static str {
        match self {
            HospitalTab::Patients => "patients",
            HospitalTab::PatientDetail => "patient_view",
            HospitalTab::Upload => "upload",
            HospitalTab::Profile => "profile",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            HospitalTab::Patients => "Patients",
            HospitalTab::PatientDetail => "Patient",
            HospitalTab::Upload => "Upload Report",
            HospitalTab::Profile => "Profile",
        }
    }

    fn in_sidebar(&self) -> bool {
        !matches!(self, HospitalTab::PatientDetail)
    }

    fn has_loader(&self) -> bool {
        matches!(self, HospitalTab::Patients | HospitalTab::Upload)
    }
}

/// Panels a hospital page declares, and which of them load at page entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HospitalViews {
    pub tabs: Vec<HospitalTab>,
    pub eager: Vec<HospitalTab>,
}

impl Default for HospitalViews {
    fn default() -> Self {
        Self {
            tabs: vec![
                HospitalTab::Patients,
                HospitalTab::PatientDetail,
                HospitalTab::Upload,
                HospitalTab::Profile,
            ],
            eager: vec![HospitalTab::Patients, HospitalTab::Upload],
        }
    }
}

impl HospitalViews {
    pub fn controller(&self) -> Option<TabController<HospitalTab>> {
        let (first, rest) = self.tabs.split_first()?;
        Some(rest.iter().fold(TabController::new(*first), |tabs, tab| tabs.with(*tab)))
    }

    pub fn entry_loads(&self) -> Vec<HospitalTab> {
        self.tabs
            .iter()
            .copied()
            .filter(|tab| tab.has_loader() && self.eager.contains(tab))
            .collect()
    }
}

/// One patient card: a CID and how many reports it has.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientGroup {
    pub cid: String,
    pub count: usize,
}

impl PatientGroup {
    pub fn label(&self) -> String {
        if self.count == 1 {
            "1 report".to_string()
        } else {
            format!("{} reports", self.count)
        }
    }
}

/// Count reports per patient CID, CIDs ascending.
pub fn group_by_patient(reports: &[Report]) -> Vec<PatientGroup> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for report in reports {
        let cid = if report.patient_cid.is_empty() {
            UNKNOWN_CID
        } else {
            report.patient_cid.as_str()
        };
        *counts.entry(cid).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(cid, count)| PatientGroup {
            cid: cid.to_string(),
            count,
        })
        .collect()
}

/// Result of an upload attempt, shown under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadNotice {
    /// Form incomplete; nothing was sent.
    Invalid(String),
    Failed(String),
    Uploaded,
}

impl UploadNotice {
    pub fn message(&self) -> String {
        match self {
            UploadNotice::Invalid(message) => message.clone(),
            UploadNotice::Failed(message) => format!("❌ {message}"),
            UploadNotice::Uploaded => "✅ Uploaded successfully!".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadNotice::Uploaded)
    }
}

/// Values of the upload form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub cid: String,
    pub file: Option<UploadFile>,
}

/// What the page shows after submitting the upload form.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadOutcome {
    pub notice: UploadNotice,
    /// Form values to keep; cleared after a successful upload.
    pub form: UploadForm,
    /// Reloaded patient list and upload history, after a successful upload.
    pub refreshed: Option<(Listing<PatientGroup>, Listing<ReportCard>)>,
}

/// Data side of the hospital dashboard.
#[derive(Clone, Debug)]
pub struct HospitalDashboard<T: Transport> {
    api: ApiClient<T>,
    session: Session,
    views: HospitalViews,
}

impl<T: Transport> HospitalDashboard<T> {
    pub fn new(api: ApiClient<T>, session: Session, views: HospitalViews) -> Self {
        Self { api, session, views }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn views(&self) -> &HospitalViews {
        &self.views
    }

    pub async fn load_hospital_patients(&self) -> Listing<PatientGroup> {
        let result = self
            .api
            .hospital_reports()
            .await
            .map(|reports| group_by_patient(&reports));
        log_listing("hospital patients", &result);
        Listing::from_result(result)
    }

    /// Switch to the patient detail panel and fetch that patient's reports.
    pub fn open_patient(
        &self,
        tabs: &mut TabController<HospitalTab>,
        cid: &str,
    ) -> impl Future<Output = DetailPanel<ReportCard>> + '_ {
        tabs.show(HospitalTab::PatientDetail);
        self.patient_reports(cid.to_string())
    }

    pub async fn patient_reports(&self, cid: String) -> DetailPanel<ReportCard> {
        let result = self.api.hospital_reports().await.map(|reports| {
            let mut matching: Vec<Report> = reports
                .into_iter()
                .filter(|report| report.patient_cid == cid)
                .collect();
            newest_first(&mut matching);
            cards(&self.api, &matching, CardFields::BARE)
        });
        log_listing("patient reports", &result);
        DetailPanel {
            title: format!("Patient {cid}"),
            listing: Listing::from_result(result),
        }
    }

    /// Upload history, newest first.
    pub async fn load_hospital_uploads(&self) -> Listing<ReportCard> {
        let result = self.api.hospital_reports().await.map(|mut reports| {
            newest_first(&mut reports);
            cards(&self.api, &reports, CardFields::WITH_PATIENT)
        });
        log_listing("upload history", &result);
        Listing::from_result(result)
    }

    /// Resolve `cid` and upload `file` for that patient.
    pub async fn upload(&self, cid: &str, file: Option<UploadFile>) -> UploadNotice {
        let cid = cid.trim();
        let file = match file {
            Some(file) if !cid.is_empty() => file,
            _ => return UploadNotice::Invalid("Missing CID or file.".to_string()),
        };

        match self.resolve_and_upload(cid, file).await {
            Ok(()) => {
                tracing::info!("report uploaded");
                UploadNotice::Uploaded
            }
            Err(err) => {
                tracing::warn!(error = %err, "report upload failed");
                UploadNotice::Failed(err.to_string())
            }
        }
    }

    async fn resolve_and_upload(&self, cid: &str, file: UploadFile) -> Result<(), UploadError> {
        let patient_id = self
            .api
            .find_patient(cid)
            .await?
            .id()
            .ok_or(UploadError::PatientNotFound)?;
        self.api.upload_report(&patient_id, file).await?;
        Ok(())
    }

    /// Upload from the form, then reload the panels that show uploads.
    pub async fn submit_upload(&self, form: UploadForm) -> UploadOutcome {
        let notice = self.upload(&form.cid, form.file.clone()).await;
        if !notice.is_success() {
            return UploadOutcome {
                notice,
                form,
                refreshed: None,
            };
        }
        let patients = self.load_hospital_patients().await;
        let uploads = self.load_hospital_uploads().await;
        UploadOutcome {
            notice,
            form: UploadForm::default(),
            refreshed: Some((patients, uploads)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum UploadError {
    #[error("Patient not found")]
    PatientNotFound,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{client, report};
    use api::{Method, MockTransport, PartValue, RequestBody};
    use serde_json::json;

    fn dashboard(transport: &MockTransport) -> HospitalDashboard<MockTransport> {
        HospitalDashboard::new(client(transport), Session::default(), HospitalViews::default())
    }

    fn reports_json() -> serde_json::Value {
        json!([
            {"filename": "a", "original_name": "old.pdf", "hospital_name": "General", "patient_cid": "CID-B", "uploaded_at": "2024-01-01 10:00:00"},
            {"filename": "b", "original_name": "new.pdf", "hospital_name": "General", "patient_cid": "CID-B", "uploaded_at": "2024-05-01 10:00:00"},
            {"filename": "c", "original_name": "scan.png", "hospital_name": "General", "patient_cid": "CID-A", "uploaded_at": "2024-03-01 10:00:00"},
            {"filename": "d", "original_name": "orphan.txt", "hospital_name": "General", "patient_cid": null, "uploaded_at": "2024-02-01 10:00:00"}
        ])
    }

    fn pdf() -> UploadFile {
        UploadFile {
            file_name: "result.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: b"%PDF".to_vec(),
        }
    }

    #[test]
    fn test_group_by_patient_counts_and_orders() {
        let reports = vec![
            report("1", "H", "C2", ""),
            report("2", "H", "C1", ""),
            report("3", "H", "C2", ""),
            report("4", "H", "", ""),
        ];
        let groups = group_by_patient(&reports);
        let summary: Vec<_> = groups.iter().map(|g| (g.cid.as_str(), g.label())).collect();
        assert_eq!(
            summary,
            vec![
                ("C1", "1 report".to_string()),
                ("C2", "2 reports".to_string()),
                ("Unknown", "1 report".to_string()),
            ]
        );
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(UploadNotice::Uploaded.message(), "✅ Uploaded successfully!");
        assert_eq!(UploadNotice::Failed("Patient not found".to_string()).message(), "❌ Patient not found");
        assert_eq!(UploadNotice::Invalid("Missing CID or file.".to_string()).message(), "Missing CID or file.");
    }

    #[test]
    fn test_default_views_load_patients_and_uploads() {
        let views = HospitalViews::default();
        assert_eq!(views.entry_loads(), vec![HospitalTab::Patients, HospitalTab::Upload]);
        let tabs = views.controller().unwrap();
        let sidebar: Vec<_> = tabs.sidebar().collect();
        assert!(!sidebar.contains(&HospitalTab::PatientDetail));
    }

    #[tokio::test]
    async fn test_load_hospital_patients() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/hospital/reports", 200, reports_json());

        let listing = dashboard(&transport).load_hospital_patients().await;
        let cids: Vec<_> = listing.items().iter().map(|g| (g.cid.as_str(), g.count)).collect();
        assert_eq!(cids, vec![("CID-A", 1), ("CID-B", 2), ("Unknown", 1)]);
    }

    #[tokio::test]
    async fn test_open_patient_sorts_newest_first() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/hospital/reports", 200, reports_json());
        let dash = dashboard(&transport);
        let mut tabs = dash.views().controller().unwrap();

        let panel = dash.open_patient(&mut tabs, "CID-B").await;

        assert!(tabs.is_active(HospitalTab::PatientDetail));
        assert_eq!(panel.title, "Patient CID-B");
        let titles: Vec<_> = panel.listing.items().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["new.pdf", "old.pdf"]);
        assert!(panel.listing.items().iter().all(|c| c.cid_line().is_none()));
    }

    #[tokio::test]
    async fn test_upload_history_shows_cid_line() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/hospital/reports", 200, reports_json());

        let listing = dashboard(&transport).load_hospital_uploads().await;
        let items = listing.items();
        let titles: Vec<_> = items.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["new.pdf", "scan.png", "orphan.txt", "old.pdf"]);
        assert_eq!(items[0].cid_line().as_deref(), Some("CID: CID-B"));
        assert_eq!(items[0].download_url, "http://backend.test/download/b");
    }

    #[tokio::test]
    async fn test_upload_missing_input_sends_nothing() {
        let transport = MockTransport::new();
        let dash = dashboard(&transport);

        let no_file = dash.upload("CID-A", None).await;
        let blank_cid = dash.upload("   ", Some(pdf())).await;

        assert_eq!(no_file, UploadNotice::Invalid("Missing CID or file.".to_string()));
        assert_eq!(blank_cid, no_file);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_cid_never_uploads() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/hospital/find_patient", 404, json!({"error": "Patient not found"}));
        let dash = dashboard(&transport);

        let notice = dash.upload("CID-X", Some(pdf())).await;
        assert_eq!(notice.message(), "❌ Patient not found");
        assert!(transport.requests_to("/api/hospital/upload").is_empty());

        transport.on(Method::Get, "/api/hospital/find_patient", 200, json!({}));
        let notice = dash.upload("CID-X", Some(pdf())).await;
        assert_eq!(notice, UploadNotice::Failed("Patient not found".to_string()));
        assert!(transport.requests_to("/api/hospital/upload").is_empty());
    }

    #[tokio::test]
    async fn test_submit_upload_clears_form_and_refreshes() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/hospital/find_patient", 200, json!({"id": 42}));
        transport.on(Method::Post, "/api/hospital/upload", 201, json!({"message": "ok"}));
        transport.on(Method::Get, "/api/hospital/reports", 200, reports_json());
        let form = UploadForm {
            cid: " CID-A ".to_string(),
            file: Some(pdf()),
        };

        let outcome = dashboard(&transport).submit_upload(form).await;

        assert_eq!(outcome.notice, UploadNotice::Uploaded);
        assert_eq!(outcome.form, UploadForm::default());
        let (patients, uploads) = outcome.refreshed.unwrap();
        assert_eq!(patients.items().len(), 3);
        assert_eq!(uploads.items().len(), 4);

        let lookup = &transport.requests_to("/api/hospital/find_patient")[0];
        assert!(lookup.url.ends_with("?cid=CID-A"));
        let upload = &transport.requests_to("/api/hospital/upload")[0];
        let RequestBody::Multipart(parts) = &upload.body else {
            panic!("expected multipart body");
        };
        assert_eq!(parts[0].name, "patient_id");
        assert_eq!(parts[0].value, PartValue::Text("42".to_string()));
        assert_eq!(parts[1].name, "report_file");
        assert_eq!(parts[1].value, PartValue::File(pdf()));
    }

    #[tokio::test]
    async fn test_submit_upload_failure_keeps_form() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/hospital/find_patient", 200, json!({"id": "p-7"}));
        transport.on(Method::Post, "/api/hospital/upload", 500, json!({}));
        let form = UploadForm {
            cid: "CID-A".to_string(),
            file: Some(pdf()),
        };

        let outcome = dashboard(&transport).submit_upload(form.clone()).await;

        assert_eq!(outcome.notice.message(), "❌ Error");
        assert_eq!(outcome.form, form);
        assert!(outcome.refreshed.is_none());
        assert!(transport.requests_to("/api/hospital/reports").is_empty());
    }

    #[tokio::test]
    async fn test_upload_unreachable_after_lookup() {
        let transport = MockTransport::new();
        transport.on(Method::Get, "/api/hospital/find_patient", 200, json!({"id": "p-7"}));
        transport.unreachable(Method::Post, "/api/hospital/upload");
        transport.on(Method::Get, "/api/hospital/reports", 200, reports_json());
        let form = UploadForm {
            cid: "CID-A".to_string(),
            file: Some(pdf()),
        };

        let outcome = dashboard(&transport).submit_upload(form.clone()).await;

        assert_eq!(outcome.notice.message(), "❌ Network Error");
        assert_eq!(outcome.form, form);
        assert!(outcome.refreshed.is_none());
        assert_eq!(transport.requests_to("/api/hospital/upload").len(), 1);
        assert!(transport.requests_to("/api/hospital/reports").is_empty());
    }

    #[tokio::test]
    async fn test_upload_history_orders_timestamps_as_strings() {
        let transport = MockTransport::new();
        transport.on(
            Method::Get,
            "/api/hospital/reports",
            200,
            json!([
                {"filename": "a", "original_name": "utc.pdf", "patient_cid": "CID-A", "uploaded_at": "2024-05-01T08:00:00Z"},
                {"filename": "b", "original_name": "offset.pdf", "patient_cid": "CID-A", "uploaded_at": "2024-05-01T09:00:00+02:00"},
                {"filename": "c", "original_name": "pending.pdf", "patient_cid": "CID-A", "uploaded_at": "pending"},
                {"filename": "d", "original_name": "jan.pdf", "patient_cid": "CID-A", "uploaded_at": "2024-01-01"},
            ]),
        );

        let listing = dashboard(&transport).load_hospital_uploads().await;
        let titles: Vec<_> = listing.items().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["pending.pdf", "offset.pdf", "utc.pdf", "jan.pdf"]);
    }

    #[tokio::test]
    async fn test_network_failure_renders_message() {
        let dash = dashboard(&MockTransport::offline());

        assert_eq!(dash.load_hospital_patients().await.error(), Some("Network Error"));
        assert_eq!(dash.load_hospital_uploads().await.error(), Some("Network Error"));
        assert_eq!(dash.upload("CID-A", Some(pdf())).await.message(), "❌ Network Error");
    }
}
