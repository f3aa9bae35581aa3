//! # Dashboard view models
//!
//! The patient and hospital dashboards share the same building blocks:
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Listing`] | State of one list panel: not loaded, loading, loaded, or failed with the message to show in place of the list. |
//! | [`ReportCard`] | What a report card displays. Which optional lines appear depends on the panel ([`CardFields`]). |
//! | [`DetailPanel`] | A drill-down panel: its title and its listing. |
//!
//! Controllers ([`PatientDashboard`], [`HospitalDashboard`]) fetch through an
//! [`api::ApiClient`] and return these values; components only render them.

use api::{ApiClient, ApiError, Transport};
use store::Report;

pub mod hospital;
pub mod patient;

pub use hospital::{
    group_by_patient, HospitalDashboard, HospitalTab, HospitalViews, PatientGroup, UploadForm,
    UploadNotice, UploadOutcome,
};
pub use patient::{distinct_hospitals, PatientDashboard, PatientTab, PatientViews};

/// State of a list panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Listing<T> {
    #[default]
    Idle,
    Loading,
    Ready(Vec<T>),
    /// Fetch failed; the message replaces the list.
    Failed(String),
}

impl<T> Listing<T> {
    pub fn from_result(result: Result<Vec<T>, ApiError>) -> Self {
        match result {
            Ok(items) => Listing::Ready(items),
            Err(err) => Listing::Failed(err.to_string()),
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Listing::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Listing::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Listing::Loading)
    }
}

/// Optional lines of a report card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardFields {
    pub hospital: bool,
    pub patient_cid: bool,
}

impl CardFields {
    pub const BARE: CardFields = CardFields {
        hospital: false,
        patient_cid: false,
    };
    pub const WITH_HOSPITAL: CardFields = CardFields {
        hospital: true,
        patient_cid: false,
    };
    pub const WITH_PATIENT: CardFields = CardFields {
        hospital: false,
        patient_cid: true,
    };
}

/// One rendered report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportCard {
    pub title: String,
    pub hospital: Option<String>,
    pub patient_cid: Option<String>,
    pub uploaded_at: String,
    pub download_url: String,
}

impl ReportCard {
    pub fn new<T: Transport>(report: &Report, api: &ApiClient<T>, fields: CardFields) -> Self {
        Self {
            title: report.original_name.clone(),
            hospital: fields.hospital.then(|| report.hospital_name.clone()),
            patient_cid: fields.patient_cid.then(|| report.patient_cid.clone()),
            uploaded_at: report.uploaded_at.clone(),
            download_url: api.download_url(&report.filename),
        }
    }

    pub fn cid_line(&self) -> Option<String> {
        self.patient_cid.as_ref().map(|cid| format!("CID: {cid}"))
    }
}

/// A drill-down panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailPanel<T> {
    pub title: String,
    pub listing: Listing<T>,
}

/// Sort reports newest first by upload time.
///
/// Timestamps are compared as strings, greater first, without parsing.
/// Equal keys keep their order.
pub fn newest_first(reports: &mut [Report]) {
    reports.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
}

fn cards<T: Transport>(api: &ApiClient<T>, reports: &[Report], fields: CardFields) -> Vec<ReportCard> {
    reports
        .iter()
        .map(|report| ReportCard::new(report, api, fields))
        .collect()
}

fn log_listing<T>(what: &str, result: &Result<Vec<T>, ApiError>) {
    match result {
        Ok(items) => tracing::debug!(what, count = items.len(), "loaded"),
        Err(err) => tracing::warn!(what, error = %err, "load failed"),
    }
}
