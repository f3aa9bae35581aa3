use dioxus::prelude::*;

use crate::dashboard::{PatientGroup, ReportCard};

/// One report: name, optional hospital or CID line, date and download link.
#[component]
pub fn ReportCardView(card: ReportCard) -> Element {
    rsx! {
        div {
            class: "card",
            h3 { "{card.title}" }
            if let Some(hospital) = card.hospital.as_ref() {
                p { class: "muted", "{hospital}" }
            }
            if let Some(cid_line) = card.cid_line() {
                p { class: "muted", "{cid_line}" }
            }
            p { class: "muted", "{card.uploaded_at}" }
            a {
                class: "btn small",
                href: "{card.download_url}",
                target: "_blank",
                "Download"
            }
        }
    }
}

/// A hospital the patient has reports from. Clicking opens its reports.
#[component]
pub fn HospitalCardView(name: String, on_open: EventHandler<String>) -> Element {
    let open_name = name.clone();
    rsx! {
        div {
            class: "hospital-card",
            onclick: move |_| on_open.call(open_name.clone()),
            h3 { "{name}" }
            p { class: "muted", "Click to view reports" }
        }
    }
}

/// A patient with reports from this hospital, and how many.
#[component]
pub fn PatientCardView(group: PatientGroup, on_open: EventHandler<String>) -> Element {
    let cid = group.cid.clone();
    let label = group.label();
    rsx! {
        div {
            class: "card clickable",
            onclick: move |_| on_open.call(cid.clone()),
            h3 { "{group.cid}" }
            p { class: "muted", "{label}" }
        }
    }
}
