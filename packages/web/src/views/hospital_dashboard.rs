//! Hospital dashboard page.

use dioxus::prelude::*;

use api::{ReqwestTransport, UploadFile};
use store::{Role, Session};
use ui::dashboard::{
    DetailPanel, HospitalTab, HospitalViews, Listing, PatientGroup, ReportCard, UploadForm,
    UploadNotice,
};
use ui::{make_api, use_role_guard, use_session, DashboardSidebar, ListingView, PatientCardView, ReportCardView};

type Dashboard = ui::dashboard::HospitalDashboard<ReqwestTransport>;

#[derive(Clone, Copy)]
struct Panels {
    patients: Signal<Listing<PatientGroup>>,
    uploads: Signal<Listing<ReportCard>>,
    detail: Signal<DetailPanel<ReportCard>>,
}

impl Panels {
    fn load(mut self, dashboard: Dashboard, tab: HospitalTab) {
        match tab {
            HospitalTab::Patients => {
                spawn(async move {
                    self.patients.set(Listing::Loading);
                    self.patients.set(dashboard.load_hospital_patients().await);
                });
            }
            HospitalTab::Upload => {
                spawn(async move {
                    self.uploads.set(Listing::Loading);
                    self.uploads.set(dashboard.load_hospital_uploads().await);
                });
            }
            HospitalTab::PatientDetail | HospitalTab::Profile => {}
        }
    }
}

#[component]
pub fn HospitalDashboard() -> Element {
    let Some(session) = use_role_guard(Role::Hospital) else {
        return rsx! {};
    };
    rsx! {
        HospitalPage { session }
    }
}

#[component]
fn HospitalPage(session: Session) -> Element {
    let dashboard = use_hook(|| Dashboard::new(make_api(&session), session.clone(), HospitalViews::default()));
    let mut tabs = use_signal(|| {
        dashboard.views().controller().map(|mut controller| {
            for tab in dashboard.views().entry_loads() {
                controller.mark_loaded(tab);
            }
            controller
        })
    });
    let identity = use_session();
    let panels = Panels {
        patients: use_signal(Listing::default),
        uploads: use_signal(Listing::default),
        detail: use_signal(DetailPanel::default),
    };
    let mut upload_cid = use_signal(String::new);
    let mut upload_file = use_signal(|| Option::<UploadFile>::None);
    let mut notice = use_signal(|| Option::<UploadNotice>::None);
    let mut uploading = use_signal(|| false);
    // Bumped to re-create the file input, which cannot be cleared by value
    let mut file_input_generation = use_signal(|| 0u32);

    let entry = dashboard.clone();
    use_hook(move || {
        for tab in entry.views().entry_loads() {
            panels.load(entry.clone(), tab);
        }
    });

    let on_select = {
        let dashboard = dashboard.clone();
        move |tab: HospitalTab| {
            let needs_load = tabs.write().as_mut().is_some_and(|controller| controller.navigate(tab));
            if needs_load {
                panels.load(dashboard.clone(), tab);
            }
        }
    };

    let on_open_patient = {
        let dashboard = dashboard.clone();
        move |cid: String| {
            let dashboard = dashboard.clone();
            let mut detail = panels.detail;
            detail.set(DetailPanel {
                title: format!("Patient {cid}"),
                listing: Listing::Loading,
            });
            spawn(async move {
                let Some(mut controller) = tabs() else {
                    return;
                };
                let pending = dashboard.open_patient(&mut controller, &cid);
                tabs.set(Some(controller));
                detail.set(pending.await);
            });
        }
    };

    let on_pick_file = move |evt: FormEvent| async move {
        let picked = match evt.files().into_iter().next() {
            Some(data) => match data.read_bytes().await {
                Ok(bytes) => Some(UploadFile {
                    file_name: data.name(),
                    content_type: data.content_type(),
                    bytes: bytes.to_vec(),
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "could not read the picked file");
                    None
                }
            },
            None => None,
        };
        upload_file.set(picked);
    };

    let on_upload = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let dashboard = dashboard.clone();
            let form = UploadForm {
                cid: upload_cid(),
                file: upload_file(),
            };
            notice.set(None);
            uploading.set(true);
            spawn(async move {
                let outcome = dashboard.submit_upload(form).await;
                uploading.set(false);
                notice.set(Some(outcome.notice));
                upload_cid.set(outcome.form.cid);
                if outcome.form.file.is_none() {
                    file_input_generation += 1;
                }
                upload_file.set(outcome.form.file);
                if let Some((patients, uploads)) = outcome.refreshed {
                    let mut panels = panels;
                    panels.patients.set(patients);
                    panels.uploads.set(uploads);
                }
            });
        }
    };

    let Some(controller) = tabs() else {
        return rsx! {};
    };
    let (username, cid) = {
        let state = identity.read();
        (state.username().to_string(), state.cid().to_string())
    };
    let links: Vec<HospitalTab> = controller.sidebar().collect();
    let active = controller.active();
    let patients = panels.patients.read();
    let uploads = panels.uploads.read();
    let detail = panels.detail.read();

    rsx! {
        div {
            class: "dashboard",
            DashboardSidebar {
                title: "MedSync Hospital",
                links,
                active,
                on_select,
            }
            main {
                class: "content",
                header {
                    class: "topbar",
                    h1 { "Welcome, " span { id: "username_display", "{username}" } }
                }

                match active {
                    HospitalTab::Patients => rsx! {
                        section {
                            id: "patients",
                            h2 { "Patients" }
                            ListingView {
                                class: "cards",
                                loading: patients.is_loading(),
                                error: patients.error().unwrap_or_default().to_string(),
                                for group in patients.items().iter().cloned() {
                                    PatientCardView {
                                        key: "{group.cid}",
                                        group,
                                        on_open: on_open_patient.clone(),
                                    }
                                }
                            }
                        }
                    },
                    HospitalTab::PatientDetail => rsx! {
                        section {
                            id: "patient_view",
                            button {
                                class: "btn small",
                                onclick: move |_| {
                                    if let Some(controller) = tabs.write().as_mut() {
                                        controller.show(HospitalTab::Patients);
                                    }
                                },
                                "← Back to patients"
                            }
                            h2 { "{detail.title}" }
                            ListingView {
                                loading: detail.listing.is_loading(),
                                error: detail.listing.error().unwrap_or_default().to_string(),
                                for card in detail.listing.items().iter().cloned() {
                                    ReportCardView { key: "{card.download_url}", card }
                                }
                            }
                        }
                    },
                    HospitalTab::Upload => rsx! {
                        section {
                            id: "upload",
                            h2 { "Upload Report" }
                            form {
                                class: "upload-form",
                                onsubmit: on_upload,
                                input {
                                    id: "upload_cid",
                                    class: "input",
                                    r#type: "text",
                                    placeholder: "Patient CID",
                                    value: upload_cid(),
                                    oninput: move |evt: FormEvent| upload_cid.set(evt.value()),
                                }
                                for generation in [file_input_generation()] {
                                    input {
                                        key: "{generation}",
                                        id: "upload_file",
                                        class: "input",
                                        r#type: "file",
                                        onchange: on_pick_file,
                                    }
                                }
                                if let Some(file) = upload_file() {
                                    p { class: "muted", "{file.file_name}" }
                                }
                                button {
                                    class: "btn upload-btn",
                                    r#type: "submit",
                                    disabled: uploading(),
                                    if uploading() { "Uploading..." } else { "Upload" }
                                }
                                if let Some(notice) = notice() {
                                    p { id: "upload_msg", "{notice.message()}" }
                                }
                            }

                            h2 { "My Uploads" }
                            ListingView {
                                loading: uploads.is_loading(),
                                error: uploads.error().unwrap_or_default().to_string(),
                                for card in uploads.items().iter().cloned() {
                                    ReportCardView { key: "{card.download_url}", card }
                                }
                            }
                        }
                    },
                    HospitalTab::Profile => rsx! {
                        section {
                            id: "profile",
                            h2 { "Profile" }
                            p { "Name: " span { id: "username_display_2", "{username}" } }
                            p { "CID: " span { id: "profile_cid", "{cid}" } }
                        }
                    },
                }
            }
        }
    }
}
