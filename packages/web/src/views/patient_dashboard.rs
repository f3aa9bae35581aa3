//! Patient dashboard page.

use dioxus::prelude::*;

use api::ReqwestTransport;
use store::{Role, Session};
use ui::dashboard::{DetailPanel, Listing, PatientTab, PatientViews, ReportCard};
use ui::{make_api, use_role_guard, use_session, DashboardSidebar, HospitalCardView, ListingView, ReportCardView};

type Dashboard = ui::dashboard::PatientDashboard<ReqwestTransport>;

/// List state of the page's panels.
#[derive(Clone, Copy)]
struct Panels {
    reports: Signal<Listing<ReportCard>>,
    hospitals: Signal<Listing<String>>,
    detail: Signal<DetailPanel<ReportCard>>,
}

impl Panels {
    fn load(mut self, dashboard: Dashboard, tab: PatientTab) {
        match tab {
            PatientTab::Reports => {
                spawn(async move {
                    self.reports.set(Listing::Loading);
                    self.reports.set(dashboard.load_all_reports().await);
                });
            }
            PatientTab::Hospitals => {
                spawn(async move {
                    self.hospitals.set(Listing::Loading);
                    self.hospitals.set(dashboard.load_hospital_list().await);
                });
            }
            PatientTab::HospitalDetail | PatientTab::Profile => {}
        }
    }
}

#[component]
pub fn PatientDashboard() -> Element {
    let Some(session) = use_role_guard(Role::Patient) else {
        return rsx! {};
    };
    rsx! {
        PatientPage { session }
    }
}

#[component]
fn PatientPage(session: Session) -> Element {
    let dashboard = use_hook(|| Dashboard::new(make_api(&session), session.clone(), PatientViews::default()));
    // Tabs loaded at page entry count as visited
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
        reports: use_signal(Listing::default),
        hospitals: use_signal(Listing::default),
        detail: use_signal(DetailPanel::default),
    };

    let entry = dashboard.clone();
    use_hook(move || {
        for tab in entry.views().entry_loads() {
            panels.load(entry.clone(), tab);
        }
    });

    let on_select = {
        let dashboard = dashboard.clone();
        move |tab: PatientTab| {
            let needs_load = tabs.write().as_mut().is_some_and(|controller| controller.navigate(tab));
            if needs_load {
                panels.load(dashboard.clone(), tab);
            }
        }
    };

    let on_open_hospital = {
        let dashboard = dashboard.clone();
        move |name: String| {
            let dashboard = dashboard.clone();
            let mut detail = panels.detail;
            detail.set(DetailPanel {
                title: name.clone(),
                listing: Listing::Loading,
            });
            spawn(async move {
                let Some(mut controller) = tabs() else {
                    return;
                };
                let pending = dashboard.open_hospital(&mut controller, &name);
                tabs.set(Some(controller));
                detail.set(pending.await);
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
    let links: Vec<PatientTab> = controller.sidebar().collect();
    let active = controller.active();
    let reports = panels.reports.read();
    let hospitals = panels.hospitals.read();
    let detail = panels.detail.read();

    rsx! {
        div {
            class: "dashboard",
            DashboardSidebar {
                title: "MedSync",
                links,
                active,
                on_select,
            }
            main {
                class: "content",
                header {
                    class: "topbar",
                    h1 { "Welcome, " span { id: "username_display", "{username}" } }
                    p { class: "muted", "CID: " span { id: "cid_display", "{cid}" } }
                }

                match active {
                    PatientTab::Reports => rsx! {
                        section {
                            id: "reports",
                            h2 { "My Reports" }
                            ListingView {
                                loading: reports.is_loading(),
                                error: reports.error().unwrap_or_default().to_string(),
                                for card in reports.items().iter().cloned() {
                                    ReportCardView { key: "{card.download_url}", card }
                                }
                            }
                        }
                    },
                    PatientTab::Hospitals => rsx! {
                        section {
                            id: "hospitals",
                            h2 { "Hospitals" }
                            ListingView {
                                loading: hospitals.is_loading(),
                                error: hospitals.error().unwrap_or_default().to_string(),
                                for name in hospitals.items().iter().cloned() {
                                    HospitalCardView {
                                        key: "{name}",
                                        name,
                                        on_open: on_open_hospital.clone(),
                                    }
                                }
                            }
                        }
                    },
                    PatientTab::HospitalDetail => rsx! {
                        section {
                            id: "hospital_view",
                            button {
                                class: "btn small",
                                onclick: move |_| {
                                    if let Some(controller) = tabs.write().as_mut() {
                                        controller.show(PatientTab::Hospitals);
                                    }
                                },
                                "← Back to hospitals"
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
                    PatientTab::Profile => rsx! {
                        section {
                            id: "profile",
                            h2 { "Profile" }
                            p { "Name: " span { id: "profile_name", "{username}" } }
                            p { "CID: " span { id: "cid_display_profile", "{cid}" } }
                        }
                    },
                }
            }
        }
    }
}
