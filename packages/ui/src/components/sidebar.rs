use dioxus::prelude::*;

use crate::tabs::Tab;
use crate::LogoutButton;

/// Dashboard navigation: one link per sidebar tab, then logout.
///
/// Selecting a link hands the tab back to the page, which decides whether it
/// still needs loading.
#[component]
pub fn DashboardSidebar<T: Tab>(
    title: String,
    links: Vec<T>,
    active: T,
    on_select: EventHandler<T>,
) -> Element {
    rsx! {
        aside {
            class: "sidebar",
            h2 { class: "sidebar-title", "{title}" }
            nav {
                for tab in links {
                    a {
                        key: "{tab.id()}",
                        id: "nav-{tab.id()}",
                        class: if tab == active { "nav-link active" } else { "nav-link" },
                        onclick: move |_| on_select.call(tab),
                        "{tab.label()}"
                    }
                }
            }
            LogoutButton { class: "btn logout" }
        }
    }
}
