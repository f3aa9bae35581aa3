use dioxus::prelude::*;

use ui::SessionProvider;
use views::{HospitalDashboard, Login, PatientDashboard, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[route("/patient")]
    PatientDashboard {},
    #[route("/hospital")]
    HospitalDashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/login`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Login {});
    rsx! {}
}
