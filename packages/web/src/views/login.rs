//! Login page view with email/password form.

use dioxus::prelude::*;
use store::Session;
use ui::auth::LoginForm;
use ui::{make_api, make_session_store, redirect};

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            let form = LoginForm {
                email: email(),
                password: password(),
            };

            loading.set(true);
            let api = make_api(&Session::default());
            match ui::auth::login(&api, &make_session_store(), &form).await {
                Ok(destination) => redirect(destination),
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 {
                class: "auth-title",
                "MedSync"
            }

            p {
                class: "auth-subtitle",
                "Sign in to view your medical records"
            }

            form {
                onsubmit: handle_login,
                class: "auth-form",

                if let Some(err) = error() {
                    div {
                        id: "login_error",
                        class: "form-error",
                        "{err}"
                    }
                }

                input {
                    class: "input",
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    class: "input",
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Login" }
                }
            }

            p {
                class: "auth-footer",
                "No account yet? "
                a {
                    class: "link",
                    href: "/signup",
                    "Create one"
                }
            }
        }
    }
}
