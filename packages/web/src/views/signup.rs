//! Signup page view.

use dioxus::prelude::*;
use store::Session;
use ui::auth::SignupForm;
use ui::{alert, make_api, redirect};

/// Signup page component.
#[component]
pub fn Signup() -> Element {
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut role = use_signal(|| "patient".to_string());
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            let form = SignupForm {
                username: username(),
                email: email(),
                password: password(),
                confirm_password: confirm_password(),
                role: role(),
            };

            loading.set(true);
            let api = make_api(&Session::default());
            match ui::auth::signup(&api, &form).await {
                Ok(outcome) => {
                    alert(&outcome.confirmation());
                    redirect(outcome.next());
                }
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
                "Create Account"
            }

            p {
                class: "auth-subtitle",
                "Sign up for MedSync"
            }

            form {
                onsubmit: handle_signup,
                class: "auth-form",

                if let Some(err) = error() {
                    div {
                        id: "signup_error",
                        class: "form-error",
                        "{err}"
                    }
                }

                input {
                    class: "input",
                    r#type: "text",
                    placeholder: "Name",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
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

                input {
                    class: "input",
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                select {
                    class: "input",
                    value: role(),
                    onchange: move |evt: FormEvent| role.set(evt.value()),
                    option { value: "patient", "Patient" }
                    option { value: "hospital", "Hospital" }
                }

                button {
                    class: "btn",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "auth-footer",
                "Already have an account? "
                a {
                    class: "link",
                    href: "/login",
                    "Sign in"
                }
            }
        }
    }
}
