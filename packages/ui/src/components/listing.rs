use dioxus::prelude::*;

/// Container for a list panel.
///
/// While loading it shows a placeholder; after a failed fetch the message
/// takes the place of the list. Otherwise the children render as-is, so an
/// empty list renders nothing.
#[component]
pub fn ListingView(
    #[props(default)] loading: bool,
    /// Failure message; empty while there is none.
    #[props(default)]
    error: String,
    #[props(default = "cards".to_string())] class: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "{class}",
            if !error.is_empty() {
                p { class: "muted", "{error}" }
            } else if loading {
                p { class: "muted", "Loading..." }
            } else {
                {children}
            }
        }
    }
}
