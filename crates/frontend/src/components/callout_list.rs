use callout_shared::models::Callout;
use dioxus::prelude::*;

#[component]
pub fn CalloutList(
    callouts: Vec<Callout>,
    on_remove: EventHandler<usize>,
    on_export: EventHandler<()>,
    on_copy: EventHandler<()>,
    on_reset: EventHandler<()>,
) -> Element {
    let empty = callouts.is_empty();
    let count = callouts.len();
    let rows: Vec<(String, String)> = callouts
        .iter()
        .map(|c| (c.image_name.clone(), c.location.readout()))
        .collect();

    rsx! {
        div { class: "panel callout-list",
            h3 { "Callouts ({count})" }
            if empty {
                p { class: "hint", "No callouts recorded yet." }
            }
            ul {
                for (i, (name, location)) in rows.into_iter().enumerate() {
                    li { key: "{i}",
                        span { class: "callout-name", "{name}" }
                        span { class: "callout-location", "{location}" }
                        button {
                            class: "secondary",
                            onclick: move |_| on_remove.call(i),
                            "Remove"
                        }
                    }
                }
            }
            div { class: "callout-actions",
                button { disabled: empty, onclick: move |_| on_export.call(()), "Export" }
                button {
                    class: "secondary",
                    disabled: empty,
                    onclick: move |_| on_copy.call(()),
                    "Copy JSON"
                }
                button { class: "danger", onclick: move |_| on_reset.call(()), "Reset session" }
            }
        }
    }
}
