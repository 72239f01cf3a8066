use callout_shared::models::NormalizedPoint;
use dioxus::prelude::*;

#[component]
pub fn CalloutForm(
    callout_name: Signal<String>,
    last_pick: Option<NormalizedPoint>,
    saving: bool,
    on_submit: EventHandler<()>,
) -> Element {
    let readout = match last_pick {
        Some(point) => point.readout(),
        None => "Double-click the map to pick a location".to_string(),
    };

    rsx! {
        div { class: "panel callout-form",
            h3 { "New callout" }
            p { class: "pick-readout", "{readout}" }
            form {
                onsubmit: move |evt: Event<FormData>| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                input {
                    r#type: "text",
                    placeholder: "Callout name...",
                    disabled: saving,
                    value: "{callout_name}",
                    oninput: move |evt: Event<FormData>| {
                        callout_name.set(evt.value().to_string());
                    },
                }
                button {
                    r#type: "submit",
                    disabled: saving,
                    if saving { "Saving..." } else { "Add callout" }
                }
            }
        }
    }
}
