use callout_shared::models::{Difficulty, MAPS};
use dioxus::prelude::*;

/// Map and difficulty pickers. Both are disabled while the session holds callouts.
#[component]
pub fn SessionSelector(
    map: String,
    difficulty: Difficulty,
    locked: bool,
    on_map_change: EventHandler<String>,
    on_difficulty_change: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "panel session-selector",
            h3 { "Session" }
            label { "Map" }
            select {
                "aria-label": "Select map",
                disabled: locked,
                value: "{map}",
                onchange: move |evt: Event<FormData>| on_map_change.call(evt.value()),
                for m in MAPS {
                    option { value: "{m}", selected: map == m, "{m}" }
                }
            }
            label { "Difficulty" }
            select {
                "aria-label": "Select difficulty",
                disabled: locked,
                value: "{difficulty}",
                onchange: move |evt: Event<FormData>| on_difficulty_change.call(evt.value()),
                for d in Difficulty::ALL {
                    option { value: "{d}", selected: difficulty == d, "{d}" }
                }
            }
            if locked {
                p { class: "hint", "Reset the session to change map or difficulty." }
            }
        }
    }
}
