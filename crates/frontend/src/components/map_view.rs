use std::rc::Rc;

use callout_shared::models::NormalizedPoint;
use callout_shared::viewport::{ImageFit, LoadState, ScreenPoint, Viewport, ViewportEvent};
use dioxus::prelude::*;

use crate::coords::{self, DomLayout, MAP_CONTAINER_ID, MAP_IMAGE_ID};
use crate::listeners::GlobalListeners;

/// URL prefix the backend serves map images under.
const MAP_IMAGE_ROOT: &str = "/static/maps";

fn screen_point(evt: &MouseData) -> ScreenPoint {
    let client = evt.client_coordinates();
    ScreenPoint::new(client.x, client.y)
}

#[component]
pub fn MapView(viewport: Signal<Viewport>, on_pick: EventHandler<NormalizedPoint>) -> Element {
    let mut viewport = viewport;

    // Held for the component's lifetime; dropping it detaches every listener.
    let _listeners = use_hook(|| Rc::new(GlobalListeners::attach(viewport)));

    // Geometry is re-measured once the DOM reflects a fullscreen change.
    let fullscreen = use_memo(move || viewport.read().is_fullscreen());
    use_effect(move || {
        let _ = fullscreen();
        if viewport.peek().layout_stale() {
            viewport.write().sync_layout(&DomLayout);
        }
    });

    let vp = viewport.read();
    let image_url = format!("{}/{}", MAP_IMAGE_ROOT, vp.image_path());
    let load_state = vp.load_state();
    let marker = vp.marker();
    let marker_size = vp.marker_size_px();
    let zoom_label = vp.zoom_label();
    let is_fullscreen = vp.is_fullscreen();
    let (fit_width, fit_height) = match vp.image_fit() {
        ImageFit::FillWidth => ("100%", "auto"),
        ImageFit::FillHeight => ("auto", "100%"),
    };
    let image_style = format!(
        "transform: {}; width: {}; height: {};",
        vp.transform_css(),
        fit_width,
        fit_height
    );
    let container_class = match (is_fullscreen, vp.is_dragging()) {
        (true, true) => "map-container fullscreen dragging",
        (true, false) => "map-container fullscreen",
        (false, true) => "map-container dragging",
        (false, false) => "map-container",
    };
    let marker_style = marker.map(|point| {
        format!("left: {}%; top: {}%;", point.x * 100.0, point.y * 100.0)
    });
    let marker_dot_style = format!("width: {marker_size}px; height: {marker_size}px;");
    drop(vp);

    let placeholder = match load_state {
        LoadState::Loading => rsx! {
            div { class: "map-placeholder", div { class: "spinner" } }
        },
        LoadState::Failed => rsx! {
            div { class: "map-placeholder broken", "Map image unavailable" }
        },
        LoadState::Loaded => rsx! {},
    };

    rsx! {
        div { class: "map-frame",
            div {
                id: MAP_CONTAINER_ID,
                class: "{container_class}",

                onwheel: move |evt: Event<WheelData>| {
                    evt.prevent_default();
                    let delta_y = coords::wheel_delta_y(evt.data().delta());
                    let client = evt.data().client_coordinates();
                    let pos = ScreenPoint::new(client.x, client.y);
                    viewport.write().handle(ViewportEvent::Wheel { pos, delta_y }, &DomLayout);
                },

                onmousedown: move |evt: Event<MouseData>| {
                    let button = coords::pointer_button(evt.trigger_button());
                    let pos = screen_point(&evt.data());
                    viewport.write().handle(ViewportEvent::PointerDown { pos, button }, &DomLayout);
                },

                ondoubleclick: move |evt: Event<MouseData>| {
                    evt.prevent_default();
                    let pos = screen_point(&evt.data());
                    let picked = viewport.write().handle(ViewportEvent::DoubleClick { pos }, &DomLayout);
                    if let Some(point) = picked {
                        on_pick.call(point);
                    }
                },

                div { class: "map-controls",
                    button {
                        onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                        ondoubleclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                        onclick: move |_| {
                            viewport.write().handle(ViewportEvent::ToggleFullscreen, &DomLayout);
                        },
                        if is_fullscreen { "Close" } else { "Fullscreen" }
                    }
                    button {
                        onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                        ondoubleclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                        onclick: move |_| {
                            viewport.write().handle(ViewportEvent::ResetView, &DomLayout);
                        },
                        "Reset view"
                    }
                }

                div {
                    id: MAP_IMAGE_ID,
                    class: "map-image",
                    style: "{image_style}",

                    {placeholder}

                    img {
                        src: "{image_url}",
                        alt: "map",
                        draggable: "false",
                        class: if load_state == LoadState::Loaded { "" } else { "hidden" },
                        onload: move |_| {
                            viewport.write().handle(ViewportEvent::ImageLoaded, &DomLayout);
                        },
                        onerror: move |_| {
                            viewport.write().handle(ViewportEvent::ImageFailed, &DomLayout);
                        },
                    }

                    if let Some(style) = marker_style {
                        div { class: "map-marker", style: "{style}",
                            div { class: "map-marker-dot", style: "{marker_dot_style}" }
                        }
                    }
                }

                div { class: "zoom-badge", "{zoom_label}" }
            }
        }
    }
}
