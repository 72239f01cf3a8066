use callout_shared::viewport::{Layout, PointerButton, Rect};
use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;

pub const MAP_CONTAINER_ID: &str = "callout-map-container";
/// The transformed wrapper around the map image; its box is the image as drawn on screen.
pub const MAP_IMAGE_ID: &str = "callout-map-image";

/// Measures the viewport elements through the DOM on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomLayout;

impl Layout for DomLayout {
    fn container_rect(&self) -> Option<Rect> {
        element_rect(MAP_CONTAINER_ID)
    }

    fn image_rect(&self) -> Option<Rect> {
        element_rect(MAP_IMAGE_ID)
    }
}

fn element_rect(id: &str) -> Option<Rect> {
    let document = web_sys::window()?.document()?;
    let rect = document.get_element_by_id(id)?.get_bounding_client_rect();
    Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
pub fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

pub fn pointer_button(button: Option<MouseButton>) -> PointerButton {
    match button {
        Some(MouseButton::Primary) => PointerButton::Primary,
        Some(MouseButton::Secondary) => PointerButton::Secondary,
        Some(MouseButton::Auxiliary) => PointerButton::Auxiliary,
        _ => PointerButton::Other,
    }
}
