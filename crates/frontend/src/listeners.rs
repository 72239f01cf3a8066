use callout_shared::viewport::{ScreenPoint, Viewport, ViewportEvent};
use dioxus::prelude::*;
use gloo_events::EventListener;
use wasm_bindgen::JsCast;

use crate::coords::DomLayout;

/// Document and window listeners the viewport needs while mounted, so a drag that leaves the map
/// still ends on release. Dropping the guard removes every listener.
pub struct GlobalListeners {
    _listeners: Vec<EventListener>,
}

impl GlobalListeners {
    /// Attach to the current document and window. Without a window there is nothing to attach to
    /// and the guard is empty.
    pub fn attach(viewport: Signal<Viewport>) -> Self {
        let Some(window) = web_sys::window() else {
            return GlobalListeners {
                _listeners: Vec::new(),
            };
        };
        let mut listeners = Vec::with_capacity(5);

        if let Some(document) = window.document() {
            listeners.push(EventListener::new(&document, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() else {
                    return;
                };
                forward_move(viewport, event);
            }));
            listeners.push(EventListener::new(&document, "mouseup", move |_| {
                end_drag(viewport, ViewportEvent::PointerUp);
            }));
            listeners.push(EventListener::new(&document, "mouseleave", move |_| {
                end_drag(viewport, ViewportEvent::PointerLeave);
            }));
            listeners.push(EventListener::new(&document, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                let mut viewport = viewport;
                // Only fullscreen reacts to keys; skip the write otherwise.
                if viewport.peek().is_fullscreen() {
                    viewport.write().handle(
                        ViewportEvent::KeyDown { key: event.key() },
                        &DomLayout,
                    );
                }
            }));
        }

        listeners.push(EventListener::new(&window, "resize", move |_| {
            let mut viewport = viewport;
            viewport.write().handle(ViewportEvent::Resize, &DomLayout);
        }));

        GlobalListeners {
            _listeners: listeners,
        }
    }
}

fn forward_move(mut viewport: Signal<Viewport>, event: &web_sys::MouseEvent) {
    if !viewport.peek().is_dragging() {
        return;
    }
    let pos = ScreenPoint::new(f64::from(event.client_x()), f64::from(event.client_y()));
    viewport
        .write()
        .handle(ViewportEvent::PointerMove { pos }, &DomLayout);
}

fn end_drag(mut viewport: Signal<Viewport>, event: ViewportEvent) {
    if viewport.peek().is_dragging() {
        viewport.write().handle(event, &DomLayout);
    }
}
