use crate::models::NormalizedPoint;

pub const ZOOM_MIN: f64 = 1.0;
pub const ZOOM_MAX: f64 = 5.0;

/// Zoom change per wheel notch.
pub const ZOOM_STEP: f64 = 0.2;

/// Picked-point marker diameter at zoom 1, and the floor it shrinks to when zoomed in.
const MARKER_BASE_PX: f64 = 10.0;
const MARKER_MIN_PX: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        ScreenPoint { x, y }
    }
}

/// A client-space bounding box, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Live geometry of the rendered viewport. Implementations must measure on every call: the
/// container changes size when fullscreen toggles or the window resizes.
pub trait Layout {
    /// The fixed square container that receives wheel and drag input.
    fn container_rect(&self) -> Option<Rect>;

    /// The transformed image element, used for picking.
    fn image_rect(&self) -> Option<Rect>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// Which container dimension the square image is sized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFit {
    /// `width: 100%; height: auto`
    FillWidth,
    /// `width: auto; height: 100%`
    FillHeight,
}

/// Raw input the viewport reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportEvent {
    Wheel { pos: ScreenPoint, delta_y: f64 },
    PointerDown { pos: ScreenPoint, button: PointerButton },
    PointerMove { pos: ScreenPoint },
    PointerUp,
    PointerLeave,
    DoubleClick { pos: ScreenPoint },
    KeyDown { key: String },
    Resize,
    ToggleFullscreen,
    ResetView,
    ImageLoaded,
    ImageFailed,
}

// ---------------------------------------------------------------------------
// Transform math (pure functions)
// ---------------------------------------------------------------------------

/// Largest pan offset per axis that keeps the scaled image covering the container.
pub fn max_offset(container: Rect, zoom: f64) -> (f64, f64) {
    let x = (container.width * zoom - container.width) / 2.0;
    let y = (container.height * zoom - container.height) / 2.0;
    (x.max(0.0), y.max(0.0))
}

/// Clamp an offset so no part of the container shows beyond the image edges.
pub fn clamp_offset(offset: ScreenPoint, zoom: f64, container: Rect) -> ScreenPoint {
    let (mx, my) = max_offset(container, zoom);
    ScreenPoint::new(offset.x.clamp(-mx, mx), offset.y.clamp(-my, my))
}

/// Offset after zooming from `old_zoom` to `new_zoom` such that the content under `pointer`
/// (relative to the container centre) stays put.
pub fn zoom_offset_at_pointer(
    pointer: ScreenPoint,
    offset: ScreenPoint,
    old_zoom: f64,
    new_zoom: f64,
) -> ScreenPoint {
    let scale = new_zoom / old_zoom;
    ScreenPoint::new(
        (offset.x - pointer.x) * scale + pointer.x,
        (offset.y - pointer.y) * scale + pointer.y,
    )
}

/// Sign of a wheel delta; zero and NaN do not zoom.
fn wheel_sign(delta_y: f64) -> f64 {
    if delta_y > 0.0 {
        1.0
    } else if delta_y < 0.0 {
        -1.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Pan/zoom/pick state for the map viewport, driven by [`ViewportEvent`]s and a [`Layout`].
///
/// Offsets are screen pixels relative to the container centre, matching a CSS
/// `translate(..) scale(..)` with the default centred transform origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    offset: ScreenPoint,
    fullscreen: bool,
    dragging: bool,
    drag_anchor: ScreenPoint,
    aspect_ratio: f64,
    layout_stale: bool,
    image_path: String,
    load_state: LoadState,
    picked: Option<NormalizedPoint>,
}

impl Viewport {
    pub fn new(image_path: impl Into<String>) -> Self {
        Viewport {
            zoom: ZOOM_MIN,
            offset: ScreenPoint::default(),
            fullscreen: false,
            dragging: false,
            drag_anchor: ScreenPoint::default(),
            aspect_ratio: 1.0,
            layout_stale: true,
            image_path: image_path.into(),
            load_state: LoadState::Loading,
            picked: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> ScreenPoint {
        self.offset
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[cfg(test)]
    fn drag_anchor(&self) -> ScreenPoint {
        self.drag_anchor
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn layout_stale(&self) -> bool {
        self.layout_stale
    }

    /// Last picked point, regardless of load state.
    pub fn picked(&self) -> Option<NormalizedPoint> {
        self.picked
    }

    /// Zoom by one wheel step around `pos`. Without a measurable container nothing changes.
    pub fn zoom_at(&mut self, pos: ScreenPoint, delta_y: f64, layout: &impl Layout) {
        let Some(rect) = measure_container(layout) else {
            return;
        };
        self.refresh_aspect(rect);

        let old_zoom = self.zoom;
        let new_zoom = (old_zoom - wheel_sign(delta_y) * ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);

        let center = rect.center();
        let pointer = ScreenPoint::new(pos.x - center.x, pos.y - center.y);
        let offset = zoom_offset_at_pointer(pointer, self.offset, old_zoom, new_zoom);

        self.offset = clamp_offset(offset, new_zoom, rect);
        self.zoom = new_zoom;
    }

    /// Start panning. Only the primary button drags, and a running drag keeps its anchor.
    pub fn begin_drag(&mut self, pos: ScreenPoint, button: PointerButton) -> bool {
        if button != PointerButton::Primary || self.dragging {
            return false;
        }
        self.dragging = true;
        self.drag_anchor = pos;
        true
    }

    /// Pan by the movement since the last anchor. Returns whether the offset was updated.
    pub fn continue_drag(&mut self, pos: ScreenPoint, layout: &impl Layout) -> bool {
        if !self.dragging {
            return false;
        }
        let Some(rect) = measure_container(layout) else {
            return false;
        };
        self.refresh_aspect(rect);

        let moved = ScreenPoint::new(
            self.offset.x + (pos.x - self.drag_anchor.x),
            self.offset.y + (pos.y - self.drag_anchor.y),
        );
        self.offset = clamp_offset(moved, self.zoom, rect);
        self.drag_anchor = pos;
        true
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Convert a double-click into image-relative coordinates and remember it for the marker.
    ///
    /// Picks are refused until the image has loaded: there is nothing meaningful under the
    /// pointer while the placeholder is shown.
    pub fn pick(&mut self, pos: ScreenPoint, layout: &impl Layout) -> Option<NormalizedPoint> {
        if self.load_state != LoadState::Loaded {
            return None;
        }
        let rect = layout.image_rect().filter(Rect::has_area)?;
        let point = NormalizedPoint::clamped(
            (pos.x - rect.left) / rect.width,
            (pos.y - rect.top) / rect.height,
        );
        self.picked = Some(point);
        Some(point)
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.reset_view();
        self.notify_layout_change();
    }

    /// Escape leaves fullscreen. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if self.fullscreen && key == "Escape" {
            self.toggle_fullscreen();
            return true;
        }
        false
    }

    pub fn reset_view(&mut self) {
        self.zoom = ZOOM_MIN;
        self.offset = ScreenPoint::default();
    }

    /// Mark cached geometry as outdated; it is re-measured on the next [`Viewport::sync_layout`]
    /// or pointer operation.
    pub fn notify_layout_change(&mut self) {
        self.layout_stale = true;
    }

    /// Re-measure the container if a layout change was signalled. Returns whether it did.
    pub fn sync_layout(&mut self, layout: &impl Layout) -> bool {
        if !self.layout_stale {
            return false;
        }
        match measure_container(layout) {
            Some(rect) => {
                self.refresh_aspect(rect);
                true
            }
            None => false,
        }
    }

    fn refresh_aspect(&mut self, rect: Rect) {
        if self.layout_stale {
            self.aspect_ratio = rect.width / rect.height;
            self.layout_stale = false;
        }
    }

    pub fn image_fit(&self) -> ImageFit {
        if self.aspect_ratio > 1.0 {
            ImageFit::FillHeight
        } else {
            ImageFit::FillWidth
        }
    }

    /// Point the viewport at a new image. The view, the drag and the marker all start over.
    pub fn set_image_path(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if path == self.image_path {
            return false;
        }
        self.image_path = path;
        self.load_state = LoadState::Loading;
        self.picked = None;
        self.dragging = false;
        self.reset_view();
        true
    }

    pub fn image_loaded(&mut self) {
        self.load_state = LoadState::Loaded;
    }

    pub fn image_failed(&mut self) {
        self.load_state = LoadState::Failed;
    }

    /// Marker to draw, hidden until the image is on screen.
    pub fn marker(&self) -> Option<NormalizedPoint> {
        match self.load_state {
            LoadState::Loaded => self.picked,
            _ => None,
        }
    }

    pub fn marker_size_px(&self) -> f64 {
        (MARKER_BASE_PX / self.zoom).max(MARKER_MIN_PX)
    }

    /// CSS transform for the image element.
    pub fn transform_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset.x, self.offset.y, self.zoom
        )
    }

    pub fn zoom_label(&self) -> String {
        format!("{:.1}x", self.zoom)
    }

    /// Dispatch one input event. Returns the picked point when the event was a successful pick.
    pub fn handle(&mut self, event: ViewportEvent, layout: &impl Layout) -> Option<NormalizedPoint> {
        match event {
            ViewportEvent::Wheel { pos, delta_y } => self.zoom_at(pos, delta_y, layout),
            ViewportEvent::PointerDown { pos, button } => {
                self.begin_drag(pos, button);
            }
            ViewportEvent::PointerMove { pos } => {
                self.continue_drag(pos, layout);
            }
            ViewportEvent::PointerUp | ViewportEvent::PointerLeave => self.end_drag(),
            ViewportEvent::DoubleClick { pos } => return self.pick(pos, layout),
            ViewportEvent::KeyDown { key } => {
                self.handle_key(&key);
            }
            ViewportEvent::Resize => {
                self.notify_layout_change();
                self.sync_layout(layout);
            }
            ViewportEvent::ToggleFullscreen => self.toggle_fullscreen(),
            ViewportEvent::ResetView => self.reset_view(),
            ViewportEvent::ImageLoaded => self.image_loaded(),
            ViewportEvent::ImageFailed => self.image_failed(),
        }
        None
    }
}

fn measure_container(layout: &impl Layout) -> Option<Rect> {
    layout.container_rect().filter(Rect::has_area)
}
