use web_sys::{HtmlOptionElement, HtmlSelectElement};

use crate::consts::NO_POINT_LABEL;
use crate::image::{LoadOutcome, LoadState};
use crate::input::{PointerDown, Selection};
use crate::render::{self, Scene, View};
use crate::store::{AnnotationStore, ImageId, Measurement, PointId, PointMap, Upsert};
use crate::surface::CanvasSurface;
use crate::sync::{self, Display, SyncEvent};
use crate::transform::{Size, Transform, TransformError};
use crate::viewport::{self, ViewportConfig};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace every entry of the image list widget with these ids.
    ImageListChanged(Vec<ImageId>),
    /// Replace every entry of the point list widget with these ids.
    PointListChanged(Vec<PointId>),
    /// Start fetching this image; report back via `on_image_loaded` / `on_image_failed`.
    LoadImage(ImageId),
    /// Clear and redraw the whole canvas.
    FullRedraw,
    /// Draw one new marker on top of the current frame.
    DrawOne(Measurement),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub store: AnnotationStore,
    pub selection: Selection,
    pub load: LoadState,
    /// Canvas size in CSS pixels.
    pub canvas: Size,
    /// Image ids as last listed by the server.
    pub image_list: Vec<ImageId>,
    /// Point ids known to the server, placed or not.
    pub point_list: Vec<PointId>,
    pub config: ViewportConfig,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Viewport ---

    /// Refit the canvas to a window of `window` CSS pixels next to an image
    /// list `list_width` pixels wide.
    pub fn on_resize(&mut self, window: Size, list_width: f64) -> Vec<Action> {
        self.canvas = viewport::canvas_size(window, list_width, &self.config);
        vec![Action::FullRedraw]
    }

    // --- Image lifecycle ---

    /// Display `image_id`, loading it unless it is already ready.
    pub fn select_image(&mut self, image_id: &str) -> Vec<Action> {
        self.selection.current_image = Some(image_id.to_owned());
        if self.load.is_ready(image_id) {
            return vec![Action::FullRedraw];
        }
        self.load.begin(image_id.to_owned());
        vec![Action::LoadImage(image_id.to_owned())]
    }

    /// The browser finished loading `image_id` with natural size `size`.
    pub fn on_image_loaded(&mut self, image_id: &str, size: Size) -> Vec<Action> {
        match self.load.complete(image_id, size) {
            LoadOutcome::Ready => {
                log::debug!("image {image_id} ready at {}x{}", size.width, size.height);
                vec![Action::FullRedraw]
            }
            LoadOutcome::Stale => {
                log::debug!("ignoring stale load of {image_id}");
                Vec::new()
            }
        }
    }

    /// The browser failed to load `image_id`.
    pub fn on_image_failed(&mut self, image_id: &str) -> Vec<Action> {
        if self.load.fail(image_id) {
            log::warn!("failed to load image {image_id}");
            vec![Action::FullRedraw]
        } else {
            Vec::new()
        }
    }

    // --- Push channel ---

    /// Handle the raw body of a `sync` event received at `now_ms`.
    /// Malformed payloads are logged and dropped, leaving state untouched.
    pub fn on_sync_message(&mut self, data: &str, now_ms: f64) -> Vec<Action> {
        match sync::parse(data) {
            Ok(event) => {
                log::debug!("sync message delay is {} ms", sync::delay_ms(&event, now_ms));
                self.apply_sync(event)
            }
            Err(e) => {
                log::warn!("dropping sync event: {e}");
                Vec::new()
            }
        }
    }

    /// Apply a server snapshot: replace the image and point lists, the store
    /// and the selected point, then redraw (or load an image if none is shown).
    ///
    /// A kept image whose load failed earlier is requested again.
    pub fn apply_sync(&mut self, event: SyncEvent) -> Vec<Action> {
        let image_ids = event.image_ids();
        let point_ids = event.known_point_ids();
        self.store.replace_all(event.points);
        self.selection.selected_point = event.selected_point;
        self.image_list.clone_from(&image_ids);
        self.point_list.clone_from(&point_ids);

        let mut actions = vec![Action::ImageListChanged(image_ids), Action::PointListChanged(point_ids)];
        match sync::choose_display(&self.image_list, self.selection.current_image.as_deref()) {
            Display::Keep => match self.selection.current_image.clone() {
                Some(current) if !self.load.is_ready(&current) && self.load.pending() != Some(current.as_str()) => {
                    log::info!("retrying load of {current}");
                    actions.extend(self.select_image(&current));
                }
                _ => actions.push(Action::FullRedraw),
            },
            Display::Switch(image_id) => actions.extend(self.select_image(&image_id)),
            Display::Clear => {
                self.selection.current_image = None;
                self.load.reset();
                actions.push(Action::FullRedraw);
            }
        }
        actions
    }

    // --- Pointer ---

    /// Place or move the selected point at the clicked position.
    ///
    /// Ignored while no point is selected or no image is ready.
    pub fn on_pointer_down(&mut self, event: PointerDown) -> Vec<Action> {
        let Some(point_id) = self.selection.selected_point.clone() else {
            return Vec::new();
        };
        let view = match self.view() {
            Ok(view) => view,
            Err(e) => {
                log::debug!("click ignored: {e}");
                return Vec::new();
            }
        };

        let norm = view.transform.to_normalized(event.display_point());
        let measurement = Measurement::new(view.image_id, point_id, norm);
        match self.store.upsert(measurement.clone()) {
            Upsert::Created => vec![Action::DrawOne(measurement)],
            Upsert::Existed => vec![Action::FullRedraw],
        }
    }

    // --- Queries ---

    /// The displayed image and its transform.
    ///
    /// # Errors
    ///
    /// [`TransformError::NoImageLoaded`] until an image is ready;
    /// [`TransformError::Degenerate`] when the canvas has no area.
    pub fn view(&self) -> Result<View<'_>, TransformError> {
        let (image_id, size) = self.load.ready().ok_or(TransformError::NoImageLoaded)?;
        Ok(View { image_id, transform: Transform::fit(size, self.canvas)? })
    }

    /// The current fit-to-canvas transform.
    ///
    /// # Errors
    ///
    /// Same as [`Self::view`].
    pub fn transform(&self) -> Result<Transform, TransformError> {
        self.view().map(|view| view.transform)
    }

    /// Read-only inputs for the renderer.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        let view = match self.view() {
            Ok(view) => Some(view),
            Err(_) => None,
        };
        Scene { store: &self.store, view, canvas: self.canvas }
    }

    /// Measurements of `image_id`.
    #[must_use]
    pub fn measurements(&self, image_id: &str) -> &PointMap {
        self.store.get(image_id)
    }

    /// The point new clicks are assigned to.
    #[must_use]
    pub fn selected_point(&self) -> Option<&str> {
        self.selection.selected_point.as_deref()
    }

    /// The image chosen for display.
    #[must_use]
    pub fn current_image(&self) -> Option<&str> {
        self.selection.current_image.as_deref()
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser surface
/// and the image and point list widgets.
pub struct Engine {
    surface: CanvasSurface,
    image_list: HtmlSelectElement,
    point_list: HtmlSelectElement,
    pub core: EngineCore,
}

impl Engine {
    #[must_use]
    pub fn new(surface: CanvasSurface, image_list: HtmlSelectElement, point_list: HtmlSelectElement) -> Self {
        Self { surface, image_list, point_list, core: EngineCore::new() }
    }

    #[must_use]
    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    /// Execute `actions` against the surface and the list widget.
    ///
    /// Image loads need the event loop, so their ids are returned for the
    /// caller to start.
    pub fn apply(&mut self, actions: Vec<Action>) -> Vec<ImageId> {
        let mut loads = Vec::new();
        for action in actions {
            match action {
                Action::ImageListChanged(image_ids) => {
                    if let Err(e) = self.populate_image_list(&image_ids) {
                        log::warn!("failed to populate image list: {e:?}");
                    }
                }
                Action::PointListChanged(point_ids) => {
                    if let Err(e) = self.populate_point_list(&point_ids) {
                        log::warn!("failed to populate point list: {e:?}");
                    }
                }
                Action::LoadImage(image_id) => loads.push(image_id),
                Action::FullRedraw => self.render(),
                Action::DrawOne(measurement) => {
                    if let Err(e) = render::draw_one(&mut self.surface, &self.core.scene(), &measurement) {
                        log::warn!("failed to draw {}: {e}", measurement.point_id);
                    }
                }
            }
        }
        loads
    }

    /// Draw the current state to the canvas.
    pub fn render(&mut self) {
        if let Err(e) = render::full_redraw(&mut self.surface, &self.core.scene()) {
            log::warn!("render failed: {e}");
        }
    }

    fn populate_image_list(&self, image_ids: &[ImageId]) -> Result<(), wasm_bindgen::JsValue> {
        self.image_list.set_length(0);
        for image_id in image_ids {
            let option = HtmlOptionElement::new_with_text_and_value(image_id, image_id)?;
            self.image_list.add_with_html_option_element(&option)?;
        }
        if let Some(current) = self.core.current_image() {
            self.image_list.set_value(current);
        }
        Ok(())
    }

    /// Rebuild the point list with a leading empty entry that clears the
    /// selection, then mark the selected point.
    fn populate_point_list(&self, point_ids: &[PointId]) -> Result<(), wasm_bindgen::JsValue> {
        self.point_list.set_length(0);
        let none = HtmlOptionElement::new_with_text_and_value(NO_POINT_LABEL, "")?;
        self.point_list.add_with_html_option_element(&none)?;
        for point_id in point_ids {
            let option = HtmlOptionElement::new_with_text_and_value(point_id, point_id)?;
            self.point_list.add_with_html_option_element(&option)?;
        }
        self.point_list.set_value(self.core.selected_point().unwrap_or_default());
        Ok(())
    }
}
