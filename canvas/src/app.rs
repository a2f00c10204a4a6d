//! Browser entry point.
//!
//! Wires DOM events, the server push stream and background image loads to a
//! single shared [`Engine`]. Every handler follows the same shape: translate
//! the browser event, call into [`crate::engine::EngineCore`], then hand the
//! returned actions to [`dispatch`].
//!
//! DESIGN
//! ======
//! Handlers are `'static` closures registered once at startup and leaked with
//! `Closure::forget`, since they live as long as the page. Image load
//! callbacks are the exception: each load installs a fresh pair that captures
//! the requested image id, and the previous pair is dropped only after the
//! element's handlers have been replaced.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventSource, HtmlCanvasElement, HtmlSelectElement, MessageEvent, MouseEvent, Window};

use crate::consts::{CANVAS_ELEMENT_ID, IMAGE_LIST_ELEMENT_ID, MARKER_SPRITE_URL, POINT_LIST_ELEMENT_ID, STREAM_PATH};
use crate::engine::{Action, Engine};
use crate::image::image_path;
use crate::input::PointerDown;
use crate::store::ImageId;
use crate::surface::CanvasSurface;
use crate::transform::{Point, Size};

struct App {
    window: Window,
    canvas: HtmlCanvasElement,
    image_list: HtmlSelectElement,
    engine: RefCell<Engine>,
    load_callbacks: RefCell<Vec<Closure<dyn FnMut()>>>,
    stream: EventSource,
}

/// Start the annotator on the current page.
///
/// # Errors
///
/// Returns `Err` if the page lacks the canvas, image list or point list
/// elements, or the push stream cannot be opened.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        return Err(JsValue::from_str(&format!("logger already initialised: {e}")));
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = element(&document, CANVAS_ELEMENT_ID)?;
    let image_list: HtmlSelectElement = element(&document, IMAGE_LIST_ELEMENT_ID)?;
    let point_list: HtmlSelectElement = element(&document, POINT_LIST_ELEMENT_ID)?;
    let surface = CanvasSurface::new(canvas.clone(), MARKER_SPRITE_URL)?;
    let stream = EventSource::new(STREAM_PATH)?;

    let app = Rc::new(App {
        window,
        canvas,
        engine: RefCell::new(Engine::new(surface, image_list.clone(), point_list)),
        image_list,
        load_callbacks: RefCell::new(Vec::new()),
        stream,
    });

    listen_stream(&app)?;
    listen_pointer(&app)?;
    listen_image_list(&app)?;
    listen_resize(&app)?;
    on_resize(&app);

    log::info!("annotator started");
    Ok(())
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(JsValue::from)
}

/// Execute `actions`, starting any image loads they request.
fn dispatch(app: &Rc<App>, actions: Vec<Action>) {
    let loads = app.engine.borrow_mut().apply(actions);
    for image_id in loads {
        start_load(app, image_id);
    }
}

fn start_load(app: &Rc<App>, image_id: ImageId) {
    let onload = {
        let app = Rc::clone(app);
        let image_id = image_id.clone();
        Closure::<dyn FnMut()>::new(move || {
            let actions = {
                let mut engine = app.engine.borrow_mut();
                let size = engine.surface().natural_size();
                engine.core.on_image_loaded(&image_id, size)
            };
            dispatch(&app, actions);
        })
    };
    let onerror = {
        let app = Rc::clone(app);
        let image_id = image_id.clone();
        Closure::<dyn FnMut()>::new(move || {
            let actions = app.engine.borrow_mut().core.on_image_failed(&image_id);
            dispatch(&app, actions);
        })
    };

    {
        let engine = app.engine.borrow();
        let image = engine.surface().image();
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(&image_path(&image_id));
    }
    log::debug!("loading image {image_id}");
    *app.load_callbacks.borrow_mut() = vec![onload, onerror];
}

fn listen_stream(app: &Rc<App>) -> Result<(), JsValue> {
    let handler = {
        let app = Rc::clone(app);
        Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Some(data) = event.data().as_string() else {
                log::warn!("sync event without a text payload");
                return;
            };
            let actions = app.engine.borrow_mut().core.on_sync_message(&data, js_sys::Date::now());
            dispatch(&app, actions);
        })
    };
    app.stream.add_event_listener_with_callback(wire::SYNC_EVENT_NAME, handler.as_ref().unchecked_ref())?;
    handler.forget();

    let onerror = Closure::<dyn FnMut()>::new(|| log::warn!("push stream error; the browser will reconnect"));
    app.stream.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();
    Ok(())
}

fn listen_pointer(app: &Rc<App>) -> Result<(), JsValue> {
    let handler = {
        let app = Rc::clone(app);
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let rect = app.canvas.get_bounding_client_rect();
            let pointer = PointerDown::new(
                Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
                Point::new(rect.left(), rect.top()),
            );
            let actions = app.engine.borrow_mut().core.on_pointer_down(pointer);
            dispatch(&app, actions);
        })
    };
    app.canvas.add_event_listener_with_callback("mousedown", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn listen_image_list(app: &Rc<App>) -> Result<(), JsValue> {
    let handler = {
        let app = Rc::clone(app);
        Closure::<dyn FnMut()>::new(move || {
            let image_id = app.image_list.value();
            if image_id.is_empty() {
                return;
            }
            log::info!("selected image {image_id}");
            let actions = app.engine.borrow_mut().core.select_image(&image_id);
            dispatch(&app, actions);
        })
    };
    app.image_list.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn listen_resize(app: &Rc<App>) -> Result<(), JsValue> {
    let handler = {
        let app = Rc::clone(app);
        Closure::<dyn FnMut()>::new(move || on_resize(&app))
    };
    app.window.add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn on_resize(app: &Rc<App>) {
    let window = Size::new(js_number(app.window.inner_width()), js_number(app.window.inner_height()));
    let list_width = f64::from(app.image_list.offset_width());
    let actions = app.engine.borrow_mut().core.on_resize(window, list_width);
    dispatch(app, actions);
}

fn js_number(value: Result<JsValue, JsValue>) -> f64 {
    match value {
        Ok(v) => v.as_f64().unwrap_or(0.0),
        Err(e) => {
            log::warn!("window dimension unavailable: {e:?}");
            0.0
        }
    }
}
