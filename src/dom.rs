use crate::geometry;
use anyhow::{anyhow, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing element #{id}"))?
        .dyn_into::<T>()
        .map_err(|_| anyhow!("element #{id} has an unexpected type"))
}

pub fn create<T: JsCast>(document: &web::Document, tag: &str, class: &str) -> Result<T> {
    let el = document.create_element(tag).map_err(js_err)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.dyn_into::<T>()
        .map_err(|_| anyhow!("<{tag}> has an unexpected type"))
}

/// Match the canvas backing store to its CSS box at the device pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let Some(w) = web::window() else {
        return (canvas.width(), canvas.height());
    };
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = geometry::backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

#[inline]
pub fn viewport_width() -> f32 {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Event subscription that unhooks itself from its target on drop.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Non-passive variant so the handler may `prevent_default` touch and
    /// wheel scrolling.
    pub fn active(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(false);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(js_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Click handler on the element with `id`; `None` if it is absent.
    pub fn click(
        document: &web::Document,
        id: &str,
        mut handler: impl FnMut() + 'static,
    ) -> Option<Self> {
        let el = document.get_element_by_id(id)?;
        match Self::new(&el, "click", move |_| handler()) {
            Ok(l) => Some(l),
            Err(e) => {
                log::warn!("[mount] click #{id}: {e:?}");
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Repeating timer cleared on drop.
pub struct Interval {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(ms: i32, handler: impl FnMut() + 'static) -> Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ms,
            )
            .map_err(js_err)?;
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(self.handle);
        }
    }
}

/// Fire-and-forget timeout; the callback is released by the runtime after
/// it runs once.
pub fn after(ms: i32, handler: impl FnOnce() + 'static) {
    let Some(w) = web::window() else {
        return;
    };
    let callback = Closure::once_into_js(handler);
    _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms);
}
