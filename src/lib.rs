#![cfg(target_arch = "wasm32")]
use crate::page::PageKind;
use crate::pages::View;
use scanfx_core::Lifecycle;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod cards;
mod constants;
mod dom;
mod frame;
mod geometry;
mod input;
mod page;
mod pages;
mod render;

thread_local! {
    static LIFECYCLE: Lifecycle = Lifecycle::new();
    static VIEW: RefCell<Option<View>> = const { RefCell::new(None) };
}

#[inline]
fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scanfx starting");

    // a page can opt in through <body data-page="...">
    let requested = dom::window_document()
        .and_then(|d| d.body())
        .and_then(|b: web::HtmlElement| b.get_attribute(constants::PAGE_ATTR));
    match requested {
        Some(name) => mount(&name),
        None => Ok(()),
    }
}

/// Mount the named page, replacing whatever is mounted.
#[wasm_bindgen]
pub fn mount(page: &str) -> Result<(), JsValue> {
    let kind = PageKind::from_name(page)
        .ok_or_else(|| JsValue::from_str(&format!("unknown page: {page}")))?;
    unmount();

    let ticket = LIFECYCLE.with(|l| l.begin());
    let generation = ticket.generation();
    let view = pages::build(kind, ticket).map_err(|e| {
        log::error!("[mount] {}: {e:?}", kind.as_str());
        to_js(e)
    })?;
    VIEW.with(|v| *v.borrow_mut() = Some(view));
    log::info!("[mount] {} (generation {generation})", kind.as_str());
    Ok(())
}

/// Stop every loop, listener and timer of the mounted page.
#[wasm_bindgen]
pub fn unmount() {
    LIFECYCLE.with(|l| l.end());
    // dropped outside the borrow; teardown may touch the DOM
    let view = VIEW.with(|v| v.borrow_mut().take());
    if let Some(view) = view {
        log::info!("[mount] {} unmounted", view.kind().as_str());
        drop(view);
    }
}

/// Forward a JSON settings object to the mounted page.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    VIEW.with(|v| match v.borrow_mut().as_mut() {
        Some(view) => {
            view.configure(json).map_err(to_js)?;
            log::info!("[config] {} updated", view.kind().as_str());
            Ok(())
        }
        None => Err(JsValue::from_str("no page mounted")),
    })
}

/// Name of the mounted page, if any.
#[wasm_bindgen]
pub fn mounted() -> Option<String> {
    VIEW.with(|v| v.borrow().as_ref().map(|view| view.kind().as_str().to_string()))
}
