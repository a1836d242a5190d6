// A single full-size canvas driven by one effect: the particle field and
// code rain pages, and the base of the text page.

use super::Page;
use crate::constants::{ID_FPS_VALUE, ID_PARTICLE_COUNT, STATS_REFRESH_MS};
use crate::dom::{self, Interval, Listener};
use crate::frame::AnimationLoop;
use crate::input;
use crate::page::PageKind;
use crate::render::CanvasSurface;
use anyhow::Result;
use scanfx_core::{Effect, FrameDriver, Ticket};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct EffectPage<E: Effect + 'static> {
    kind: PageKind,
    driver: Rc<RefCell<FrameDriver<E>>>,
    canvas: web::HtmlCanvasElement,
    _frame: AnimationLoop,
    _listeners: Vec<Listener>,
    _stats: Option<Interval>,
}

impl<E: Effect + 'static> EffectPage<E> {
    pub fn mount(
        kind: PageKind,
        document: &web::Document,
        canvas: web::HtmlCanvasElement,
        effect: E,
        ticket: Ticket,
    ) -> Result<Self> {
        let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas.clone())?));
        let driver = Rc::new(RefCell::new(FrameDriver::new(effect)));

        let frame = {
            let driver = driver.clone();
            AnimationLoop::start(ticket.clone(), move |dt_sec| {
                let mut surface = surface.borrow_mut();
                driver.borrow_mut().frame(dt_sec, &mut *surface);
            })
        };

        let listeners = wire_pointer(&canvas, &driver, &ticket)?;
        let stats = wire_stats(document, &driver, &ticket);
        log::info!(
            "[mount] {} canvas={}x{}",
            driver.borrow().effect().name(),
            canvas.width(),
            canvas.height()
        );

        Ok(Self {
            kind,
            driver,
            canvas,
            _frame: frame,
            _listeners: listeners,
            _stats: stats,
        })
    }

    #[inline]
    pub fn driver(&self) -> &Rc<RefCell<FrameDriver<E>>> {
        &self.driver
    }

    #[inline]
    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }
}

impl<E: Effect + 'static> Page for EffectPage<E> {
    fn kind(&self) -> PageKind {
        self.kind
    }

    fn configure(&mut self, json: &str) -> Result<()> {
        self.driver.borrow_mut().effect_mut().configure(json)?;
        Ok(())
    }
}

fn wire_pointer<E: Effect + 'static>(
    canvas: &web::HtmlCanvasElement,
    driver: &Rc<RefCell<FrameDriver<E>>>,
    ticket: &Ticket,
) -> Result<Vec<Listener>> {
    let mut listeners = Vec::with_capacity(4);

    {
        let (d, c, t) = (driver.clone(), canvas.clone(), ticket.clone());
        listeners.push(Listener::new(canvas, "mousemove", move |ev| {
            if !t.is_live() {
                return;
            }
            if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
                let at = input::mouse_canvas_px(m, &c);
                d.borrow_mut().effect_mut().pointer_moved(at);
            }
        })?);
    }
    {
        let (d, t) = (driver.clone(), ticket.clone());
        listeners.push(Listener::new(canvas, "mouseleave", move |_| {
            if t.is_live() {
                d.borrow_mut().effect_mut().pointer_moved(None);
            }
        })?);
    }
    {
        let (d, c, t) = (driver.clone(), canvas.clone(), ticket.clone());
        listeners.push(Listener::new(canvas, "click", move |ev| {
            if !t.is_live() {
                return;
            }
            let at = ev
                .dyn_ref::<web::MouseEvent>()
                .and_then(|m| input::mouse_canvas_px(m, &c));
            if let Some(at) = at {
                d.borrow_mut().effect_mut().pointer_pressed(at);
            }
        })?);
    }
    if let Some(window) = web::window() {
        let (d, c, t) = (driver.clone(), canvas.clone(), ticket.clone());
        listeners.push(Listener::new(&window, "resize", move |_| {
            if !t.is_live() {
                return;
            }
            let (w, h) = dom::sync_canvas_backing_size(&c);
            d.borrow_mut().resize(w as f32, h as f32);
        })?);
    }
    Ok(listeners)
}

/// FPS and population read-outs, only when the page carries them.
fn wire_stats<E: Effect + 'static>(
    document: &web::Document,
    driver: &Rc<RefCell<FrameDriver<E>>>,
    ticket: &Ticket,
) -> Option<Interval> {
    if document.get_element_by_id(ID_FPS_VALUE).is_none()
        && document.get_element_by_id(ID_PARTICLE_COUNT).is_none()
    {
        return None;
    }
    let (d, t, doc) = (driver.clone(), ticket.clone(), document.clone());
    Interval::new(STATS_REFRESH_MS, move || {
        if !t.is_live() {
            return;
        }
        let stats = d.borrow().stats();
        dom::set_text(&doc, ID_FPS_VALUE, &format!("{:.0}", stats.fps));
        dom::set_text(&doc, ID_PARTICLE_COUNT, &stats.particles.to_string());
    })
    .map_err(|e| log::warn!("[mount] stats timer: {e:?}"))
    .ok()
}
