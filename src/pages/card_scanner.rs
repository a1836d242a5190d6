//! Card scanner page: a draggable strip of cards sliding under a fixed scan
//! line, with the light bar canvas reacting to cards being scanned and a
//! dust canvas behind.
//!
//! Strip motion, clip masks and each canvas run in their own frame loop.
//! The clip loop hands `any_active` to the light bar through a shared flag.

use super::Page;
use crate::cards::Deck;
use crate::constants::*;
use crate::dom::{self, Interval, Listener};
use crate::frame::AnimationLoop;
use crate::geometry;
use crate::input;
use crate::page::PageKind;
use crate::render::CanvasSurface;
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scanfx_core::codegen;
use scanfx_core::constants::{BEAM_HEIGHT, CARD_COUNT, CARD_HEIGHT, CARD_WIDTH, CODE_REFRESH_MS};
use scanfx_core::effects::{Beam, Drift};
use scanfx_core::{CardStream, FrameDriver, Motion, ScanController, ScanLine, Ticket};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

struct Strip {
    stream: CardStream,
    scan: ScanController,
    deck: Deck,
    line: web::HtmlElement,
    container: web::HtmlElement,
    rng: StdRng,
}

impl Strip {
    fn place(&self) {
        _ = self
            .line
            .style()
            .set_property("transform", &geometry::translate_x(self.stream.position));
    }

    fn measure(&mut self) {
        self.stream
            .set_container_width(self.container.offset_width() as f32);
        self.scan.set_line(ScanLine::centered(dom::viewport_width()));
    }

    /// Apply this frame's masks and pulses; returns whether any card is
    /// under the line.
    fn clip(&mut self, document: &web::Document, ticket: &Ticket) -> bool {
        let Strip { scan, deck, .. } = self;
        let report = scan.update(|id| deck.get(id).and_then(|c| c.span()));
        for (id, mask) in &report.masks {
            if let Some(card) = deck.get(*id) {
                card.apply_mask(*mask);
            }
        }
        for id in &report.pulses {
            if let Some(card) = deck.get(*id) {
                card.pulse(document, ticket);
            }
        }
        report.any_active
    }

    fn refresh_code(&mut self) {
        let grid = codegen::dimensions(CARD_WIDTH, CARD_HEIGHT);
        let Strip { deck, rng, .. } = self;
        for card in deck.iter() {
            if codegen::should_refresh(rng) {
                card.refresh_code(grid, rng);
            }
        }
    }
}

pub struct CardScanner {
    strip: Rc<RefCell<Strip>>,
    document: web::Document,
    _loops: Vec<AnimationLoop>,
    _listeners: Vec<Listener>,
    _refresh: Interval,
}

impl CardScanner {
    pub fn mount(document: &web::Document, ticket: Ticket, seed: u64) -> Result<Self> {
        let container: web::HtmlElement = dom::element_by_id(document, ID_CARD_STREAM)?;
        let line: web::HtmlElement = dom::element_by_id(document, ID_CARD_LINE)?;
        let mut rng = StdRng::seed_from_u64(seed);

        let deck = Deck::build(document, &line, CARD_COUNT, &ticket, &mut rng)?;
        if deck.is_empty() {
            bail!("card strip is empty");
        }
        let mut scan = ScanController::new(ScanLine::centered(dom::viewport_width()));
        for id in deck.ids() {
            scan.register(id);
        }
        let stream = CardStream::new(container.offset_width() as f32, deck.len());
        let strip = Rc::new(RefCell::new(Strip {
            stream,
            scan,
            deck,
            line,
            container,
            rng,
        }));
        strip.borrow().place();

        let scanning = Rc::new(Cell::new(false));
        let mut loops = Vec::with_capacity(4);

        {
            let (s, doc) = (strip.clone(), document.clone());
            loops.push(AnimationLoop::start(ticket.clone(), move |dt_sec| {
                let mut s = s.borrow_mut();
                if s.stream.tick(dt_sec) {
                    s.place();
                    dom::set_text(&doc, ID_SPEED_VALUE, &s.stream.speed().to_string());
                }
            }));
        }
        {
            let (s, doc, flag, t) = (
                strip.clone(),
                document.clone(),
                scanning.clone(),
                ticket.clone(),
            );
            loops.push(AnimationLoop::start(ticket.clone(), move |_| {
                let active = s.borrow_mut().clip(&doc, &t);
                flag.set(active);
            }));
        }

        let beam_canvas: web::HtmlCanvasElement = dom::element_by_id(document, ID_SCANNER_CANVAS)?;
        size_beam_canvas(&beam_canvas);
        let beam = Rc::new(RefCell::new(FrameDriver::new(Beam::new(
            beam_canvas.width() as f32,
            seed.rotate_left(21),
        ))));
        {
            let mut surface = CanvasSurface::new(beam_canvas.clone())?;
            let (b, flag) = (beam.clone(), scanning.clone());
            loops.push(AnimationLoop::start(ticket.clone(), move |dt_sec| {
                let mut b = b.borrow_mut();
                b.effect_mut().set_scanning(flag.get());
                b.frame(dt_sec, &mut surface);
            }));
        }

        // the dust layer is decorative; pages without it still work
        let drift = match dom::element_by_id::<web::HtmlCanvasElement>(document, ID_DRIFT_CANVAS) {
            Ok(canvas) => {
                let (w, h) = dom::sync_canvas_backing_size(&canvas);
                let driver = Rc::new(RefCell::new(FrameDriver::new(Drift::new(
                    w as f32,
                    h as f32,
                    seed.rotate_left(42),
                ))));
                let mut surface = CanvasSurface::new(canvas.clone())?;
                let d = driver.clone();
                loops.push(AnimationLoop::start(ticket.clone(), move |dt_sec| {
                    d.borrow_mut().frame(dt_sec, &mut surface);
                }));
                Some((canvas, driver))
            }
            Err(e) => {
                log::info!("[mount] no dust canvas: {e}");
                None
            }
        };

        let mut listeners = wire_drag(document, &strip, &ticket)?;
        listeners.extend(wire_buttons(document, &strip, &ticket));
        if let Some(window) = web::window() {
            let (s, t) = (strip.clone(), ticket.clone());
            let (bc, b) = (beam_canvas, beam);
            listeners.push(Listener::new(&window, "resize", move |_| {
                if !t.is_live() {
                    return;
                }
                s.borrow_mut().measure();
                size_beam_canvas(&bc);
                b.borrow_mut().resize(bc.width() as f32, BEAM_HEIGHT);
                if let Some((canvas, driver)) = &drift {
                    let (w, h) = dom::sync_canvas_backing_size(canvas);
                    driver.borrow_mut().resize(w as f32, h as f32);
                }
            })?);
        }

        let refresh = {
            let (s, t) = (strip.clone(), ticket.clone());
            Interval::new(CODE_REFRESH_MS, move || {
                if t.is_live() {
                    s.borrow_mut().refresh_code();
                }
            })?
        };

        {
            let s = strip.borrow();
            log::info!(
                "[mount] card scanner: {} cards, container {}px, track {}px",
                s.deck.len(),
                s.stream.container_width(),
                s.stream.track_length()
            );
        }

        Ok(Self {
            strip,
            document: document.clone(),
            _loops: loops,
            _listeners: listeners,
            _refresh: refresh,
        })
    }
}

impl Page for CardScanner {
    fn kind(&self) -> PageKind {
        PageKind::CardScanner
    }

    fn configure(&mut self, _json: &str) -> Result<()> {
        bail!("the card scanner has no runtime settings")
    }
}

impl Drop for CardScanner {
    fn drop(&mut self) {
        set_body_dragging(&self.document, false);
        if let Ok(s) = self.strip.try_borrow() {
            s.line.set_inner_html("");
        }
    }
}

fn size_beam_canvas(canvas: &web::HtmlCanvasElement) {
    canvas.set_width((dom::viewport_width() as u32).max(1));
    canvas.set_height(BEAM_HEIGHT as u32);
}

fn set_body_dragging(document: &web::Document, on: bool) {
    let Some(body) = document.body() else {
        return;
    };
    let style = body.style();
    if on {
        _ = style.set_property("user-select", "none");
        _ = style.set_property("cursor", "grabbing");
    } else {
        _ = style.remove_property("user-select");
        _ = style.remove_property("cursor");
    }
}

fn wire_drag(
    document: &web::Document,
    strip: &Rc<RefCell<Strip>>,
    ticket: &Ticket,
) -> Result<Vec<Listener>> {
    let line = strip.borrow().line.clone();
    let mut listeners = Vec::with_capacity(10);

    let begin = |s: Rc<RefCell<Strip>>, doc: web::Document, t: Ticket| {
        move |ev: web::Event| {
            if !t.is_live() {
                return;
            }
            let Some(x) = input::client_x(&ev) else {
                return;
            };
            ev.prevent_default();
            let s = &mut *s.borrow_mut();
            s.stream.begin_drag(x);
            _ = s.line.class_list().add_1(CLASS_DRAGGING);
            set_body_dragging(&doc, true);
        }
    };
    let drag = |s: Rc<RefCell<Strip>>, t: Ticket| {
        move |ev: web::Event| {
            if !t.is_live() {
                return;
            }
            let s = &mut *s.borrow_mut();
            if s.stream.state() != Motion::Dragging {
                return;
            }
            let Some(x) = input::client_x(&ev) else {
                return;
            };
            ev.prevent_default();
            s.stream.drag_to(x);
            s.place();
        }
    };
    let end = |s: Rc<RefCell<Strip>>, doc: web::Document, t: Ticket| {
        move |_: web::Event| {
            if !t.is_live() {
                return;
            }
            let s = &mut *s.borrow_mut();
            if s.stream.state() != Motion::Dragging {
                return;
            }
            s.stream.end_drag();
            _ = s.line.class_list().remove_1(CLASS_DRAGGING);
            set_body_dragging(&doc, false);
            dom::set_text(&doc, ID_SPEED_VALUE, &s.stream.speed().to_string());
        }
    };

    let (s, d, t) = (strip, document, ticket);
    listeners.push(Listener::new(&line, "mousedown", begin(s.clone(), d.clone(), t.clone()))?);
    listeners.push(Listener::new(d, "mousemove", drag(s.clone(), t.clone()))?);
    listeners.push(Listener::new(d, "mouseup", end(s.clone(), d.clone(), t.clone()))?);
    listeners.push(Listener::active(&line, "touchstart", begin(s.clone(), d.clone(), t.clone()))?);
    listeners.push(Listener::active(d, "touchmove", drag(s.clone(), t.clone()))?);
    listeners.push(Listener::new(d, "touchend", end(s.clone(), d.clone(), t.clone()))?);

    {
        let (s, t) = (s.clone(), t.clone());
        listeners.push(Listener::active(&line, "wheel", move |ev| {
            if !t.is_live() {
                return;
            }
            let Some(dy) = input::wheel_delta_y(&ev) else {
                return;
            };
            ev.prevent_default();
            let s = &mut *s.borrow_mut();
            s.stream.wheel(dy);
            s.place();
        })?);
    }
    for event in ["selectstart", "dragstart"] {
        listeners.push(Listener::new(&line, event, |ev| ev.prevent_default())?);
    }
    Ok(listeners)
}

fn wire_buttons(
    document: &web::Document,
    strip: &Rc<RefCell<Strip>>,
    ticket: &Ticket,
) -> Vec<Listener> {
    let mut listeners = Vec::with_capacity(3);

    let (s, t, doc) = (strip.clone(), ticket.clone(), document.clone());
    listeners.extend(Listener::click(document, ID_BTN_PAUSE, move || {
        if !t.is_live() {
            return;
        }
        let paused = s.borrow_mut().stream.toggle_pause();
        let label = if paused { "\u{25B6} Play" } else { "\u{275A}\u{275A} Pause" };
        dom::set_text(&doc, ID_BTN_PAUSE, label);
    }));

    let (s, t, doc) = (strip.clone(), ticket.clone(), document.clone());
    listeners.extend(Listener::click(document, ID_BTN_RESET, move || {
        if !t.is_live() {
            return;
        }
        let s = &mut *s.borrow_mut();
        s.stream.reset();
        _ = s.line.class_list().remove_1(CLASS_DRAGGING);
        s.place();
        dom::set_text(&doc, ID_SPEED_VALUE, &s.stream.speed().to_string());
        dom::set_text(&doc, ID_BTN_PAUSE, "\u{275A}\u{275A} Pause");
    }));

    let (s, t) = (strip.clone(), ticket.clone());
    listeners.extend(Listener::click(document, ID_BTN_DIRECTION, move || {
        if t.is_live() {
            s.borrow_mut().stream.reverse();
        }
    }));

    listeners
}
