use crate::constants::MAX_FRAME_DT_SEC;
use instant::Instant;
use scanfx_core::Ticket;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop owned by a mounted page. The callback
/// receives the elapsed seconds since the previous frame. Rescheduling
/// stops once the ticket dies; dropping the loop cancels the pending frame.
pub struct AnimationLoop {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn start(ticket: Ticket, mut on_frame: impl FnMut(f32) + 'static) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let tick_clone = tick.clone();
        let pending_clone = pending.clone();
        let mut last = Instant::now();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_clone.set(None);
            if !ticket.is_live() {
                log::debug!("[frame] loop {} stopped", ticket.generation());
                return;
            }
            let now = Instant::now();
            let dt_sec = (now - last).as_secs_f32().min(MAX_FRAME_DT_SEC);
            last = now;
            on_frame(dt_sec);
            pending_clone.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));
        pending.set(request_frame(&tick));

        Self { tick, pending }
    }
}

fn request_frame(tick: &Tick) -> Option<i32> {
    let w = web::window()?;
    let tick = tick.borrow();
    let callback = tick.as_ref()?;
    w.request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // breaks the closure <-> cell cycle
        self.tick.borrow_mut().take();
    }
}
