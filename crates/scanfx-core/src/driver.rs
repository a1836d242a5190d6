//! Effect trait, the per-frame driver, and mount identity.

use crate::constants::{FPS_SMOOTHING, MAX_TICKS_PER_FRAME, TICKS_PER_SEC};
use crate::error::{FxError, Result};
use crate::surface::{Blend, Color, Paint, Surface};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

/// How the previous frame is removed before drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Backdrop {
    Clear,
    /// Low-alpha fill that leaves a fading trail of earlier frames.
    Fade(Color),
}

pub trait Effect {
    fn name(&self) -> &'static str;

    /// New pixel size of the canvas. Zero sizes are clamped by the effect.
    fn resize(&mut self, width: f32, height: f32);

    /// Advance the simulation by `ticks` 60 Hz ticks.
    fn step(&mut self, ticks: f32);

    fn draw(&self, surface: &mut dyn Surface);

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn population(&self) -> usize {
        0
    }

    fn pointer_moved(&mut self, _at: Option<Vec2>) {}

    fn pointer_pressed(&mut self, _at: Vec2) {}

    fn configure(&mut self, _json: &str) -> Result<()> {
        Err(FxError::Unconfigurable(self.name()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub fps: f32,
    pub particles: usize,
}

pub struct FrameDriver<E> {
    effect: E,
    fps: f32,
    frames: u64,
}

impl<E: Effect> FrameDriver<E> {
    pub fn new(effect: E) -> Self {
        Self {
            effect,
            fps: TICKS_PER_SEC,
            frames: 0,
        }
    }

    /// One frame: backdrop, step, draw. Physics always precedes drawing.
    pub fn frame(&mut self, dt_sec: f32, surface: &mut dyn Surface) {
        let ticks = ticks_for(dt_sec);
        if dt_sec > 0.0 && dt_sec.is_finite() {
            let inst = 1.0 / dt_sec;
            self.fps += (inst - self.fps) * FPS_SMOOTHING;
        }
        self.frames += 1;

        paint_backdrop(surface, self.effect.backdrop());
        self.effect.step(ticks);
        self.effect.draw(surface);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.effect.resize(width, height);
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            fps: self.fps.round(),
            particles: self.effect.population(),
        }
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn effect(&self) -> &E {
        &self.effect
    }

    #[inline]
    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }
}

/// Elapsed seconds to 60 Hz ticks, bounded to `[0, MAX_TICKS_PER_FRAME]`.
#[inline]
pub fn ticks_for(dt_sec: f32) -> f32 {
    if !dt_sec.is_finite() {
        return 1.0;
    }
    (dt_sec * TICKS_PER_SEC).clamp(0.0, MAX_TICKS_PER_FRAME)
}

fn paint_backdrop(surface: &mut dyn Surface, backdrop: Backdrop) {
    surface.set_blend(Blend::SourceOver);
    surface.set_shadow(0.0, Color::TRANSPARENT);
    surface.set_alpha(1.0);
    match backdrop {
        Backdrop::Clear => surface.clear(),
        Backdrop::Fade(color) => {
            let (w, h) = surface.size();
            surface.fill_rect(0.0, 0.0, w, h, &Paint::Solid(color));
        }
    }
}

/// Identity of the currently mounted view. Starting a new mount or ending
/// the current one invalidates every ticket handed out before.
#[derive(Clone, Debug, Default)]
pub struct Lifecycle {
    current: Rc<Cell<u64>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        let generation = self.current.get().wrapping_add(1);
        self.current.set(generation);
        Ticket {
            current: self.current.clone(),
            generation,
        }
    }

    pub fn end(&self) {
        self.current.set(self.current.get().wrapping_add(1));
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.current.get()
    }
}

#[derive(Clone, Debug)]
pub struct Ticket {
    current: Rc<Cell<u64>>,
    generation: u64,
}

impl Ticket {
    #[inline]
    pub fn is_live(&self) -> bool {
        self.current.get() == self.generation
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
