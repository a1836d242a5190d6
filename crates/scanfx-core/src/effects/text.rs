//! Text drawn as a cloud of dots that spring back to their glyph positions
//! after being pushed by the pointer.

use super::{floor_size, uniform};
use crate::constants::*;
use crate::driver::{Backdrop, Effect};
use crate::error::{FxError, Result};
use crate::forces::{self, Env, ForceRules, Repulsion};
use crate::particle::Particle;
use crate::surface::{Color, GradientStop, Paint, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Sample an RGBA coverage mask every `gap` pixels; a sample is kept when
/// its alpha exceeds `threshold`. Points are in mask pixel coordinates.
pub fn targets_from_rgba(
    width: usize,
    height: usize,
    rgba: &[u8],
    gap: usize,
    threshold: u8,
) -> Result<Vec<Vec2>> {
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(FxError::MaskSize {
            width,
            height,
            expected,
            actual: rgba.len(),
        });
    }
    let gap = gap.max(1);
    let mut out = Vec::new();
    for y in (0..height).step_by(gap) {
        for x in (0..width).step_by(gap) {
            if rgba[(y * width + x) * 4 + 3] > threshold {
                out.push(Vec2::new(x as f32, y as f32));
            }
        }
    }
    Ok(out)
}

pub struct TextParticles {
    particles: Vec<Particle>,
    /// Mask-space targets and the mask size, kept for re-centring on resize.
    targets: Vec<Vec2>,
    mask_size: Vec2,
    size: Vec2,
    pointer: Option<Vec2>,
    rng: StdRng,
}

impl TextParticles {
    pub fn new(
        targets: Vec<Vec2>,
        mask_size: Vec2,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Self {
        let mut text = Self {
            particles: Vec::with_capacity(targets.len()),
            targets,
            mask_size,
            size: floor_size(width, height),
            pointer: None,
            rng: StdRng::seed_from_u64(seed),
        };
        text.scatter();
        text
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn offset(&self) -> Vec2 {
        self.size * 0.5 - self.mask_size * 0.5
    }

    fn scatter(&mut self) {
        let offset = self.offset();
        let half = TEXT_SCATTER * 0.5;
        self.particles.clear();
        for t in &self.targets {
            let target = *t + offset;
            let jitter = Vec2::new(
                uniform(&mut self.rng, -half, half),
                uniform(&mut self.rng, -half, half),
            );
            let mut p = Particle::at(target + jitter, Vec2::ZERO).with_radius(TEXT_DOT_RADIUS);
            p.target = Some(target);
            p.hue = uniform(&mut self.rng, 250.0, 310.0);
            self.particles.push(p);
        }
    }
}

impl Effect for TextParticles {
    fn name(&self) -> &'static str {
        "text-particles"
    }

    fn resize(&mut self, width: f32, height: f32) {
        let before = self.offset();
        self.size = floor_size(width, height);
        let shift = self.offset() - before;
        for p in &mut self.particles {
            p.target = p.target.map(|t| t + shift);
        }
    }

    fn step(&mut self, ticks: f32) {
        let rules = ForceRules {
            reflect: false,
            repel: Some(Repulsion {
                radius: TEXT_MOUSE_RADIUS,
                strength: REPULSION_STRENGTH,
            }),
            spring: Some(TEXT_SPRING),
            damping: TEXT_DAMPING,
            ..ForceRules::default()
        };
        let env = Env {
            size: self.size,
            pointer: self.pointer,
        };
        for p in &mut self.particles {
            forces::step(p, &rules, &env, ticks);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.set_alpha(1.0);
        for p in &self.particles {
            let r = p.visible_radius();
            surface.fill_circle(
                p.pos.x,
                p.pos.y,
                r,
                &Paint::Solid(Color::Hsla(p.hue, 80.0, 60.0, 1.0)),
            );
            let halo = [
                GradientStop::new(0.0, Color::Hsla(p.hue, 80.0, 60.0, 0.3)),
                GradientStop::new(1.0, Color::Hsla(p.hue, 80.0, 60.0, 0.0)),
            ];
            surface.fill_circle(
                p.pos.x,
                p.pos.y,
                r * 2.0,
                &Paint::Radial {
                    center: p.pos.to_array(),
                    radius: r * 2.0,
                    stops: &halo,
                },
            );
        }
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fade(Color::Rgba(26, 26, 46, 0.2))
    }

    fn population(&self) -> usize {
        self.particles.len()
    }

    fn pointer_moved(&mut self, at: Option<Vec2>) {
        self.pointer = at;
    }
}
