//! Ambient dust behind the card strip. Fixed population, recycled in place
//! at the right edge.

use super::{floor_size, uniform};
use crate::constants::DRIFT_COUNT;
use crate::driver::{Backdrop, Effect};
use crate::forces::{self, Env, ForceRules, LifeRule};
use crate::particle::Particle;
use crate::pool::Pool;
use crate::surface::{Color, Paint, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Drift {
    pool: Pool,
    size: Vec2,
    rng: StdRng,
}

impl Drift {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self::with_count(width, height, DRIFT_COUNT, seed)
    }

    pub fn with_count(width: f32, height: f32, count: usize, seed: u64) -> Self {
        let mut drift = Self {
            pool: Pool::recycling(count),
            size: floor_size(width, height),
            rng: StdRng::seed_from_u64(seed),
        };
        let (size, rng) = (drift.size, &mut drift.rng);
        drift.pool.fill(|| {
            let mut p = Particle::default();
            seed_mote(&mut p, rng, size, None);
            // spread the first lifetimes so motes do not blink in unison
            p.life = uniform(rng, 0.2, 1.0);
            p
        });
        drift
    }

    #[inline]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

fn seed_mote(p: &mut Particle, rng: &mut StdRng, size: Vec2, x: Option<f32>) {
    p.pos = Vec2::new(
        x.unwrap_or_else(|| uniform(rng, 0.0, size.x)),
        uniform(rng, 0.0, size.y),
    );
    p.vel = Vec2::new(uniform(rng, -0.6, -0.1), uniform(rng, -0.08, 0.08));
    p.radius = uniform(rng, 0.5, 1.8);
    p.base_radius = p.radius;
    p.base_alpha = uniform(rng, 0.3, 0.8);
    p.alpha = p.base_alpha;
    p.life = 1.0;
    p.decay = uniform(rng, 0.0008, 0.003);
    p.time = 0.0;
    p.twinkle_speed = uniform(rng, 0.01, 0.05);
    p.twinkle_amount = uniform(rng, 0.05, 0.2);
    p.hue = uniform(rng, 250.0, 290.0);
}

impl Effect for Drift {
    fn name(&self) -> &'static str {
        "ambient-drift"
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = floor_size(width, height);
    }

    fn step(&mut self, ticks: f32) {
        let rules = ForceRules {
            life: LifeRule::Twinkle,
            ..ForceRules::default()
        };
        let env = Env {
            size: self.size,
            pointer: None,
        };
        for p in self.pool.iter_mut() {
            forces::step(p, &rules, &env, ticks);
        }
        let (size, rng) = (self.size, &mut self.rng);
        self.pool.recycle(
            |p| p.pos.x < -p.radius || p.is_dead(),
            |p| {
                let enter_x = size.x + p.radius;
                seed_mote(p, rng, size, Some(enter_x));
            },
        );
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.pool {
            let a = p.visible_alpha();
            if p.is_dead() || a <= 0.0 || p.pos.y < 0.0 || p.pos.y > self.size.y {
                continue;
            }
            surface.set_alpha(a);
            surface.fill_circle(
                p.pos.x,
                p.pos.y,
                p.visible_radius(),
                &Paint::Solid(Color::Hsla(p.hue, 80.0, 70.0, 1.0)),
            );
        }
        surface.set_alpha(1.0);
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn population(&self) -> usize {
        self.pool.len()
    }
}
