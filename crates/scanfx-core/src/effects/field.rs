//! Interactive particle field: drifting dots linked by lines, pushed away
//! by the pointer, with click explosions.

use super::{floor_size, uniform};
use crate::config::FieldConfig;
use crate::constants::*;
use crate::driver::{Backdrop, Effect};
use crate::error::Result;
use crate::forces::{self, Env, ForceRules, LifeRule, Repulsion};
use crate::particle::Particle;
use crate::pool::Pool;
use crate::surface::{Color, GradientStop, Paint, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

pub struct Field {
    config: FieldConfig,
    pool: Pool,
    size: Vec2,
    pointer: Option<Vec2>,
    rng: StdRng,
}

impl Field {
    pub fn new(config: FieldConfig, width: f32, height: f32, seed: u64) -> Self {
        let config = config.sanitized();
        let mut field = Self {
            pool: Pool::growing(config.particle_count),
            config,
            size: floor_size(width, height),
            pointer: None,
            rng: StdRng::seed_from_u64(seed),
        };
        field.top_up();
        field
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Swap the config. Size and speed changes are applied to the particles
    /// already in the pool, not only to new ones.
    pub fn set_config(&mut self, config: FieldConfig) {
        let old = std::mem::replace(&mut self.config, config.sanitized());
        self.pool.set_capacity(self.config.particle_count);

        let size = self.config.particle_size;
        if size != old.particle_size {
            for p in self.pool.iter_mut() {
                p.radius = size;
                p.base_radius = size;
            }
        }

        let speed = self.config.particle_speed;
        if speed != old.particle_speed {
            if old.particle_speed > 0.0 {
                let scale = speed / old.particle_speed;
                for p in self.pool.iter_mut() {
                    p.vel *= scale;
                }
            } else {
                // nothing to scale from a standstill
                for p in self.pool.iter_mut() {
                    p.vel = Vec2::new(
                        (self.rng.gen::<f32>() - 0.5) * speed,
                        (self.rng.gen::<f32>() - 0.5) * speed,
                    );
                }
            }
        }
    }

    #[inline]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    fn rules(&self) -> ForceRules {
        ForceRules {
            reflect: true,
            repel: Some(Repulsion {
                radius: self.config.mouse_radius,
                strength: REPULSION_STRENGTH,
            }),
            spring: None,
            damping: FIELD_DAMPING,
            life: LifeRule::FadeIn {
                rate: FIELD_FADE_IN_RATE,
            },
        }
    }

    fn spawn(&mut self, at: Option<Vec2>) -> Particle {
        let pos = at.unwrap_or_else(|| {
            Vec2::new(
                self.rng.gen::<f32>() * self.size.x,
                self.rng.gen::<f32>() * self.size.y,
            )
        });
        let speed = self.config.particle_speed;
        let vel = Vec2::new(
            (self.rng.gen::<f32>() - 0.5) * speed,
            (self.rng.gen::<f32>() - 0.5) * speed,
        );
        Particle::at(pos, vel).with_radius(self.config.particle_size)
    }

    fn top_up(&mut self) {
        let missing = self.pool.capacity().saturating_sub(self.pool.len());
        for _ in 0..missing {
            let p = self.spawn(None);
            self.pool.push(p);
        }
    }

    /// Radial burst of `EXPLOSION_COUNT` particles fading in from `at`.
    pub fn explode(&mut self, at: Vec2) {
        for i in 0..EXPLOSION_COUNT {
            let angle = TAU * i as f32 / EXPLOSION_COUNT as f32;
            let speed = uniform(
                &mut self.rng,
                EXPLOSION_SPEED_MIN,
                EXPLOSION_SPEED_MIN + EXPLOSION_SPEED_SPAN,
            );
            let mut p = self.spawn(Some(at));
            p.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            p.life = EXPLOSION_START_LIFE;
            p.max_life = 1.0;
            self.pool.push(p);
        }
        self.pool.trim();
    }

    fn draw_links(&self, surface: &mut dyn Surface) {
        let reach = self.config.connection_distance;
        if reach > 0.0 {
            let ps = self.pool.as_slice();
            for (i, a) in ps.iter().enumerate() {
                for b in &ps[i + 1..] {
                    let d = a.pos.distance(b.pos);
                    if d < reach {
                        let opacity = (1.0 - d / reach) * 0.5;
                        surface.stroke_line(
                            a.pos.to_array(),
                            b.pos.to_array(),
                            1.0,
                            Color::rgb(FIELD_RGB, opacity),
                        );
                    }
                }
            }
        }

        let radius = self.config.mouse_radius;
        if let (Some(pointer), true) = (self.pointer, radius > 0.0) {
            for p in &self.pool {
                let d = p.pos.distance(pointer);
                if d < radius {
                    let opacity = (1.0 - d / radius) * 0.8;
                    surface.stroke_line(
                        p.pos.to_array(),
                        pointer.to_array(),
                        2.0,
                        Color::rgb(POINTER_LINK_RGB, opacity),
                    );
                }
            }
        }
    }
}

impl Effect for Field {
    fn name(&self) -> &'static str {
        "particle-field"
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = floor_size(width, height);
    }

    fn step(&mut self, ticks: f32) {
        let rules = self.rules();
        let env = Env {
            size: self.size,
            pointer: self.pointer,
        };
        for p in self.pool.iter_mut() {
            forces::step(p, &rules, &env, ticks);
        }
        // matured burst/ambient dots beyond the live count leave first
        self.pool.settle(Particle::is_mature);
        self.top_up();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.set_alpha(1.0);
        for p in &self.pool {
            let life = p.visible_life();
            let r = p.visible_radius() * life;
            if r <= 0.0 {
                continue;
            }
            surface.fill_circle(
                p.pos.x,
                p.pos.y,
                r,
                &Paint::Solid(Color::rgb(FIELD_RGB, 0.8 * life)),
            );
            let halo = [
                GradientStop::new(0.0, Color::rgb(FIELD_RGB, 0.3 * life)),
                GradientStop::new(1.0, Color::rgb(FIELD_RGB, 0.0)),
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
        self.draw_links(surface);
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fade(Color::Rgba(10, 10, 10, 0.1))
    }

    fn population(&self) -> usize {
        self.pool.len()
    }

    fn pointer_moved(&mut self, at: Option<Vec2>) {
        self.pointer = at;
    }

    fn pointer_pressed(&mut self, at: Vec2) {
        self.explode(at);
    }

    fn configure(&mut self, json: &str) -> Result<()> {
        self.set_config(FieldConfig::from_json(json)?);
        Ok(())
    }
}
