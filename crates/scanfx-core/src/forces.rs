//! Per-tick force rules shared by the particle effects.
//!
//! Each rule is a free function so effects can call a single one directly;
//! [`step`] applies a selected subset in the fixed order
//! reflect, repel, spring, damp, integrate, life.

use crate::particle::Particle;
use glam::Vec2;

/// What a particle can see of the world during a step.
#[derive(Clone, Copy, Debug, Default)]
pub struct Env {
    pub size: Vec2,
    pub pointer: Option<Vec2>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Repulsion {
    pub radius: f32,
    pub strength: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LifeRule {
    Fixed,
    FadeIn { rate: f32 },
    Twinkle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceRules {
    pub reflect: bool,
    pub repel: Option<Repulsion>,
    pub spring: Option<f32>,
    pub damping: f32,
    pub life: LifeRule,
}

impl Default for ForceRules {
    fn default() -> Self {
        Self {
            reflect: false,
            repel: None,
            spring: None,
            damping: 1.0,
            life: LifeRule::Fixed,
        }
    }
}

pub fn step(p: &mut Particle, rules: &ForceRules, env: &Env, ticks: f32) {
    if rules.reflect {
        reflect(p, env.size);
    }
    if let (Some(r), Some(pointer)) = (rules.repel, env.pointer) {
        repel(p, pointer, r.radius, r.strength * ticks);
    }
    if let Some(k) = rules.spring {
        spring(p, k * ticks);
    }
    damp(p, rules.damping, ticks);
    integrate(p, ticks);
    match rules.life {
        LifeRule::Fixed => {}
        LifeRule::FadeIn { rate } => fade_in(p, rate * ticks),
        LifeRule::Twinkle => twinkle(p, ticks),
    }
}

/// Invert a velocity component once the position is outside the canvas.
#[inline]
pub fn reflect(p: &mut Particle, size: Vec2) {
    if p.pos.x < 0.0 || p.pos.x > size.x {
        p.vel.x = -p.vel.x;
    }
    if p.pos.y < 0.0 || p.pos.y > size.y {
        p.vel.y = -p.vel.y;
    }
}

/// Push away from `pointer` with `(radius - d) / radius` falloff. A zero or
/// negative radius disables the rule; at `d == 0` the push has magnitude
/// `strength` along -x so it never blows up.
#[inline]
pub fn repel(p: &mut Particle, pointer: Vec2, radius: f32, strength: f32) {
    if !(radius > 0.0) {
        return;
    }
    let d = pointer - p.pos;
    let dist = d.length();
    if dist >= radius {
        return;
    }
    let force = (radius - dist) / radius;
    let angle = d.y.atan2(d.x);
    p.vel.x -= angle.cos() * force * strength;
    p.vel.y -= angle.sin() * force * strength;
}

#[inline]
pub fn spring(p: &mut Particle, k: f32) {
    if let Some(target) = p.target {
        p.vel += (target - p.pos) * k;
    }
}

#[inline]
pub fn damp(p: &mut Particle, factor: f32, ticks: f32) {
    if factor < 1.0 {
        p.vel *= factor.max(0.0).powf(ticks);
    }
}

#[inline]
pub fn integrate(p: &mut Particle, ticks: f32) {
    p.pos += p.vel * ticks;
}

#[inline]
pub fn fade_in(p: &mut Particle, amount: f32) {
    if p.life < p.max_life {
        p.life = (p.life + amount).min(p.max_life);
    }
}

/// `alpha = base * life + sin(time * speed) * amount`, then decay life.
#[inline]
pub fn twinkle(p: &mut Particle, ticks: f32) {
    p.time += ticks;
    p.alpha = p.base_alpha * p.life + (p.time * p.twinkle_speed).sin() * p.twinkle_amount;
    p.life -= p.decay * ticks;
}
