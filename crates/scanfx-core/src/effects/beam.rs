//! Scanner light bar: a glowing vertical beam that sheds twinkling motes to
//! the right. While a card is under the scan line the beam blends toward a
//! brighter, denser profile.

use super::{floor_size, uniform};
use crate::constants::*;
use crate::driver::{Backdrop, Effect};
use crate::forces;
use crate::particle::Particle;
use crate::pool::Pool;
use crate::surface::{Blend, Color, GradientStop, Paint, SpriteId, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Profile {
    pub intensity: f32,
    pub budget: f32,
    pub fade_zone: f32,
}

impl Profile {
    pub const IDLE: Profile = Profile {
        intensity: 0.8,
        budget: 800.0,
        fade_zone: 60.0,
    };
    pub const SCANNING: Profile = Profile {
        intensity: 1.8,
        budget: 2500.0,
        fade_zone: 35.0,
    };

    /// Move each field `rate` of the way toward `target`.
    pub fn blend_toward(&mut self, target: &Profile, rate: f32) {
        self.intensity += (target.intensity - self.intensity) * rate;
        self.budget += (target.budget - self.budget) * rate;
        self.fade_zone += (target.fade_zone - self.fade_zone) * rate;
    }
}

/// Extra emission above an intensity ratio `threshold`, with probability
/// `(ratio - base) * gain` per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BonusTier {
    pub threshold: f32,
    pub base: f32,
    pub gain: f32,
}

impl BonusTier {
    const fn new(threshold: f32, base: f32, gain: f32) -> Self {
        Self {
            threshold,
            base,
            gain,
        }
    }

    /// Chance of one extra mote this tick; zero at or below the threshold.
    #[inline]
    pub fn probability(&self, ratio: f32) -> f32 {
        if ratio > self.threshold {
            ((ratio - self.base) * self.gain).max(0.0)
        } else {
            0.0
        }
    }
}

// the first tier counts from the idle ratio, not from its own threshold
pub const BONUS_TIERS: [BonusTier; 4] = [
    BonusTier::new(1.1, 1.0, 1.2),
    BonusTier::new(1.3, 1.3, 1.4),
    BonusTier::new(1.5, 1.5, 1.8),
    BonusTier::new(2.0, 2.0, 2.0),
];

const PURPLE: (u8, u8, u8) = (139, 92, 246);
const LAVENDER: (u8, u8, u8) = (196, 181, 253);
const WHITE: (u8, u8, u8) = (255, 255, 255);

pub struct Beam {
    pool: Pool,
    size: Vec2,
    bar_width: f32,
    scanning: bool,
    current: Profile,
    glow: f32,
    sprite: Cell<Option<SpriteId>>,
    rng: StdRng,
}

impl Beam {
    pub fn new(width: f32, seed: u64) -> Self {
        let mut beam = Self {
            pool: Pool::recycling(Profile::IDLE.budget as usize),
            size: floor_size(width, BEAM_HEIGHT),
            bar_width: BEAM_BAR_WIDTH,
            scanning: false,
            current: Profile::IDLE,
            glow: BEAM_IDLE_GLOW,
            sprite: Cell::new(None),
            rng: StdRng::seed_from_u64(seed),
        };
        for _ in 0..beam.pool.capacity() {
            let p = beam.emit();
            beam.pool.push(p);
        }
        beam
    }

    #[inline]
    pub fn bar_x(&self) -> f32 {
        self.size.x * 0.5
    }

    #[inline]
    pub fn profile(&self) -> Profile {
        self.current
    }

    #[inline]
    pub fn glow(&self) -> f32 {
        self.glow
    }

    #[inline]
    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    #[inline]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Fed every frame from the scan controller's report.
    pub fn set_scanning(&mut self, scanning: bool) {
        self.scanning = scanning;
    }

    #[inline]
    fn intensity_ratio(&self) -> f32 {
        self.current.intensity / Profile::IDLE.intensity
    }

    fn emit(&mut self) -> Particle {
        let ratio = self.intensity_ratio();
        let speed_mul = 1.0 + (ratio - 1.0) * 1.2;
        let size_mul = 1.0 + (ratio - 1.0) * 0.7;
        let half = self.bar_width * 0.5;
        let alpha = uniform(&mut self.rng, 0.6, 1.0);
        let mut p = Particle::at(
            Vec2::new(
                self.bar_x() + uniform(&mut self.rng, -half, half),
                uniform(&mut self.rng, 0.0, self.size.y),
            ),
            Vec2::new(
                uniform(&mut self.rng, 0.2, 1.0) * speed_mul,
                uniform(&mut self.rng, -0.15, 0.15) * speed_mul,
            ),
        )
        .with_radius(uniform(&mut self.rng, 0.4, 1.0) * size_mul);
        p.alpha = alpha;
        p.base_alpha = alpha;
        p.decay = uniform(&mut self.rng, 0.005, 0.025) * (2.0 - ratio * 0.5);
        p.twinkle_speed = uniform(&mut self.rng, 0.02, 0.08) * speed_mul;
        p.twinkle_amount = uniform(&mut self.rng, 0.1, 0.25);
        p
    }

    /// Reuse a dead mote at the bar; keeps its size, decay and twinkle.
    fn respawn(p: &mut Particle, rng: &mut StdRng, bar_x: f32, half: f32, height: f32) {
        p.pos = Vec2::new(bar_x + uniform(rng, -half, half), uniform(rng, 0.0, height));
        p.vel = Vec2::new(uniform(rng, 0.2, 1.0), uniform(rng, -0.15, 0.15));
        p.alpha = uniform(rng, 0.6, 1.0);
        p.base_alpha = p.alpha;
        p.life = 1.0;
        p.time = 0.0;
    }

    fn emission(&mut self) {
        let budget = self.current.budget.max(0.0) as usize;
        if self.rng.gen::<f32>() < self.current.intensity && self.pool.len() < budget {
            let p = self.emit();
            self.pool.push(p);
        }
        let ratio = self.intensity_ratio();
        for tier in BONUS_TIERS {
            let chance = tier.probability(ratio);
            if chance > 0.0 && self.rng.gen::<f32>() < chance {
                let p = self.emit();
                self.pool.push(p);
            }
        }
        if self.pool.len() > budget + BEAM_SHED_SLACK {
            let excess = BEAM_SHED_BATCH.min(self.pool.len() - budget);
            self.pool.shed_newest(excess);
        }
        self.pool.set_capacity(budget);
    }

    fn draw_bar(&self, surface: &mut dyn Surface) {
        let h = self.size.y;
        let x = self.bar_x();
        let lw = self.bar_width;
        let glow = self.glow;
        let fade = (self.current.fade_zone / h).clamp(0.0, 0.5);

        surface.set_blend(Blend::Lighter);

        let core = [
            GradientStop::new(0.0, Color::rgb(WHITE, 0.0)),
            GradientStop::new(0.3, Color::rgb(WHITE, 0.9 * glow)),
            GradientStop::new(0.5, Color::rgb(WHITE, glow)),
            GradientStop::new(0.7, Color::rgb(WHITE, 0.9 * glow)),
            GradientStop::new(1.0, Color::rgb(WHITE, 0.0)),
        ];
        surface.set_alpha(1.0);
        bar_layer(surface, x, lw * 0.5, h, 15.0, &core);

        let (a1, a2, a3) = if self.scanning {
            (1.0, 0.8, 0.6)
        } else {
            (0.8, 0.6, 0.4)
        };
        let glow1 = [
            GradientStop::new(0.0, Color::rgb(PURPLE, 0.0)),
            GradientStop::new(0.5, Color::rgb(LAVENDER, 0.8 * glow)),
            GradientStop::new(1.0, Color::rgb(PURPLE, 0.0)),
        ];
        surface.set_alpha(a1);
        bar_layer(surface, x, lw * 2.0, h, 25.0, &glow1);

        let glow2 = [
            GradientStop::new(0.0, Color::rgb(PURPLE, 0.0)),
            GradientStop::new(0.5, Color::rgb(PURPLE, 0.4 * glow)),
            GradientStop::new(1.0, Color::rgb(PURPLE, 0.0)),
        ];
        surface.set_alpha(a2);
        bar_layer(surface, x, lw * 4.0, h, 35.0, &glow2);

        if self.scanning {
            let glow3 = [
                GradientStop::new(0.0, Color::rgb(PURPLE, 0.0)),
                GradientStop::new(0.5, Color::rgb(PURPLE, 0.2)),
                GradientStop::new(1.0, Color::rgb(PURPLE, 0.0)),
            ];
            surface.set_alpha(a3);
            bar_layer(surface, x, lw * 8.0, h, 45.0, &glow3);
        }

        // keep only the vertical band, fading at top and bottom
        let band = [
            GradientStop::new(0.0, Color::rgb(WHITE, 0.0)),
            GradientStop::new(fade, Color::rgb(WHITE, 1.0)),
            GradientStop::new(1.0 - fade, Color::rgb(WHITE, 1.0)),
            GradientStop::new(1.0, Color::rgb(WHITE, 0.0)),
        ];
        surface.set_blend(Blend::DestinationIn);
        surface.set_alpha(1.0);
        surface.fill_rect(
            0.0,
            0.0,
            self.size.x,
            h,
            &Paint::Linear {
                from: [0.0, 0.0],
                to: [0.0, h],
                stops: &band,
            },
        );
    }

    fn sprite(&self, surface: &mut dyn Surface) -> Option<SpriteId> {
        if let Some(id) = self.sprite.get() {
            return Some(id);
        }
        let stops = [
            GradientStop::new(0.0, Color::rgb(WHITE, 1.0)),
            GradientStop::new(0.3, Color::rgb(LAVENDER, 0.8)),
            GradientStop::new(0.7, Color::rgb(PURPLE, 0.4)),
            GradientStop::new(1.0, Color::TRANSPARENT),
        ];
        let id = surface.bake_sprite(BEAM_SPRITE_PX, &stops);
        self.sprite.set(id);
        id
    }

    /// Opacity multiplier inside the top/bottom fade zones.
    pub fn edge_fade(&self, y: f32) -> f32 {
        let zone = self.current.fade_zone;
        if !(zone > 0.0) {
            return 1.0;
        }
        let h = self.size.y;
        let f = if y < zone {
            y / zone
        } else if y > h - zone {
            (h - y) / zone
        } else {
            1.0
        };
        f.clamp(0.0, 1.0)
    }
}

/// One symmetric layer around `x`: rounded rect with a horizontal gradient.
fn bar_layer(
    surface: &mut dyn Surface,
    x: f32,
    half: f32,
    h: f32,
    radius: f32,
    stops: &[GradientStop],
) {
    let paint = Paint::Linear {
        from: [x - half, 0.0],
        to: [x + half, 0.0],
        stops,
    };
    surface.fill_round_rect(x - half, 0.0, half * 2.0, h, radius, &paint);
}

impl Effect for Beam {
    fn name(&self) -> &'static str {
        "scanner-beam"
    }

    fn resize(&mut self, width: f32, _height: f32) {
        self.size = floor_size(width, BEAM_HEIGHT);
    }

    fn step(&mut self, ticks: f32) {
        let target = if self.scanning {
            Profile::SCANNING
        } else {
            Profile::IDLE
        };
        let rate = (BEAM_BLEND_RATE * ticks).min(1.0);
        self.current.blend_toward(&target, rate);
        let glow_target = if self.scanning {
            BEAM_SCAN_GLOW
        } else {
            BEAM_IDLE_GLOW
        };
        self.glow += (glow_target - self.glow) * rate;

        for p in self.pool.iter_mut() {
            forces::integrate(p, ticks);
            forces::twinkle(p, ticks);
        }
        let exit_x = self.size.x + BEAM_EXIT_MARGIN;
        let (bar_x, half, h) = (self.bar_x(), self.bar_width * 0.5, self.size.y);
        let rng = &mut self.rng;
        self.pool.recycle(
            |p| p.pos.x > exit_x || p.is_dead(),
            |p| Self::respawn(p, rng, bar_x, half, h),
        );

        self.emission();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.draw_bar(surface);

        surface.set_blend(Blend::Lighter);
        let Some(sprite) = self.sprite(surface) else {
            return;
        };
        for p in &self.pool {
            if p.is_dead() {
                continue;
            }
            let a = p.visible_alpha() * self.edge_fade(p.pos.y);
            if a <= 0.0 {
                continue;
            }
            let r = p.visible_radius();
            surface.set_alpha(a);
            surface.draw_sprite(sprite, p.pos.x - r, p.pos.y - r, r * 2.0, r * 2.0);
        }
        surface.set_alpha(1.0);
        surface.set_blend(Blend::SourceOver);
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn population(&self) -> usize {
        self.pool.len()
    }
}
