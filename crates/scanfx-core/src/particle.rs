use crate::surface::safe_alpha;
use glam::Vec2;

/// One simulated point. Which fields matter depends on the effect: the
/// field uses `life` as a fade-in, the beam and drift use the twinkle set,
/// text particles use `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub base_radius: f32,
    pub alpha: f32,
    pub base_alpha: f32,
    pub life: f32,
    pub max_life: f32,
    pub decay: f32,
    pub time: f32,
    pub twinkle_speed: f32,
    pub twinkle_amount: f32,
    pub target: Option<Vec2>,
    pub hue: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 1.0,
            base_radius: 1.0,
            alpha: 1.0,
            base_alpha: 1.0,
            life: 1.0,
            max_life: 1.0,
            decay: 0.0,
            time: 0.0,
            twinkle_speed: 0.0,
            twinkle_amount: 0.0,
            target: None,
            hue: 0.0,
        }
    }
}

impl Particle {
    pub fn at(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            ..Self::default()
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.0);
        self.base_radius = self.radius;
        self
    }

    #[inline]
    pub fn visible_alpha(&self) -> f32 {
        safe_alpha(self.alpha)
    }

    #[inline]
    pub fn visible_life(&self) -> f32 {
        safe_alpha(self.life)
    }

    #[inline]
    pub fn visible_radius(&self) -> f32 {
        if self.radius.is_finite() {
            self.radius.max(0.0)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    #[inline]
    pub fn is_mature(&self) -> bool {
        self.life >= self.max_life
    }
}
