pub mod beam;
pub mod drift;
pub mod field;
pub mod rain;
pub mod text;

pub use beam::{Beam, BonusTier, Profile, BONUS_TIERS};
pub use drift::Drift;
pub use field::Field;
pub use rain::{Column, Rain};
pub use text::{targets_from_rgba, TextParticles};

use glam::Vec2;
use rand::Rng;

#[inline]
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// Canvas size with a 1x1 floor so layouts never divide by zero.
#[inline]
pub(crate) fn floor_size(width: f32, height: f32) -> Vec2 {
    let fix = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
    Vec2::new(fix(width), fix(height))
}
