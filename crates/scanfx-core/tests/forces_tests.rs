// Host-side tests for the single-rule force functions.

use glam::Vec2;
use scanfx_core::forces::repel;
use scanfx_core::Particle;

#[test]
fn repel_at_the_pointer_pushes_along_negative_x() {
    let mut p = Particle::at(Vec2::new(50.0, 50.0), Vec2::ZERO);
    repel(&mut p, Vec2::new(50.0, 50.0), 100.0, 0.5);
    assert!((p.vel.x + 0.5).abs() < 1e-6, "{:?}", p.vel);
    assert_eq!(p.vel.y, 0.0);
}

#[test]
fn repel_points_away_from_the_pointer() {
    let mut p = Particle::at(Vec2::new(10.0, 0.0), Vec2::ZERO);
    repel(&mut p, Vec2::ZERO, 20.0, 1.0);
    assert!((p.vel.x - 0.5).abs() < 1e-6, "{:?}", p.vel);

    let mut far = Particle::at(Vec2::new(30.0, 0.0), Vec2::ZERO);
    repel(&mut far, Vec2::ZERO, 20.0, 1.0);
    assert_eq!(far.vel, Vec2::ZERO);

    repel(&mut far, Vec2::new(30.0, 0.0), 0.0, 1.0);
    assert_eq!(far.vel, Vec2::ZERO);
}
