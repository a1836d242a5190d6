// Host-side tests for the canvas effects, drawn into a recording surface.

mod common;

use common::{Op, RecordingSurface};
use glam::Vec2;
use scanfx_core::effects::{
    targets_from_rgba, Beam, Drift, Field, Profile, Rain, TextParticles, BONUS_TIERS,
};
use scanfx_core::{Blend, Color, ColorMode, Effect, FieldConfig, FrameDriver, FxError, RainConfig};

const FRAME: f32 = 1.0 / 60.0;

fn run<E: Effect>(driver: &mut FrameDriver<E>, surface: &mut RecordingSurface, frames: usize) {
    for _ in 0..frames {
        surface.ops.clear();
        driver.frame(FRAME, surface);
        surface.assert_all_finite();
    }
}

#[test]
fn field_tops_up_to_configured_count() {
    let field = Field::new(FieldConfig::default(), 800.0, 600.0, 1);
    assert_eq!(field.population(), 100);

    let mut driver = FrameDriver::new(field);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    run(&mut driver, &mut surface, 30);
    assert_eq!(driver.stats().particles, 100);
}

#[test]
fn field_explosion_settles_back_to_live_count() {
    let mut field = Field::new(FieldConfig::default(), 800.0, 600.0, 2);
    field.pointer_pressed(Vec2::new(400.0, 300.0));
    assert_eq!(field.population(), 120);

    // burst dots fade in from low life
    let young = field.pool().iter().filter(|p| p.life < 0.5).count();
    assert_eq!(young, 20);

    field.step(1.0);
    assert_eq!(field.population(), 100);
}

#[test]
fn field_rapid_clicks_stay_bounded() {
    let mut field = Field::new(FieldConfig::default(), 800.0, 600.0, 3);
    for _ in 0..50 {
        field.pointer_pressed(Vec2::new(10.0, 10.0));
    }
    // grow pools trim a batch per burst once past capacity + slack
    assert!(field.population() <= 100 + 100 + 20 + 50 * 5);
    for _ in 0..200 {
        field.step(1.0);
    }
    assert_eq!(field.population(), 100);
}

#[test]
fn field_reconfigures_live() {
    let mut field = Field::new(FieldConfig::default(), 800.0, 600.0, 4);
    field.configure(r#"{"particleCount": 40, "mouseRadius": 0}"#).unwrap();
    assert_eq!(field.config().particle_count, 40);
    field.step(1.0);
    assert_eq!(field.population(), 40);

    field.configure(r#"{"particleCount": 60}"#).unwrap();
    field.step(1.0);
    assert_eq!(field.population(), 60);

    assert!(matches!(
        field.configure("not json"),
        Err(FxError::Config(_))
    ));
    assert_eq!(field.config().particle_count, 60);
}

#[test]
fn field_size_change_reaches_resting_particles() {
    let mut field = Field::new(FieldConfig::default(), 800.0, 600.0, 6);
    field.configure(r#"{"particleSize": 6}"#).unwrap();
    for _ in 0..600 {
        field.step(1.0);
    }
    let ps = field.pool().as_slice();
    assert_eq!(ps.len(), 100);
    assert!(ps.iter().all(|p| p.base_radius == 6.0 && p.radius == 6.0));
}

#[test]
fn field_speed_change_rescales_velocities() {
    let mut field = Field::new(FieldConfig::default(), 800.0, 600.0, 7);
    let before: Vec<Vec2> = field.pool().iter().map(|p| p.vel).collect();
    field.configure(r#"{"particleSpeed": 1.5}"#).unwrap();
    for (old, p) in before.iter().zip(field.pool()) {
        assert!((p.vel - *old * 3.0).length() < 1e-5, "{old:?} -> {:?}", p.vel);
    }

    // from a standstill the velocities are drawn afresh
    field.configure(r#"{"particleSpeed": 0}"#).unwrap();
    assert!(field.pool().iter().all(|p| p.vel == Vec2::ZERO));
    field.configure(r#"{"particleSpeed": 2}"#).unwrap();
    let vels: Vec<Vec2> = field.pool().iter().map(|p| p.vel).collect();
    assert!(vels.iter().all(|v| v.x.abs() <= 1.0 && v.y.abs() <= 1.0));
    assert!(vels.iter().any(|v| *v != Vec2::ZERO));
}

#[test]
fn field_links_follow_the_pointer() {
    let config = FieldConfig {
        particle_count: 5,
        connection_distance: 0.0,
        ..FieldConfig::default()
    };
    let mut field = Field::new(config, 100.0, 100.0, 5);
    let mut surface = RecordingSurface::new(100.0, 100.0);

    field.draw(&mut surface);
    assert_eq!(surface.count(|op| matches!(op, Op::Line { .. })), 0);

    // every dot lies within 200px of the centre of a 100x100 canvas
    field.pointer_moved(Some(Vec2::new(50.0, 50.0)));
    surface.ops.clear();
    field.draw(&mut surface);
    assert_eq!(surface.count(|op| matches!(op, Op::Line { width, .. } if *width == 2.0)), 5);
    surface.assert_all_finite();
}

#[test]
fn field_survives_zero_sized_canvas() {
    let mut driver = FrameDriver::new(Field::new(FieldConfig::default(), 0.0, 0.0, 6));
    let mut surface = RecordingSurface::new(0.0, 0.0);
    driver.effect_mut().pointer_moved(Some(Vec2::ZERO));
    driver.effect_mut().pointer_pressed(Vec2::ZERO);
    run(&mut driver, &mut surface, 20);
}

#[test]
fn idle_beam_population_is_fixed() {
    let mut driver = FrameDriver::new(Beam::new(1280.0, 7));
    assert_eq!(driver.effect().population(), 800);
    let mut surface = RecordingSurface::new(1280.0, 300.0);
    for _ in 0..300 {
        surface.ops.clear();
        driver.frame(FRAME, &mut surface);
        assert_eq!(driver.effect().population(), 800);
    }
    surface.assert_all_finite();
    assert_eq!(driver.effect().profile(), Profile::IDLE);
}

#[test]
fn beam_blends_toward_scanning_and_back() {
    let mut beam = Beam::new(1280.0, 8);
    beam.set_scanning(true);
    beam.step(1.0);
    let p = beam.profile();
    assert!((p.intensity - (0.8 + (1.8 - 0.8) * 0.05)).abs() < 1e-5);
    assert!((p.budget - (800.0 + 1700.0 * 0.05)).abs() < 1e-2);

    for _ in 0..400 {
        beam.step(1.0);
    }
    let p = beam.profile();
    assert!((p.intensity - 1.8).abs() < 1e-2);
    assert!((beam.glow() - 3.5).abs() < 1e-2);
    assert!(beam.population() > 800);
    assert!(beam.population() <= 2500 + 200 + 4);

    beam.set_scanning(false);
    for _ in 0..600 {
        beam.step(1.0);
    }
    assert!((beam.profile().intensity - 0.8).abs() < 1e-2);
    assert!(beam.population() <= 800 + 200 + 4);
}

#[test]
fn beam_bonus_tiers_count_from_their_base() {
    let chances = |ratio: f32| BONUS_TIERS.map(|t| t.probability(ratio));
    // first tier opens at 1.1 but measures from the idle ratio
    let c = chances(1.15);
    assert!((c[0] - 0.18).abs() < 1e-5, "{c:?}");
    assert_eq!(&c[1..], &[0.0, 0.0, 0.0]);

    assert_eq!(chances(1.1), [0.0; 4]);
    let c = chances(1.4);
    assert!((c[0] - 0.48).abs() < 1e-5);
    assert!((c[1] - 0.14).abs() < 1e-5);
    assert_eq!(c[2], 0.0);

    // scanning profile ratio is 1.8 / 0.8
    let c = chances(2.25);
    assert!(c.iter().all(|p| *p > 0.0), "{c:?}");
    assert!((c[3] - 0.5).abs() < 1e-5);
}

#[test]
fn beam_bar_has_extra_layer_while_scanning() {
    let mut beam = Beam::new(1000.0, 9);
    let mut surface = RecordingSurface::new(1000.0, 300.0);
    beam.draw(&mut surface);
    assert_eq!(surface.count(|op| matches!(op, Op::RoundRect { .. })), 3);

    beam.set_scanning(true);
    surface.ops.clear();
    beam.draw(&mut surface);
    assert_eq!(surface.count(|op| matches!(op, Op::RoundRect { .. })), 4);
    assert!(surface.ops.contains(&Op::Blend(Blend::DestinationIn)));
    // sprite is baked once and reused
    assert_eq!(surface.count(|op| matches!(op, Op::Bake(_))), 0);
}

#[test]
fn beam_bakes_its_sprite_once() {
    let beam = Beam::new(1000.0, 10);
    let mut surface = RecordingSurface::new(1000.0, 300.0);
    beam.draw(&mut surface);
    beam.draw(&mut surface);
    assert_eq!(surface.count(|op| *op == Op::Bake(16)), 1);
    assert!(surface.count(|op| matches!(op, Op::Sprite { .. })) > 0);
}

#[test]
fn beam_falls_back_to_plain_rects() {
    let beam = Beam::new(1000.0, 11);
    let mut surface = RecordingSurface::new(1000.0, 300.0).without_round_rects();
    beam.draw(&mut surface);
    assert_eq!(surface.count(|op| matches!(op, Op::RoundRect { .. })), 0);
    // three bar layers plus the vertical band mask
    assert_eq!(surface.count(|op| matches!(op, Op::Rect { .. })), 4);
    surface.assert_all_finite();
}

#[test]
fn beam_edges_fade() {
    let beam = Beam::new(1000.0, 12);
    assert_eq!(beam.edge_fade(0.0), 0.0);
    assert!((beam.edge_fade(30.0) - 0.5).abs() < 1e-5);
    assert_eq!(beam.edge_fade(150.0), 1.0);
    assert_eq!(beam.edge_fade(300.0), 0.0);
}

#[test]
fn drift_population_is_invariant() {
    let mut driver = FrameDriver::new(Drift::new(1280.0, 400.0, 13));
    let mut surface = RecordingSurface::new(1280.0, 400.0);
    for _ in 0..600 {
        driver.frame(4.0 * FRAME, &mut surface);
        assert_eq!(driver.effect().population(), 160);
    }
    surface.assert_all_finite();
    // recycled motes re-enter from the right
    assert!(driver.effect().pool().iter().all(|p| p.pos.x <= 1280.0 + 2.0));
}

#[test]
fn rain_column_count_matches_layout() {
    let rain = Rain::new(RainConfig::default(), 800.0, 600.0, 14);
    // floor(800 / 16) * 0.8 = 40
    assert_eq!(rain.population(), 40);
    assert_eq!(rain.column_count(), 40);
    for col in rain.columns() {
        assert!((10..30).contains(&col.glyphs.len()));
        assert!(col.y <= 0.0);
    }
    // columns are spaced by font / density
    assert!((rain.columns()[1].x - 20.0).abs() < 1e-4);
}

#[test]
fn rain_population_is_stable_between_relayouts() {
    let mut driver = FrameDriver::new(Rain::new(RainConfig::default(), 800.0, 600.0, 15));
    let mut surface = RecordingSurface::new(800.0, 600.0);
    for _ in 0..1_000 {
        driver.frame(4.0 * FRAME, &mut surface);
        assert_eq!(driver.effect().population(), 40);
        surface.ops.clear();
    }

    driver
        .effect_mut()
        .configure(r#"{"fontSize": 20, "density": 0.5}"#)
        .unwrap();
    driver.frame(FRAME, &mut surface);
    assert_eq!(driver.effect().population(), 20);

    driver.resize(400.0, 600.0);
    assert_eq!(driver.effect().population(), 10);
}

#[test]
fn rain_alphabet_favours_capitals_and_digits() {
    let rain = Rain::new(RainConfig::default(), 640.0, 480.0, 8);
    let count = |c: char| rain.alphabet().iter().filter(|&&a| a == c).count();
    assert_eq!(count('A'), 2);
    assert_eq!(count('Z'), 2);
    assert_eq!(count('7'), 2);
    assert_eq!(count('a'), 1);
    assert_eq!(count('ア'), 1);
    assert_eq!(count('@'), 1);
}

#[test]
fn rain_classic_heads_are_white_and_glow() {
    let mut rain = Rain::new(RainConfig::default(), 160.0, 200.0, 16);
    let mut surface = RecordingSurface::new(160.0, 200.0);
    let mut saw_head = false;
    for _ in 0..2_000 {
        rain.step(1.0);
        surface.ops.clear();
        rain.draw(&mut surface);
        surface.assert_all_finite();
        if let Some(i) = surface.ops.iter().position(|op| *op == Op::Shadow(10.0)) {
            // the glyph right after the shadow is the white head
            match &surface.ops[i + 1] {
                Op::Text { color, .. } => assert_eq!(*color, Color::Rgba(255, 255, 255, 1.0)),
                other => panic!("expected head glyph, got {other:?}"),
            }
            assert_eq!(surface.ops[i + 2], Op::Shadow(0.0));
            saw_head = true;
            break;
        }
    }
    assert!(saw_head);
}

#[test]
fn rain_color_modes_change_glyph_colors() {
    for mode in ["rainbow", "purple", "red"] {
        let mut rain = Rain::new(RainConfig::default(), 160.0, 200.0, 17);
        rain.configure(&format!(r#"{{"colorMode":"{mode}"}}"#)).unwrap();
        assert_eq!(rain.config().color_mode, mode.parse::<ColorMode>().unwrap());
        for _ in 0..300 {
            rain.step(1.0);
        }
        let mut surface = RecordingSurface::new(160.0, 200.0);
        rain.draw(&mut surface);
        surface.assert_all_finite();
        // only the classic palette whitens the head glyph
        let white = Color::Rgba(255, 255, 255, 1.0);
        assert_eq!(
            surface.count(|op| matches!(op, Op::Text { color, .. } if *color == white)),
            0
        );
    }
}

#[test]
fn text_targets_sample_the_mask() {
    // 8x4 mask, left half opaque
    let (w, h) = (8usize, 4usize);
    let mut rgba = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w / 2 {
            rgba[(y * w + x) * 4 + 3] = 255;
        }
    }
    let targets = targets_from_rgba(w, h, &rgba, 2, 128).unwrap();
    assert_eq!(
        targets,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 2.0),
        ]
    );

    match targets_from_rgba(w, h, &rgba[..10], 2, 128) {
        Err(FxError::MaskSize {
            expected, actual, ..
        }) => assert_eq!((expected, actual), (128, 10)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn text_particles_return_home() {
    let targets = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
    let mut text = TextParticles::new(targets, Vec2::new(20.0, 10.0), 200.0, 100.0, 18);
    assert_eq!(text.population(), 2);
    let homes: Vec<Vec2> = text.particles().iter().filter_map(|p| p.target).collect();
    // mask centred in the canvas
    assert_eq!(homes, vec![Vec2::new(90.0, 45.0), Vec2::new(100.0, 45.0)]);

    for _ in 0..2_000 {
        text.step(1.0);
    }
    for p in text.particles() {
        assert!(p.pos.distance(p.target.unwrap()) < 0.5);
    }

    // the pointer displaces nearby dots
    text.pointer_moved(Some(Vec2::new(92.0, 45.0)));
    for _ in 0..30 {
        text.step(1.0);
    }
    assert!(text.particles()[0].pos.distance(Vec2::new(90.0, 45.0)) > 1.0);
}

#[test]
fn text_targets_shift_with_resize() {
    let targets = vec![Vec2::new(0.0, 0.0)];
    let mut text = TextParticles::new(targets, Vec2::new(20.0, 10.0), 200.0, 100.0, 19);
    text.resize(400.0, 300.0);
    assert_eq!(text.particles()[0].target, Some(Vec2::new(190.0, 145.0)));

    let mut surface = RecordingSurface::new(400.0, 300.0);
    let mut driver = FrameDriver::new(text);
    run(&mut driver, &mut surface, 10);
}
