// Host-side tests for the frame driver and mount identity.

mod common;

use common::{Op, RecordingSurface};
use glam::Vec2;
use scanfx_core::{
    ticks_for, Backdrop, Color, Effect, FrameDriver, FxError, Lifecycle, Paint, Surface,
};

/// Counts steps and records the tick count it was handed.
#[derive(Default)]
struct Probe {
    steps: Vec<f32>,
    fade: bool,
    pointer: Option<Vec2>,
}

impl Effect for Probe {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn resize(&mut self, _width: f32, _height: f32) {}

    fn step(&mut self, ticks: f32) {
        self.steps.push(ticks);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(1.0, 2.0, 3.0, &Paint::Solid(Color::rgb((255, 255, 255), 1.0)));
    }

    fn backdrop(&self) -> Backdrop {
        if self.fade {
            Backdrop::Fade(Color::rgb((0, 0, 0), 0.05))
        } else {
            Backdrop::Clear
        }
    }

    fn population(&self) -> usize {
        self.steps.len()
    }

    fn pointer_moved(&mut self, at: Option<Vec2>) {
        self.pointer = at;
    }
}

#[test]
fn ticks_are_bounded_and_proportional() {
    assert_eq!(ticks_for(1.0 / 60.0), 1.0);
    assert!((ticks_for(1.0 / 30.0) - 2.0).abs() < 1e-5);
    assert_eq!(ticks_for(0.0), 0.0);
    assert_eq!(ticks_for(-1.0), 0.0);
    // a long stall (hidden tab) does not explode the simulation
    assert_eq!(ticks_for(5.0), 4.0);
    assert_eq!(ticks_for(f32::NAN), 1.0);
    assert_eq!(ticks_for(f32::INFINITY), 1.0);
}

#[test]
fn backdrop_precedes_drawing_every_frame() {
    let mut driver = FrameDriver::new(Probe::default());
    let mut surface = RecordingSurface::new(320.0, 200.0);
    driver.frame(1.0 / 60.0, &mut surface);

    let clear = surface.ops.iter().position(|op| *op == Op::Clear);
    let circle = surface
        .ops
        .iter()
        .position(|op| matches!(op, Op::Circle { .. }));
    assert!(clear.is_some() && circle.is_some());
    assert!(clear < circle);
    assert_eq!(driver.effect().steps, vec![1.0]);
}

#[test]
fn fading_backdrop_covers_the_whole_surface() {
    let mut driver = FrameDriver::new(Probe {
        fade: true,
        ..Probe::default()
    });
    let mut surface = RecordingSurface::new(320.0, 200.0);
    driver.frame(1.0 / 60.0, &mut surface);
    assert_eq!(surface.count(|op| *op == Op::Clear), 0);
    assert!(surface.ops.contains(&Op::Rect {
        x: 0.0,
        y: 0.0,
        w: 320.0,
        h: 200.0
    }));
    // state reset before the fill so no earlier shadow leaks in
    assert!(surface.ops.contains(&Op::Shadow(0.0)));
    assert!(surface.ops.contains(&Op::Alpha(1.0)));
}

#[test]
fn stats_report_smoothed_fps_and_population() {
    let mut driver = FrameDriver::new(Probe::default());
    let mut surface = RecordingSurface::new(10.0, 10.0);
    for _ in 0..200 {
        driver.frame(1.0 / 30.0, &mut surface);
    }
    let stats = driver.stats();
    assert_eq!(stats.fps, 30.0);
    assert_eq!(stats.particles, 200);
    assert_eq!(driver.frames(), 200);

    // zero-length frames leave the estimate alone
    driver.frame(0.0, &mut surface);
    assert_eq!(driver.stats().fps, 30.0);
}

#[test]
fn input_reaches_the_effect() {
    let mut driver = FrameDriver::new(Probe::default());
    driver.effect_mut().pointer_moved(Some(Vec2::new(4.0, 5.0)));
    assert_eq!(driver.effect().pointer, Some(Vec2::new(4.0, 5.0)));
    driver.effect_mut().pointer_moved(None);
    assert_eq!(driver.effect().pointer, None);
}

#[test]
fn effects_without_config_reject_updates() {
    let mut probe = Probe::default();
    match probe.configure("{}") {
        Err(FxError::Unconfigurable(name)) => assert_eq!(name, "probe"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn remount_invalidates_earlier_tickets() {
    let lifecycle = Lifecycle::new();
    let first = lifecycle.begin();
    assert!(first.is_live());

    let second = lifecycle.begin();
    assert!(!first.is_live());
    assert!(second.is_live());
    assert_ne!(first.generation(), second.generation());

    lifecycle.end();
    assert!(!second.is_live());

    // clones share the same identity
    let third = lifecycle.begin();
    let copy = third.clone();
    lifecycle.end();
    assert!(!copy.is_live());
}
