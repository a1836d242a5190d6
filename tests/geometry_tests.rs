// Host-side tests for the pure layout helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod geometry {
    include!("../src/geometry.rs");
}

use geometry::*;
use glam::Vec2;

#[test]
fn backing_size_scales_by_device_pixel_ratio() {
    assert_eq!(backing_size(640.0, 360.0, 2.0), (1280, 720));
    assert_eq!(backing_size(100.5, 50.0, 1.0), (100, 50));
}

#[test]
fn backing_size_never_collapses_to_zero() {
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
    assert_eq!(backing_size(f64::NAN, -5.0, 1.0), (1, 1));
    // bad ratios fall back to 1
    assert_eq!(backing_size(300.0, 200.0, 0.0), (300, 200));
    assert_eq!(backing_size(300.0, 200.0, f64::INFINITY), (300, 200));
}

#[test]
fn client_point_maps_into_backing_pixels() {
    let p = client_to_canvas_px(
        Vec2::new(150.0, 80.0),
        Vec2::new(50.0, 30.0),
        Vec2::new(200.0, 100.0),
        Vec2::new(400.0, 200.0),
    )
    .unwrap();
    assert_eq!(p, Vec2::new(200.0, 100.0));
}

#[test]
fn client_point_without_layout_box_is_none() {
    assert!(client_to_canvas_px(Vec2::ONE, Vec2::ZERO, Vec2::ZERO, Vec2::ONE).is_none());
    assert!(
        client_to_canvas_px(Vec2::ONE, Vec2::ZERO, Vec2::new(10.0, f32::NAN), Vec2::ONE)
            .is_none()
    );
}

#[test]
fn percent_is_clamped_and_formatted() {
    assert_eq!(percent(34.0), "34.000%");
    assert_eq!(percent(-3.0), "0.000%");
    assert_eq!(percent(250.0), "100.000%");
    assert_eq!(percent(f32::NAN), "0.000%");
}

#[test]
fn translate_x_formats_and_sanitizes() {
    assert_eq!(translate_x(-12.345), "translateX(-12.35px)");
    assert_eq!(translate_x(f32::INFINITY), "translateX(0.00px)");
}

#[test]
fn card_images_cycle() {
    let urls = ["a.png", "b.png", "c.png"];
    assert_eq!(card_image(&urls, 0), Some("a.png"));
    assert_eq!(card_image(&urls, 4), Some("b.png"));
    assert_eq!(card_image(&[], 2), None);
}

#[test]
fn text_mask_covers_measured_text() {
    assert_eq!(text_mask_size(311.2, 100.0, 1.5), (312, 150));
    assert_eq!(text_mask_size(0.0, 100.0, 1.5), (1, 150));
    assert_eq!(text_mask_size(f64::NAN, 10.0, 1.0), (1, 10));
}
