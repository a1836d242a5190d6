// Host-side tests for the web constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_constants_are_positive() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < 1.0);
    assert!(STATS_REFRESH_MS > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn text_mask_is_taller_than_the_font() {
    assert!(TEXT_FONT_PX > 0.0);
    assert!(TEXT_LINE_FACTOR >= 1.0);
    assert!(!TEXT_DEFAULT.is_empty());
}

#[test]
fn element_ids_are_distinct() {
    let mut ids = vec![
        ID_CARD_STREAM,
        ID_CARD_LINE,
        ID_DRIFT_CANVAS,
        ID_SCANNER_CANVAS,
        ID_SPEED_VALUE,
        ID_BTN_PAUSE,
        ID_BTN_RESET,
        ID_BTN_DIRECTION,
        ID_EFFECT_CANVAS,
        ID_FPS_VALUE,
        ID_PARTICLE_COUNT,
    ];
    let n = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), n);
}

#[test]
fn clip_properties_are_custom_properties() {
    assert!(CSS_CLIP_RIGHT.starts_with("--"));
    assert!(CSS_CLIP_LEFT.starts_with("--"));
}

#[test]
fn card_images_are_relative_pngs() {
    for url in CARD_IMAGE_URLS {
        assert!(url.ends_with(".png"), "{url}");
        assert!(!url.starts_with('/'), "{url}");
    }
}
