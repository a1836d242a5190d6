// Host-side tests for the live configuration records.

use scanfx_core::{ColorMode, FieldConfig, FxError, RainConfig};

#[test]
fn partial_json_keeps_defaults() {
    let rain = RainConfig::from_json(r#"{"colorMode":"rainbow"}"#).unwrap();
    assert_eq!(rain.color_mode, ColorMode::Rainbow);
    assert_eq!(rain.font_size, 16.0);
    assert_eq!(rain.density, 0.8);

    let field = FieldConfig::from_json(r#"{"mouseRadius": 80}"#).unwrap();
    assert_eq!(field.mouse_radius, 80.0);
    assert_eq!(field, FieldConfig {
        mouse_radius: 80.0,
        ..FieldConfig::default()
    });
}

#[test]
fn degenerate_values_are_clamped() {
    let rain = RainConfig::from_json(r#"{"speed": 50, "fontSize": 0, "density": 0}"#).unwrap();
    assert_eq!(rain.speed, 10.0);
    assert_eq!(rain.font_size, 4.0);
    assert_eq!(rain.density, 0.05);

    let field = FieldConfig::from_json(
        r#"{"particleCount": 90000, "connectionDistance": -1, "mouseRadius": -20, "particleSize": 0}"#,
    )
    .unwrap();
    assert_eq!(field.particle_count, 5_000);
    assert_eq!(field.connection_distance, 0.0);
    assert_eq!(field.mouse_radius, 0.0);
    assert_eq!(field.particle_size, 0.1);
}

#[test]
fn non_finite_values_fall_back() {
    let rain = RainConfig {
        speed: f32::NAN,
        font_size: f32::INFINITY,
        ..RainConfig::default()
    }
    .sanitized();
    assert_eq!(rain.speed, 1.0);
    assert_eq!(rain.font_size, 16.0);
}

#[test]
fn color_modes_parse_case_insensitively() {
    assert_eq!(" Purple ".parse::<ColorMode>().unwrap(), ColorMode::Purple);
    assert_eq!("RED".parse::<ColorMode>().unwrap(), ColorMode::Red);
    assert_eq!(ColorMode::default(), ColorMode::Classic);
    match "matrix".parse::<ColorMode>() {
        Err(FxError::UnknownColorMode(s)) => assert_eq!(s, "matrix"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn json_color_modes_ignore_case() {
    let rain = RainConfig::from_json(r#"{"colorMode":"Rainbow"}"#).unwrap();
    assert_eq!(rain.color_mode, ColorMode::Rainbow);
    let rain = RainConfig::from_json(r#"{"colorMode":" PURPLE "}"#).unwrap();
    assert_eq!(rain.color_mode, ColorMode::Purple);
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        RainConfig::from_json("{speed:"),
        Err(FxError::Config(_))
    ));
    assert!(matches!(
        RainConfig::from_json(r#"{"colorMode":"neon"}"#),
        Err(FxError::Config(_))
    ));
}
